use crate::shared::entity::ID;
use std::sync::Mutex;

/// Persisted migration state of a user
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MigrationState {
    pub migrated: bool,
    /// Runs that failed before the migration completed
    pub failed_attempts: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationPhase {
    NotAttempted,
    InProgress,
    Complete,
}

/// Migration progress within one session of a logged in user.
///
/// Only one run may be in progress per session. A failed run returns the
/// session to `NotAttempted`, the persisted flag stays unset and a later
/// trigger starts over.
#[derive(Debug)]
pub struct MigrationSession {
    user_id: ID,
    phase: Mutex<MigrationPhase>,
}

impl MigrationSession {
    pub fn new(user_id: ID) -> Self {
        Self {
            user_id,
            phase: Mutex::new(MigrationPhase::NotAttempted),
        }
    }

    pub fn user_id(&self) -> &ID {
        &self.user_id
    }

    pub fn phase(&self) -> MigrationPhase {
        *self.phase.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Moves `NotAttempted -> InProgress`. Returns false if a run is already
    /// in progress or done.
    pub fn try_begin(&self) -> bool {
        let mut phase = self.phase.lock().unwrap_or_else(|e| e.into_inner());
        if *phase != MigrationPhase::NotAttempted {
            return false;
        }
        *phase = MigrationPhase::InProgress;
        true
    }

    pub fn complete(&self) {
        *self.phase.lock().unwrap_or_else(|e| e.into_inner()) = MigrationPhase::Complete;
    }

    pub fn abort(&self) {
        let mut phase = self.phase.lock().unwrap_or_else(|e| e.into_inner());
        if *phase == MigrationPhase::InProgress {
            *phase = MigrationPhase::NotAttempted;
        }
    }
}
