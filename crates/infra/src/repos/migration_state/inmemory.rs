use super::IMigrationStateRepo;
use crate::repos::shared::inmemory_repo::*;
use kennel_reminders_domain::{MigrationState, ID};

#[derive(Debug, Clone)]
struct UserMigrationState {
    user_id: ID,
    state: MigrationState,
}

pub struct InMemoryMigrationStateRepo {
    states: std::sync::Mutex<Vec<UserMigrationState>>,
}

impl InMemoryMigrationStateRepo {
    pub fn new() -> Self {
        Self {
            states: std::sync::Mutex::new(Vec::new()),
        }
    }

    fn update<U: FnOnce(&mut MigrationState)>(&self, user_id: &ID, update: U) -> MigrationState {
        insert_if_absent(
            &UserMigrationState {
                user_id: user_id.clone(),
                state: MigrationState::default(),
            },
            &self.states,
            |s| s.user_id == *user_id,
        );
        update_one(&self.states, |s| s.user_id == *user_id, |s| update(&mut s.state))
            .map(|s| s.state)
            .unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl IMigrationStateRepo for InMemoryMigrationStateRepo {
    async fn find(&self, user_id: &ID) -> anyhow::Result<MigrationState> {
        Ok(find_one_by(&self.states, |s| s.user_id == *user_id)
            .map(|s| s.state)
            .unwrap_or_default())
    }

    async fn mark_migrated(&self, user_id: &ID) -> anyhow::Result<bool> {
        let mut transitioned = false;
        self.update(user_id, |state| {
            transitioned = !state.migrated;
            state.migrated = true;
        });
        Ok(transitioned)
    }

    async fn record_failure(&self, user_id: &ID) -> anyhow::Result<i64> {
        let state = self.update(user_id, |state| state.failed_attempts += 1);
        Ok(state.failed_attempts)
    }
}
