use crate::error::ReminderError;
use crate::shared::usecase::UseCase;
use kennel_reminders_domain::{LegacyReminderData, MigrationSession};
use kennel_reminders_infra::KennelContext;
use std::sync::Arc;
use tracing::{info, warn};

/// Moves the reminders and statuses the previous client version kept on the
/// device into the durable stores.
///
/// Every write tolerates an existing row, so a run that failed halfway or
/// that races a run from another session can simply be repeated. Data that is
/// already durable wins over the legacy copy. The legacy data is only cleared
/// once the migrated flag is stored.
#[derive(Debug)]
pub struct MigrateLegacyRemindersUseCase {
    pub session: Arc<MigrationSession>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MigrationOutcome {
    /// This session already ran or is running the migration
    Skipped,
    /// The stored flag was already set by an earlier session
    AlreadyMigrated,
    Migrated {
        reminders: usize,
        statuses: usize,
    },
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    /// The run failed and will be retried by a later trigger. Once
    /// `retries_exhausted` is set the user should be told that their old
    /// reminders have not been moved yet.
    MigrationFailed {
        failed_attempts: i64,
        retries_exhausted: bool,
    },
}

impl From<UseCaseError> for ReminderError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::MigrationFailed {
                failed_attempts, ..
            } => Self::MigrationFailed(format!(
                "The migration has failed {} time(s) and will be retried",
                failed_attempts
            )),
        }
    }
}

impl MigrateLegacyRemindersUseCase {
    async fn run(&self, ctx: &KennelContext) -> anyhow::Result<MigrationOutcome> {
        let user_id = self.session.user_id();
        let state = ctx.repos.migration_states.find(user_id).await?;
        if state.migrated {
            self.clear_legacy(ctx).await;
            return Ok(MigrationOutcome::AlreadyMigrated);
        }

        let legacy = ctx.repos.legacy_reminders.load().await?;
        let (reminders, statuses) = self.store(&legacy, ctx).await?;

        if !ctx.repos.migration_states.mark_migrated(user_id).await? {
            info!("Migration flag for user {} was set by another session", user_id);
        }
        self.clear_legacy(ctx).await;

        Ok(MigrationOutcome::Migrated {
            reminders,
            statuses,
        })
    }

    async fn store(
        &self,
        legacy: &LegacyReminderData,
        ctx: &KennelContext,
    ) -> anyhow::Result<(usize, usize)> {
        let user_id = self.session.user_id();
        let migrated_at = ctx.sys.get_timestamp_millis();

        for entry in &legacy.rejected {
            warn!(
                "Legacy entry {} {:?} of user {} is unreadable and is not migrated: {}",
                entry.kind, entry.entity_id, user_id, entry.error
            );
        }
        let reminders = legacy.custom_reminders_for(user_id, migrated_at);
        for reminder in &reminders {
            ctx.repos.reminders.upsert(reminder).await?;
        }
        let statuses = legacy.statuses_for(user_id, migrated_at);
        for status in &statuses {
            ctx.repos.reminder_statuses.insert_if_absent(status).await?;
        }
        Ok((reminders.len(), statuses.len()))
    }

    /// The flag is durable at this point, a later run clears what is left
    async fn clear_legacy(&self, ctx: &KennelContext) {
        if let Err(e) = ctx.repos.legacy_reminders.clear().await {
            warn!("Unable to clear legacy reminders: {:?}", e);
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for MigrateLegacyRemindersUseCase {
    type Response = MigrationOutcome;

    type Error = UseCaseError;

    const NAME: &'static str = "MigrateLegacyReminders";

    async fn execute(&mut self, ctx: &KennelContext) -> Result<Self::Response, Self::Error> {
        if !self.session.try_begin() {
            return Ok(MigrationOutcome::Skipped);
        }

        match self.run(ctx).await {
            Ok(outcome) => {
                self.session.complete();
                Ok(outcome)
            }
            Err(e) => {
                self.session.abort();
                let user_id = self.session.user_id();
                warn!("Migration of legacy reminders for user {} failed: {:?}", user_id, e);
                let failed_attempts = match ctx.repos.migration_states.record_failure(user_id).await
                {
                    Ok(attempts) => attempts,
                    Err(e) => {
                        warn!("Unable to record the failed migration: {:?}", e);
                        0
                    }
                };
                let retries_exhausted = failed_attempts >= ctx.config.migration_max_attempts;
                if retries_exhausted {
                    warn!(
                        "Migration of legacy reminders for user {} has failed {} times",
                        user_id, failed_attempts
                    );
                }
                Err(UseCaseError::MigrationFailed {
                    failed_attempts,
                    retries_exhausted,
                })
            }
        }
    }
}
