use crate::error::ReminderError;
use crate::shared::usecase::UseCase;
use kennel_reminders_domain::{
    apply_statuses, merge_candidates, rules::generate_all, sort_for_display, without_statuses,
    DomainSnapshot, FinalReminder, RejectedRecord, ReminderCandidate, RuleFailure, ID,
};
use kennel_reminders_infra::KennelContext;
use tracing::warn;

/// Runs the whole reminder pipeline for a user: rule generation, merge with
/// the custom reminders, status overlay and display sorting
#[derive(Debug)]
pub struct GetRemindersUseCase {
    pub user_id: ID,
    pub snapshot: DomainSnapshot,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RemindersView {
    pub reminders: Vec<FinalReminder>,
    /// Set when a store could not be read. The view then lacks custom
    /// reminders or completion flags but is otherwise usable.
    pub stale: bool,
    pub failures: Vec<RuleFailure>,
    /// Snapshot records that could not be read and took no part in the run
    pub rejected: Vec<RejectedRecord>,
}

/// Store failures degrade the view instead of failing the use case
#[derive(Debug)]
pub enum UseCaseError {}

impl From<UseCaseError> for ReminderError {
    fn from(e: UseCaseError) -> Self {
        match e {}
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetRemindersUseCase {
    type Response = RemindersView;

    type Error = UseCaseError;

    const NAME: &'static str = "GetReminders";

    async fn execute(&mut self, ctx: &KennelContext) -> Result<Self::Response, Self::Error> {
        let today = ctx.today();
        let settings = ctx.config.rule_settings();
        let mut stale = false;

        for record in &self.snapshot.rejected {
            warn!(
                "Skipped unreadable {} {:?} in the snapshot: {}",
                record.kind, record.entity_id, record.error
            );
        }

        let custom: Vec<ReminderCandidate> =
            match ctx.repos.reminders.find_by_user(&self.user_id).await {
                Ok(reminders) => reminders.iter().map(|r| r.to_candidate()).collect(),
                Err(e) => {
                    warn!("Unable to read custom reminders, continuing without them: {:?}", e);
                    stale = true;
                    Vec::new()
                }
            };

        let mut failures = Vec::new();
        let mut sources = vec![custom];
        for (generator, output) in generate_all(&self.snapshot, today, &settings) {
            for failure in &output.failures {
                warn!(
                    "Rule generator {} skipped entity {}: {}",
                    generator, failure.entity_id, failure.error
                );
            }
            failures.extend(output.failures);
            sources.push(output.candidates);
        }
        let merged = merge_candidates(sources);

        let mut reminders = match ctx.repos.reminder_statuses.find_by_user(&self.user_id).await {
            Ok(statuses) => apply_statuses(merged, &statuses),
            Err(e) => {
                warn!("Unable to read reminder statuses, showing reminders without them: {:?}", e);
                stale = true;
                without_statuses(merged)
            }
        };
        sort_for_display(&mut reminders);

        Ok(RemindersView {
            reminders,
            stale,
            failures,
            rejected: self.snapshot.rejected.clone(),
        })
    }
}
