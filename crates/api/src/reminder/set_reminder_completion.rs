use crate::error::ReminderError;
use crate::shared::usecase::UseCase;
use kennel_reminders_domain::{ReminderStatus, ID};
use kennel_reminders_infra::KennelContext;

/// Marks a reminder as done or not done. Works for system and custom
/// reminders alike since the status is keyed by reminder id only.
#[derive(Debug)]
pub struct SetReminderCompletionUseCase {
    pub user_id: ID,
    pub reminder_id: String,
    pub is_completed: bool,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    InvalidReminderId,
    StorageError,
}

impl From<UseCaseError> for ReminderError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidReminderId => {
                Self::BadClientData("The reminder id must not be empty".into())
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for SetReminderCompletionUseCase {
    type Response = ReminderStatus;

    type Error = UseCaseError;

    const NAME: &'static str = "SetReminderCompletion";

    async fn execute(&mut self, ctx: &KennelContext) -> Result<Self::Response, Self::Error> {
        if self.reminder_id.trim().is_empty() {
            return Err(UseCaseError::InvalidReminderId);
        }

        let mut status = ctx
            .repos
            .reminder_statuses
            .find(&self.user_id, &self.reminder_id)
            .await
            .map_err(|_| UseCaseError::StorageError)?
            .unwrap_or_else(|| ReminderStatus::new(self.user_id.clone(), &self.reminder_id));
        status.is_completed = self.is_completed;
        status.updated = ctx.sys.get_timestamp_millis();

        ctx.repos
            .reminder_statuses
            .upsert(&status)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        Ok(status)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::reminder::test_helpers::*;
    use crate::shared::usecase::execute;

    #[tokio::test]
    async fn it_toggles_completion_and_keeps_deletion() {
        let ctx = setup();
        let user_id = ID::default();
        let mut deleted = ReminderStatus::new(user_id.clone(), "birthday-0123456789abcdef");
        deleted.is_deleted = true;
        ctx.repos.reminder_statuses.upsert(&deleted).await.unwrap();

        let status = execute(
            SetReminderCompletionUseCase {
                user_id: user_id.clone(),
                reminder_id: deleted.reminder_id.clone(),
                is_completed: true,
            },
            &ctx,
        )
        .await
        .expect("To complete reminder");
        assert!(status.is_completed);
        assert!(status.is_deleted);

        let status = execute(
            SetReminderCompletionUseCase {
                user_id: user_id.clone(),
                reminder_id: deleted.reminder_id.clone(),
                is_completed: false,
            },
            &ctx,
        )
        .await
        .expect("To reopen reminder");
        assert!(!status.is_completed);

        let stored = ctx
            .repos
            .reminder_statuses
            .find(&user_id, &deleted.reminder_id)
            .await
            .unwrap();
        assert_eq!(stored, Some(status));
    }

    #[tokio::test]
    async fn it_creates_missing_statuses() {
        let ctx = setup();
        let user_id = ID::default();
        let status = execute(
            SetReminderCompletionUseCase {
                user_id: user_id.clone(),
                reminder_id: "heat-0123456789abcdef".into(),
                is_completed: true,
            },
            &ctx,
        )
        .await
        .unwrap();
        assert!(status.is_completed);
        assert!(!status.is_deleted);
        assert_eq!(status.updated, ctx.sys.get_timestamp_millis());
    }

    #[tokio::test]
    async fn it_rejects_empty_ids() {
        let ctx = setup();
        let res = execute(
            SetReminderCompletionUseCase {
                user_id: ID::default(),
                reminder_id: " ".into(),
                is_completed: true,
            },
            &ctx,
        )
        .await;
        assert_eq!(res.unwrap_err(), UseCaseError::InvalidReminderId);
    }
}
