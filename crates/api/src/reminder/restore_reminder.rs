use crate::error::ReminderError;
use crate::shared::usecase::UseCase;
use kennel_reminders_domain::{ReminderStatus, ID};
use kennel_reminders_infra::KennelContext;

/// Brings back a system reminder that was deleted
#[derive(Debug)]
pub struct RestoreReminderUseCase {
    pub user_id: ID,
    pub reminder_id: String,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotDeleted(String),
    StorageError,
}

impl From<UseCaseError> for ReminderError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotDeleted(id) => {
                Self::NotFound(format!("A deleted reminder with id: {}, was not found.", id))
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for RestoreReminderUseCase {
    type Response = ReminderStatus;

    type Error = UseCaseError;

    const NAME: &'static str = "RestoreReminder";

    async fn execute(&mut self, ctx: &KennelContext) -> Result<Self::Response, Self::Error> {
        let mut status = match ctx
            .repos
            .reminder_statuses
            .find(&self.user_id, &self.reminder_id)
            .await
        {
            Ok(Some(status)) if status.is_deleted => status,
            Ok(_) => return Err(UseCaseError::NotDeleted(self.reminder_id.clone())),
            Err(_) => return Err(UseCaseError::StorageError),
        };
        status.is_deleted = false;
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
    async fn it_restores_and_keeps_completion() {
        let ctx = setup();
        let user_id = ID::default();
        let mut status = ReminderStatus::new(user_id.clone(), "heat-0123456789abcdef");
        status.is_completed = true;
        status.is_deleted = true;
        ctx.repos.reminder_statuses.upsert(&status).await.unwrap();

        let restored = execute(
            RestoreReminderUseCase {
                user_id: user_id.clone(),
                reminder_id: status.reminder_id.clone(),
            },
            &ctx,
        )
        .await
        .expect("To restore reminder");
        assert!(!restored.is_deleted);
        assert!(restored.is_completed);
    }

    #[tokio::test]
    async fn it_rejects_reminders_that_are_not_deleted() {
        let ctx = setup();
        let res = execute(
            RestoreReminderUseCase {
                user_id: ID::default(),
                reminder_id: "heat-0123456789abcdef".into(),
            },
            &ctx,
        )
        .await;
        assert_eq!(
            res.unwrap_err(),
            UseCaseError::NotDeleted("heat-0123456789abcdef".into())
        );
    }
}
