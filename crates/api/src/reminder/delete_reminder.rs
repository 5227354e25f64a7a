use super::subscribers::RemoveStatusOnCustomReminderDeleted;
use crate::error::ReminderError;
use crate::shared::usecase::{Subscriber, UseCase};
use kennel_reminders_domain::{CustomReminder, ReminderStatus, ID};
use kennel_reminders_infra::KennelContext;

/// Custom reminders are removed from the reminder store. System reminders
/// are regenerated on every run, so they are hidden with a deleted flag
/// instead.
#[derive(Debug)]
pub struct DeleteReminderUseCase {
    pub user_id: ID,
    pub reminder_id: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DeletedReminder {
    Custom(CustomReminder),
    System(ReminderStatus),
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
impl UseCase for DeleteReminderUseCase {
    type Response = DeletedReminder;

    type Error = UseCaseError;

    const NAME: &'static str = "DeleteReminder";

    async fn execute(&mut self, ctx: &KennelContext) -> Result<Self::Response, Self::Error> {
        if self.reminder_id.trim().is_empty() {
            return Err(UseCaseError::InvalidReminderId);
        }

        let deleted = ctx
            .repos
            .reminders
            .delete(&self.user_id, &self.reminder_id)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        if let Some(reminder) = deleted {
            return Ok(DeletedReminder::Custom(reminder));
        }

        let mut status = ctx
            .repos
            .reminder_statuses
            .find(&self.user_id, &self.reminder_id)
            .await
            .map_err(|_| UseCaseError::StorageError)?
            .unwrap_or_else(|| ReminderStatus::new(self.user_id.clone(), &self.reminder_id));
        status.is_deleted = true;
        status.updated = ctx.sys.get_timestamp_millis();
        ctx.repos
            .reminder_statuses
            .upsert(&status)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(DeletedReminder::System(status))
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(RemoveStatusOnCustomReminderDeleted)]
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::reminder::test_helpers::*;
    use crate::shared::usecase::execute;
    use kennel_reminders_domain::{NewCustomReminder, Priority, ReminderType};

    #[tokio::test]
    async fn it_hard_deletes_custom_reminders() {
        let ctx = setup();
        let user_id = ID::default();
        let reminder = ctx
            .repos
            .reminders
            .insert(&NewCustomReminder {
                user_id: user_id.clone(),
                title: "Order food".into(),
                description: "".into(),
                due_date: today(),
                priority: Priority::Low,
                reminder_type: ReminderType::Custom,
                related_id: None,
                created: 0,
            })
            .await
            .unwrap();
        let mut status = ReminderStatus::new(user_id.clone(), &reminder.id);
        status.is_completed = true;
        ctx.repos.reminder_statuses.upsert(&status).await.unwrap();

        let res = execute(
            DeleteReminderUseCase {
                user_id: user_id.clone(),
                reminder_id: reminder.id.clone(),
            },
            &ctx,
        )
        .await
        .expect("To delete reminder");
        assert_eq!(res, DeletedReminder::Custom(reminder.clone()));

        assert!(ctx.repos.reminders.find_by_user(&user_id).await.unwrap().is_empty());
        assert!(ctx
            .repos
            .reminder_statuses
            .find(&user_id, &reminder.id)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn it_soft_deletes_system_reminders() {
        let ctx = setup();
        let user_id = ID::default();
        let mut completed = ReminderStatus::new(user_id.clone(), "vaccination-0123456789abcdef");
        completed.is_completed = true;
        ctx.repos.reminder_statuses.upsert(&completed).await.unwrap();

        let res = execute(
            DeleteReminderUseCase {
                user_id: user_id.clone(),
                reminder_id: completed.reminder_id.clone(),
            },
            &ctx,
        )
        .await
        .expect("To delete reminder");

        match res {
            DeletedReminder::System(status) => {
                assert!(status.is_deleted);
                assert!(status.is_completed);
            }
            other => panic!("Expected a soft delete, got {:?}", other),
        }
        let stored = ctx
            .repos
            .reminder_statuses
            .find(&user_id, &completed.reminder_id)
            .await
            .unwrap()
            .unwrap();
        assert!(stored.is_deleted);
    }
}
