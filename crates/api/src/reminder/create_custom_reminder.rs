use crate::error::ReminderError;
use crate::shared::usecase::UseCase;
use chrono::NaiveDate;
use kennel_reminders_domain::{CustomReminder, NewCustomReminder, Priority, ReminderType, ID};
use kennel_reminders_infra::KennelContext;

#[derive(Debug)]
pub struct CreateCustomReminderUseCase {
    pub user_id: ID,
    pub title: String,
    pub description: String,
    pub due_date: NaiveDate,
    pub priority: Priority,
    /// A custom reminder may take the type of a system reminder. Together
    /// with `related_id` it then replaces the generated one.
    pub reminder_type: ReminderType,
    pub related_id: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    EmptyTitle,
    StorageError,
}

impl From<UseCaseError> for ReminderError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::EmptyTitle => {
                Self::BadClientData("A reminder must have a title".into())
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateCustomReminderUseCase {
    type Response = CustomReminder;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateCustomReminder";

    async fn execute(&mut self, ctx: &KennelContext) -> Result<Self::Response, Self::Error> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(UseCaseError::EmptyTitle);
        }

        let reminder = NewCustomReminder {
            user_id: self.user_id.clone(),
            title: title.to_string(),
            description: self.description.trim().to_string(),
            due_date: self.due_date,
            priority: self.priority,
            reminder_type: self.reminder_type,
            related_id: self.related_id.clone().filter(|id| !id.is_empty()),
            created: ctx.sys.get_timestamp_millis(),
        };
        ctx.repos
            .reminders
            .insert(&reminder)
            .await
            .map_err(|_| UseCaseError::StorageError)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::reminder::test_helpers::*;
    use crate::shared::usecase::execute;
    use std::sync::Arc;

    fn usecase(user_id: &ID, title: &str) -> CreateCustomReminderUseCase {
        CreateCustomReminderUseCase {
            user_id: user_id.clone(),
            title: title.into(),
            description: " Two bags ".into(),
            due_date: today(),
            priority: Priority::Low,
            reminder_type: ReminderType::Custom,
            related_id: Some("".into()),
        }
    }

    #[tokio::test]
    async fn it_creates_a_reminder() {
        let ctx = setup();
        let user_id = ID::default();

        let reminder = execute(usecase(&user_id, " Order food "), &ctx)
            .await
            .expect("To create reminder");
        assert_eq!(reminder.title, "Order food");
        assert_eq!(reminder.description, "Two bags");
        assert_eq!(reminder.related_id, None);
        assert_eq!(reminder.created, ctx.sys.get_timestamp_millis());

        let stored = ctx.repos.reminders.find_by_user(&user_id).await.unwrap();
        assert_eq!(stored, vec![reminder]);
    }

    #[tokio::test]
    async fn it_rejects_an_empty_title() {
        let ctx = setup();
        let res = execute(usecase(&ID::default(), "  "), &ctx).await;
        assert_eq!(res.unwrap_err(), UseCaseError::EmptyTitle);
    }

    #[tokio::test]
    async fn storage_errors_are_reported() {
        let mut ctx = setup();
        ctx.repos.reminders = Arc::new(FailingReminderRepo);
        let res = execute(usecase(&ID::default(), "Order food"), &ctx).await;
        assert_eq!(
            ReminderError::from(res.unwrap_err()),
            ReminderError::InternalError
        );
    }
}
