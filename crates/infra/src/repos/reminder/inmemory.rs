use super::IReminderRepo;
use crate::repos::shared::inmemory_repo::*;
use kennel_reminders_domain::{CustomReminder, NewCustomReminder, ID};

pub struct InMemoryReminderRepo {
    reminders: std::sync::Mutex<Vec<CustomReminder>>,
}

impl InMemoryReminderRepo {
    pub fn new() -> Self {
        Self {
            reminders: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IReminderRepo for InMemoryReminderRepo {
    async fn insert(&self, reminder: &NewCustomReminder) -> anyhow::Result<CustomReminder> {
        let reminder = reminder.clone().with_id(ID::new().as_string());
        insert(&reminder, &self.reminders);
        Ok(reminder)
    }

    async fn upsert(&self, reminder: &CustomReminder) -> anyhow::Result<String> {
        insert_if_absent(reminder, &self.reminders, |r| {
            r.user_id == reminder.user_id && r.id == reminder.id
        });
        Ok(reminder.id.clone())
    }

    async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<CustomReminder>> {
        Ok(find_by(&self.reminders, |r| r.user_id == *user_id))
    }

    async fn find(&self, user_id: &ID, reminder_id: &str) -> anyhow::Result<Option<CustomReminder>> {
        Ok(find_one_by(&self.reminders, |r| {
            r.user_id == *user_id && r.id == reminder_id
        }))
    }

    async fn delete(&self, user_id: &ID, reminder_id: &str) -> anyhow::Result<Option<CustomReminder>> {
        let deleted = find_and_delete_by(&self.reminders, |r| {
            r.user_id == *user_id && r.id == reminder_id
        });
        Ok(deleted.into_iter().next())
    }
}
