use super::IReminderStatusRepo;
use crate::repos::shared::inmemory_repo::*;
use kennel_reminders_domain::{ReminderStatus, ID};
use std::collections::HashMap;

pub struct InMemoryReminderStatusRepo {
    statuses: std::sync::Mutex<Vec<ReminderStatus>>,
}

impl InMemoryReminderStatusRepo {
    pub fn new() -> Self {
        Self {
            statuses: std::sync::Mutex::new(Vec::new()),
        }
    }
}

fn same_key(a: &ReminderStatus, user_id: &ID, reminder_id: &str) -> bool {
    a.user_id == *user_id && a.reminder_id == reminder_id
}

#[async_trait::async_trait]
impl IReminderStatusRepo for InMemoryReminderStatusRepo {
    async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<HashMap<String, ReminderStatus>> {
        Ok(find_by(&self.statuses, |s| s.user_id == *user_id)
            .into_iter()
            .map(|s| (s.reminder_id.clone(), s))
            .collect())
    }

    async fn find(&self, user_id: &ID, reminder_id: &str) -> anyhow::Result<Option<ReminderStatus>> {
        Ok(find_one_by(&self.statuses, |s| same_key(s, user_id, reminder_id)))
    }

    async fn upsert(&self, status: &ReminderStatus) -> anyhow::Result<()> {
        upsert_by(status, &self.statuses, |s| {
            same_key(s, &status.user_id, &status.reminder_id)
        });
        Ok(())
    }

    async fn insert_if_absent(&self, status: &ReminderStatus) -> anyhow::Result<bool> {
        Ok(insert_if_absent(status, &self.statuses, |s| {
            same_key(s, &status.user_id, &status.reminder_id)
        }))
    }

    async fn delete(&self, user_id: &ID, reminder_id: &str) -> anyhow::Result<Option<ReminderStatus>> {
        let deleted = find_and_delete_by(&self.statuses, |s| same_key(s, user_id, reminder_id));
        Ok(deleted.into_iter().next())
    }
}
