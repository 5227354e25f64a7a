mod inmemory;
mod postgres;

pub use inmemory::InMemoryReminderStatusRepo;
use kennel_reminders_domain::{ReminderStatus, ID};
pub use postgres::PostgresReminderStatusRepo;
use std::collections::HashMap;

/// Durable store of the completed and deleted flags a user set on
/// reminders, keyed by reminder id
#[async_trait::async_trait]
pub trait IReminderStatusRepo: Send + Sync {
    async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<HashMap<String, ReminderStatus>>;
    async fn find(&self, user_id: &ID, reminder_id: &str) -> anyhow::Result<Option<ReminderStatus>>;
    /// Creates the status or overwrites the stored flags
    async fn upsert(&self, status: &ReminderStatus) -> anyhow::Result<()>;
    /// Creates the status unless one is already stored. Returns true if it
    /// was created.
    async fn insert_if_absent(&self, status: &ReminderStatus) -> anyhow::Result<bool>;
    async fn delete(&self, user_id: &ID, reminder_id: &str) -> anyhow::Result<Option<ReminderStatus>>;
}
