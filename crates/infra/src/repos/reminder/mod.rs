mod inmemory;
mod postgres;

pub use inmemory::InMemoryReminderRepo;
use kennel_reminders_domain::{CustomReminder, NewCustomReminder, ID};
pub use postgres::PostgresReminderRepo;

/// Durable store of user authored reminders
#[async_trait::async_trait]
pub trait IReminderRepo: Send + Sync {
    /// Stores a new reminder and returns it with the id the store assigned
    async fn insert(&self, reminder: &NewCustomReminder) -> anyhow::Result<CustomReminder>;
    /// Stores a reminder that already has an id. An existing reminder with
    /// the same id is kept as it is and counts as success.
    async fn upsert(&self, reminder: &CustomReminder) -> anyhow::Result<String>;
    async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<CustomReminder>>;
    async fn find(&self, user_id: &ID, reminder_id: &str) -> anyhow::Result<Option<CustomReminder>>;
    async fn delete(&self, user_id: &ID, reminder_id: &str) -> anyhow::Result<Option<CustomReminder>>;
}
