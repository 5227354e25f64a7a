mod file;
mod inmemory;

pub use file::FileLegacyReminderStore;
pub use inmemory::InMemoryLegacyReminderStore;
use kennel_reminders_domain::LegacyReminderData;

pub const DEFAULT_LEGACY_FILE: &str = "legacy_reminders.json";

/// Reminder data kept on the device by the previous client version
#[async_trait::async_trait]
pub trait ILegacyReminderStore: Send + Sync {
    /// An absent store reads as empty
    async fn load(&self) -> anyhow::Result<LegacyReminderData>;
    async fn clear(&self) -> anyhow::Result<()>;
}
