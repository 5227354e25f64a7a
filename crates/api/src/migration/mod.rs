mod migrate_legacy_reminders;

pub use migrate_legacy_reminders::{MigrateLegacyRemindersUseCase, MigrationOutcome};
