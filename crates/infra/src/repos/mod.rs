mod legacy;
mod migration_state;
mod reminder;
mod reminder_status;
mod shared;

pub use legacy::{
    FileLegacyReminderStore, ILegacyReminderStore, InMemoryLegacyReminderStore,
    DEFAULT_LEGACY_FILE,
};
pub use migration_state::{
    IMigrationStateRepo, InMemoryMigrationStateRepo, PostgresMigrationStateRepo,
};
pub use reminder::{IReminderRepo, InMemoryReminderRepo, PostgresReminderRepo};
pub use reminder_status::{
    IReminderStatusRepo, InMemoryReminderStatusRepo, PostgresReminderStatusRepo,
};
use sqlx::postgres::PgPoolOptions;
use std::{path::PathBuf, sync::Arc};
use tracing::info;

#[derive(Clone)]
pub struct Repos {
    pub reminders: Arc<dyn IReminderRepo>,
    pub reminder_statuses: Arc<dyn IReminderStatusRepo>,
    pub migration_states: Arc<dyn IMigrationStateRepo>,
    pub legacy_reminders: Arc<dyn ILegacyReminderStore>,
}

impl Repos {
    pub async fn create_postgres(
        connection_string: &str,
        legacy_reminders_path: Option<PathBuf>,
    ) -> anyhow::Result<Self> {
        info!("DB CHECKING CONNECTION ...");
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(connection_string)
            .await?;
        info!("DB CHECKING CONNECTION ... [done]");

        let legacy_path =
            legacy_reminders_path.unwrap_or_else(|| PathBuf::from(DEFAULT_LEGACY_FILE));
        Ok(Self {
            reminders: Arc::new(PostgresReminderRepo::new(pool.clone())),
            reminder_statuses: Arc::new(PostgresReminderStatusRepo::new(pool.clone())),
            migration_states: Arc::new(PostgresMigrationStateRepo::new(pool)),
            legacy_reminders: Arc::new(FileLegacyReminderStore::new(legacy_path)),
        })
    }

    pub fn create_inmemory() -> Self {
        Self {
            reminders: Arc::new(InMemoryReminderRepo::new()),
            reminder_statuses: Arc::new(InMemoryReminderStatusRepo::new()),
            migration_states: Arc::new(InMemoryMigrationStateRepo::new()),
            legacy_reminders: Arc::new(InMemoryLegacyReminderStore::new()),
        }
    }
}
