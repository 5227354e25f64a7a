mod config;
mod repos;
mod system;

use chrono::{NaiveDate, TimeZone, Utc};
pub use config::Config;
pub use repos::*;
use sqlx::migrate::MigrateError;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
pub use system::{ISys, MockSys, RealSys};
use tracing::info;

const PSQL_CONNECTION_STRING: &str = "DATABASE_URL";

#[derive(Clone)]
pub struct KennelContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
}

impl KennelContext {
    /// In-memory repositories with the real clock. Useful for tests and
    /// for running without a database.
    pub fn create_inmemory() -> Self {
        Self {
            repos: Repos::create_inmemory(),
            config: Config::new(),
            sys: Arc::new(RealSys {}),
        }
    }

    async fn create_postgres(connection_string: &str) -> anyhow::Result<Self> {
        let config = Config::new();
        let repos =
            Repos::create_postgres(connection_string, config.legacy_reminders_path.clone()).await?;
        Ok(Self {
            repos,
            config,
            sys: Arc::new(RealSys {}),
        })
    }

    /// The calendar day in the kennel's timezone
    pub fn today(&self) -> NaiveDate {
        let now = self.sys.get_timestamp_millis();
        match Utc.timestamp_millis_opt(now).single() {
            Some(now) => now.with_timezone(&self.config.timezone).date_naive(),
            None => Utc::now().with_timezone(&self.config.timezone).date_naive(),
        }
    }
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> anyhow::Result<KennelContext> {
    match std::env::var(PSQL_CONNECTION_STRING) {
        Ok(connection_string) => {
            info!("Using postgres repositories");
            KennelContext::create_postgres(&connection_string).await
        }
        Err(_) => {
            info!(
                "Did not find {} environment variable. Using in-memory repositories.",
                PSQL_CONNECTION_STRING
            );
            Ok(KennelContext::create_inmemory())
        }
    }
}

/// Applies the embedded schema migrations. Does nothing without a database.
pub async fn run_migration() -> Result<(), MigrateError> {
    let connection_string = match std::env::var(PSQL_CONNECTION_STRING) {
        Ok(connection_string) => connection_string,
        Err(_) => return Ok(()),
    };
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&connection_string)
        .await?;

    sqlx::migrate!().run(&pool).await
}

/// Contexts the repository tests run against: always the in-memory one and
/// the postgres one as well when a database is configured
#[cfg(test)]
pub(crate) async fn create_test_contexts() -> Vec<KennelContext> {
    let mut contexts = vec![KennelContext::create_inmemory()];
    if let Ok(connection_string) = std::env::var(PSQL_CONNECTION_STRING) {
        run_migration().await.expect("To migrate the database");
        contexts.push(
            KennelContext::create_postgres(&connection_string)
                .await
                .expect("Postgres credentials must be valid"),
        );
    }
    contexts
}
