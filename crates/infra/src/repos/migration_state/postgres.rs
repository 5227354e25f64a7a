use super::IMigrationStateRepo;
use kennel_reminders_domain::{MigrationState, ID};
use sqlx::{FromRow, PgPool};

pub struct PostgresMigrationStateRepo {
    pool: PgPool,
}

impl PostgresMigrationStateRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct MigrationStateRaw {
    migrated: bool,
    failed_attempts: i64,
}

impl From<MigrationStateRaw> for MigrationState {
    fn from(raw: MigrationStateRaw) -> Self {
        Self {
            migrated: raw.migrated,
            failed_attempts: raw.failed_attempts,
        }
    }
}

#[async_trait::async_trait]
impl IMigrationStateRepo for PostgresMigrationStateRepo {
    async fn find(&self, user_id: &ID) -> anyhow::Result<MigrationState> {
        let state: Option<MigrationStateRaw> = sqlx::query_as(
            r#"
            SELECT m.migrated, m.failed_attempts FROM reminder_migrations AS m
            WHERE m.user_uid = $1
            "#,
        )
        .bind(user_id.inner_ref())
        .fetch_optional(&self.pool)
        .await?;

        Ok(state.map(|s| s.into()).unwrap_or_default())
    }

    async fn mark_migrated(&self, user_id: &ID) -> anyhow::Result<bool> {
        let rows = sqlx::query(
            r#"
            INSERT INTO reminder_migrations(user_uid, migrated)
            VALUES($1, true)
            ON CONFLICT (user_uid) DO UPDATE
            SET migrated = true
            WHERE reminder_migrations.migrated = false
            "#,
        )
        .bind(user_id.inner_ref())
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(rows == 1)
    }

    async fn record_failure(&self, user_id: &ID) -> anyhow::Result<i64> {
        let attempts: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO reminder_migrations(user_uid, failed_attempts)
            VALUES($1, 1)
            ON CONFLICT (user_uid) DO UPDATE
            SET failed_attempts = reminder_migrations.failed_attempts + 1
            RETURNING failed_attempts
            "#,
        )
        .bind(user_id.inner_ref())
        .fetch_one(&self.pool)
        .await?;

        Ok(attempts)
    }
}
