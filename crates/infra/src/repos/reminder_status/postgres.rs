use super::IReminderStatusRepo;
use kennel_reminders_domain::{ReminderStatus, ID};
use sqlx::{types::Uuid, FromRow, PgPool};
use std::collections::HashMap;

pub struct PostgresReminderStatusRepo {
    pool: PgPool,
}

impl PostgresReminderStatusRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ReminderStatusRaw {
    reminder_id: String,
    user_uid: Uuid,
    is_completed: bool,
    is_deleted: bool,
    updated: i64,
}

impl From<ReminderStatusRaw> for ReminderStatus {
    fn from(raw: ReminderStatusRaw) -> Self {
        Self {
            reminder_id: raw.reminder_id,
            user_id: raw.user_uid.into(),
            is_completed: raw.is_completed,
            is_deleted: raw.is_deleted,
            updated: raw.updated,
        }
    }
}

#[async_trait::async_trait]
impl IReminderStatusRepo for PostgresReminderStatusRepo {
    async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<HashMap<String, ReminderStatus>> {
        let statuses: Vec<ReminderStatusRaw> = sqlx::query_as(
            r#"
            SELECT * FROM reminder_statuses AS s
            WHERE s.user_uid = $1
            "#,
        )
        .bind(user_id.inner_ref())
        .fetch_all(&self.pool)
        .await?;

        Ok(statuses
            .into_iter()
            .map(|s| (s.reminder_id.clone(), s.into()))
            .collect())
    }

    async fn find(&self, user_id: &ID, reminder_id: &str) -> anyhow::Result<Option<ReminderStatus>> {
        let status: Option<ReminderStatusRaw> = sqlx::query_as(
            r#"
            SELECT * FROM reminder_statuses AS s
            WHERE s.user_uid = $1 AND s.reminder_id = $2
            "#,
        )
        .bind(user_id.inner_ref())
        .bind(reminder_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(status.map(|s| s.into()))
    }

    async fn upsert(&self, status: &ReminderStatus) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO reminder_statuses(reminder_id, user_uid, is_completed, is_deleted, updated)
            VALUES($1, $2, $3, $4, $5)
            ON CONFLICT (user_uid, reminder_id) DO UPDATE
            SET is_completed = EXCLUDED.is_completed,
            is_deleted = EXCLUDED.is_deleted,
            updated = EXCLUDED.updated
            "#,
        )
        .bind(&status.reminder_id)
        .bind(status.user_id.inner_ref())
        .bind(status.is_completed)
        .bind(status.is_deleted)
        .bind(status.updated)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn insert_if_absent(&self, status: &ReminderStatus) -> anyhow::Result<bool> {
        let inserted = sqlx::query(
            r#"
            INSERT INTO reminder_statuses(reminder_id, user_uid, is_completed, is_deleted, updated)
            VALUES($1, $2, $3, $4, $5)
            ON CONFLICT (user_uid, reminder_id) DO NOTHING
            "#,
        )
        .bind(&status.reminder_id)
        .bind(status.user_id.inner_ref())
        .bind(status.is_completed)
        .bind(status.is_deleted)
        .bind(status.updated)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(inserted == 1)
    }

    async fn delete(&self, user_id: &ID, reminder_id: &str) -> anyhow::Result<Option<ReminderStatus>> {
        let status: Option<ReminderStatusRaw> = sqlx::query_as(
            r#"
            DELETE FROM reminder_statuses AS s
            WHERE s.user_uid = $1 AND s.reminder_id = $2
            RETURNING *
            "#,
        )
        .bind(user_id.inner_ref())
        .bind(reminder_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(status.map(|s| s.into()))
    }
}
