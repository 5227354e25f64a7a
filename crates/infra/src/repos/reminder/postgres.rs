use super::IReminderRepo;
use chrono::NaiveDate;
use kennel_reminders_domain::{CustomReminder, NewCustomReminder, ID};
use sqlx::{types::Uuid, FromRow, PgPool};
use std::convert::TryFrom;

pub struct PostgresReminderRepo {
    pool: PgPool,
}

impl PostgresReminderRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct CustomReminderRaw {
    reminder_id: String,
    user_uid: Uuid,
    title: String,
    description: String,
    due_date: NaiveDate,
    priority: String,
    reminder_type: String,
    related_id: Option<String>,
    created: i64,
}

impl TryFrom<CustomReminderRaw> for CustomReminder {
    type Error = anyhow::Error;

    fn try_from(raw: CustomReminderRaw) -> Result<Self, Self::Error> {
        Ok(Self {
            id: raw.reminder_id,
            user_id: raw.user_uid.into(),
            title: raw.title,
            description: raw.description,
            due_date: raw.due_date,
            priority: raw.priority.parse()?,
            reminder_type: raw.reminder_type.parse()?,
            related_id: raw.related_id,
            created: raw.created,
        })
    }
}

#[async_trait::async_trait]
impl IReminderRepo for PostgresReminderRepo {
    async fn insert(&self, reminder: &NewCustomReminder) -> anyhow::Result<CustomReminder> {
        let reminder_id: String = sqlx::query_scalar(
            r#"
            INSERT INTO custom_reminders(user_uid, title, description, due_date, priority, reminder_type, related_id, created)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING reminder_id
            "#,
        )
        .bind(reminder.user_id.inner_ref())
        .bind(&reminder.title)
        .bind(&reminder.description)
        .bind(reminder.due_date)
        .bind(reminder.priority.as_str())
        .bind(reminder.reminder_type.as_str())
        .bind(&reminder.related_id)
        .bind(reminder.created)
        .fetch_one(&self.pool)
        .await?;

        Ok(reminder.clone().with_id(reminder_id))
    }

    async fn upsert(&self, reminder: &CustomReminder) -> anyhow::Result<String> {
        sqlx::query(
            r#"
            INSERT INTO custom_reminders(reminder_id, user_uid, title, description, due_date, priority, reminder_type, related_id, created)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (user_uid, reminder_id) DO NOTHING
            "#,
        )
        .bind(&reminder.id)
        .bind(reminder.user_id.inner_ref())
        .bind(&reminder.title)
        .bind(&reminder.description)
        .bind(reminder.due_date)
        .bind(reminder.priority.as_str())
        .bind(reminder.reminder_type.as_str())
        .bind(&reminder.related_id)
        .bind(reminder.created)
        .execute(&self.pool)
        .await?;

        Ok(reminder.id.clone())
    }

    async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<CustomReminder>> {
        let reminders: Vec<CustomReminderRaw> = sqlx::query_as(
            r#"
            SELECT * FROM custom_reminders AS r
            WHERE r.user_uid = $1
            ORDER BY r.created, r.reminder_id
            "#,
        )
        .bind(user_id.inner_ref())
        .fetch_all(&self.pool)
        .await?;

        reminders.into_iter().map(CustomReminder::try_from).collect()
    }

    async fn find(&self, user_id: &ID, reminder_id: &str) -> anyhow::Result<Option<CustomReminder>> {
        let reminder: Option<CustomReminderRaw> = sqlx::query_as(
            r#"
            SELECT * FROM custom_reminders AS r
            WHERE r.user_uid = $1 AND r.reminder_id = $2
            "#,
        )
        .bind(user_id.inner_ref())
        .bind(reminder_id)
        .fetch_optional(&self.pool)
        .await?;

        reminder.map(CustomReminder::try_from).transpose()
    }

    async fn delete(&self, user_id: &ID, reminder_id: &str) -> anyhow::Result<Option<CustomReminder>> {
        let reminder: Option<CustomReminderRaw> = sqlx::query_as(
            r#"
            DELETE FROM custom_reminders AS r
            WHERE r.user_uid = $1 AND r.reminder_id = $2
            RETURNING *
            "#,
        )
        .bind(user_id.inner_ref())
        .bind(reminder_id)
        .fetch_optional(&self.pool)
        .await?;

        reminder.map(CustomReminder::try_from).transpose()
    }
}
