mod telemetry;

use anyhow::Context;
use kennel_reminders_api::{
    execute, GetRemindersUseCase, MigrateLegacyRemindersUseCase, ReminderError,
};
use kennel_reminders_domain::{DomainSnapshot, FinalReminder, MigrationSession, ID};
use kennel_reminders_infra::{run_migration, setup_context};
use serde::Serialize;
use std::sync::Arc;
use telemetry::{get_subscriber, init_subscriber};
use tracing::{info, warn};

const USER_ID_VAR: &str = "REMINDERS_USER_ID";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RemindersOutput<'a> {
    reminders: &'a [FinalReminder],
    stale: bool,
    failures: Vec<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = get_subscriber("kennel_reminders".into(), "info".into());
    init_subscriber(subscriber)?;

    let snapshot_path = std::env::args()
        .nth(1)
        .context("Usage: kennel_reminders <snapshot.json>")?;
    let user_id: ID = std::env::var(USER_ID_VAR)
        .with_context(|| format!("{} env var to be present", USER_ID_VAR))?
        .parse()?;

    run_migration().await?;
    let ctx = setup_context().await?;

    let snapshot: DomainSnapshot = serde_json::from_slice(
        &tokio::fs::read(&snapshot_path)
            .await
            .with_context(|| format!("Unable to read snapshot at {}", snapshot_path))?,
    )
    .context("Snapshot is malformed")?;

    let session = Arc::new(MigrationSession::new(user_id.clone()));
    match execute(MigrateLegacyRemindersUseCase { session }, &ctx).await {
        Ok(outcome) => info!("Legacy reminder migration: {:?}", outcome),
        // Reminders are still shown, the migration is retried on the next run
        Err(e) => warn!("{}", ReminderError::from(e)),
    }

    let view = execute(GetRemindersUseCase { user_id, snapshot }, &ctx)
        .await
        .map_err(ReminderError::from)?;
    let output = RemindersOutput {
        reminders: &view.reminders,
        stale: view.stale,
        failures: view
            .failures
            .iter()
            .map(|f| format!("{} {}: {}", f.generator, f.entity_id, f.error))
            .chain(
                view.rejected
                    .iter()
                    .map(|r| format!("snapshot {} {}: {}", r.kind, r.entity_id, r.error)),
            )
            .collect(),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
