use super::ILegacyReminderStore;
use anyhow::Context;
use kennel_reminders_domain::LegacyReminderData;
use std::{io::ErrorKind, path::PathBuf};
use tracing::info;

/// Legacy data stored as a JSON document on disk
pub struct FileLegacyReminderStore {
    path: PathBuf,
}

impl FileLegacyReminderStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait::async_trait]
impl ILegacyReminderStore for FileLegacyReminderStore {
    async fn load(&self) -> anyhow::Result<LegacyReminderData> {
        let content = match tokio::fs::read(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(LegacyReminderData::default()),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Unable to read legacy reminders at {:?}", self.path))
            }
        };
        serde_json::from_slice(&content)
            .with_context(|| format!("Legacy reminders at {:?} are malformed", self.path))
    }

    async fn clear(&self) -> anyhow::Result<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {
                info!("Removed legacy reminders at {:?}", self.path);
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e)
                .with_context(|| format!("Unable to remove legacy reminders at {:?}", self.path)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("{}-{}.json", name, kennel_reminders_domain::ID::new()))
    }

    #[tokio::test]
    async fn missing_file_reads_as_empty() {
        let store = FileLegacyReminderStore::new(temp_path("missing"));
        assert!(store.load().await.expect("Missing file is no error").is_empty());
        assert!(store.clear().await.is_ok());
    }

    #[tokio::test]
    async fn loads_and_clears_the_file() {
        let path = temp_path("legacy");
        tokio::fs::write(
            &path,
            r#"{ "completedReminders": ["heat-abc"], "deletedReminders": [] }"#,
        )
        .await
        .unwrap();

        let store = FileLegacyReminderStore::new(path.clone());
        let data = store.load().await.expect("To read legacy data");
        assert_eq!(data.completed_reminders, vec!["heat-abc".to_string()]);

        store.clear().await.expect("To clear legacy data");
        assert!(tokio::fs::metadata(&path).await.is_err());
        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn a_bad_entry_does_not_fail_the_load() {
        let path = temp_path("bad-entry");
        tokio::fs::write(
            &path,
            r#"{
                "customReminders": [
                    { "id": "custom-1", "title": "Bad", "dueDate": "not a date" },
                    { "id": "custom-2", "title": "Good", "dueDate": "2026-10-20" }
                ],
                "completedReminders": ["custom-2"]
            }"#,
        )
        .await
        .unwrap();

        let store = FileLegacyReminderStore::new(path.clone());
        let data = store.load().await.expect("To read legacy data");
        assert_eq!(data.custom_reminders.len(), 1);
        assert_eq!(data.custom_reminders[0].id, "custom-2");
        assert_eq!(data.rejected.len(), 1);
        let _ = tokio::fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn malformed_file_is_an_error() {
        let path = temp_path("malformed");
        tokio::fs::write(&path, "not json").await.unwrap();
        let store = FileLegacyReminderStore::new(path.clone());
        assert!(store.load().await.is_err());
        let _ = tokio::fs::remove_file(&path).await;
    }
}
