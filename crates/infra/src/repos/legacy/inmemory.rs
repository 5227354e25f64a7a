use super::ILegacyReminderStore;
use kennel_reminders_domain::LegacyReminderData;
use std::sync::Mutex;

pub struct InMemoryLegacyReminderStore {
    data: Mutex<LegacyReminderData>,
}

impl InMemoryLegacyReminderStore {
    pub fn new() -> Self {
        Self::with_data(LegacyReminderData::default())
    }

    pub fn with_data(data: LegacyReminderData) -> Self {
        Self {
            data: Mutex::new(data),
        }
    }
}

#[async_trait::async_trait]
impl ILegacyReminderStore for InMemoryLegacyReminderStore {
    async fn load(&self) -> anyhow::Result<LegacyReminderData> {
        Ok(self.data.lock().unwrap_or_else(|e| e.into_inner()).clone())
    }

    async fn clear(&self) -> anyhow::Result<()> {
        *self.data.lock().unwrap_or_else(|e| e.into_inner()) = LegacyReminderData::default();
        Ok(())
    }
}
