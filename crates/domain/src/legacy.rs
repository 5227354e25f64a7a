use crate::date::deserialize_date;
use crate::reminder::{CustomReminder, Priority, ReminderStatus, ReminderType};
use crate::shared::entity::ID;
use crate::snapshot::{read_records, RejectedRecord};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{HashMap, HashSet};

/// Reminder data the previous client version kept on the device. It is
/// moved to the durable stores once and then cleared.
///
/// Entries that cannot be read are left out and listed in `rejected`, so
/// one bad entry does not hold back the rest of the data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawLegacyReminderData")]
pub struct LegacyReminderData {
    pub custom_reminders: Vec<LegacyCustomReminder>,
    /// Ids of reminders the user marked as done
    pub completed_reminders: Vec<String>,
    /// Ids of reminders the user dismissed
    pub deleted_reminders: Vec<String>,
    #[serde(skip)]
    pub rejected: Vec<RejectedRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyCustomReminder {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(deserialize_with = "deserialize_date")]
    pub due_date: NaiveDate,
    #[serde(default = "default_priority")]
    pub priority: Priority,
    #[serde(rename = "type", default = "default_type")]
    pub reminder_type: ReminderType,
    #[serde(default)]
    pub related_id: Option<String>,
}

fn default_priority() -> Priority {
    Priority::Medium
}

fn default_type() -> ReminderType {
    ReminderType::Custom
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawLegacyReminderData {
    #[serde(default)]
    custom_reminders: Vec<Value>,
    #[serde(default)]
    completed_reminders: Vec<Value>,
    #[serde(default)]
    deleted_reminders: Vec<Value>,
}

impl From<RawLegacyReminderData> for LegacyReminderData {
    fn from(raw: RawLegacyReminderData) -> Self {
        let mut rejected = Vec::new();
        Self {
            custom_reminders: read_records(
                "legacy-custom-reminder",
                raw.custom_reminders,
                &mut rejected,
            ),
            completed_reminders: read_records(
                "legacy-completed-id",
                raw.completed_reminders,
                &mut rejected,
            ),
            deleted_reminders: read_records("legacy-deleted-id", raw.deleted_reminders, &mut rejected),
            rejected,
        }
    }
}

impl LegacyReminderData {
    pub fn is_empty(&self) -> bool {
        self.custom_reminders.is_empty()
            && self.completed_reminders.is_empty()
            && self.deleted_reminders.is_empty()
    }

    /// Custom reminders are hard deleted, so the ones the user dismissed on
    /// the device are not moved at all
    fn dismissed_custom_ids(&self) -> HashSet<&str> {
        let deleted: HashSet<&str> = self.deleted_reminders.iter().map(String::as_str).collect();
        self.custom_reminders
            .iter()
            .map(|r| r.id.as_str())
            .filter(|id| deleted.contains(id))
            .collect()
    }

    /// Legacy custom reminders keep their id so statuses recorded against
    /// them still apply after the move
    pub fn custom_reminders_for(&self, user_id: &ID, migrated_at: i64) -> Vec<CustomReminder> {
        let dismissed = self.dismissed_custom_ids();
        self.custom_reminders
            .iter()
            .filter(|r| !dismissed.contains(r.id.as_str()))
            .map(|r| CustomReminder {
                id: r.id.clone(),
                user_id: user_id.clone(),
                title: r.title.clone(),
                description: r.description.clone(),
                due_date: r.due_date,
                priority: r.priority,
                reminder_type: r.reminder_type,
                related_id: r.related_id.clone(),
                created: migrated_at,
            })
            .collect()
    }

    /// One status per reminder id, combining both legacy lists in the order
    /// the ids first appear. Dismissed custom reminders get none.
    pub fn statuses_for(&self, user_id: &ID, migrated_at: i64) -> Vec<ReminderStatus> {
        let dismissed = self.dismissed_custom_ids();
        let mut statuses: Vec<ReminderStatus> = Vec::new();
        let mut positions: HashMap<&str, usize> = HashMap::new();
        let flagged = self
            .completed_reminders
            .iter()
            .map(|id| (id.as_str(), true, false))
            .chain(self.deleted_reminders.iter().map(|id| (id.as_str(), false, true)))
            .filter(|(id, _, _)| !dismissed.contains(id));

        for (reminder_id, completed, deleted) in flagged {
            match positions.get(reminder_id).copied() {
                Some(position) => {
                    let status = &mut statuses[position];
                    status.is_completed |= completed;
                    status.is_deleted |= deleted;
                }
                None => {
                    positions.insert(reminder_id, statuses.len());
                    let mut status = ReminderStatus::new(user_id.clone(), reminder_id);
                    status.is_completed = completed;
                    status.is_deleted = deleted;
                    status.updated = migrated_at;
                    statuses.push(status);
                }
            }
        }
        statuses
    }
}
