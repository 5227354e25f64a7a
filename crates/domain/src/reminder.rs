use crate::shared::entity::{Entity, ID};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

/// Urgency of a reminder. The declaration order is the display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReminderType {
    Heat,
    Vaccination,
    LitterMilestone,
    General,
    PlannedHeat,
    Birthday,
    Custom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderSource {
    /// Derived by a rule from the kennel's data and regenerated on every load
    System,
    /// Authored by the user and persisted in the reminder store
    Custom,
}

#[derive(Error, Debug, PartialEq)]
pub enum InvalidReminderFieldError {
    #[error("Priority: `{0}` is not valid")]
    Priority(String),
    #[error("Reminder type: `{0}` is not valid")]
    Type(String),
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl FromStr for Priority {
    type Err = InvalidReminderFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            _ => Err(InvalidReminderFieldError::Priority(s.to_string())),
        }
    }
}

impl Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ReminderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Heat => "heat",
            Self::Vaccination => "vaccination",
            Self::LitterMilestone => "litter-milestone",
            Self::General => "general",
            Self::PlannedHeat => "planned-heat",
            Self::Birthday => "birthday",
            Self::Custom => "custom",
        }
    }
}

impl FromStr for ReminderType {
    type Err = InvalidReminderFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "heat" => Ok(Self::Heat),
            "vaccination" => Ok(Self::Vaccination),
            "litter-milestone" => Ok(Self::LitterMilestone),
            "general" => Ok(Self::General),
            "planned-heat" => Ok(Self::PlannedHeat),
            "birthday" => Ok(Self::Birthday),
            "custom" => Ok(Self::Custom),
            _ => Err(InvalidReminderFieldError::Type(s.to_string())),
        }
    }
}

impl Display for ReminderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A reminder computed by the pipeline before any persisted status is
/// applied. Candidates are thrown away after every run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderCandidate {
    /// Deterministic for system reminders, see `identity::reminder_id`.
    /// Store assigned for custom reminders.
    pub id: String,
    pub title: String,
    pub description: String,
    pub due_date: NaiveDate,
    pub priority: Priority,
    #[serde(rename = "type")]
    pub reminder_type: ReminderType,
    /// The dog, litter, breeding or pregnancy the reminder is about
    pub related_id: Option<String>,
    pub source: ReminderSource,
}

impl ReminderCandidate {
    /// Key used by the merge stage to detect two sources describing the
    /// same logical event
    pub fn event_key(&self) -> Option<(ReminderType, &str)> {
        self.related_id
            .as_deref()
            .map(|related_id| (self.reminder_type, related_id))
    }

    pub fn is_custom(&self) -> bool {
        self.source == ReminderSource::Custom
    }
}

/// A user authored reminder as it is persisted in the reminder store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomReminder {
    pub id: String,
    pub user_id: ID,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub due_date: NaiveDate,
    pub priority: Priority,
    #[serde(rename = "type")]
    pub reminder_type: ReminderType,
    #[serde(default)]
    pub related_id: Option<String>,
    /// Creation timestamp in millis
    #[serde(default)]
    pub created: i64,
}

impl CustomReminder {
    pub fn to_candidate(&self) -> ReminderCandidate {
        ReminderCandidate {
            id: self.id.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
            due_date: self.due_date,
            priority: self.priority,
            reminder_type: self.reminder_type,
            related_id: self.related_id.clone(),
            source: ReminderSource::Custom,
        }
    }
}

impl Entity<String> for CustomReminder {
    fn id(&self) -> String {
        self.id.clone()
    }
}

/// A custom reminder before the reminder store has assigned it an id
#[derive(Debug, Clone, PartialEq)]
pub struct NewCustomReminder {
    pub user_id: ID,
    pub title: String,
    pub description: String,
    pub due_date: NaiveDate,
    pub priority: Priority,
    pub reminder_type: ReminderType,
    pub related_id: Option<String>,
    pub created: i64,
}

impl NewCustomReminder {
    pub fn with_id(self, id: String) -> CustomReminder {
        CustomReminder {
            id,
            user_id: self.user_id,
            title: self.title,
            description: self.description,
            due_date: self.due_date,
            priority: self.priority,
            reminder_type: self.reminder_type,
            related_id: self.related_id,
            created: self.created,
        }
    }
}

/// Durable user decision about a reminder. Keyed by reminder id only, so
/// it outlives the candidate it was made on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderStatus {
    pub reminder_id: String,
    pub user_id: ID,
    pub is_completed: bool,
    pub is_deleted: bool,
    /// Timestamp in millis of the last change
    #[serde(default)]
    pub updated: i64,
}

impl ReminderStatus {
    pub fn new(user_id: ID, reminder_id: &str) -> Self {
        Self {
            reminder_id: reminder_id.into(),
            user_id,
            is_completed: false,
            is_deleted: false,
            updated: 0,
        }
    }
}

/// A candidate joined with its status, ready to be presented
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalReminder {
    #[serde(flatten)]
    pub reminder: ReminderCandidate,
    pub is_completed: bool,
    pub is_deleted: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priorities_order_from_most_to_least_urgent() {
        assert!(Priority::High < Priority::Medium);
        assert!(Priority::Medium < Priority::Low);
    }

    #[test]
    fn types_use_the_stored_names() {
        for t in [
            ReminderType::Heat,
            ReminderType::Vaccination,
            ReminderType::LitterMilestone,
            ReminderType::General,
            ReminderType::PlannedHeat,
            ReminderType::Birthday,
            ReminderType::Custom,
        ] {
            assert_eq!(t.as_str().parse::<ReminderType>(), Ok(t));
            assert_eq!(
                serde_json::to_string(&t).unwrap(),
                format!("\"{}\"", t.as_str())
            );
        }
        assert!("litter".parse::<ReminderType>().is_err());
        assert_eq!(
            "urgent".parse::<Priority>(),
            Err(InvalidReminderFieldError::Priority("urgent".into()))
        );
    }

    #[test]
    fn only_related_reminders_have_an_event_key() {
        let mut candidate = ReminderCandidate {
            id: "x".into(),
            title: "".into(),
            description: "".into(),
            due_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            priority: Priority::Low,
            reminder_type: ReminderType::General,
            related_id: None,
            source: ReminderSource::System,
        };
        assert_eq!(candidate.event_key(), None);
        candidate.related_id = Some("dog".into());
        assert_eq!(candidate.event_key(), Some((ReminderType::General, "dog")));
    }
}
