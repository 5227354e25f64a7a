use super::{evaluate_each, relative_days, Generator, RuleError, RuleOutput};
use crate::date::{add_days, days_until, format_date};
use crate::dog::Dog;
use crate::identity::{reminder_id, DueBucket};
use crate::reminder::{Priority, ReminderCandidate, ReminderSource, ReminderType};
use crate::snapshot::DomainSnapshot;
use chrono::NaiveDate;
use std::ops::RangeInclusive;

pub const VACCINATION_INTERVAL_DAYS: i64 = 365;
/// From 30 days overdue until 7 days before the due date
pub const VACCINATION_WINDOW: RangeInclusive<i64> = -30..=7;
const DUE_SOON_DAYS: i64 = 7;

pub fn generate(snapshot: &DomainSnapshot, today: NaiveDate) -> RuleOutput {
    evaluate_each(
        Generator::Vaccination,
        snapshot.dogs.iter().filter(|dog| dog.is_active),
        |dog| dog.id.to_string(),
        |dog| Ok(vaccination_reminder(dog, today)?.into_iter().collect()),
    )
}

fn priority_for(days: i64) -> Priority {
    // Due today already counts as overdue
    if days <= 0 {
        Priority::High
    } else if days <= DUE_SOON_DAYS {
        Priority::Medium
    } else {
        // Outside VACCINATION_WINDOW, kept so the tiers stay complete
        Priority::Low
    }
}

fn vaccination_reminder(dog: &Dog, today: NaiveDate) -> Result<Option<ReminderCandidate>, RuleError> {
    let last_vaccination = match dog.vaccination_date {
        Some(date) => date,
        None => return Ok(None),
    };
    let due = add_days(last_vaccination, VACCINATION_INTERVAL_DAYS).ok_or(RuleError::DateOutOfRange)?;
    let days = days_until(today, due);
    if !VACCINATION_WINDOW.contains(&days) {
        return Ok(None);
    }

    let related_id = dog.id.to_string();
    let title = if days < 0 {
        format!("{}'s vaccination is overdue", dog.name)
    } else {
        format!("{}'s vaccination is due", dog.name)
    };

    Ok(Some(ReminderCandidate {
        id: reminder_id(
            ReminderType::Vaccination,
            Some(&related_id),
            &DueBucket::Date(due),
        ),
        title,
        description: format!(
            "Annual vaccination due {} ({}), last vaccinated on {}",
            relative_days(days),
            format_date(&due),
            format_date(&last_vaccination)
        ),
        due_date: due,
        priority: priority_for(days),
        reminder_type: ReminderType::Vaccination,
        related_id: Some(related_id),
        source: ReminderSource::System,
    }))
}
