use super::{evaluate_each, relative_days, Generator, RuleError, RuleOutput};
use crate::date::{days_until, next_anniversary};
use crate::dog::Dog;
use crate::identity::{reminder_id, DueBucket};
use crate::reminder::{Priority, ReminderCandidate, ReminderSource, ReminderType};
use crate::snapshot::DomainSnapshot;
use chrono::{Datelike, NaiveDate};
use std::ops::RangeInclusive;

pub const BIRTHDAY_WINDOW: RangeInclusive<i64> = 0..=7;

pub fn generate(snapshot: &DomainSnapshot, today: NaiveDate) -> RuleOutput {
    evaluate_each(
        Generator::Birthday,
        snapshot.dogs.iter().filter(|dog| dog.is_active),
        |dog| dog.id.to_string(),
        |dog| Ok(birthday_reminder(dog, today)?.into_iter().collect()),
    )
}

fn birthday_reminder(dog: &Dog, today: NaiveDate) -> Result<Option<ReminderCandidate>, RuleError> {
    let date_of_birth = match dog.date_of_birth {
        Some(date) => date,
        None => return Ok(None),
    };
    let birthday = next_anniversary(date_of_birth, today).ok_or(RuleError::DateOutOfRange)?;
    let age = birthday.year() - date_of_birth.year();
    if age < 1 {
        return Ok(None);
    }
    let days = days_until(today, birthday);
    if !BIRTHDAY_WINDOW.contains(&days) {
        return Ok(None);
    }

    let related_id = dog.id.to_string();
    Ok(Some(ReminderCandidate {
        id: reminder_id(
            ReminderType::Birthday,
            Some(&related_id),
            &DueBucket::year_of(birthday),
        ),
        title: format!("{} turns {}", dog.name, age),
        description: format!("{}'s birthday is {}", dog.name, relative_days(days)),
        due_date: birthday,
        priority: Priority::Medium,
        reminder_type: ReminderType::Birthday,
        related_id: Some(related_id),
        source: ReminderSource::System,
    }))
}
