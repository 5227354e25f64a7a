use super::{evaluate_each, relative_days, Generator, RuleError, RuleOutput};
use crate::breeding::{PlannedBreeding, PlannedBreedingStatus};
use crate::date::{days_until, format_date};
use crate::identity::{reminder_id, DueBucket};
use crate::reminder::{Priority, ReminderCandidate, ReminderSource, ReminderType};
use crate::snapshot::DomainSnapshot;
use chrono::NaiveDate;
use std::ops::RangeInclusive;

pub const PLANNED_HEAT_WINDOW: RangeInclusive<i64> = 0..=30;

pub fn generate(snapshot: &DomainSnapshot, today: NaiveDate) -> RuleOutput {
    evaluate_each(
        Generator::PlannedHeat,
        snapshot
            .planned_breedings
            .iter()
            .filter(|b| b.status == PlannedBreedingStatus::Planned),
        |breeding| breeding.id.to_string(),
        |breeding| Ok(planned_heat_reminder(breeding, snapshot, today)?.into_iter().collect()),
    )
}

fn planned_heat_reminder(
    breeding: &PlannedBreeding,
    snapshot: &DomainSnapshot,
    today: NaiveDate,
) -> Result<Option<ReminderCandidate>, RuleError> {
    let expected_heat = match breeding.expected_heat_date {
        Some(date) => date,
        None => return Ok(None),
    };
    let days = days_until(today, expected_heat);
    if !PLANNED_HEAT_WINDOW.contains(&days) {
        return Ok(None);
    }

    let female = snapshot
        .find_dog(&breeding.female_id)
        .ok_or_else(|| RuleError::UnknownDog(breeding.female_id.to_string()))?;
    let partner = breeding
        .male_id
        .as_ref()
        .and_then(|id| snapshot.find_dog(id))
        .map(|male| format!(" with {}", male.name))
        .unwrap_or_default();
    let related_id = breeding.id.to_string();

    Ok(Some(ReminderCandidate {
        id: reminder_id(
            ReminderType::PlannedHeat,
            Some(&related_id),
            &DueBucket::Date(expected_heat),
        ),
        title: format!("Planned breeding: {} expected in heat", female.name),
        description: format!(
            "Heat expected {} ({}) for the planned breeding{}",
            relative_days(days),
            format_date(&expected_heat),
            partner
        ),
        due_date: expected_heat,
        priority: Priority::High,
        reminder_type: ReminderType::PlannedHeat,
        related_id: Some(related_id),
        source: ReminderSource::System,
    }))
}
