use super::{evaluate_each, relative_days, Generator, RuleError, RuleOutput, RuleSettings};
use crate::date::{add_days, days_until, format_date};
use crate::dog::Dog;
use crate::identity::{reminder_id, DueBucket};
use crate::reminder::{Priority, ReminderCandidate, ReminderSource, ReminderType};
use crate::snapshot::DomainSnapshot;
use chrono::NaiveDate;
use std::ops::RangeInclusive;

pub const DEFAULT_HEAT_INTERVAL_DAYS: i64 = 180;
/// Days relative to the expected heat during which the reminder is shown
pub const HEAT_WINDOW: RangeInclusive<i64> = -5..=30;
const HIGH_PRIORITY_WITHIN_DAYS: i64 = 7;

pub fn generate(snapshot: &DomainSnapshot, today: NaiveDate, settings: &RuleSettings) -> RuleOutput {
    evaluate_each(
        Generator::Heat,
        snapshot.dogs.iter().filter(|dog| dog.is_active && dog.is_female()),
        |dog| dog.id.to_string(),
        |dog| Ok(heat_reminder(dog, today, settings)?.into_iter().collect()),
    )
}

fn heat_reminder(
    dog: &Dog,
    today: NaiveDate,
    settings: &RuleSettings,
) -> Result<Option<ReminderCandidate>, RuleError> {
    let last_heat = match dog.last_heat_date() {
        Some(date) => date,
        None => return Ok(None),
    };
    let interval = dog
        .heat_interval_days
        .unwrap_or(settings.default_heat_interval_days);
    if interval <= 0 {
        return Err(RuleError::InvalidHeatInterval(interval));
    }

    let expected_heat = add_days(last_heat, interval).ok_or(RuleError::DateOutOfRange)?;
    let days = days_until(today, expected_heat);
    if !HEAT_WINDOW.contains(&days) {
        return Ok(None);
    }

    let priority = if days <= HIGH_PRIORITY_WITHIN_DAYS {
        Priority::High
    } else {
        Priority::Medium
    };
    let related_id = dog.id.to_string();

    Ok(Some(ReminderCandidate {
        id: reminder_id(
            ReminderType::Heat,
            Some(&related_id),
            &DueBucket::Date(expected_heat),
        ),
        title: format!("{} is expected in heat", dog.name),
        description: format!(
            "Next heat expected {} ({}), {} days after the last heat on {}",
            relative_days(days),
            format_date(&expected_heat),
            interval,
            format_date(&last_heat)
        ),
        due_date: expected_heat,
        priority,
        reminder_type: ReminderType::Heat,
        related_id: Some(related_id),
        source: ReminderSource::System,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dog::Gender;
    use crate::rules::test_helpers::*;

    fn snapshot_of(dogs: Vec<Dog>) -> DomainSnapshot {
        DomainSnapshot {
            dogs,
            ..Default::default()
        }
    }

    #[test]
    fn it_reminds_about_heat_five_days_out() {
        let dog = female_with_heat("Bella", day(0));
        let out = generate(&snapshot_of(vec![dog.clone()]), day(175), &Default::default());

        assert!(out.failures.is_empty());
        assert_eq!(out.candidates.len(), 1);
        let reminder = &out.candidates[0];
        assert_eq!(reminder.priority, Priority::High);
        assert_eq!(reminder.due_date, day(180));
        assert_eq!(reminder.reminder_type, ReminderType::Heat);
        assert_eq!(reminder.related_id, Some(dog.id.to_string()));
    }

    #[test]
    fn it_uses_medium_priority_beyond_a_week() {
        let dog = female_with_heat("Bella", day(0));
        let settings = RuleSettings::default();

        let out = generate(&snapshot_of(vec![dog.clone()]), day(172), &settings);
        assert_eq!(out.candidates[0].priority, Priority::Medium);

        let out = generate(&snapshot_of(vec![dog]), day(173), &settings);
        assert_eq!(out.candidates[0].priority, Priority::High);
    }

    #[test]
    fn it_respects_the_visibility_window() {
        let dog = female_with_heat("Bella", day(0));
        let snapshot = snapshot_of(vec![dog]);
        let settings = RuleSettings::default();

        assert!(generate(&snapshot, day(149), &settings).candidates.is_empty());
        assert_eq!(generate(&snapshot, day(150), &settings).candidates.len(), 1);
        assert_eq!(generate(&snapshot, day(185), &settings).candidates.len(), 1);
        assert!(generate(&snapshot, day(186), &settings).candidates.is_empty());
    }

    #[test]
    fn it_keeps_the_same_id_across_days() {
        let snapshot = snapshot_of(vec![female_with_heat("Bella", day(0))]);
        let settings = RuleSettings::default();
        let first = generate(&snapshot, day(160), &settings);
        let second = generate(&snapshot, day(170), &settings);
        assert_eq!(first.candidates[0].id, second.candidates[0].id);
    }

    #[test]
    fn it_prefers_the_dogs_own_interval() {
        let mut dog = female_with_heat("Bella", day(0));
        dog.heat_interval_days = Some(200);
        let out = generate(&snapshot_of(vec![dog]), day(195), &Default::default());
        assert_eq!(out.candidates[0].due_date, day(200));

        let settings = RuleSettings {
            default_heat_interval_days: 150,
        };
        let out = generate(
            &snapshot_of(vec![female_with_heat("Luna", day(0))]),
            day(145),
            &settings,
        );
        assert_eq!(out.candidates[0].due_date, day(150));
    }

    #[test]
    fn it_uses_the_latest_recorded_heat() {
        let mut dog = female_with_heat("Bella", day(0));
        dog.heat_history.insert(0, crate::dog::HeatRecord { date: day(-180) });
        let out = generate(&snapshot_of(vec![dog]), day(175), &Default::default());
        assert_eq!(out.candidates[0].due_date, day(180));
    }

    #[test]
    fn it_skips_dogs_without_history_males_and_inactive_dogs() {
        let no_history = Dog::new("Nova", Gender::Female);
        let mut male = female_with_heat("Rex", day(0));
        male.gender = Gender::Male;
        let mut retired = female_with_heat("Old", day(0));
        retired.is_active = false;

        let out = generate(
            &snapshot_of(vec![no_history, male, retired]),
            day(175),
            &Default::default(),
        );
        assert!(out.candidates.is_empty());
        assert!(out.failures.is_empty());
    }

    #[test]
    fn it_isolates_malformed_dogs() {
        let mut broken = female_with_heat("Broken", day(0));
        broken.heat_interval_days = Some(0);
        let healthy = female_with_heat("Bella", day(0));

        let out = generate(
            &snapshot_of(vec![broken.clone(), healthy]),
            day(175),
            &Default::default(),
        );
        assert_eq!(out.candidates.len(), 1);
        assert_eq!(out.failures.len(), 1);
        assert_eq!(out.failures[0].entity_id, broken.id.to_string());
        assert_eq!(out.failures[0].error, RuleError::InvalidHeatInterval(0));
        assert_eq!(out.failures[0].generator, Generator::Heat);
    }
}
