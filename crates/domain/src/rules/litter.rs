use super::{evaluate_each, relative_days, Generator, RuleError, RuleOutput};
use crate::date::{add_days, days_until, format_date};
use crate::identity::{reminder_id, DueBucket};
use crate::litter::Litter;
use crate::reminder::{Priority, ReminderCandidate, ReminderSource, ReminderType};
use crate::snapshot::DomainSnapshot;
use chrono::NaiveDate;
use std::ops::RangeInclusive;

/// A fixed point in a litter's first weeks that needs the breeder's attention
#[derive(Debug, Clone, PartialEq)]
pub struct LitterMilestone {
    pub key: &'static str,
    pub title: &'static str,
    /// Age of the litter in days when the milestone is due
    pub offset_days: i64,
    /// Ages in days during which the reminder is shown
    pub visible_at_age: RangeInclusive<i64>,
}

pub const LITTER_MILESTONES: [LitterMilestone; 7] = [
    LitterMilestone {
        key: "deworming-1",
        title: "First deworming",
        offset_days: 14,
        visible_at_age: 11..=17,
    },
    LitterMilestone {
        key: "deworming-2",
        title: "Second deworming",
        offset_days: 28,
        visible_at_age: 25..=31,
    },
    LitterMilestone {
        key: "deworming-3",
        title: "Third deworming",
        offset_days: 42,
        visible_at_age: 39..=45,
    },
    LitterMilestone {
        key: "temperament-test",
        title: "Temperament test",
        offset_days: 49,
        visible_at_age: 45..=52,
    },
    LitterMilestone {
        key: "microchip",
        title: "Microchipping",
        offset_days: 49,
        visible_at_age: 45..=52,
    },
    LitterMilestone {
        key: "vet-visit",
        title: "Vet check",
        offset_days: 53,
        visible_at_age: 49..=56,
    },
    LitterMilestone {
        key: "vaccination",
        title: "Puppy vaccination",
        offset_days: 56,
        visible_at_age: 52..=59,
    },
];

pub fn generate(snapshot: &DomainSnapshot, today: NaiveDate) -> RuleOutput {
    evaluate_each(
        Generator::Litter,
        snapshot.litters.iter(),
        |litter| litter.id.to_string(),
        |litter| milestone_reminders(litter, today),
    )
}

fn milestone_reminders(litter: &Litter, today: NaiveDate) -> Result<Vec<ReminderCandidate>, RuleError> {
    let age = litter.age_in_days(today);
    let related_id = litter.id.to_string();

    let mut reminders = Vec::new();
    for milestone in LITTER_MILESTONES.iter() {
        if !milestone.visible_at_age.contains(&age) {
            continue;
        }
        let due = add_days(litter.date_of_birth, milestone.offset_days)
            .ok_or(RuleError::DateOutOfRange)?;
        reminders.push(ReminderCandidate {
            id: reminder_id(
                ReminderType::LitterMilestone,
                Some(&related_id),
                &DueBucket::Key(milestone.key.to_string()),
            ),
            title: format!("{} for litter {}", milestone.title, litter.name),
            description: format!(
                "{} is due {} ({}) when the puppies are {} days old",
                milestone.title,
                relative_days(days_until(today, due)),
                format_date(&due),
                milestone.offset_days
            ),
            due_date: due,
            priority: Priority::Medium,
            reminder_type: ReminderType::LitterMilestone,
            related_id: Some(related_id.clone()),
            source: ReminderSource::System,
        });
    }
    Ok(reminders)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::test_helpers::*;
    use crate::shared::entity::ID;

    fn litter_born(on: NaiveDate) -> DomainSnapshot {
        DomainSnapshot {
            litters: vec![Litter::new("A-litter", ID::default(), on)],
            ..Default::default()
        }
    }

    fn keys_at(snapshot: &DomainSnapshot, today: NaiveDate) -> Vec<String> {
        generate(snapshot, today)
            .candidates
            .into_iter()
            .map(|c| c.title)
            .collect()
    }

    #[test]
    fn it_emits_milestones_while_the_age_is_in_range() {
        let snapshot = litter_born(day(0));
        assert!(keys_at(&snapshot, day(10)).is_empty());
        assert_eq!(keys_at(&snapshot, day(11)), vec!["First deworming for litter A-litter"]);
        assert_eq!(keys_at(&snapshot, day(17)).len(), 1);
        assert!(keys_at(&snapshot, day(18)).is_empty());
    }

    #[test]
    fn it_emits_overlapping_milestones_with_distinct_ids() {
        let snapshot = litter_born(day(0));
        let out = generate(&snapshot, day(50));
        let titles: Vec<_> = out.candidates.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "Temperament test for litter A-litter",
                "Microchipping for litter A-litter",
                "Vet check for litter A-litter"
            ]
        );
        assert_ne!(out.candidates[0].id, out.candidates[1].id);
        assert_eq!(out.candidates[0].due_date, day(49));
        assert_eq!(out.candidates[2].due_date, day(53));
    }

    #[test]
    fn it_stops_after_the_last_milestone() {
        let snapshot = litter_born(day(0));
        assert!(generate(&snapshot, day(60)).candidates.is_empty());
        assert!(generate(&snapshot, day(-3)).candidates.is_empty());
    }

    #[test]
    fn milestone_ids_survive_a_new_day() {
        let snapshot = litter_born(day(0));
        let a = generate(&snapshot, day(12));
        let b = generate(&snapshot, day(16));
        assert_eq!(a.candidates[0].id, b.candidates[0].id);
    }
}
