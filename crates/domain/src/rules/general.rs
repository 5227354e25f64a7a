use super::{evaluate_each, relative_days, Generator, RuleError, RuleOutput};
use crate::breeding::{Pregnancy, PregnancyStatus};
use crate::date::{add_days, days_until, format_date};
use crate::dog::Dog;
use crate::identity::{reminder_id, DueBucket};
use crate::reminder::{Priority, ReminderCandidate, ReminderSource, ReminderType};
use crate::snapshot::DomainSnapshot;
use chrono::{Datelike, NaiveDate};
use itertools::Itertools;
use std::ops::RangeInclusive;

/// The "no litters this year" reminder is only shown in the second half of the year
pub const NO_LITTERS_FROM_MONTH: u32 = 7;
/// Days before the estimated whelping date during which preparation is reminded
pub const WHELPING_WINDOW: RangeInclusive<i64> = 0..=14;
/// Females younger than this are not expected to have had a heat yet
const HEAT_RECORDS_FROM_AGE_DAYS: i64 = 365;

const NO_LITTERS_THIS_YEAR: &str = "no-litters-this-year";
const MISSING_HEAT_RECORDS: &str = "missing-heat-records";

/// Kennel wide reminders. The aggregate ones have no related entity.
pub fn generate(snapshot: &DomainSnapshot, today: NaiveDate) -> RuleOutput {
    let mut output = RuleOutput::default();
    output.candidates.extend(no_litters_this_year(snapshot, today));
    output.candidates.extend(missing_heat_records(snapshot, today));

    let whelping = evaluate_each(
        Generator::General,
        snapshot
            .pregnancies
            .iter()
            .filter(|p| p.status == PregnancyStatus::Active),
        |pregnancy| pregnancy.id.to_string(),
        |pregnancy| Ok(whelping_preparation(pregnancy, snapshot, today)?.into_iter().collect()),
    );
    output.candidates.extend(whelping.candidates);
    output.failures.extend(whelping.failures);
    output
}

fn breeding_females(snapshot: &DomainSnapshot) -> impl Iterator<Item = &Dog> {
    snapshot
        .dogs
        .iter()
        .filter(|dog| dog.is_active && dog.is_female())
}

fn no_litters_this_year(snapshot: &DomainSnapshot, today: NaiveDate) -> Option<ReminderCandidate> {
    if today.month() < NO_LITTERS_FROM_MONTH || breeding_females(snapshot).next().is_none() {
        return None;
    }
    if snapshot
        .litters
        .iter()
        .any(|litter| litter.date_of_birth.year() == today.year())
    {
        return None;
    }

    let end_of_year = NaiveDate::from_ymd_opt(today.year(), 12, 31)?;
    Some(ReminderCandidate {
        id: reminder_id(
            ReminderType::General,
            None,
            &DueBucket::scoped(NO_LITTERS_THIS_YEAR, DueBucket::year_of(today)),
        ),
        title: format!("No litters registered in {}", today.year()),
        description: "Register this year's litters or plan a breeding".into(),
        due_date: end_of_year,
        priority: Priority::Low,
        reminder_type: ReminderType::General,
        related_id: None,
        source: ReminderSource::System,
    })
}

fn missing_heat_records(snapshot: &DomainSnapshot, today: NaiveDate) -> Option<ReminderCandidate> {
    let names = breeding_females(snapshot)
        .filter(|dog| dog.heat_history.is_empty())
        .filter(|dog| match dog.date_of_birth {
            Some(dob) => days_until(dob, today) >= HEAT_RECORDS_FROM_AGE_DAYS,
            None => true,
        })
        .map(|dog| dog.name.as_str())
        .sorted()
        .collect::<Vec<_>>();
    if names.is_empty() {
        return None;
    }

    Some(ReminderCandidate {
        id: reminder_id(
            ReminderType::General,
            None,
            &DueBucket::scoped(MISSING_HEAT_RECORDS, DueBucket::month_of(today)),
        ),
        title: format!("Record heat dates for {} dog(s)", names.len()),
        description: format!(
            "Heat reminders need at least one recorded heat: {}",
            names.iter().join(", ")
        ),
        due_date: today,
        priority: Priority::Low,
        reminder_type: ReminderType::General,
        related_id: None,
        source: ReminderSource::System,
    })
}

fn whelping_preparation(
    pregnancy: &Pregnancy,
    snapshot: &DomainSnapshot,
    today: NaiveDate,
) -> Result<Option<ReminderCandidate>, RuleError> {
    let whelping = add_days(pregnancy.mating_date, Pregnancy::GESTATION_DAYS)
        .ok_or(RuleError::DateOutOfRange)?;
    let days = days_until(today, whelping);
    if !WHELPING_WINDOW.contains(&days) {
        return Ok(None);
    }
    let female = snapshot
        .find_dog(&pregnancy.female_id)
        .ok_or_else(|| RuleError::UnknownDog(pregnancy.female_id.to_string()))?;
    let related_id = pregnancy.id.to_string();

    Ok(Some(ReminderCandidate {
        id: reminder_id(
            ReminderType::General,
            Some(&related_id),
            &DueBucket::Date(whelping),
        ),
        title: format!("Prepare whelping for {}", female.name),
        description: format!(
            "Estimated whelping {} ({}), {} days after mating",
            relative_days(days),
            format_date(&whelping),
            Pregnancy::GESTATION_DAYS
        ),
        due_date: whelping,
        priority: Priority::Low,
        reminder_type: ReminderType::General,
        related_id: Some(related_id),
        source: ReminderSource::System,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dog::Gender;
    use crate::litter::Litter;
    use crate::rules::test_helpers::*;
    use crate::shared::entity::ID;

    fn kennel() -> DomainSnapshot {
        DomainSnapshot {
            dogs: vec![
                female_with_heat("Bella", ymd(2026, 3, 1)),
                Dog::new("Rex", Gender::Male),
            ],
            ..Default::default()
        }
    }

    fn titles(out: &RuleOutput) -> Vec<&str> {
        out.candidates.iter().map(|c| c.title.as_str()).collect()
    }

    #[test]
    fn it_reminds_when_no_litters_were_born_this_year() {
        let snapshot = kennel();
        let out = generate(&snapshot, ymd(2026, 10, 17));
        assert_eq!(titles(&out), vec!["No litters registered in 2026"]);
        let reminder = &out.candidates[0];
        assert_eq!(reminder.related_id, None);
        assert_eq!(reminder.priority, Priority::Low);
        assert_eq!(reminder.due_date, ymd(2026, 12, 31));

        // Same id for the whole year
        let later = generate(&snapshot, ymd(2026, 12, 1));
        assert_eq!(later.candidates[0].id, reminder.id);

        assert!(generate(&snapshot, ymd(2026, 6, 30)).candidates.is_empty());
    }

    #[test]
    fn it_stays_quiet_when_a_litter_was_born_this_year() {
        let mut snapshot = kennel();
        snapshot
            .litters
            .push(Litter::new("A", snapshot.dogs[0].id.clone(), ymd(2026, 2, 1)));
        assert!(generate(&snapshot, ymd(2026, 10, 17)).candidates.is_empty());
    }

    #[test]
    fn it_lists_adult_females_without_heat_records() {
        let mut snapshot = kennel();
        let mut young = Dog::new("Puppy", Gender::Female);
        young.date_of_birth = Some(ymd(2026, 6, 1));
        let mut adult = Dog::new("Alma", Gender::Female);
        adult.date_of_birth = Some(ymd(2022, 6, 1));
        snapshot.dogs.push(young);
        snapshot.dogs.push(adult);
        snapshot.dogs.push(Dog::new("Cleo", Gender::Female));

        let out = generate(&snapshot, ymd(2026, 3, 17));
        assert_eq!(out.candidates.len(), 1);
        assert_eq!(out.candidates[0].title, "Record heat dates for 2 dog(s)");
        assert!(out.candidates[0].description.ends_with("Alma, Cleo"));
        assert_eq!(out.candidates[0].due_date, ymd(2026, 3, 17));

        let same_month = generate(&snapshot, ymd(2026, 3, 30));
        assert_eq!(same_month.candidates[0].id, out.candidates[0].id);
    }

    #[test]
    fn it_reminds_to_prepare_whelping() {
        let mut snapshot = kennel();
        let pregnancy = Pregnancy {
            id: Default::default(),
            female_id: snapshot.dogs[0].id.clone(),
            male_id: Some(snapshot.dogs[1].id.clone()),
            mating_date: ymd(2026, 3, 1),
            status: PregnancyStatus::Active,
        };
        snapshot.pregnancies.push(pregnancy.clone());

        // Whelping expected 2026-05-03
        let out = generate(&snapshot, ymd(2026, 4, 20));
        assert_eq!(titles(&out), vec!["Prepare whelping for Bella"]);
        assert_eq!(out.candidates[0].due_date, ymd(2026, 5, 3));
        assert_eq!(out.candidates[0].related_id, Some(pregnancy.id.to_string()));

        assert!(generate(&snapshot, ymd(2026, 4, 18)).candidates.is_empty());
        assert!(generate(&snapshot, ymd(2026, 5, 4)).candidates.is_empty());
    }

    #[test]
    fn it_reports_pregnancies_of_unknown_dogs() {
        let mut snapshot = kennel();
        snapshot.pregnancies.push(Pregnancy {
            id: Default::default(),
            female_id: ID::default(),
            male_id: None,
            mating_date: ymd(2026, 3, 1),
            status: PregnancyStatus::Active,
        });
        let out = generate(&snapshot, ymd(2026, 4, 20));
        assert!(out.candidates.is_empty());
        assert_eq!(out.failures.len(), 1);
        assert_eq!(out.failures[0].generator, Generator::General);
    }
}
