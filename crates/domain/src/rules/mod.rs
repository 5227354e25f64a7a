//! Rule generators turning a `DomainSnapshot` into `ReminderCandidate`s.
//!
//! Every generator is a pure function of the snapshot, the current date and
//! the `RuleSettings`. Each one surfaces a reminder only while the computed
//! event date is inside its visibility window, and a failure for a single
//! entity is reported in `RuleOutput::failures` instead of aborting the run.

mod birthday;
mod general;
mod heat;
mod litter;
mod planned_heat;
mod vaccination;

use crate::reminder::ReminderCandidate;
use crate::snapshot::DomainSnapshot;
use chrono::NaiveDate;
use std::fmt::Display;
use thiserror::Error;

pub use birthday::BIRTHDAY_WINDOW;
pub use general::{NO_LITTERS_FROM_MONTH, WHELPING_WINDOW};
pub use heat::{DEFAULT_HEAT_INTERVAL_DAYS, HEAT_WINDOW};
pub use litter::{LitterMilestone, LITTER_MILESTONES};
pub use planned_heat::PLANNED_HEAT_WINDOW;
pub use vaccination::{VACCINATION_INTERVAL_DAYS, VACCINATION_WINDOW};

#[derive(Debug, Clone, PartialEq)]
pub struct RuleSettings {
    /// Heat interval used for dogs without their own interval
    pub default_heat_interval_days: i64,
}

impl Default for RuleSettings {
    fn default() -> Self {
        Self {
            default_heat_interval_days: DEFAULT_HEAT_INTERVAL_DAYS,
        }
    }
}

/// The system rule generators, declared in merge priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Generator {
    Heat,
    Litter,
    General,
    PlannedHeat,
    Birthday,
    Vaccination,
}

impl Generator {
    pub const ALL: [Generator; 6] = [
        Generator::Heat,
        Generator::Litter,
        Generator::General,
        Generator::PlannedHeat,
        Generator::Birthday,
        Generator::Vaccination,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Heat => "heat",
            Self::Litter => "litter",
            Self::General => "general",
            Self::PlannedHeat => "planned-heat",
            Self::Birthday => "birthday",
            Self::Vaccination => "vaccination",
        }
    }

    pub fn generate(
        &self,
        snapshot: &DomainSnapshot,
        today: NaiveDate,
        settings: &RuleSettings,
    ) -> RuleOutput {
        match self {
            Self::Heat => heat::generate(snapshot, today, settings),
            Self::Litter => litter::generate(snapshot, today),
            Self::General => general::generate(snapshot, today),
            Self::PlannedHeat => planned_heat::generate(snapshot, today),
            Self::Birthday => birthday::generate(snapshot, today),
            Self::Vaccination => vaccination::generate(snapshot, today),
        }
    }
}

impl Display for Generator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Runs every generator against the snapshot. The generators share no
/// state, so the order of evaluation does not matter; the result is listed
/// in merge priority order.
pub fn generate_all(
    snapshot: &DomainSnapshot,
    today: NaiveDate,
    settings: &RuleSettings,
) -> Vec<(Generator, RuleOutput)> {
    Generator::ALL
        .iter()
        .map(|generator| (*generator, generator.generate(snapshot, today, settings)))
        .collect()
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RuleError {
    #[error("Heat interval of {0} days is not positive")]
    InvalidHeatInterval(i64),
    #[error("Computed date is out of range")]
    DateOutOfRange,
    #[error("Referenced dog: {0} was not found")]
    UnknownDog(String),
}

/// A single entity that a generator had to skip
#[derive(Debug, Clone, PartialEq)]
pub struct RuleFailure {
    pub generator: Generator,
    pub entity_id: String,
    pub error: RuleError,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleOutput {
    pub candidates: Vec<ReminderCandidate>,
    pub failures: Vec<RuleFailure>,
}

/// Runs `rule` for every entity, isolating failures per entity
pub(crate) fn evaluate_each<'a, T, I, K, F>(
    generator: Generator,
    entities: I,
    entity_id: K,
    mut rule: F,
) -> RuleOutput
where
    T: 'a,
    I: IntoIterator<Item = &'a T>,
    K: Fn(&T) -> String,
    F: FnMut(&T) -> Result<Vec<ReminderCandidate>, RuleError>,
{
    let mut output = RuleOutput::default();
    for entity in entities {
        match rule(entity) {
            Ok(mut candidates) => output.candidates.append(&mut candidates),
            Err(error) => output.failures.push(RuleFailure {
                generator,
                entity_id: entity_id(entity),
                error,
            }),
        }
    }
    output
}

/// Human readable distance to a due date
pub(crate) fn relative_days(days: i64) -> String {
    match days {
        0 => "today".into(),
        1 => "tomorrow".into(),
        -1 => "yesterday".into(),
        d if d > 1 => format!("in {} days", d),
        d => format!("{} days ago", -d),
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_describes_relative_days() {
        assert_eq!(relative_days(0), "today");
        assert_eq!(relative_days(1), "tomorrow");
        assert_eq!(relative_days(-1), "yesterday");
        assert_eq!(relative_days(5), "in 5 days");
        assert_eq!(relative_days(-12), "12 days ago");
    }

    #[test]
    fn generators_are_listed_in_merge_order() {
        assert_eq!(Generator::ALL[0], Generator::Heat);
        assert_eq!(Generator::ALL[5], Generator::Vaccination);
    }
}
