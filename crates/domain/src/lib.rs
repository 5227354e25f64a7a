mod breeding;
pub mod date;
mod dog;
pub mod identity;
mod legacy;
mod litter;
mod merge;
mod migration;
mod overlay;
mod reminder;
pub mod rules;
mod shared;
mod snapshot;
mod sort;

pub use breeding::{PlannedBreeding, PlannedBreedingStatus, Pregnancy, PregnancyStatus};
pub use dog::{Dog, Gender, HeatRecord};
pub use legacy::{LegacyCustomReminder, LegacyReminderData};
pub use litter::Litter;
pub use merge::merge_candidates;
pub use migration::{MigrationPhase, MigrationSession, MigrationState};
pub use overlay::{apply_statuses, without_statuses};
pub use reminder::{
    CustomReminder, FinalReminder, InvalidReminderFieldError, NewCustomReminder, Priority,
    ReminderCandidate, ReminderSource, ReminderStatus, ReminderType,
};
pub use rules::{Generator, RuleFailure, RuleOutput, RuleSettings};
pub use shared::entity::{Entity, InvalidIDError, ID};
pub use snapshot::{DomainSnapshot, RejectedRecord};
pub use sort::{display_order, sort_for_display};
