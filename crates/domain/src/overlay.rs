use crate::reminder::{FinalReminder, ReminderCandidate, ReminderStatus};
use std::collections::HashMap;

/// Joins persisted statuses onto merged candidates. Soft deleted system
/// reminders are dropped. Custom reminders are removed from the reminder
/// store when deleted, so their `is_deleted` flag is not applied here.
pub fn apply_statuses(
    candidates: Vec<ReminderCandidate>,
    statuses: &HashMap<String, ReminderStatus>,
) -> Vec<FinalReminder> {
    candidates
        .into_iter()
        .filter_map(|candidate| {
            let (is_completed, is_deleted) = statuses
                .get(&candidate.id)
                .map(|status| (status.is_completed, status.is_deleted))
                .unwrap_or((false, false));
            if is_deleted && !candidate.is_custom() {
                return None;
            }
            Some(FinalReminder {
                reminder: candidate,
                is_completed,
                is_deleted,
            })
        })
        .collect()
}

/// Candidates presented as is, used when the statuses could not be read
pub fn without_statuses(candidates: Vec<ReminderCandidate>) -> Vec<FinalReminder> {
    apply_statuses(candidates, &HashMap::new())
}
