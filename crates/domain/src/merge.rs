use crate::reminder::{ReminderCandidate, ReminderType};
use std::collections::{HashMap, HashSet};

/// Merges candidate lists given in source priority order, custom reminders
/// first.
///
/// A candidate is dropped when its id was already accepted, or when a
/// higher priority source already claimed its `(type, related_id)` event.
/// Candidates of the same source never displace each other, which lets one
/// generator emit several reminders for the same entity. The first accepted
/// candidate wins as is; fields are never merged.
pub fn merge_candidates<I>(sources: I) -> Vec<ReminderCandidate>
where
    I: IntoIterator<Item = Vec<ReminderCandidate>>,
{
    let mut seen_ids: HashSet<String> = HashSet::new();
    let mut claimed_events: HashMap<(ReminderType, String), usize> = HashMap::new();
    let mut merged = Vec::new();

    for (source_index, candidates) in sources.into_iter().enumerate() {
        for candidate in candidates {
            if seen_ids.contains(&candidate.id) {
                continue;
            }
            if let Some((reminder_type, related_id)) = candidate.event_key() {
                let key = (reminder_type, related_id.to_string());
                match claimed_events.get(&key) {
                    Some(claimed_by) if *claimed_by < source_index => continue,
                    Some(_) => {}
                    None => {
                        claimed_events.insert(key, source_index);
                    }
                }
            }
            seen_ids.insert(candidate.id.clone());
            merged.push(candidate);
        }
    }

    merged
}
