use crate::reminder::FinalReminder;
use std::cmp::Ordering;

/// Open reminders first, then by priority, due date and finally id so
/// that the order never depends on the input order
pub fn display_order(a: &FinalReminder, b: &FinalReminder) -> Ordering {
    a.is_completed
        .cmp(&b.is_completed)
        .then(a.reminder.priority.cmp(&b.reminder.priority))
        .then(a.reminder.due_date.cmp(&b.reminder.due_date))
        .then_with(|| a.reminder.id.cmp(&b.reminder.id))
}

pub fn sort_for_display(reminders: &mut [FinalReminder]) {
    reminders.sort_by(display_order);
}
