mod create_custom_reminder;
mod delete_reminder;
mod get_reminders;
mod restore_reminder;
mod set_reminder_completion;
mod subscribers;

pub use create_custom_reminder::CreateCustomReminderUseCase;
pub use delete_reminder::{DeleteReminderUseCase, DeletedReminder};
pub use get_reminders::{GetRemindersUseCase, RemindersView};
pub use restore_reminder::RestoreReminderUseCase;
pub use set_reminder_completion::SetReminderCompletionUseCase;
