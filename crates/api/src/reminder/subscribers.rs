use super::delete_reminder::{DeleteReminderUseCase, DeletedReminder};
use crate::shared::usecase::Subscriber;
use kennel_reminders_infra::KennelContext;
use tracing::warn;

pub struct RemoveStatusOnCustomReminderDeleted;

#[async_trait::async_trait(?Send)]
impl Subscriber<DeleteReminderUseCase> for RemoveStatusOnCustomReminderDeleted {
    async fn notify(&self, e: &DeletedReminder, ctx: &KennelContext) {
        if let DeletedReminder::Custom(reminder) = e {
            // Sideeffect, a leftover status is harmless
            if let Err(err) = ctx
                .repos
                .reminder_statuses
                .delete(&reminder.user_id, &reminder.id)
                .await
            {
                warn!(
                    "Unable to remove the status of deleted reminder {}: {:?}",
                    reminder.id, err
                );
            }
        }
    }
}
