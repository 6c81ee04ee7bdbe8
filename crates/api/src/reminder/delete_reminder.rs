use super::cache_mirror::remove_from_cache;
use crate::{error::DoSpotError, session::Session, shared::usecase::UseCase};
use dospot_domain::{Reminder, ID};
use dospot_infra::DoSpotContext;

/// Deletes a `Reminder` of the session owner from the remote store and the
/// local cache. Deleting an id that does not exist succeeds and responds
/// with `None`.
#[derive(Debug)]
pub struct DeleteReminderUseCase {
    pub session: Session,
    pub reminder_id: ID,
}

#[async_trait::async_trait(?Send)]
impl UseCase for DeleteReminderUseCase {
    type Response = Option<Reminder>;

    type Error = DoSpotError;

    const NAME: &'static str = "DeleteReminder";

    async fn execute(&mut self, ctx: &DoSpotContext) -> Result<Self::Response, Self::Error> {
        let deleted = match ctx.repos.reminders.get_by_id(&self.reminder_id).await? {
            Some(reminder) if reminder.user_id == *self.session.user_id() => {
                ctx.repos.reminders.delete(&reminder.id).await?;
                Some(reminder)
            }
            Some(_) => return Err(DoSpotError::NotFound(self.reminder_id.clone())),
            None => None,
        };
        remove_from_cache(&self.reminder_id, &self.session, ctx).await?;
        Ok(deleted)
    }
}
