use crate::{error::DoSpotError, session::Session, shared::usecase::UseCase};
use dospot_domain::{Reminder, ID};
use dospot_infra::DoSpotContext;

/// Loads one `Reminder` of the session owner from the remote store
#[derive(Debug)]
pub struct GetReminderUseCase {
    pub session: Session,
    pub reminder_id: ID,
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetReminderUseCase {
    type Response = Reminder;

    type Error = DoSpotError;

    const NAME: &'static str = "GetReminder";

    async fn execute(&mut self, ctx: &DoSpotContext) -> Result<Self::Response, Self::Error> {
        match ctx.repos.reminders.get_by_id(&self.reminder_id).await? {
            Some(reminder) if reminder.user_id == *self.session.user_id() => Ok(reminder),
            _ => Err(DoSpotError::NotFound(self.reminder_id.clone())),
        }
    }
}
