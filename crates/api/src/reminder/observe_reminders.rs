use crate::{error::DoSpotError, session::Session, shared::usecase::UseCase};
use dospot_infra::{DoSpotContext, ReminderSubscription};

/// Live list of the session owner's cached reminders, usable offline
#[derive(Debug)]
pub struct ObserveRemindersUseCase {
    pub session: Session,
}

#[async_trait::async_trait(?Send)]
impl UseCase for ObserveRemindersUseCase {
    type Response = ReminderSubscription;

    type Error = DoSpotError;

    const NAME: &'static str = "ObserveReminders";

    async fn execute(&mut self, ctx: &DoSpotContext) -> Result<Self::Response, Self::Error> {
        let subscription = ctx
            .repos
            .reminder_cache
            .observe_all(self.session.user_id())
            .await?;
        Ok(subscription)
    }
}
