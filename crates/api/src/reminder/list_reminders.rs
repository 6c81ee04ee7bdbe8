use crate::{error::DoSpotError, session::Session, shared::usecase::UseCase};
use dospot_domain::Reminder;
use dospot_infra::DoSpotContext;

#[derive(Debug)]
pub struct ListRemindersUseCase {
    pub session: Session,
}

#[async_trait::async_trait(?Send)]
impl UseCase for ListRemindersUseCase {
    type Response = Vec<Reminder>;

    type Error = DoSpotError;

    const NAME: &'static str = "ListReminders";

    async fn execute(&mut self, ctx: &DoSpotContext) -> Result<Self::Response, Self::Error> {
        let reminders = ctx.repos.reminders.list(self.session.user_id()).await?;
        Ok(reminders)
    }
}
