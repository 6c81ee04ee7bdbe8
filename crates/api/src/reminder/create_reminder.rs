use super::cache_mirror::mirror_to_cache;
use crate::{error::DoSpotError, session::Session, shared::usecase::UseCase};
use dospot_domain::{Reminder, ReminderDraft, ID};
use dospot_infra::DoSpotContext;

#[derive(Debug)]
pub struct CreateReminderUseCase {
    pub session: Session,
    pub draft: ReminderDraft,
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateReminderUseCase {
    type Response = Reminder;

    type Error = DoSpotError;

    const NAME: &'static str = "CreateReminder";

    async fn execute(&mut self, ctx: &DoSpotContext) -> Result<Self::Response, Self::Error> {
        let draft = self.draft.clone().validate()?;
        let reminder = draft.into_reminder(
            ID::new(),
            self.session.user_id().clone(),
            ctx.sys.get_timestamp_millis(),
        );

        let id = ctx.repos.reminders.create(&reminder).await?;
        mirror_to_cache(reminder.with_id(id), ctx).await
    }
}
