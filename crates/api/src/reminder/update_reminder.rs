use super::cache_mirror::mirror_to_cache;
use crate::{error::DoSpotError, session::Session, shared::usecase::UseCase};
use dospot_domain::{Reminder, ReminderDraft, ID};
use dospot_infra::DoSpotContext;

/// Replaces the editable fields of an existing `Reminder` and bumps its
/// timestamp. Identity and owner stay as they were.
#[derive(Debug)]
pub struct UpdateReminderUseCase {
    pub session: Session,
    pub reminder_id: ID,
    pub draft: ReminderDraft,
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateReminderUseCase {
    type Response = Reminder;

    type Error = DoSpotError;

    const NAME: &'static str = "UpdateReminder";

    async fn execute(&mut self, ctx: &DoSpotContext) -> Result<Self::Response, Self::Error> {
        let draft = self.draft.clone().validate()?;

        let current = match ctx.repos.reminders.get_by_id(&self.reminder_id).await? {
            Some(reminder) if reminder.user_id == *self.session.user_id() => reminder,
            _ => return Err(DoSpotError::NotFound(self.reminder_id.clone())),
        };

        let updated = draft
            .apply_to(&current, ctx.sys.get_timestamp_millis())
            .with_id(self.reminder_id.clone());
        ctx.repos
            .reminders
            .update(&self.reminder_id, &updated)
            .await?;

        mirror_to_cache(updated, ctx).await
    }
}
