use super::Session;
use crate::{error::DoSpotError, shared::usecase::UseCase};
use dospot_infra::DoSpotContext;

/// Ends the `Session`. The cached reminders of the user are removed first so
/// that nothing leaks into the next account using this device.
#[derive(Debug)]
pub struct LogoutUseCase {
    pub session: Session,
}

#[async_trait::async_trait(?Send)]
impl UseCase for LogoutUseCase {
    type Response = ();

    type Error = DoSpotError;

    const NAME: &'static str = "Logout";

    async fn execute(&mut self, ctx: &DoSpotContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .reminder_cache
            .delete_all(self.session.user_id())
            .await?;
        ctx.repos.identity.clear()?;
        Ok(())
    }
}
