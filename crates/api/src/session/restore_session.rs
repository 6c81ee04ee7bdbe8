use super::Session;
use crate::{error::DoSpotError, shared::usecase::UseCase};
use dospot_infra::DoSpotContext;

/// Picks up the `Session` persisted by an earlier login, if any
#[derive(Debug)]
pub struct RestoreSessionUseCase;

#[async_trait::async_trait(?Send)]
impl UseCase for RestoreSessionUseCase {
    type Response = Option<Session>;

    type Error = DoSpotError;

    const NAME: &'static str = "RestoreSession";

    async fn execute(&mut self, ctx: &DoSpotContext) -> Result<Self::Response, Self::Error> {
        Ok(ctx.repos.identity.get()?.map(Session::new))
    }
}
