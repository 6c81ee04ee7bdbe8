use super::Session;
use crate::{error::DoSpotError, shared::usecase::UseCase};
use dospot_domain::ID;
use dospot_infra::DoSpotContext;

/// Remembers `user_id` as the logged in user. The id comes from the
/// authentication provider.
#[derive(Debug)]
pub struct LoginUseCase {
    pub user_id: ID,
}

#[async_trait::async_trait(?Send)]
impl UseCase for LoginUseCase {
    type Response = Session;

    type Error = DoSpotError;

    const NAME: &'static str = "Login";

    async fn execute(&mut self, ctx: &DoSpotContext) -> Result<Self::Response, Self::Error> {
        ctx.repos.identity.save(&self.user_id)?;
        Ok(Session::new(self.user_id.clone()))
    }
}
