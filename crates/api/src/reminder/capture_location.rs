use crate::{error::DoSpotError, shared::usecase::UseCase};
use dospot_infra::{capture_location, CapturedLocation, DoSpotContext};

/// One-shot location fix for the reminder form. Responds with `None` when
/// no position could be obtained in time; that is not an error.
#[derive(Debug)]
pub struct CaptureLocationUseCase;

#[async_trait::async_trait(?Send)]
impl UseCase for CaptureLocationUseCase {
    type Response = Option<CapturedLocation>;

    type Error = DoSpotError;

    const NAME: &'static str = "CaptureLocation";

    async fn execute(&mut self, ctx: &DoSpotContext) -> Result<Self::Response, Self::Error> {
        Ok(capture_location(ctx.location.as_ref(), ctx.config.location_timeout).await)
    }
}
