mod telemetry;

use dospot_api::{execute, RestoreSessionUseCase, SyncRemindersUseCase};
use dospot_infra::setup_context;
use telemetry::{get_subscriber, init_subscriber};
use tracing::info;

/// Refreshes the local reminder cache of the logged in user from the remote
/// store, so the reminders are readable offline.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = get_subscriber("dospot".into(), "info".into());
    init_subscriber(subscriber);

    let context = setup_context().await?;

    let session = match execute(RestoreSessionUseCase, &context).await? {
        Some(session) => session,
        None => {
            info!("No user is logged in, nothing to sync");
            return Ok(());
        }
    };

    let summary = execute(SyncRemindersUseCase { session }, &context).await?;
    info!("Local reminder cache is up to date: {:?}", summary);
    Ok(())
}
