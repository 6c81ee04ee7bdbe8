use crate::{error::DoSpotError, session::Session};
use dospot_domain::{Reminder, ID};
use dospot_infra::DoSpotContext;

/// Writes a `Reminder` stored remotely through to the local cache
pub(crate) async fn mirror_to_cache(
    reminder: Reminder,
    ctx: &DoSpotContext,
) -> Result<Reminder, DoSpotError> {
    ctx.repos
        .reminder_cache
        .insert_or_replace(&reminder)
        .await
        .map_err(|e| DoSpotError::cache_out_of_sync(&reminder.id, e))?;
    Ok(reminder)
}

/// Drops the cached row of a remotely deleted `Reminder`, including a stale
/// row the remote store no longer knows about
pub(crate) async fn remove_from_cache(
    reminder_id: &ID,
    session: &Session,
    ctx: &DoSpotContext,
) -> Result<(), DoSpotError> {
    let cache = &ctx.repos.reminder_cache;
    let cached = cache
        .get_by_id(reminder_id)
        .await
        .map_err(|e| DoSpotError::cache_out_of_sync(reminder_id, e))?;
    match cached {
        Some(cached) if cached.user_id == *session.user_id() => cache
            .delete(&cached)
            .await
            .map_err(|e| DoSpotError::cache_out_of_sync(reminder_id, e)),
        _ => Ok(()),
    }
}
