use crate::{error::DoSpotError, session::Session, shared::usecase::UseCase};
use dospot_domain::{Reminder, ID};
use dospot_infra::DoSpotContext;
use std::collections::{HashMap, HashSet};
use tracing::info;

/// Brings the local cache in line with the remote store. The remote state
/// wins for every id: rows are overwritten with the remote version and rows
/// the remote no longer has are dropped.
#[derive(Debug)]
pub struct SyncRemindersUseCase {
    pub session: Session,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncSummary {
    pub upserted: usize,
    pub removed: usize,
    pub unchanged: usize,
}

#[async_trait::async_trait(?Send)]
impl UseCase for SyncRemindersUseCase {
    type Response = SyncSummary;

    type Error = DoSpotError;

    const NAME: &'static str = "SyncReminders";

    async fn execute(&mut self, ctx: &DoSpotContext) -> Result<Self::Response, Self::Error> {
        let user_id = self.session.user_id();
        let remote = ctx.repos.reminders.list(user_id).await?;
        let local: HashMap<ID, Reminder> = ctx
            .repos
            .reminder_cache
            .find_by_user(user_id)
            .await?
            .into_iter()
            .map(|r| (r.id.clone(), r))
            .collect();

        let mut summary = SyncSummary::default();
        for reminder in &remote {
            match local.get(&reminder.id) {
                Some(cached) if cached == reminder => summary.unchanged += 1,
                _ => {
                    ctx.repos.reminder_cache.insert_or_replace(reminder).await?;
                    summary.upserted += 1;
                }
            }
        }

        let remote_ids: HashSet<&ID> = remote.iter().map(|r| &r.id).collect();
        for stale in local.values().filter(|r| !remote_ids.contains(&r.id)) {
            ctx.repos.reminder_cache.delete(stale).await?;
            summary.removed += 1;
        }

        info!(
            "Synced reminders of user: {}. Upserted: {}, removed: {}, unchanged: {}",
            user_id, summary.upserted, summary.removed, summary.unchanged
        );
        Ok(summary)
    }
}
