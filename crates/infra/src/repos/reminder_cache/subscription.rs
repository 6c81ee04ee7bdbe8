use dospot_domain::{Reminder, ID};
use futures::future::BoxFuture;
use std::sync::Arc;
use tokio::sync::broadcast::{
    self,
    error::{RecvError, TryRecvError},
};

/// Emitted by a cache after a write, naming every owner whose rows changed
#[derive(Debug, Clone, PartialEq)]
pub struct CacheChange {
    pub user_ids: Vec<ID>,
}

impl CacheChange {
    pub fn single(user_id: ID) -> Self {
        Self {
            user_ids: vec![user_id],
        }
    }

    /// Change touching both the previous and the current owner of a row
    pub fn owners(previous: Option<ID>, current: ID) -> Self {
        let mut user_ids = vec![current];
        if let Some(previous) = previous {
            if !user_ids.contains(&previous) {
                user_ids.push(previous);
            }
        }
        Self { user_ids }
    }

    pub fn affects(&self, user_id: &ID) -> bool {
        self.user_ids.contains(user_id)
    }
}

/// Loads the ordered snapshot for one owner
pub type SnapshotLoader =
    Arc<dyn Fn(ID) -> BoxFuture<'static, anyhow::Result<Vec<Reminder>>> + Send + Sync>;

/// Live view on one owner's cached reminders.
///
/// Holds the snapshot taken when the subscription was opened. Every call to
/// [`ReminderSubscription::next`] waits for a write touching the owner and
/// yields the full replacement list. Dropping the subscription, or calling
/// [`ReminderSubscription::cancel`], releases the channel.
pub struct ReminderSubscription {
    user_id: ID,
    initial: Vec<Reminder>,
    changes: Option<broadcast::Receiver<CacheChange>>,
    load: SnapshotLoader,
}

impl ReminderSubscription {
    /// `changes` must be subscribed before `initial` is loaded so that no
    /// write in between goes unnoticed
    pub fn new(
        user_id: ID,
        initial: Vec<Reminder>,
        changes: broadcast::Receiver<CacheChange>,
        load: SnapshotLoader,
    ) -> Self {
        Self {
            user_id,
            initial,
            changes: Some(changes),
            load,
        }
    }

    pub fn user_id(&self) -> &ID {
        &self.user_id
    }

    pub fn initial(&self) -> &[Reminder] {
        &self.initial
    }

    pub fn is_active(&self) -> bool {
        self.changes.is_some()
    }

    /// Waits for the next relevant change. Returns `None` once cancelled or
    /// when the cache has been dropped.
    pub async fn next(&mut self) -> Option<anyhow::Result<Vec<Reminder>>> {
        loop {
            let changes = self.changes.as_mut()?;
            match changes.recv().await {
                Ok(change) if change.affects(&self.user_id) => break,
                Ok(_) => continue,
                // Missed some changes, a fresh snapshot covers all of them
                Err(RecvError::Lagged(_)) => break,
                Err(RecvError::Closed) => {
                    self.changes = None;
                    return None;
                }
            }
        }
        // Changes already queued are covered by the snapshot loaded below
        if let Some(changes) = self.changes.as_mut() {
            while !matches!(
                changes.try_recv(),
                Err(TryRecvError::Empty | TryRecvError::Closed)
            ) {}
        }
        Some((self.load)(self.user_id.clone()).await)
    }

    pub fn cancel(&mut self) {
        self.changes = None;
    }
}

impl std::fmt::Debug for ReminderSubscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReminderSubscription")
            .field("user_id", &self.user_id)
            .field("initial", &self.initial.len())
            .field("active", &self.is_active())
            .finish()
    }
}
