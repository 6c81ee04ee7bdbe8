use super::{
    CacheChange, IReminderCache, ReminderSubscription, SnapshotLoader, CHANGE_CHANNEL_CAPACITY,
};
use crate::repos::shared::inmemory_repo::*;
use dospot_domain::{sort_newest_first, Reminder, ID};
use futures::FutureExt;
use std::sync::{Arc, Mutex};
use tokio::sync::broadcast;

pub struct InMemoryReminderCache {
    reminders: Arc<Mutex<Vec<Reminder>>>,
    changes: broadcast::Sender<CacheChange>,
}

impl InMemoryReminderCache {
    pub fn new() -> Self {
        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self {
            reminders: Arc::new(Mutex::new(Vec::new())),
            changes,
        }
    }

    fn by_user(reminders: &Mutex<Vec<Reminder>>, user_id: &ID) -> Vec<Reminder> {
        let mut res = find_by(reminders, |r| r.user_id == *user_id);
        sort_newest_first(&mut res);
        res
    }

    fn notify(&self, change: CacheChange) {
        let _ = self.changes.send(change);
    }
}

impl Default for InMemoryReminderCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IReminderCache for InMemoryReminderCache {
    async fn observe_all(&self, user_id: &ID) -> anyhow::Result<ReminderSubscription> {
        let changes = self.changes.subscribe();
        let initial = Self::by_user(&self.reminders, user_id);

        let reminders = self.reminders.clone();
        let load: SnapshotLoader = Arc::new(move |user_id: ID| {
            let snapshot = Self::by_user(&reminders, &user_id);
            async move { Ok(snapshot) }.boxed()
        });

        Ok(ReminderSubscription::new(
            user_id.clone(),
            initial,
            changes,
            load,
        ))
    }

    async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<Reminder>> {
        Ok(Self::by_user(&self.reminders, user_id))
    }

    async fn get_by_id(&self, reminder_id: &ID) -> anyhow::Result<Option<Reminder>> {
        Ok(find(reminder_id, &self.reminders))
    }

    async fn insert_or_replace(&self, reminder: &Reminder) -> anyhow::Result<()> {
        let previous = upsert(reminder, &self.reminders);
        self.notify(CacheChange::owners(
            previous.map(|r| r.user_id),
            reminder.user_id.clone(),
        ));
        Ok(())
    }

    async fn update(&self, reminder: &Reminder) -> anyhow::Result<()> {
        if let Some(previous) = save(reminder, &self.reminders) {
            self.notify(CacheChange::owners(
                Some(previous.user_id),
                reminder.user_id.clone(),
            ));
        }
        Ok(())
    }

    async fn delete(&self, reminder: &Reminder) -> anyhow::Result<()> {
        if let Some(deleted) = delete(&reminder.id, &self.reminders) {
            self.notify(CacheChange::single(deleted.user_id));
        }
        Ok(())
    }

    async fn delete_all(&self, user_id: &ID) -> anyhow::Result<()> {
        let deleted = find_and_delete_by(&self.reminders, |r| r.user_id == *user_id);
        if !deleted.is_empty() {
            self.notify(CacheChange::single(user_id.clone()));
        }
        Ok(())
    }
}
