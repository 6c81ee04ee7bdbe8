mod inmemory;
mod sqlite;
mod subscription;

pub use inmemory::InMemoryReminderCache;
pub use sqlite::SqliteReminderCache;
pub use subscription::{CacheChange, ReminderSubscription, SnapshotLoader};

use dospot_domain::{Reminder, ID};

/// Capacity of the change channel. Slow subscribers past this many pending
/// changes skip to a fresh snapshot.
const CHANGE_CHANNEL_CAPACITY: usize = 64;

/// Local relational mirror of the remote `Reminder`s for offline reads.
///
/// Writes are serialized by the underlying engine. Every write that touches
/// rows of some owner notifies the live subscriptions of that owner.
#[async_trait::async_trait]
pub trait IReminderCache: Send + Sync {
    /// Snapshot of `user_id`'s reminders plus a live subscription to it
    async fn observe_all(&self, user_id: &ID) -> anyhow::Result<ReminderSubscription>;
    /// `user_id`'s reminders, newest `timestamp` first
    async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<Reminder>>;
    async fn get_by_id(&self, reminder_id: &ID) -> anyhow::Result<Option<Reminder>>;
    async fn insert_or_replace(&self, reminder: &Reminder) -> anyhow::Result<()>;
    /// Does nothing when there is no row with `reminder.id`
    async fn update(&self, reminder: &Reminder) -> anyhow::Result<()>;
    /// Does nothing when there is no row with `reminder.id`
    async fn delete(&self, reminder: &Reminder) -> anyhow::Result<()>;
    async fn delete_all(&self, user_id: &ID) -> anyhow::Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{sync::Arc, time::Duration};

    async fn create_caches() -> Vec<Arc<dyn IReminderCache>> {
        let url = format!(
            "file:dospot_cache_{}?mode=memory&cache=shared",
            uuid::Uuid::new_v4()
        );
        vec![
            Arc::new(InMemoryReminderCache::new()),
            Arc::new(
                SqliteReminderCache::connect(&url)
                    .await
                    .expect("To open sqlite cache"),
            ),
        ]
    }

    fn reminder(id: &str, user_id: &str, timestamp: i64) -> Reminder {
        Reminder {
            id: id.into(),
            user_id: user_id.into(),
            title: "Meeting".into(),
            description: "desc".into(),
            latitude: -7.79,
            longitude: 110.37,
            location_name: "Room 3".into(),
            timestamp,
        }
    }

    fn ids(reminders: &[Reminder]) -> Vec<&str> {
        reminders.iter().map(|r| r.id.as_str()).collect()
    }

    /// Asserts that the subscription stays silent for a while
    async fn assert_quiet(sub: &mut ReminderSubscription) {
        let res = tokio::time::timeout(Duration::from_millis(50), sub.next()).await;
        assert!(res.is_err(), "Expected no emission");
    }

    #[tokio::test]
    async fn insert_get_and_list() {
        for cache in create_caches().await {
            cache.insert_or_replace(&reminder("a", "u1", 1)).await.unwrap();
            cache.insert_or_replace(&reminder("b", "u1", 3)).await.unwrap();
            cache.insert_or_replace(&reminder("c", "u2", 2)).await.unwrap();

            assert_eq!(
                cache.get_by_id(&"a".into()).await.unwrap(),
                Some(reminder("a", "u1", 1))
            );
            assert!(cache.get_by_id(&"missing".into()).await.unwrap().is_none());

            let list = cache.find_by_user(&"u1".into()).await.unwrap();
            assert_eq!(ids(&list), vec!["b", "a"]);
        }
    }

    #[tokio::test]
    async fn insert_or_replace_overwrites() {
        for cache in create_caches().await {
            cache.insert_or_replace(&reminder("a", "u1", 1)).await.unwrap();
            let mut edited = reminder("a", "u1", 2);
            edited.title = "Lunch".into();
            cache.insert_or_replace(&edited).await.unwrap();

            assert_eq!(cache.get_by_id(&"a".into()).await.unwrap(), Some(edited));
            assert_eq!(cache.find_by_user(&"u1".into()).await.unwrap().len(), 1);
        }
    }

    #[tokio::test]
    async fn update_and_delete_of_missing_rows_are_noops() {
        for cache in create_caches().await {
            let r = reminder("a", "u1", 1);
            assert!(cache.update(&r).await.is_ok());
            assert!(cache.get_by_id(&r.id).await.unwrap().is_none());
            assert!(cache.delete(&r).await.is_ok());

            cache.insert_or_replace(&r).await.unwrap();
            let mut edited = r.clone();
            edited.description = "changed".into();
            cache.update(&edited).await.unwrap();
            assert_eq!(cache.get_by_id(&r.id).await.unwrap(), Some(edited.clone()));

            cache.delete(&edited).await.unwrap();
            assert!(cache.get_by_id(&r.id).await.unwrap().is_none());
        }
    }

    #[tokio::test]
    async fn delete_all_only_clears_one_owner() {
        for cache in create_caches().await {
            cache.insert_or_replace(&reminder("a", "u1", 1)).await.unwrap();
            cache.insert_or_replace(&reminder("b", "u1", 2)).await.unwrap();
            cache.insert_or_replace(&reminder("c", "u2", 3)).await.unwrap();

            cache.delete_all(&"u1".into()).await.unwrap();
            assert!(cache.find_by_user(&"u1".into()).await.unwrap().is_empty());
            assert_eq!(cache.find_by_user(&"u2".into()).await.unwrap().len(), 1);
        }
    }

    #[tokio::test]
    async fn observe_all_emits_only_for_matching_owner() {
        for cache in create_caches().await {
            cache.insert_or_replace(&reminder("a", "u1", 1)).await.unwrap();

            let mut sub = cache.observe_all(&"u1".into()).await.unwrap();
            assert_eq!(ids(sub.initial()), vec!["a"]);

            // Other owner: nothing
            cache.insert_or_replace(&reminder("x", "u2", 5)).await.unwrap();
            assert_quiet(&mut sub).await;

            cache.insert_or_replace(&reminder("b", "u1", 2)).await.unwrap();
            let snapshot = sub.next().await.expect("Active").expect("To load");
            assert_eq!(ids(&snapshot), vec!["b", "a"]);

            cache.delete(&reminder("a", "u1", 1)).await.unwrap();
            let snapshot = sub.next().await.expect("Active").expect("To load");
            assert_eq!(ids(&snapshot), vec!["b"]);

            cache.delete_all(&"u1".into()).await.unwrap();
            let snapshot = sub.next().await.expect("Active").expect("To load");
            assert!(snapshot.is_empty());
        }
    }

    #[tokio::test]
    async fn observe_all_sees_owner_changes() {
        for cache in create_caches().await {
            cache.insert_or_replace(&reminder("a", "u1", 1)).await.unwrap();
            let mut sub = cache.observe_all(&"u1".into()).await.unwrap();

            // Row moves away from u1
            cache.insert_or_replace(&reminder("a", "u2", 1)).await.unwrap();
            let snapshot = sub.next().await.expect("Active").expect("To load");
            assert!(snapshot.is_empty());
        }
    }

    #[tokio::test]
    async fn noop_writes_do_not_emit() {
        for cache in create_caches().await {
            let mut sub = cache.observe_all(&"u1".into()).await.unwrap();
            cache.update(&reminder("a", "u1", 1)).await.unwrap();
            cache.delete(&reminder("a", "u1", 1)).await.unwrap();
            cache.delete_all(&"u1".into()).await.unwrap();
            assert_quiet(&mut sub).await;
        }
    }

    #[tokio::test]
    async fn cancelled_subscription_stops_emitting() {
        for cache in create_caches().await {
            let mut sub = cache.observe_all(&"u1".into()).await.unwrap();
            sub.cancel();
            assert!(!sub.is_active());
            cache.insert_or_replace(&reminder("a", "u1", 1)).await.unwrap();
            assert!(sub.next().await.is_none());
        }
    }

    #[tokio::test]
    async fn lagging_subscription_gets_one_fresh_snapshot() {
        for cache in create_caches().await {
            let mut sub = cache.observe_all(&"u1".into()).await.unwrap();

            let writes = CHANGE_CHANNEL_CAPACITY + 6;
            for i in 0..writes {
                let id = format!("r{}", i);
                cache
                    .insert_or_replace(&reminder(&id, "u1", i as i64))
                    .await
                    .unwrap();
            }

            let snapshot = sub.next().await.expect("Active").expect("To load");
            assert_eq!(snapshot.len(), writes);
            assert_eq!(snapshot[0].id.as_str(), format!("r{}", writes - 1));
            // Everything missed is part of that one snapshot
            assert_quiet(&mut sub).await;

            cache.insert_or_replace(&reminder("late", "u1", 1000)).await.unwrap();
            let snapshot = sub.next().await.expect("Active").expect("To load");
            assert_eq!(snapshot.len(), writes + 1);
            assert_eq!(snapshot[0].id.as_str(), "late");
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_writes_to_file_database_all_succeed() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite:{}", dir.path().join("cache.db").display());
        let cache: Arc<dyn IReminderCache> = Arc::new(
            SqliteReminderCache::connect(&url)
                .await
                .expect("To open sqlite cache"),
        );

        let handles: Vec<_> = (0..200)
            .map(|i| {
                let cache = cache.clone();
                tokio::spawn(async move {
                    let mut r = reminder(&format!("r{}", i), "u1", i as i64);
                    cache.insert_or_replace(&r).await?;
                    r.title = format!("write {}", i);
                    cache.update(&r).await?;
                    if i % 7 == 0 {
                        cache.delete(&r).await?;
                    }
                    anyhow::Ok(())
                })
            })
            .collect();

        let mut errors = Vec::new();
        for handle in handles {
            if let Err(e) = handle.await.unwrap() {
                errors.push(e.to_string());
            }
        }
        assert!(errors.is_empty(), "Failed writes: {:?}", errors);

        let cached = cache.find_by_user(&"u1".into()).await.unwrap();
        let deleted = (0..200).filter(|i| i % 7 == 0).count();
        assert_eq!(cached.len(), 200 - deleted);
        assert!(cached.iter().all(|r| r.title.starts_with("write ")));
    }
}
