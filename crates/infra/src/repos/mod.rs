mod identity;
mod reminder;
mod reminder_cache;
mod shared;

pub use identity::{FileIdentityStore, IIdentityStore, InMemoryIdentityStore};
pub use reminder::{IReminderRepo, InMemoryReminderRepo, MongoReminderRepo};
pub use reminder_cache::{
    CacheChange, IReminderCache, InMemoryReminderCache, ReminderSubscription,
    SqliteReminderCache,
};

use crate::Config;
use mongodb::{bson::doc, Client};
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub struct Repos {
    /// Authoritative remote store
    pub reminders: Arc<dyn IReminderRepo>,
    /// Local mirror of `reminders`
    pub reminder_cache: Arc<dyn IReminderCache>,
    pub identity: Arc<dyn IIdentityStore>,
}

impl Repos {
    /// Remote store in mongodb, cache in sqlite and identity on disk
    pub async fn create(config: &Config) -> anyhow::Result<Self> {
        let reminders: Arc<dyn IReminderRepo> = match &config.mongodb_connection_string {
            Some(connection_string) => {
                Arc::new(Self::create_mongodb(connection_string, &config.mongodb_name).await?)
            }
            None => {
                info!("No mongodb configured, reminders are kept in memory");
                Arc::new(InMemoryReminderRepo::new())
            }
        };
        let reminder_cache = SqliteReminderCache::connect(&config.cache_database_url).await?;

        Ok(Self {
            reminders,
            reminder_cache: Arc::new(reminder_cache),
            identity: Arc::new(FileIdentityStore::new(&config.identity_file)),
        })
    }

    async fn create_mongodb(
        connection_string: &str,
        db_name: &str,
    ) -> anyhow::Result<MongoReminderRepo> {
        let client = Client::with_uri_str(connection_string).await?;
        let db = client.database(db_name);

        // Make sure the db is reachable before anything is written to it
        info!("DB CHECKING CONNECTION ...");
        db.run_command(doc! { "ping": 1 }, None).await?;
        info!("DB CHECKING CONNECTION ... [done]");

        Ok(MongoReminderRepo::new(&db))
    }

    pub fn create_inmemory() -> Self {
        Self {
            reminders: Arc::new(InMemoryReminderRepo::new()),
            reminder_cache: Arc::new(InMemoryReminderCache::new()),
            identity: Arc::new(InMemoryIdentityStore::new()),
        }
    }
}
