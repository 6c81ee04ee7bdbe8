mod config;
mod repos;
mod services;
mod system;

pub use config::Config;
pub use repos::{
    CacheChange, FileIdentityStore, IIdentityStore, IReminderCache, IReminderRepo,
    InMemoryIdentityStore, InMemoryReminderCache, InMemoryReminderRepo, MongoReminderRepo,
    ReminderSubscription, Repos, SqliteReminderCache,
};
pub use services::*;
use std::sync::Arc;
pub use system::{ISys, RealSys, StaticTimeSys};

#[derive(Clone)]
pub struct DoSpotContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
    pub location: Arc<dyn ILocationProvider>,
}

impl DoSpotContext {
    async fn create(config: Config) -> anyhow::Result<Self> {
        let repos = Repos::create(&config).await?;
        Ok(Self {
            repos,
            config,
            sys: Arc::new(RealSys {}),
            location: Arc::new(FixedLocationProvider::default()),
        })
    }

    /// Context with every store in memory, used by tests
    pub fn create_inmemory() -> Self {
        Self {
            repos: Repos::create_inmemory(),
            config: Config::new(),
            sys: Arc::new(RealSys {}),
            location: Arc::new(FixedLocationProvider::default()),
        }
    }
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> anyhow::Result<DoSpotContext> {
    DoSpotContext::create(Config::new()).await
}
