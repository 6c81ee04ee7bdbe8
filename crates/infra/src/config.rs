use std::{path::PathBuf, time::Duration};
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct Config {
    /// Connection string of the remote reminder store. Reminders are only
    /// kept in memory when this is not set.
    pub mongodb_connection_string: Option<String>,
    /// Name of the mongodb database holding the `reminders` collection
    pub mongodb_name: String,
    /// Sqlite url of the local reminder cache
    pub cache_database_url: String,
    /// File remembering the logged in user between restarts
    pub identity_file: PathBuf,
    /// How long a one-shot location fetch may take before it is given up.
    pub location_timeout: Duration,
}

const DEFAULT_LOCATION_TIMEOUT_MILLIS: u64 = 10_000;

impl Config {
    pub fn new() -> Self {
        let mongodb_connection_string = std::env::var("MONGODB_CONNECTION_STRING").ok();
        let mongodb_name = std::env::var("MONGODB_NAME").unwrap_or_else(|_| "dospot".into());
        let cache_database_url = match std::env::var("CACHE_DATABASE_URL") {
            Ok(url) => url,
            Err(_) => {
                let url = "sqlite:dospot-cache.db".to_string();
                info!(
                    "Did not find CACHE_DATABASE_URL environment variable. Using: {}",
                    url
                );
                url
            }
        };
        let identity_file = std::env::var("IDENTITY_FILE")
            .unwrap_or_else(|_| "dospot-identity.json".into())
            .into();
        let location_timeout = match std::env::var("LOCATION_TIMEOUT_MILLIS") {
            Ok(millis) => match millis.parse::<u64>() {
                Ok(millis) => millis,
                Err(_) => {
                    warn!(
                        "The given LOCATION_TIMEOUT_MILLIS: {} is not valid, falling back to the default: {}.",
                        millis, DEFAULT_LOCATION_TIMEOUT_MILLIS
                    );
                    DEFAULT_LOCATION_TIMEOUT_MILLIS
                }
            },
            Err(_) => DEFAULT_LOCATION_TIMEOUT_MILLIS,
        };

        Self {
            mongodb_connection_string,
            mongodb_name,
            cache_database_url,
            identity_file,
            location_timeout: Duration::from_millis(location_timeout),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
