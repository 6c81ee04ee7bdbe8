use dospot_domain::{ValidationError, ID};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DoSpotError {
    /// The backend could not be reached or refused the operation. Safe to
    /// retry manually.
    #[error("Storage error. Error message: `{0}`")]
    Persistence(String),
    /// The requested reminder does not exist. Retrying will not help.
    #[error("The reminder with id: {0}, was not found.")]
    NotFound(ID),
    /// Rejected before any store was touched
    #[error("Invalid data provided: {0}")]
    Validation(#[from] ValidationError),
    /// The remote write went through but the local cache could not follow.
    /// Retrying the write is not needed, a sync brings the cache back in line.
    #[error("The reminder with id: {reminder_id}, was stored but the local cache could not be updated. Error message: `{reason}`")]
    CacheOutOfSync { reminder_id: ID, reason: String },
}

impl From<anyhow::Error> for DoSpotError {
    fn from(e: anyhow::Error) -> Self {
        Self::Persistence(format!("{:#}", e))
    }
}

impl DoSpotError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    pub(crate) fn cache_out_of_sync(reminder_id: &ID, e: anyhow::Error) -> Self {
        Self::CacheOutOfSync {
            reminder_id: reminder_id.clone(),
            reason: format!("{:#}", e),
        }
    }
}
