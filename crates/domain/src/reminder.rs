use crate::{
    location::Coordinates,
    shared::entity::{Entity, ID},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A `Reminder` is a note a `User` anchors to a geographic location
/// and a point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    /// Key of the `Reminder` in every store. Empty until it has been
    /// assigned, either by the client or by the remote store.
    pub id: ID,
    /// The `User` owning this `Reminder`
    pub user_id: ID,
    pub title: String,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Human readable address, or a coordinate label when no address
    /// could be resolved
    pub location_name: String,
    /// Millis since epoch of the last create or update. Lists are
    /// ordered by this field, newest first.
    pub timestamp: i64,
}

impl Reminder {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }

    pub fn is_locatable(&self) -> bool {
        self.coordinates().is_captured()
    }

    /// Returns a copy keyed by `id`. Used when building update requests
    /// where the path id is authoritative.
    pub fn with_id(&self, id: ID) -> Self {
        Self { id, ..self.clone() }
    }
}

impl Entity<ID> for Reminder {
    fn id(&self) -> ID {
        self.id.clone()
    }
}

/// Orders reminders the way every list of them is displayed:
/// newest `timestamp` first. The sort is stable so ties keep their
/// incoming order.
pub fn sort_newest_first(reminders: &mut [Reminder]) {
    reminders.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Title must not be empty")]
    EmptyTitle,
    #[error("Description must not be empty")]
    EmptyDescription,
    #[error("A location must be captured before saving")]
    MissingLocation,
}

/// Input from a create or edit form, before it becomes a `Reminder`
#[derive(Debug, Clone, Default)]
pub struct ReminderDraft {
    pub title: String,
    pub description: String,
    pub coordinates: Option<Coordinates>,
    pub location_name: String,
}

impl ReminderDraft {
    /// Checks the draft and returns it with title and description trimmed
    pub fn validate(self) -> Result<ValidDraft, ValidationError> {
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        let description = self.description.trim().to_string();
        if description.is_empty() {
            return Err(ValidationError::EmptyDescription);
        }
        let location_name = self.location_name.trim().to_string();
        let coordinates = match self.coordinates {
            Some(c) if c.is_captured() && !location_name.is_empty() => c,
            _ => return Err(ValidationError::MissingLocation),
        };

        Ok(ValidDraft {
            title,
            description,
            coordinates,
            location_name,
        })
    }
}

/// A `ReminderDraft` that passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct ValidDraft {
    pub title: String,
    pub description: String,
    pub coordinates: Coordinates,
    pub location_name: String,
}

impl ValidDraft {
    pub fn into_reminder(self, id: ID, user_id: ID, timestamp: i64) -> Reminder {
        Reminder {
            id,
            user_id,
            title: self.title,
            description: self.description,
            latitude: self.coordinates.latitude,
            longitude: self.coordinates.longitude,
            location_name: self.location_name,
            timestamp,
        }
    }

    /// Overwrites the editable fields of `reminder`. Identity and
    /// ownership are left untouched.
    pub fn apply_to(self, reminder: &Reminder, timestamp: i64) -> Reminder {
        self.into_reminder(reminder.id.clone(), reminder.user_id.clone(), timestamp)
    }
}
