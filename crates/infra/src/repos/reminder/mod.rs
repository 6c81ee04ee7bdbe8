mod inmemory;
mod mongo;

pub use inmemory::InMemoryReminderRepo;
pub use mongo::MongoReminderRepo;

use dospot_domain::{Reminder, ID};
use dospot_utils::create_random_id;

/// Length of the keys the store assigns when the caller did not supply one
const GENERATED_ID_LEN: usize = 20;

/// The authoritative store of `Reminder`s.
///
/// Every method is a single round trip: there are no retries and no live
/// updates, callers re-query to observe changes made elsewhere.
#[async_trait::async_trait]
pub trait IReminderRepo: Send + Sync {
    /// Stores the reminder and returns its key. A non-empty `reminder.id` is
    /// used as the key (upsert), otherwise the store generates one.
    async fn create(&self, reminder: &Reminder) -> anyhow::Result<ID>;
    /// Overwrites the whole document at `reminder_id`, creating it when
    /// absent. `reminder.id` is ignored.
    async fn update(&self, reminder_id: &ID, reminder: &Reminder) -> anyhow::Result<()>;
    /// Removes the document. Succeeds when it does not exist.
    async fn delete(&self, reminder_id: &ID) -> anyhow::Result<()>;
    /// All reminders owned by `user_id`, newest `timestamp` first
    async fn list(&self, user_id: &ID) -> anyhow::Result<Vec<Reminder>>;
    async fn get_by_id(&self, reminder_id: &ID) -> anyhow::Result<Option<Reminder>>;
}

fn document_key(reminder: &Reminder) -> ID {
    if reminder.id.is_unassigned() {
        ID::from(create_random_id(GENERATED_ID_LEN))
    } else {
        reminder.id.clone()
    }
}
