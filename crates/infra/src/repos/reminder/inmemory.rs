use super::{document_key, IReminderRepo};
use crate::repos::shared::inmemory_repo::*;
use dospot_domain::{sort_newest_first, Reminder, ID};

pub struct InMemoryReminderRepo {
    reminders: std::sync::Mutex<Vec<Reminder>>,
}

impl InMemoryReminderRepo {
    pub fn new() -> Self {
        Self {
            reminders: std::sync::Mutex::new(Vec::new()),
        }
    }
}

impl Default for InMemoryReminderRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IReminderRepo for InMemoryReminderRepo {
    async fn create(&self, reminder: &Reminder) -> anyhow::Result<ID> {
        let id = document_key(reminder);
        upsert(&reminder.with_id(id.clone()), &self.reminders);
        Ok(id)
    }

    async fn update(&self, reminder_id: &ID, reminder: &Reminder) -> anyhow::Result<()> {
        upsert(&reminder.with_id(reminder_id.clone()), &self.reminders);
        Ok(())
    }

    async fn delete(&self, reminder_id: &ID) -> anyhow::Result<()> {
        delete(reminder_id, &self.reminders);
        Ok(())
    }

    async fn list(&self, user_id: &ID) -> anyhow::Result<Vec<Reminder>> {
        let mut reminders = find_by(&self.reminders, |r| r.user_id == *user_id);
        sort_newest_first(&mut reminders);
        Ok(reminders)
    }

    async fn get_by_id(&self, reminder_id: &ID) -> anyhow::Result<Option<Reminder>> {
        Ok(find(reminder_id, &self.reminders))
    }
}
