use super::{document_key, IReminderRepo};
use crate::repos::shared::mongo_repo::{self, MongoDocument};
use dospot_domain::{Reminder, ID};
use mongodb::{
    bson::{doc, Document},
    options::FindOptions,
    Collection, Database,
};
use serde::{Deserialize, Serialize};

pub struct MongoReminderRepo {
    collection: Collection<Document>,
}

impl MongoReminderRepo {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("reminders"),
        }
    }
}

#[async_trait::async_trait]
impl IReminderRepo for MongoReminderRepo {
    async fn create(&self, reminder: &Reminder) -> anyhow::Result<ID> {
        let id = document_key(reminder);
        mongo_repo::upsert::<_, ReminderMongo>(&self.collection, &reminder.with_id(id.clone()))
            .await?;
        Ok(id)
    }

    async fn update(&self, reminder_id: &ID, reminder: &Reminder) -> anyhow::Result<()> {
        mongo_repo::upsert::<_, ReminderMongo>(
            &self.collection,
            &reminder.with_id(reminder_id.clone()),
        )
        .await
    }

    async fn delete(&self, reminder_id: &ID) -> anyhow::Result<()> {
        mongo_repo::delete(&self.collection, reminder_id.as_str()).await
    }

    async fn list(&self, user_id: &ID) -> anyhow::Result<Vec<Reminder>> {
        let filter = doc! {
            "userId": user_id.as_str()
        };
        let options = FindOptions::builder()
            .sort(doc! { "timestamp": -1 })
            .build();
        mongo_repo::find_many_by::<_, ReminderMongo>(&self.collection, filter, Some(options))
            .await
    }

    async fn get_by_id(&self, reminder_id: &ID) -> anyhow::Result<Option<Reminder>> {
        mongo_repo::find::<_, ReminderMongo>(&self.collection, reminder_id.as_str()).await
    }
}

/// The id lives in the document key only and is reattached on read
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReminderMongo {
    #[serde(rename = "_id")]
    id: String,
    user_id: String,
    title: String,
    description: String,
    latitude: f64,
    longitude: f64,
    location_name: String,
    timestamp: i64,
}

impl MongoDocument<Reminder> for ReminderMongo {
    fn into_domain(self) -> Reminder {
        Reminder {
            id: ID::from(self.id),
            user_id: ID::from(self.user_id),
            title: self.title,
            description: self.description,
            latitude: self.latitude,
            longitude: self.longitude,
            location_name: self.location_name,
            timestamp: self.timestamp,
        }
    }

    fn from_domain(reminder: &Reminder) -> Self {
        Self {
            id: reminder.id.as_str().to_string(),
            user_id: reminder.user_id.as_str().to_string(),
            title: reminder.title.clone(),
            description: reminder.description.clone(),
            latitude: reminder.latitude,
            longitude: reminder.longitude,
            location_name: reminder.location_name.clone(),
            timestamp: reminder.timestamp,
        }
    }

    fn get_id_filter(&self) -> Document {
        mongo_repo::get_id_filter(&self.id)
    }
}
