use anyhow::Result;
use futures::stream::TryStreamExt;
use mongodb::{
    bson::{self, doc, Document},
    options::{FindOptions, ReplaceOptions},
    Collection,
};
use serde::{de::DeserializeOwned, Serialize};

pub trait MongoDocument<E>: Serialize + DeserializeOwned {
    fn into_domain(self) -> E;
    fn from_domain(entity: &E) -> Self;
    fn get_id_filter(&self) -> Document;
}

pub fn get_id_filter(id: &str) -> Document {
    doc! {
        "_id": id
    }
}

fn persistence_to_entity<E, D: MongoDocument<E>>(doc: Document) -> Result<E> {
    let raw: D = bson::from_document(doc)?;
    Ok(raw.into_domain())
}

fn doc_to_persistence<E, D: MongoDocument<E>>(raw: &D) -> Result<Document> {
    Ok(bson::to_document(raw)?)
}

/// Writes the whole document at its key, creating it when it does not exist
pub async fn upsert<E, D: MongoDocument<E>>(
    collection: &Collection<Document>,
    entity: &E,
) -> Result<()> {
    let raw = D::from_domain(entity);
    let filter = raw.get_id_filter();
    let doc = doc_to_persistence(&raw)?;
    let options = ReplaceOptions::builder().upsert(true).build();
    collection.replace_one(filter, doc, options).await?;
    Ok(())
}

pub async fn find<E, D: MongoDocument<E>>(
    collection: &Collection<Document>,
    id: &str,
) -> Result<Option<E>> {
    find_one_by::<E, D>(collection, get_id_filter(id)).await
}

pub async fn find_one_by<E, D: MongoDocument<E>>(
    collection: &Collection<Document>,
    filter: Document,
) -> Result<Option<E>> {
    match collection.find_one(filter, None).await? {
        Some(doc) => Ok(Some(persistence_to_entity::<E, D>(doc)?)),
        None => Ok(None),
    }
}

pub async fn find_many_by<E, D: MongoDocument<E>>(
    collection: &Collection<Document>,
    filter: Document,
    options: Option<FindOptions>,
) -> Result<Vec<E>> {
    let mut cursor = collection.find(filter, options).await?;
    let mut entities = Vec::new();
    while let Some(doc) = cursor.try_next().await? {
        entities.push(persistence_to_entity::<E, D>(doc)?);
    }
    Ok(entities)
}

/// Deleting a key that does not exist is not an error
pub async fn delete(collection: &Collection<Document>, id: &str) -> Result<()> {
    collection.delete_one(get_id_filter(id), None).await?;
    Ok(())
}
