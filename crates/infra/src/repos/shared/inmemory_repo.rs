use dospot_domain::{Entity, ID};
use std::sync::Mutex;

/// Useful functions for creating inmemory repositories

/// Replaces the entity with the same id, or appends it when absent.
/// Returns the replaced entity.
pub fn upsert<T: Clone + Entity<ID>>(val: &T, collection: &Mutex<Vec<T>>) -> Option<T> {
    let mut collection = collection.lock().unwrap();
    match collection.iter().position(|item| item.id() == val.id()) {
        Some(i) => Some(std::mem::replace(&mut collection[i], val.clone())),
        None => {
            collection.push(val.clone());
            None
        }
    }
}

/// Replaces the entity with the same id. Does nothing when absent.
/// Returns the replaced entity.
pub fn save<T: Clone + Entity<ID>>(val: &T, collection: &Mutex<Vec<T>>) -> Option<T> {
    let mut collection = collection.lock().unwrap();
    collection
        .iter()
        .position(|item| item.id() == val.id())
        .map(|i| std::mem::replace(&mut collection[i], val.clone()))
}

pub fn find<T: Clone + Entity<ID>>(val_id: &ID, collection: &Mutex<Vec<T>>) -> Option<T> {
    let collection = collection.lock().unwrap();
    collection.iter().find(|item| item.id() == *val_id).cloned()
}

pub fn find_by<T: Clone, F: FnMut(&T) -> bool>(collection: &Mutex<Vec<T>>, mut compare: F) -> Vec<T> {
    let collection = collection.lock().unwrap();
    collection
        .iter()
        .filter(|item| compare(*item))
        .cloned()
        .collect()
}

pub fn delete<T: Clone + Entity<ID>>(val_id: &ID, collection: &Mutex<Vec<T>>) -> Option<T> {
    let mut collection = collection.lock().unwrap();
    collection
        .iter()
        .position(|item| item.id() == *val_id)
        .map(|i| collection.remove(i))
}

pub fn find_and_delete_by<T: Clone, F: Fn(&T) -> bool>(
    collection: &Mutex<Vec<T>>,
    compare: F,
) -> Vec<T> {
    let mut collection = collection.lock().unwrap();
    let mut deleted_items = Vec::new();
    collection.retain(|item| {
        if compare(item) {
            deleted_items.push(item.clone());
            false
        } else {
            true
        }
    });
    deleted_items
}
