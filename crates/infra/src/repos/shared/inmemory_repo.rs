use std::sync::{Mutex, MutexGuard};

/// Useful functions for creating inmemory repositories

fn lock<T>(collection: &Mutex<Vec<T>>) -> MutexGuard<'_, Vec<T>> {
    collection.lock().unwrap_or_else(|e| e.into_inner())
}

pub fn insert<T: Clone>(val: &T, collection: &Mutex<Vec<T>>) {
    lock(collection).push(val.clone());
}

/// Inserts the value unless an item matching `compare` already exists.
/// Returns true if it was inserted.
pub fn insert_if_absent<T: Clone, F: Fn(&T) -> bool>(
    val: &T,
    collection: &Mutex<Vec<T>>,
    compare: F,
) -> bool {
    let mut collection = lock(collection);
    if collection.iter().any(|item| compare(item)) {
        return false;
    }
    collection.push(val.clone());
    true
}

/// Replaces the first item matching `compare`, or inserts the value
pub fn upsert_by<T: Clone, F: Fn(&T) -> bool>(val: &T, collection: &Mutex<Vec<T>>, compare: F) {
    let mut collection = lock(collection);
    match collection.iter_mut().find(|item| compare(&**item)) {
        Some(item) => *item = val.clone(),
        None => collection.push(val.clone()),
    }
}

pub fn find_by<T: Clone, F: FnMut(&T) -> bool>(collection: &Mutex<Vec<T>>, mut compare: F) -> Vec<T> {
    lock(collection)
        .iter()
        .filter(|item| compare(*item))
        .cloned()
        .collect()
}

pub fn find_one_by<T: Clone, F: Fn(&T) -> bool>(collection: &Mutex<Vec<T>>, compare: F) -> Option<T> {
    lock(collection).iter().find(|item| compare(*item)).cloned()
}

pub fn find_and_delete_by<T: Clone, F: Fn(&T) -> bool>(
    collection: &Mutex<Vec<T>>,
    compare: F,
) -> Vec<T> {
    let mut collection = lock(collection);
    let mut deleted_items = Vec::new();
    let mut index = 0;
    while index < collection.len() {
        if compare(&collection[index]) {
            deleted_items.push(collection.remove(index));
        } else {
            index += 1;
        }
    }
    deleted_items
}

/// Applies `update` to the first item matching `compare` and returns a copy
/// of the updated item
pub fn update_one<T: Clone, F: Fn(&T) -> bool, U: FnOnce(&mut T)>(
    collection: &Mutex<Vec<T>>,
    compare: F,
    update: U,
) -> Option<T> {
    let mut collection = lock(collection);
    let item = collection.iter_mut().find(|item| compare(&**item))?;
    update(item);
    Some(item.clone())
}
