//! Ordered, newest-first record collection persisted as one snapshot

use log::{debug, warn};
use qc_types::{Identified, StoreError};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::kv::KeyValueStore;
use crate::snapshot::{decode_snapshot, encode_snapshot, LoadWarning};

/// A collection of records under one key.
///
/// Each mutation encodes and saves the new snapshot before the in-memory
/// state changes, so a failed save leaves the collection as it was.
pub struct Collection<T, S> {
    key: String,
    store: S,
    items: Vec<T>,
    warning: Option<LoadWarning>,
}

impl<T, S> Collection<T, S>
where
    T: Identified + Serialize + DeserializeOwned + Clone,
    S: KeyValueStore,
{
    /// Load the collection stored under `key`.
    ///
    /// Unreadable snapshots are copied to `<key>.corrupt` and the
    /// collection starts empty; see [`Collection::load_warning`].
    pub fn open(store: S, key: &str) -> Result<Self, StoreError> {
        let raw = store.load(key)?;
        let mut snapshot = decode_snapshot::<T>(key, raw.as_deref());

        if let (Some(warning), Some(bytes)) = (snapshot.warning.as_mut(), raw.as_deref()) {
            let backup_key = format!("{}.corrupt", key);
            match store.save(&backup_key, bytes) {
                Ok(()) => warning.backup_key = Some(backup_key),
                Err(e) => warn!("could not back up unreadable '{}': {}", key, e),
            }
        }

        debug!("opened '{}' with {} records", key, snapshot.items.len());
        Ok(Self {
            key: key.to_string(),
            store,
            items: snapshot.items,
            warning: snapshot.warning,
        })
    }

    /// Records, newest first
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Warning raised while loading, if the stored snapshot was unreadable
    pub fn load_warning(&self) -> Option<&LoadWarning> {
        self.warning.as_ref()
    }

    /// Add a record at the front (newest-first)
    pub fn prepend(&mut self, item: T) -> Result<(), StoreError> {
        let mut next = Vec::with_capacity(self.items.len() + 1);
        next.push(item);
        next.extend(self.items.iter().cloned());
        self.commit(next)
    }

    /// Replace the record with the same id, keeping its position.
    ///
    /// Returns false (and writes nothing) when no record matches.
    pub fn replace(&mut self, item: T) -> Result<bool, StoreError> {
        let Some(index) = self.items.iter().position(|i| i.id() == item.id()) else {
            return Ok(false);
        };
        let mut next = self.items.clone();
        next[index] = item;
        self.commit(next)?;
        Ok(true)
    }

    /// Remove the record with the given id. Unknown ids are a no-op.
    pub fn remove(&mut self, id: &str) -> Result<bool, StoreError> {
        if !self.contains(id) {
            return Ok(false);
        }
        let next: Vec<T> = self
            .items
            .iter()
            .filter(|item| item.id() != id)
            .cloned()
            .collect();
        self.commit(next)?;
        Ok(true)
    }

    /// Append records at the back (oldest end), skipping ids already present.
    ///
    /// Returns the number of records added.
    pub fn append_missing<I>(&mut self, items: I) -> Result<usize, StoreError>
    where
        I: IntoIterator<Item = T>,
    {
        let mut next = self.items.clone();
        let mut added = 0;
        for item in items {
            if next.iter().any(|existing| existing.id() == item.id()) {
                debug!("skipping duplicate id '{}' in '{}'", item.id(), self.key);
                continue;
            }
            next.push(item);
            added += 1;
        }
        if added > 0 {
            self.commit(next)?;
        }
        Ok(added)
    }

    fn commit(&mut self, next: Vec<T>) -> Result<(), StoreError> {
        let bytes = encode_snapshot(&self.key, &next)?;
        self.store.save(&self.key, &bytes)?;
        self.items = next;
        Ok(())
    }
}
