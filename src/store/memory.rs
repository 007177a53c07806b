//! Memory Store Module
//!
//! In-process keyspace implementing [`KeyStore`] with TTL expiration.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::{CacheError, Result};
use crate::store::{current_timestamp_ms, EntryData, KeyStore, StoreEntry};

// == Memory Store ==
/// Keyspace held in a HashMap behind a single lock.
///
/// Each trait method takes the lock once, so individual operations are atomic.
/// Expired entries are dropped lazily on access and by [`cleanup_expired`].
///
/// [`cleanup_expired`]: MemoryStore::cleanup_expired
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, StoreEntry>>,
}

impl MemoryStore {
    // == Constructor ==
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // == Cleanup Expired ==
    /// Removes all expired entries.
    ///
    /// Returns the number of entries removed.
    pub async fn cleanup_expired(&self) -> usize {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired());
        before - entries.len()
    }

    // == TTL ==
    /// Remaining TTL of `key` in seconds; `None` when absent or persistent.
    pub async fn ttl(&self, key: &str) -> Option<u64> {
        let entries = self.entries.read().await;
        entries
            .get(key)
            .filter(|entry| !entry.is_expired())
            .and_then(StoreEntry::ttl_remaining)
    }

    // == Length ==
    /// Returns the number of live entries.
    pub async fn len(&self) -> usize {
        let entries = self.entries.read().await;
        entries.values().filter(|entry| !entry.is_expired()).count()
    }

    // == Is Empty ==
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

/// Drops `key` if it has expired, so callers only see live entries.
fn purge_if_expired(entries: &mut HashMap<String, StoreEntry>, key: &str) {
    if entries.get(key).is_some_and(StoreEntry::is_expired) {
        entries.remove(key);
    }
}

fn wrong_type(key: &str, held: &str, wanted: &str) -> CacheError {
    CacheError::WrongType(format!(
        "key '{}' holds a {}, expected a {}",
        key, held, wanted
    ))
}

/// Resolves a Redis-style inclusive range against a list of `len` elements.
fn range_bounds(len: usize, start: isize, stop: isize) -> Option<(usize, usize)> {
    let len = len as isize;
    let start = if start < 0 { (len + start).max(0) } else { start };
    let stop = if stop < 0 { len + stop } else { stop.min(len - 1) };

    if start > stop || start >= len {
        None
    } else {
        Some((start as usize, stop as usize))
    }
}

#[async_trait]
impl KeyStore for MemoryStore {
    async fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        let mut entries = self.entries.write().await;
        entries.insert(
            key.to_string(),
            StoreEntry::new(EntryData::Bytes(value.to_vec()), None),
        );
        debug!(key, bytes = value.len(), "set");
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut entries = self.entries.write().await;
        purge_if_expired(&mut entries, key);

        match entries.get(key) {
            Some(StoreEntry {
                data: EntryData::Bytes(bytes),
                ..
            }) => Ok(Some(bytes.clone())),
            Some(entry) => Err(wrong_type(key, entry.data.kind(), "string")),
            None => Ok(None),
        }
    }

    async fn incr(&self, key: &str) -> Result<i64> {
        let mut entries = self.entries.write().await;
        purge_if_expired(&mut entries, key);

        match entries.get_mut(key) {
            Some(entry) => {
                let EntryData::Bytes(bytes) = &mut entry.data else {
                    return Err(wrong_type(key, "list", "string"));
                };
                let current: i64 = std::str::from_utf8(bytes)
                    .ok()
                    .and_then(|text| text.parse().ok())
                    .ok_or_else(|| {
                        CacheError::WrongType(format!("key '{}' is not an integer", key))
                    })?;
                let next = current.checked_add(1).ok_or_else(|| {
                    CacheError::InvalidArgument(format!("increment of '{}' overflows", key))
                })?;
                // TTL is kept on increment
                *bytes = next.to_string().into_bytes();
                Ok(next)
            }
            None => {
                entries.insert(
                    key.to_string(),
                    StoreEntry::new(EntryData::Bytes(b"1".to_vec()), None),
                );
                Ok(1)
            }
        }
    }

    async fn rpush(&self, key: &str, value: &str) -> Result<usize> {
        let mut entries = self.entries.write().await;
        purge_if_expired(&mut entries, key);

        let entry = entries
            .entry(key.to_string())
            .or_insert_with(|| StoreEntry::new(EntryData::List(Vec::new()), None));

        match &mut entry.data {
            EntryData::List(items) => {
                items.push(value.to_string());
                Ok(items.len())
            }
            EntryData::Bytes(_) => Err(wrong_type(key, "string", "list")),
        }
    }

    async fn lrange(&self, key: &str, start: isize, stop: isize) -> Result<Vec<String>> {
        let mut entries = self.entries.write().await;
        purge_if_expired(&mut entries, key);

        match entries.get(key) {
            Some(StoreEntry {
                data: EntryData::List(items),
                ..
            }) => Ok(range_bounds(items.len(), start, stop)
                .map(|(from, to)| items[from..=to].to_vec())
                .unwrap_or_default()),
            Some(entry) => Err(wrong_type(key, entry.data.kind(), "list")),
            None => Ok(Vec::new()),
        }
    }

    async fn setex(&self, key: &str, ttl_secs: u64, value: &[u8]) -> Result<()> {
        let deadline = ttl_secs
            .checked_mul(1000)
            .and_then(|ms| current_timestamp_ms().checked_add(ms));
        if ttl_secs == 0 || deadline.is_none() {
            return Err(CacheError::InvalidArgument(format!(
                "invalid expire time for '{}'",
                key
            )));
        }

        let mut entries = self.entries.write().await;
        entries.insert(
            key.to_string(),
            StoreEntry::new(EntryData::Bytes(value.to_vec()), Some(ttl_secs)),
        );
        debug!(key, ttl_secs, "setex");
        Ok(())
    }

    async fn flushdb(&self) -> Result<()> {
        let mut entries = self.entries.write().await;
        let removed = entries.len();
        entries.clear();
        debug!(removed, "flushdb");
        Ok(())
    }
}
