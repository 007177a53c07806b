//! Store Module
//!
//! The key-value capability the facade runs on, plus two adapters: a Redis
//! pass-through and an in-process keyspace with the same semantics.

mod entry;
mod memory;
mod redis_store;

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;

pub use entry::{current_timestamp_ms, EntryData, StoreEntry};
pub use memory::MemoryStore;
pub use redis_store::RedisStore;

/// Store handle shared by the facade, the instrumentation and the page cache.
pub type SharedStore = Arc<dyn KeyStore>;

// == Key Store ==
/// Primitive key-value operations.
///
/// Every individual call is atomic; sequences of calls are not.
#[async_trait]
pub trait KeyStore: Send + Sync {
    /// Stores `value` under `key`, replacing any previous value and TTL.
    async fn set(&self, key: &str, value: &[u8]) -> Result<()>;

    /// Returns the bytes stored under `key`, or `None` when absent or expired.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Increments the integer under `key` by one and returns the new value.
    /// A missing key counts as zero.
    async fn incr(&self, key: &str) -> Result<i64>;

    /// Appends `value` to the list under `key`; returns the new length.
    async fn rpush(&self, key: &str, value: &str) -> Result<usize>;

    /// Returns list elements `start..=stop`. Negative indices count from the
    /// end, so `(0, -1)` is the whole list. Missing keys yield an empty list.
    async fn lrange(&self, key: &str, start: isize, stop: isize) -> Result<Vec<String>>;

    /// Stores `value` under `key` with a TTL in seconds.
    async fn setex(&self, key: &str, ttl_secs: u64, value: &[u8]) -> Result<()>;

    /// Removes every key from the keyspace.
    async fn flushdb(&self) -> Result<()>;
}
