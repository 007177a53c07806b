//! Store Entry Module
//!
//! Defines the structure for individual keyspace entries with TTL support.

use std::time::{SystemTime, UNIX_EPOCH};

// == Entry Data ==
/// Payload of a keyspace entry.
#[derive(Debug, Clone, PartialEq)]
pub enum EntryData {
    /// Plain string value (raw bytes)
    Bytes(Vec<u8>),
    /// Ordered list of text elements
    List(Vec<String>),
}

impl EntryData {
    /// Name of the payload kind, as reported in type errors.
    pub fn kind(&self) -> &'static str {
        match self {
            EntryData::Bytes(_) => "string",
            EntryData::List(_) => "list",
        }
    }
}

// == Store Entry ==
/// A single keyspace entry with payload and expiry metadata.
#[derive(Debug, Clone)]
pub struct StoreEntry {
    /// The stored payload
    pub data: EntryData,
    /// Expiration timestamp (Unix milliseconds), None = no expiration
    pub expires_at: Option<u64>,
}

impl StoreEntry {
    // == Constructor ==
    /// Creates a new entry with optional TTL.
    ///
    /// # Arguments
    /// * `data` - The payload to store
    /// * `ttl_seconds` - Optional TTL in seconds; saturates at the end of time
    pub fn new(data: EntryData, ttl_seconds: Option<u64>) -> Self {
        let expires_at = ttl_seconds.map(|ttl| {
            current_timestamp_ms().saturating_add(ttl.saturating_mul(1000))
        });

        Self { data, expires_at }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// An entry is expired once the current time is greater than or equal to
    /// its expiration time.
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires) => current_timestamp_ms() >= expires,
            None => false,
        }
    }

    // == Time To Live ==
    /// Returns remaining TTL in milliseconds, or None if no expiration is set.
    ///
    /// Returns `Some(0)` once the entry has expired.
    pub fn ttl_remaining_ms(&self) -> Option<u64> {
        self.expires_at
            .map(|expires| expires.saturating_sub(current_timestamp_ms()))
    }

    /// Returns remaining TTL in seconds, or None if no expiration is set.
    pub fn ttl_remaining(&self) -> Option<u64> {
        self.ttl_remaining_ms().map(|ms| ms / 1000)
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
