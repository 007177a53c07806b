//! kvtrace - typed values, call tracing and page caching over a key-value store
//!
//! Stores values under generated keys, counts and records calls to
//! instrumented operations, and caches fetched pages for a bounded time.
//! All state lives in the store; see [`store::KeyStore`].

pub mod cache;
pub mod config;
pub mod error;
pub mod instrument;
pub mod store;
pub mod tasks;
pub mod web;

pub use cache::{Cache, Key, Value};
pub use config::Config;
pub use error::{CacheError, Result};
pub use instrument::{CallTrace, Instrument, OpId};
pub use store::{KeyStore, MemoryStore, RedisStore, SharedStore};
pub use tasks::spawn_cleanup_task;
pub use web::{Fetcher, HttpFetcher, UrlCache};
