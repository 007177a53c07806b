//! Cache Facade Module
//!
//! Stores values under generated keys and reads them back with conversion.

use tracing::debug;

use crate::cache::{to_float, to_int, to_text, Key, Value};
use crate::error::{CacheError, Result};
use crate::instrument::{CallTrace, Instrument, OpId};
use crate::store::SharedStore;

// == Cache ==
/// Typed facade over a [`KeyStore`](crate::store::KeyStore).
///
/// `store` is counted and its history recorded under [`OpId::CACHE_STORE`].
#[derive(Clone)]
pub struct Cache {
    store: SharedStore,
    instrument: Instrument,
}

impl Cache {
    // == Constructor ==
    /// Creates a facade over `store`. The keyspace is left untouched; call
    /// [`reset`](Self::reset) to start from an empty store.
    pub fn new(store: SharedStore) -> Self {
        let instrument = Instrument::new(store.clone());
        Self { store, instrument }
    }

    // == Reset ==
    /// Clears the whole keyspace, including other users' keys.
    pub async fn reset(&self) -> Result<()> {
        self.store.flushdb().await
    }

    // == Store ==
    /// Stores `value` under a freshly generated key and returns the key.
    pub async fn store(&self, value: impl Into<Value>) -> Result<Key> {
        let value = value.into();
        let inputs = value.repr();

        self.instrument
            .tracked(OpId::CACHE_STORE, inputs, async {
                let key = Key::generate();
                self.store.set(key.as_str(), &value.to_bytes()).await?;
                debug!(key = key.as_str(), "stored value");
                Ok::<Key, CacheError>(key)
            })
            .await
    }

    // == Get ==
    /// Raw bytes stored under `key`, or `None` if absent.
    pub async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        self.store.get(key).await
    }

    /// Value under `key` passed through `convert`, or `None` if absent.
    ///
    /// Conversion errors are returned as-is.
    pub async fn get_with<T, F>(&self, key: &str, convert: F) -> Result<Option<T>>
    where
        F: FnOnce(Vec<u8>) -> Result<T>,
    {
        self.get(key).await?.map(convert).transpose()
    }

    /// Value under `key` decoded as UTF-8.
    pub async fn get_str(&self, key: &str) -> Result<Option<String>> {
        self.get_with(key, to_text).await
    }

    /// Value under `key` parsed as a base-10 integer.
    pub async fn get_int(&self, key: &str) -> Result<Option<i64>> {
        self.get_with(key, to_int).await
    }

    /// Value under `key` parsed as a float.
    pub async fn get_float(&self, key: &str) -> Result<Option<f64>> {
        self.get_with(key, to_float).await
    }

    // == Instrumentation ==
    /// Number of `store` calls since the keyspace was last cleared.
    pub async fn store_count(&self) -> Result<i64> {
        self.instrument.call_count(OpId::CACHE_STORE).await
    }

    /// Recorded `store` history.
    pub async fn replay_store(&self) -> Result<CallTrace> {
        self.instrument.replay(OpId::CACHE_STORE).await
    }
}
