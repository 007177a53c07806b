//! Instrumentation Module
//!
//! Call counting and call history around async operations, recorded in the
//! store under keys derived from an explicit operation identifier.
//!
//! # Keys
//! - `<op>` - call counter
//! - `<op>:inputs` - argument representations, one per call
//! - `<op>:outputs` - result representations, one per successful call

mod replay;

use std::fmt;
use std::future::Future;

use tracing::debug;

use crate::error::Result;
use crate::store::SharedStore;

pub use replay::{CallRecord, CallTrace};

// == Operation Identifier ==
/// Stable name of an instrumented operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OpId(&'static str);

impl OpId {
    /// `Cache::store`
    pub const CACHE_STORE: OpId = OpId("Cache.store");

    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub fn name(&self) -> &'static str {
        self.0
    }

    /// Key of the call counter.
    pub fn counter_key(&self) -> String {
        self.0.to_string()
    }

    /// Key of the input history list.
    pub fn inputs_key(&self) -> String {
        format!("{}:inputs", self.0)
    }

    /// Key of the output history list.
    pub fn outputs_key(&self) -> String {
        format!("{}:outputs", self.0)
    }
}

impl fmt::Display for OpId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

// == Instrument ==
/// Wraps operations with counting and history side effects.
///
/// Operations are passed as futures. Futures do nothing until awaited, so
/// every side effect a wrapper performs before awaiting happens strictly
/// before the operation runs.
#[derive(Clone)]
pub struct Instrument {
    store: SharedStore,
}

impl Instrument {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    // == Count Calls ==
    /// Increments the counter for `op`, then runs `call`.
    ///
    /// The increment is kept even if `call` fails.
    pub async fn count_calls<T, F>(&self, op: OpId, call: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        let count = self.store.incr(&op.counter_key()).await?;
        debug!(op = op.name(), count, "call counted");
        call.await
    }

    // == Call History ==
    /// Appends `inputs` to the input history, runs `call`, then appends the
    /// result's `Display` form to the output history.
    ///
    /// A failing `call` leaves its input without a matching output.
    pub async fn call_history<T, F>(&self, op: OpId, inputs: String, call: F) -> Result<T>
    where
        T: fmt::Display,
        F: Future<Output = Result<T>>,
    {
        self.store.rpush(&op.inputs_key(), &inputs).await?;
        let output = call.await?;
        self.store
            .rpush(&op.outputs_key(), &output.to_string())
            .await?;
        Ok(output)
    }

    // == Tracked ==
    /// Counting and history together: increment, append input, run, append
    /// output.
    pub async fn tracked<T, F>(&self, op: OpId, inputs: String, call: F) -> Result<T>
    where
        T: fmt::Display,
        F: Future<Output = Result<T>>,
    {
        self.count_calls(op, self.call_history(op, inputs, call))
            .await
    }

    // == Call Count ==
    /// Current counter value for `op`; zero if it was never called.
    pub async fn call_count(&self, op: OpId) -> Result<i64> {
        match self.store.get(&op.counter_key()).await? {
            Some(raw) => crate::cache::to_int(raw),
            None => Ok(0),
        }
    }

    // == Replay ==
    /// Reads back the recorded history of `op`.
    pub async fn replay(&self, op: OpId) -> Result<CallTrace> {
        replay::replay(&*self.store, op).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::error::CacheError;
    use crate::store::{KeyStore, MemoryStore};

    const DOUBLE: OpId = OpId::new("Math.double");

    fn setup() -> (Arc<MemoryStore>, Instrument) {
        let store = Arc::new(MemoryStore::new());
        let instrument = Instrument::new(store.clone());
        (store, instrument)
    }

    async fn double(x: i64) -> Result<i64> {
        Ok(x * 2)
    }

    async fn fail() -> Result<i64> {
        Err(CacheError::Fetch("boom".to_string()))
    }

    #[test]
    fn test_op_id_keys() {
        assert_eq!(OpId::CACHE_STORE.counter_key(), "Cache.store");
        assert_eq!(OpId::CACHE_STORE.inputs_key(), "Cache.store:inputs");
        assert_eq!(OpId::CACHE_STORE.outputs_key(), "Cache.store:outputs");
        assert_eq!(DOUBLE.to_string(), "Math.double");
    }

    #[tokio::test]
    async fn test_count_calls_returns_result_unchanged() {
        let (_store, instrument) = setup();

        for x in 0..3 {
            let result = instrument.count_calls(DOUBLE, double(x)).await.unwrap();
            assert_eq!(result, x * 2);
        }

        assert_eq!(instrument.call_count(DOUBLE).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_call_count_never_called() {
        let (_store, instrument) = setup();
        assert_eq!(instrument.call_count(DOUBLE).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_count_calls_counts_failures() {
        let (_store, instrument) = setup();

        let result = instrument.count_calls(DOUBLE, fail()).await;
        assert!(matches!(result, Err(CacheError::Fetch(_))));
        assert_eq!(instrument.call_count(DOUBLE).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_call_history_records_in_order() {
        let (store, instrument) = setup();

        instrument
            .call_history(DOUBLE, "(1)".to_string(), double(1))
            .await
            .unwrap();
        instrument
            .call_history(DOUBLE, "(5)".to_string(), double(5))
            .await
            .unwrap();

        let inputs = store.lrange(&DOUBLE.inputs_key(), 0, -1).await.unwrap();
        let outputs = store.lrange(&DOUBLE.outputs_key(), 0, -1).await.unwrap();
        assert_eq!(inputs, vec!["(1)", "(5)"]);
        assert_eq!(outputs, vec!["2", "10"]);
        // History alone does not count
        assert_eq!(instrument.call_count(DOUBLE).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_call_history_failure_leaves_dangling_input() {
        let (store, instrument) = setup();

        let result = instrument
            .call_history(DOUBLE, "()".to_string(), fail())
            .await;
        assert!(result.is_err());

        let inputs = store.lrange(&DOUBLE.inputs_key(), 0, -1).await.unwrap();
        let outputs = store.lrange(&DOUBLE.outputs_key(), 0, -1).await.unwrap();
        assert_eq!(inputs, vec!["()"]);
        assert!(outputs.is_empty());
    }

    #[tokio::test]
    async fn test_tracked_ordering() {
        let (store, instrument) = setup();
        let probe = store.clone();

        // The operation observes the side effects already made by the wrappers
        let observed = instrument
            .tracked(DOUBLE, "(7)".to_string(), async move {
                let count = probe.get(&DOUBLE.counter_key()).await?;
                let inputs = probe.lrange(&DOUBLE.inputs_key(), 0, -1).await?;
                let outputs = probe.lrange(&DOUBLE.outputs_key(), 0, -1).await?;
                assert_eq!(count, Some(b"1".to_vec()));
                assert_eq!(inputs, vec!["(7)"]);
                assert!(outputs.is_empty());
                Ok::<i64, CacheError>(14)
            })
            .await
            .unwrap();

        assert_eq!(observed, 14);
        let outputs = store.lrange(&DOUBLE.outputs_key(), 0, -1).await.unwrap();
        assert_eq!(outputs, vec!["14"]);
    }
}
