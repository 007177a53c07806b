//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check the facade against arbitrary values and call
//! sequences.

use proptest::prelude::*;
use std::collections::HashSet;
use std::sync::Arc;

use crate::cache::{Cache, Value};
use crate::store::MemoryStore;

// == Strategies ==
/// Generates any value kind the cache accepts
fn value_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        ".{0,64}".prop_map(Value::Text),
        prop::collection::vec(any::<u8>(), 0..64).prop_map(Value::Bytes),
        any::<i64>().prop_map(Value::Int),
        any::<f64>()
            .prop_filter("finite", |x| x.is_finite())
            .prop_map(Value::Float),
    ]
}

fn create_cache() -> Cache {
    Cache::new(Arc::new(MemoryStore::new()))
}

/// Reads `key` back with the conversion matching the stored kind.
async fn read_back(cache: &Cache, key: &str, kind: &Value) -> Option<Value> {
    match kind {
        Value::Text(_) => cache.get_str(key).await.unwrap().map(Value::Text),
        Value::Bytes(_) => cache.get(key).await.unwrap().map(Value::Bytes),
        Value::Int(_) => cache.get_int(key).await.unwrap().map(Value::Int),
        Value::Float(_) => cache.get_float(key).await.unwrap().map(Value::Float),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Storing a value and reading it back with the matching conversion
    // returns the original value.
    #[test]
    fn prop_store_get_returns_original(value in value_strategy()) {
        let retrieved = tokio_test::block_on(async {
            let cache = create_cache();
            let key = cache.store(value.clone()).await.unwrap();
            read_back(&cache, key.as_str(), &value).await
        });

        prop_assert_eq!(retrieved, Some(value));
    }

    // Every store call issues a new key, counts once, and records one
    // history entry whose output is the issued key.
    #[test]
    fn prop_counter_and_history_track_calls(
        values in prop::collection::vec(value_strategy(), 1..20)
    ) {
        let (keys, count, trace) = tokio_test::block_on(async {
            let cache = create_cache();
            let mut keys = Vec::new();
            for value in &values {
                keys.push(cache.store(value.clone()).await.unwrap());
            }
            let count = cache.store_count().await.unwrap();
            let trace = cache.replay_store().await.unwrap();
            (keys, count, trace)
        });

        let unique: HashSet<_> = keys.iter().collect();
        prop_assert_eq!(unique.len(), values.len(), "Keys must be unique");
        prop_assert_eq!(count, values.len() as i64);
        prop_assert_eq!(trace.calls, values.len());
        prop_assert!(trace.is_aligned());

        for ((record, key), value) in trace.records.iter().zip(&keys).zip(&values) {
            prop_assert_eq!(&record.input, &value.repr());
            prop_assert_eq!(&record.output, &key.to_string());
        }
    }
}
