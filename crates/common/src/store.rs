//! Shared result store for pipeline outputs

use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

/// Mutex-guarded map collecting results from the concurrently running
/// pipelines. Values are serialized on `put` so the store itself stays
/// type-agnostic.
#[derive(Debug, Default)]
pub struct ResultStore {
    results: Mutex<BTreeMap<String, Value>>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a result under `key`, replacing any previous value.
    pub fn put<T: Serialize>(&self, key: &str, value: &T) {
        let value = match serde_json::to_value(value) {
            Ok(v) => v,
            Err(e) => {
                warn!("Dropping unserializable result for {}: {}", key, e);
                return;
            }
        };
        // A panicked writer must not poison the store for surviving pipelines.
        let mut results = self
            .results
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        results.insert(key.to_string(), value);
        debug!("Stored result for key: {}", key);
    }

    /// Copy of everything stored so far.
    pub fn snapshot(&self) -> BTreeMap<String, Value> {
        self.results
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_put_then_snapshot() {
        let store = ResultStore::new();
        store.put("github/platform", &42u32);
        store.put("finance/summary", &"ok");

        let snapshot = store.snapshot();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot["github/platform"], Value::from(42));
        assert_eq!(snapshot["finance/summary"], Value::from("ok"));
    }

    #[test]
    fn test_put_replaces_previous_value() {
        let store = ResultStore::new();
        store.put("k", &1);
        store.put("k", &2);
        assert_eq!(store.snapshot()["k"], Value::from(2));
    }

    #[test]
    fn test_concurrent_writers() {
        let store = Arc::new(ResultStore::new());
        let mut handles = Vec::new();

        for i in 0..8 {
            let store = store.clone();
            handles.push(std::thread::spawn(move || {
                for j in 0..100 {
                    store.put(&format!("writer{}/item{}", i, j), &j);
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.snapshot().len(), 8 * 100);
    }
}
