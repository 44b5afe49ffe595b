use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde_json::Value;

/// Session-lifetime memoization of decoded upstream responses, keyed by
/// request signature.
///
/// Entries are never evicted, so growth is unbounded for the life of the
/// process. Upstream data does not change within a session, which makes two
/// racing inserts for one key harmless: both carry the same value.
#[derive(Debug, Default)]
pub struct ResponseCache {
    entries: Mutex<HashMap<String, Arc<Value>>>,
}

impl ResponseCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<Arc<Value>> {
        self.entries
            .lock()
            .ok()
            .and_then(|entries| entries.get(key).cloned())
    }

    pub fn insert(&self, key: impl Into<String>, value: Value) -> Arc<Value> {
        let value = Arc::new(value);
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.into(), value.clone());
        }
        value
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
