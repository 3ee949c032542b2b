//! Dict store contract.
//!
//! A small keyed document store used to persist configuration objects
//! (the login settings) as opaque JSON.

use async_trait::async_trait;
use dashmap::DashMap;

use crate::store::StoreError;

/// Keyed JSON document storage.
#[async_trait]
pub trait DictStore: Send + Sync {
    /// Fetch the document under `key`, if any.
    async fn get_json(&self, key: &str) -> Result<Option<serde_json::Value>, StoreError>;

    /// Store (or replace) the document under `key`.
    async fn put_json(&self, key: &str, value: serde_json::Value) -> Result<(), StoreError>;
}

/// In-memory dict store.
pub struct MemoryDictStore {
    entries: DashMap<String, serde_json::Value>,
}

impl MemoryDictStore {
    pub fn new() -> Self {
        Self { entries: DashMap::new() }
    }
}

impl Default for MemoryDictStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DictStore for MemoryDictStore {
    async fn get_json(&self, key: &str) -> Result<Option<serde_json::Value>, StoreError> {
        Ok(self.entries.get(key).map(|entry| entry.value().clone()))
    }

    async fn put_json(&self, key: &str, value: serde_json::Value) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_and_get_roundtrip() {
        let store = MemoryDictStore::new();
        assert!(store.get_json("missing").await.unwrap().is_none());

        let doc = serde_json::json!({"a": 1});
        store.put_json("k", doc.clone()).await.unwrap();
        assert_eq!(store.get_json("k").await.unwrap(), Some(doc));
    }
}
