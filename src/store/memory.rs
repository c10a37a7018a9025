//! In-memory backend, for tests and throwaway sessions.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::error::StoreError;
use crate::store::{Bucket, BucketStore};

/// Bucket store that keeps everything in a map. Nothing survives the
/// process.
#[derive(Default)]
pub struct MemoryStore {
    buckets: Mutex<HashMap<Bucket, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BucketStore for MemoryStore {
    async fn load_raw(&self, bucket: Bucket) -> Result<Option<String>, StoreError> {
        Ok(self.buckets.lock().await.get(&bucket).cloned())
    }

    async fn save_raw(&self, bucket: Bucket, json: &str) -> Result<(), StoreError> {
        self.buckets.lock().await.insert(bucket, json.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn starts_empty_and_retains_saves() {
        let store = MemoryStore::new();
        assert!(store.load_raw(Bucket::Tasks).await.unwrap().is_none());
        store.save_raw(Bucket::Tasks, "[]").await.unwrap();
        assert_eq!(
            store.load_raw(Bucket::Tasks).await.unwrap().as_deref(),
            Some("[]")
        );
    }
}
