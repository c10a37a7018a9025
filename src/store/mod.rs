//! Persistence layer — named JSON buckets behind an async trait.
//!
//! Each entity collection lives in its own bucket; buckets are loaded and
//! saved independently, always as one full serialization (no deltas, no
//! cross-bucket transactions).

mod json_file;
mod memory;
mod traits;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;
pub use traits::{Bucket, BucketStore};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::error::StoreError;

/// Load a bucket's collection.
///
/// Returns `None` only when the bucket has never been written. Corrupt
/// contents and read failures are recovered as an empty collection with a
/// warning — they never reach the caller as errors.
pub async fn load_bucket<T>(store: &dyn BucketStore, bucket: Bucket) -> Option<Vec<T>>
where
    T: DeserializeOwned,
{
    let raw = match store.load_raw(bucket).await {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            warn!(bucket = bucket.key(), error = %e, "Bucket read failed, starting empty");
            return Some(Vec::new());
        }
    };
    match serde_json::from_str(&raw) {
        Ok(items) => Some(items),
        Err(e) => {
            warn!(bucket = bucket.key(), error = %e, "Bucket contents unreadable, starting empty");
            Some(Vec::new())
        }
    }
}

/// Overwrite a bucket with a fresh full serialization of `items`.
pub async fn save_bucket<T>(
    store: &dyn BucketStore,
    bucket: Bucket,
    items: &[T],
) -> Result<(), StoreError>
where
    T: Serialize,
{
    let json =
        serde_json::to_string(items).map_err(|e| StoreError::Serialization(e.to_string()))?;
    store.save_raw(bucket, &json).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Task;

    #[tokio::test]
    async fn load_never_written_bucket_is_none() {
        let store = MemoryStore::new();
        let loaded: Option<Vec<Task>> = load_bucket(&store, Bucket::Tasks).await;
        assert!(loaded.is_none());
    }

    #[tokio::test]
    async fn load_corrupt_bucket_is_empty() {
        let store = MemoryStore::new();
        store
            .save_raw(Bucket::Tasks, "{not json at all")
            .await
            .unwrap();
        let loaded: Option<Vec<Task>> = load_bucket(&store, Bucket::Tasks).await;
        assert_eq!(loaded.unwrap().len(), 0);
    }

    #[tokio::test]
    async fn save_then_load_roundtrip() {
        let store = MemoryStore::new();
        let tasks = vec![
            Task::new("Deep Work", "2024-05-01".parse().unwrap()).with_hours(2.0),
            Task::new("Daily Review", "2024-05-02".parse().unwrap()),
        ];
        save_bucket(&store, Bucket::Tasks, &tasks).await.unwrap();
        let loaded: Vec<Task> = load_bucket(&store, Bucket::Tasks).await.unwrap();
        assert_eq!(loaded, tasks);
    }

    #[tokio::test]
    async fn saving_one_bucket_leaves_others_untouched() {
        let store = MemoryStore::new();
        let labels = vec!["Deep Work".to_string()];
        save_bucket(&store, Bucket::QuickTaskLabels, &labels)
            .await
            .unwrap();
        save_bucket(&store, Bucket::Tasks, &Vec::<Task>::new())
            .await
            .unwrap();
        let loaded: Vec<String> = load_bucket(&store, Bucket::QuickTaskLabels).await.unwrap();
        assert_eq!(loaded, labels);
    }
}
