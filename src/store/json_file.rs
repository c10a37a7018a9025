//! JSON-file backend — one `<key>.json` file per bucket under a data
//! directory.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, info};

use crate::error::StoreError;
use crate::store::{Bucket, BucketStore};

/// File-backed bucket store. Saves are whole-file overwrites.
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Open (or create) the data directory.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)
            .map_err(|e| StoreError::Io(format!("Failed to create data directory: {e}")))?;
        info!(dir = %dir.display(), "Bucket store opened");
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, bucket: Bucket) -> PathBuf {
        self.dir.join(format!("{}.json", bucket.key()))
    }
}

#[async_trait]
impl BucketStore for JsonFileStore {
    async fn load_raw(&self, bucket: Bucket) -> Result<Option<String>, StoreError> {
        let path = self.path_for(bucket);
        match tokio::fs::read_to_string(&path).await {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Io(format!(
                "Failed to read {}: {e}",
                path.display()
            ))),
        }
    }

    async fn save_raw(&self, bucket: Bucket, json: &str) -> Result<(), StoreError> {
        let path = self.path_for(bucket);
        tokio::fs::write(&path, json).await.map_err(|e| {
            StoreError::Io(format!("Failed to write {}: {e}", path.display()))
        })?;
        debug!(bucket = bucket.key(), bytes = json.len(), "Bucket saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FocusItem, MonthlyGoal, Task};
    use crate::store::{load_bucket, save_bucket};

    #[tokio::test]
    async fn missing_file_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path()).unwrap();
        assert!(store.load_raw(Bucket::Tasks).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn save_overwrites_previous_contents() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path()).unwrap();
        store.save_raw(Bucket::Tasks, "[1]").await.unwrap();
        store.save_raw(Bucket::Tasks, "[2]").await.unwrap();
        assert_eq!(store.load_raw(Bucket::Tasks).await.unwrap().unwrap(), "[2]");
    }

    #[tokio::test]
    async fn all_four_buckets_roundtrip_by_value() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path()).unwrap();
        let day = "2024-05-01".parse().unwrap();

        let tasks = vec![Task::new("Deep Work", day).with_working_hours(1.5)];
        let focus = vec![FocusItem::new("Ship it", "Priority")];
        let goals = vec![MonthlyGoal::new(day)];
        let labels = vec!["Deep Work".to_string(), "Deep Work".to_string()];

        save_bucket(&store, Bucket::Tasks, &tasks).await.unwrap();
        save_bucket(&store, Bucket::FocusItems, &focus).await.unwrap();
        save_bucket(&store, Bucket::MonthlyGoals, &goals).await.unwrap();
        save_bucket(&store, Bucket::QuickTaskLabels, &labels)
            .await
            .unwrap();

        let tasks2: Vec<Task> = load_bucket(&store, Bucket::Tasks).await.unwrap();
        let focus2: Vec<FocusItem> = load_bucket(&store, Bucket::FocusItems).await.unwrap();
        let goals2: Vec<MonthlyGoal> = load_bucket(&store, Bucket::MonthlyGoals).await.unwrap();
        let labels2: Vec<String> = load_bucket(&store, Bucket::QuickTaskLabels).await.unwrap();

        assert_eq!(tasks2, tasks);
        assert_eq!(focus2, focus);
        assert_eq!(goals2, goals);
        assert_eq!(labels2, labels);
    }

    #[tokio::test]
    async fn corrupt_file_recovers_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path()).unwrap();
        store
            .save_raw(Bucket::MonthlyGoals, "]] definitely not json")
            .await
            .unwrap();
        let goals: Vec<MonthlyGoal> = load_bucket(&store, Bucket::MonthlyGoals)
            .await
            .unwrap_or_default();
        assert!(goals.is_empty());
    }
}
