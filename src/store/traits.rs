//! `BucketStore` trait — backend-agnostic async interface for bucket
//! persistence.

use async_trait::async_trait;

use crate::error::StoreError;

/// The four named buckets, one per entity collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    Tasks,
    FocusItems,
    MonthlyGoals,
    QuickTaskLabels,
}

impl Bucket {
    /// Storage key. Kept identical to the keys the web app used, so bucket
    /// files exported from it remain loadable.
    pub fn key(self) -> &'static str {
        match self {
            Bucket::Tasks => "superpower_routine_tasks_v2",
            Bucket::FocusItems => "superpower_routine_goals_v2",
            Bucket::MonthlyGoals => "superpower_monthly_roadmap_v2",
            Bucket::QuickTaskLabels => "superpower_quick_tasks_v2",
        }
    }
}

/// Backend-agnostic bucket persistence.
///
/// Implementations store opaque JSON text per bucket. A crash between two
/// `save_raw` calls can leave buckets inconsistent relative to each other;
/// that is accepted for this single-device, low-stakes data.
#[async_trait]
pub trait BucketStore: Send + Sync {
    /// The bucket's stored JSON text, or `None` if it was never written.
    async fn load_raw(&self, bucket: Bucket) -> Result<Option<String>, StoreError>;

    /// Overwrite the bucket's stored value.
    async fn save_raw(&self, bucket: Bucket, json: &str) -> Result<(), StoreError>;
}
