//! State repository — owns the four entity collections and every mutation
//! path.
//!
//! All writes go through here: each successful mutation re-serializes the
//! affected collection to its bucket (write-through) and then broadcasts a
//! [`ChangeEvent`] for dependent consumers. Collections keep insertion
//! order; reads hand out slices or snapshots in that order.

use std::sync::Arc;

use chrono::NaiveDate;
use tokio::sync::broadcast;
use tracing::debug;
use uuid::Uuid;

use crate::error::StoreError;
use crate::model::{
    DEFAULT_TASK_DESCRIPTION, FocusItem, FocusPatch, GoalPatch, MonthlyGoal, Task, TaskPatch,
};
use crate::store::{Bucket, BucketStore, load_bucket, save_bucket};

/// Quick-task labels seeded the first time the label bucket is opened.
pub const DEFAULT_QUICK_LABELS: [&str; 6] = [
    "Morning Exercise",
    "Deep Work",
    "Lunch Break",
    "Study Session",
    "Skill Practice",
    "Daily Review",
];

const EVENT_CAPACITY: usize = 64;

/// Notification broadcast after every successful mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeEvent {
    TaskAdded(Uuid),
    TaskUpdated(Uuid),
    TaskRemoved(Uuid),
    FocusAdded(Uuid),
    FocusUpdated(Uuid),
    FocusRemoved(Uuid),
    GoalAdded(Uuid),
    GoalUpdated(Uuid),
    GoalRemoved(Uuid),
    QuickLabelsChanged,
}

/// The single owner of all tracked state. Mutations are `&mut self`, so
/// there is exactly one logical writer and no interleaving to arbitrate.
pub struct Repository {
    store: Arc<dyn BucketStore>,
    tasks: Vec<Task>,
    focus_items: Vec<FocusItem>,
    goals: Vec<MonthlyGoal>,
    quick_labels: Vec<String>,
    events: broadcast::Sender<ChangeEvent>,
}

impl Repository {
    /// Load all four buckets from the store.
    ///
    /// Missing or unreadable buckets open as empty collections — opening
    /// never fails. Default quick labels are seeded only when that bucket
    /// has never been written; an empty-but-written bucket stays empty.
    pub async fn open(store: Arc<dyn BucketStore>) -> Self {
        let tasks = load_bucket(store.as_ref(), Bucket::Tasks)
            .await
            .unwrap_or_default();
        let focus_items = load_bucket(store.as_ref(), Bucket::FocusItems)
            .await
            .unwrap_or_default();
        let goals = load_bucket(store.as_ref(), Bucket::MonthlyGoals)
            .await
            .unwrap_or_default();
        let quick_labels = load_bucket(store.as_ref(), Bucket::QuickTaskLabels)
            .await
            .unwrap_or_else(|| {
                DEFAULT_QUICK_LABELS.iter().map(|s| s.to_string()).collect()
            });

        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        debug!(
            tasks = tasks.len(),
            focus_items = focus_items.len(),
            goals = goals.len(),
            quick_labels = quick_labels.len(),
            "Repository opened"
        );
        Self {
            store,
            tasks,
            focus_items,
            goals,
            quick_labels,
            events,
        }
    }

    /// Subscribe to mutation notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.events.subscribe()
    }

    fn notify(&self, event: ChangeEvent) {
        // No subscribers is the normal case for headless use.
        let _ = self.events.send(event);
    }

    // ── Tasks ───────────────────────────────────────────────────────

    /// Full task collection, insertion order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Snapshot of the tasks dated `date`, insertion order.
    pub fn tasks_for(&self, date: NaiveDate) -> Vec<Task> {
        self.tasks
            .iter()
            .filter(|t| t.date == date)
            .cloned()
            .collect()
    }

    pub fn task(&self, id: Uuid) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Add a task with the default description.
    pub async fn add_task(&mut self, date: NaiveDate) -> Result<Uuid, StoreError> {
        self.add_task_named(DEFAULT_TASK_DESCRIPTION, date).await
    }

    /// Add a task with the given description and defaults everywhere else.
    pub async fn add_task_named(
        &mut self,
        description: impl Into<String>,
        date: NaiveDate,
    ) -> Result<Uuid, StoreError> {
        let task = Task::new(description, date);
        let id = task.id;
        self.tasks.push(task);
        self.persist_tasks().await?;
        self.notify(ChangeEvent::TaskAdded(id));
        Ok(id)
    }

    /// Add a task pre-filled from the quick label at `index`.
    ///
    /// Returns `None` without touching anything when the index is out of
    /// range.
    pub async fn add_task_from_label(
        &mut self,
        index: usize,
        date: NaiveDate,
    ) -> Result<Option<Uuid>, StoreError> {
        let Some(label) = self.quick_labels.get(index).cloned() else {
            return Ok(None);
        };
        self.add_task_named(label, date).await.map(Some)
    }

    /// Apply a partial update to the task with `id`.
    ///
    /// An unknown id is a silent no-op, not an error; nothing is persisted
    /// and no event fires.
    pub async fn update_task(&mut self, id: Uuid, patch: TaskPatch) -> Result<(), StoreError> {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            debug!(%id, "update_task: no matching task");
            return Ok(());
        };
        patch.apply(task);
        self.persist_tasks().await?;
        self.notify(ChangeEvent::TaskUpdated(id));
        Ok(())
    }

    /// Flip the task between completed and not completed.
    pub async fn toggle_task_status(&mut self, id: Uuid) -> Result<(), StoreError> {
        let Some(status) = self.task(id).map(|t| t.status.toggled()) else {
            return Ok(());
        };
        self.update_task(
            id,
            TaskPatch {
                status: Some(status),
                ..TaskPatch::default()
            },
        )
        .await
    }

    /// Remove the task with `id`. Removing an absent id is a no-op.
    pub async fn remove_task(&mut self, id: Uuid) -> Result<(), StoreError> {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        if self.tasks.len() == before {
            return Ok(());
        }
        self.persist_tasks().await?;
        self.notify(ChangeEvent::TaskRemoved(id));
        Ok(())
    }

    async fn persist_tasks(&self) -> Result<(), StoreError> {
        save_bucket(self.store.as_ref(), Bucket::Tasks, &self.tasks).await
    }

    // ── Focus items ─────────────────────────────────────────────────

    pub fn focus_items(&self) -> &[FocusItem] {
        &self.focus_items
    }

    /// Add a focus item with the default description and status label.
    pub async fn add_focus_item(&mut self) -> Result<Uuid, StoreError> {
        let item = FocusItem::default();
        let id = item.id;
        self.focus_items.push(item);
        self.persist_focus_items().await?;
        self.notify(ChangeEvent::FocusAdded(id));
        Ok(id)
    }

    /// Apply a partial update; unknown ids are a silent no-op.
    pub async fn update_focus_item(
        &mut self,
        id: Uuid,
        patch: FocusPatch,
    ) -> Result<(), StoreError> {
        let Some(item) = self.focus_items.iter_mut().find(|i| i.id == id) else {
            debug!(%id, "update_focus_item: no matching item");
            return Ok(());
        };
        patch.apply(item);
        self.persist_focus_items().await?;
        self.notify(ChangeEvent::FocusUpdated(id));
        Ok(())
    }

    /// Remove the focus item with `id`; absent ids are a no-op.
    pub async fn remove_focus_item(&mut self, id: Uuid) -> Result<(), StoreError> {
        let before = self.focus_items.len();
        self.focus_items.retain(|i| i.id != id);
        if self.focus_items.len() == before {
            return Ok(());
        }
        self.persist_focus_items().await?;
        self.notify(ChangeEvent::FocusRemoved(id));
        Ok(())
    }

    async fn persist_focus_items(&self) -> Result<(), StoreError> {
        save_bucket(self.store.as_ref(), Bucket::FocusItems, &self.focus_items).await
    }

    // ── Monthly goals ───────────────────────────────────────────────

    pub fn goals(&self) -> &[MonthlyGoal] {
        &self.goals
    }

    /// Add a goal with default title, medium priority, and a deadline at
    /// the end of `today`'s month.
    pub async fn add_goal(&mut self, today: NaiveDate) -> Result<Uuid, StoreError> {
        let goal = MonthlyGoal::new(today);
        let id = goal.id;
        self.goals.push(goal);
        self.persist_goals().await?;
        self.notify(ChangeEvent::GoalAdded(id));
        Ok(id)
    }

    /// Apply a partial update; unknown ids are a silent no-op.
    pub async fn update_goal(&mut self, id: Uuid, patch: GoalPatch) -> Result<(), StoreError> {
        let Some(goal) = self.goals.iter_mut().find(|g| g.id == id) else {
            debug!(%id, "update_goal: no matching goal");
            return Ok(());
        };
        patch.apply(goal);
        self.persist_goals().await?;
        self.notify(ChangeEvent::GoalUpdated(id));
        Ok(())
    }

    /// Advance the goal's priority one step in the High → Medium → Low →
    /// High cycle.
    pub async fn cycle_goal_priority(&mut self, id: Uuid) -> Result<(), StoreError> {
        let Some(priority) = self
            .goals
            .iter()
            .find(|g| g.id == id)
            .map(|g| g.priority.cycled())
        else {
            return Ok(());
        };
        self.update_goal(
            id,
            GoalPatch {
                priority: Some(priority),
                ..GoalPatch::default()
            },
        )
        .await
    }

    /// Remove the goal with `id`; absent ids are a no-op.
    pub async fn remove_goal(&mut self, id: Uuid) -> Result<(), StoreError> {
        let before = self.goals.len();
        self.goals.retain(|g| g.id != id);
        if self.goals.len() == before {
            return Ok(());
        }
        self.persist_goals().await?;
        self.notify(ChangeEvent::GoalRemoved(id));
        Ok(())
    }

    async fn persist_goals(&self) -> Result<(), StoreError> {
        save_bucket(self.store.as_ref(), Bucket::MonthlyGoals, &self.goals).await
    }

    // ── Quick-task labels ───────────────────────────────────────────

    /// The label bank, insertion order. Duplicates are allowed.
    pub fn quick_labels(&self) -> &[String] {
        &self.quick_labels
    }

    pub async fn add_quick_label(&mut self, label: impl Into<String>) -> Result<(), StoreError> {
        self.quick_labels.push(label.into());
        self.persist_quick_labels().await?;
        self.notify(ChangeEvent::QuickLabelsChanged);
        Ok(())
    }

    /// Remove the label at `index`; out-of-range indexes are a no-op.
    /// Labels carry no id, so removal is positional.
    pub async fn remove_quick_label(&mut self, index: usize) -> Result<(), StoreError> {
        if index >= self.quick_labels.len() {
            return Ok(());
        }
        self.quick_labels.remove(index);
        self.persist_quick_labels().await?;
        self.notify(ChangeEvent::QuickLabelsChanged);
        Ok(())
    }

    async fn persist_quick_labels(&self) -> Result<(), StoreError> {
        save_bucket(
            self.store.as_ref(),
            Bucket::QuickTaskLabels,
            &self.quick_labels,
        )
        .await
    }
}
