//! Domain model — tasks, focus items, monthly goals.
//!
//! All entities serialize to the same JSON shape the app has always
//! persisted (camelCase keys, spelled-out status strings), so existing
//! bucket files keep loading across versions.

mod focus;
mod goal;
mod task;

pub use focus::{DEFAULT_FOCUS_DESCRIPTION, DEFAULT_FOCUS_STATUS, FocusItem, FocusPatch};
pub use goal::{GoalPatch, GoalPriority, MonthlyGoal, end_of_month};
pub use task::{DEFAULT_TASK_DESCRIPTION, DEFAULT_TIME_RANGE, Task, TaskPatch, TaskStatus};
