//! Task data model — the schedulable unit of work for one calendar date.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Description given to tasks created without one.
pub const DEFAULT_TASK_DESCRIPTION: &str = "New Task";

/// Time range given to freshly created tasks. Free-form display text, never
/// parsed.
pub const DEFAULT_TIME_RANGE: &str = "09:00am - 10:00am";

/// Completion state of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskStatus {
    #[serde(rename = "Completed")]
    Completed,
    #[serde(rename = "Not Completed")]
    NotCompleted,
}

impl TaskStatus {
    /// The opposite status, for the complete/uncomplete toggle.
    pub fn toggled(self) -> Self {
        match self {
            Self::Completed => Self::NotCompleted,
            Self::NotCompleted => Self::Completed,
        }
    }

    pub fn is_completed(self) -> bool {
        self == Self::Completed
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Completed => "Completed",
            Self::NotCompleted => "Not Completed",
        })
    }
}

/// A schedulable unit of work for a specific calendar date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique ID, immutable, unique across the whole collection.
    pub id: Uuid,
    /// Display time range, e.g. `09:00am - 10:00am`. Not validated.
    pub time_range: String,
    /// Planned allocation in hours.
    pub hours: f64,
    /// Short label for the work.
    pub description: String,
    /// Completion state.
    pub status: TaskStatus,
    /// Hours actually spent. May exceed `hours`; no clamp.
    #[serde(rename = "workingHrs")]
    pub working_hours: f64,
    /// Failure post-mortem, filled in when the task slipped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Free-form workflow notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Calendar date the task belongs to — the partition key for all daily
    /// views.
    pub date: NaiveDate,
}

impl Task {
    /// Create a new task with the standard defaults.
    pub fn new(description: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            time_range: DEFAULT_TIME_RANGE.to_string(),
            hours: 1.0,
            description: description.into(),
            status: TaskStatus::NotCompleted,
            working_hours: 0.0,
            reason: None,
            notes: None,
            date,
        }
    }

    /// Builder: set the display time range.
    pub fn with_time_range(mut self, range: impl Into<String>) -> Self {
        self.time_range = range.into();
        self
    }

    /// Builder: set planned hours.
    pub fn with_hours(mut self, hours: f64) -> Self {
        self.hours = hours;
        self
    }

    /// Builder: set worked hours.
    pub fn with_working_hours(mut self, hours: f64) -> Self {
        self.working_hours = hours;
        self
    }

    /// Builder: set completion status.
    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }
}

/// Partial update for a task — only `Some` fields are applied.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskPatch {
    pub time_range: Option<String>,
    pub hours: Option<f64>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    #[serde(rename = "workingHrs")]
    pub working_hours: Option<f64>,
    pub reason: Option<String>,
    pub notes: Option<String>,
}

impl TaskPatch {
    /// Apply the patch, leaving absent fields untouched.
    pub fn apply(self, task: &mut Task) {
        if let Some(v) = self.time_range {
            task.time_range = v;
        }
        if let Some(v) = self.hours {
            task.hours = v;
        }
        if let Some(v) = self.description {
            task.description = v;
        }
        if let Some(v) = self.status {
            task.status = v;
        }
        if let Some(v) = self.working_hours {
            task.working_hours = v;
        }
        if let Some(v) = self.reason {
            task.reason = Some(v);
        }
        if let Some(v) = self.notes {
            task.notes = Some(v);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn new_task_defaults() {
        let task = Task::new(DEFAULT_TASK_DESCRIPTION, date("2024-05-01"));
        assert_eq!(task.description, "New Task");
        assert_eq!(task.time_range, DEFAULT_TIME_RANGE);
        assert_eq!(task.hours, 1.0);
        assert_eq!(task.working_hours, 0.0);
        assert_eq!(task.status, TaskStatus::NotCompleted);
        assert!(task.reason.is_none());
        assert!(task.notes.is_none());
    }

    #[test]
    fn status_toggle() {
        assert_eq!(TaskStatus::NotCompleted.toggled(), TaskStatus::Completed);
        assert_eq!(TaskStatus::Completed.toggled(), TaskStatus::NotCompleted);
        assert!(TaskStatus::Completed.is_completed());
        assert!(!TaskStatus::NotCompleted.is_completed());
    }

    #[test]
    fn status_serde_spelled_out() {
        let json = serde_json::to_string(&TaskStatus::NotCompleted).unwrap();
        assert_eq!(json, "\"Not Completed\"");

        let parsed: TaskStatus = serde_json::from_str("\"Completed\"").unwrap();
        assert_eq!(parsed, TaskStatus::Completed);
    }

    #[test]
    fn task_serde_camel_case_keys() {
        let task = Task::new("Deep Work", date("2024-05-01")).with_hours(2.0);
        let json = serde_json::to_string(&task).unwrap();
        assert!(json.contains("\"timeRange\""));
        assert!(json.contains("\"workingHrs\""));
        assert!(json.contains("\"date\":\"2024-05-01\""));
        // Optional fields are omitted while unset.
        assert!(!json.contains("\"reason\""));
        assert!(!json.contains("\"notes\""));
    }

    #[test]
    fn task_serde_roundtrip() {
        let mut task = Task::new("Study Session", date("2024-05-02"))
            .with_hours(1.5)
            .with_working_hours(2.25)
            .with_status(TaskStatus::Completed);
        task.reason = Some("overran".to_string());
        let json = serde_json::to_string(&task).unwrap();
        let parsed: Task = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, task);
    }

    #[test]
    fn task_loads_legacy_json() {
        // Shape the web app wrote to its buckets.
        let json = r#"{
            "id": "b51bb5b9-6f1f-4df5-b0c8-07c4e1bfc351",
            "timeRange": "07:00am - 08:00am",
            "hours": 1,
            "description": "Morning Exercise",
            "status": "Not Completed",
            "workingHrs": 0,
            "notes": "",
            "date": "2024-05-01"
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.description, "Morning Exercise");
        assert_eq!(task.status, TaskStatus::NotCompleted);
        assert_eq!(task.notes.as_deref(), Some(""));
        assert_eq!(task.date, date("2024-05-01"));
    }

    #[test]
    fn patch_applies_only_present_fields() {
        let mut task = Task::new("Original", date("2024-05-01")).with_hours(3.0);
        let before = task.clone();

        let patch = TaskPatch {
            working_hours: Some(2.5),
            status: Some(TaskStatus::Completed),
            ..TaskPatch::default()
        };
        patch.apply(&mut task);

        assert_eq!(task.working_hours, 2.5);
        assert_eq!(task.status, TaskStatus::Completed);
        // Everything absent from the patch is untouched.
        assert_eq!(task.description, before.description);
        assert_eq!(task.hours, before.hours);
        assert_eq!(task.time_range, before.time_range);
        assert_eq!(task.date, before.date);
        assert_eq!(task.id, before.id);
    }

    #[test]
    fn patch_parses_from_json() {
        let patch: TaskPatch = serde_json::from_str(r#"{"workingHrs": 1.5}"#).unwrap();
        assert_eq!(patch.working_hours, Some(1.5));
        assert!(patch.hours.is_none());
        assert!(patch.description.is_none());
    }
}
