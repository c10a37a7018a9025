//! Monthly goals — long-horizon objectives with deadline and progress.

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Goal priority. Serialized with the spelled-out labels the app has always
/// stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GoalPriority {
    High,
    Medium,
    Low,
}

impl GoalPriority {
    /// Next priority in the High → Medium → Low → High cycle.
    pub fn cycled(self) -> Self {
        match self {
            Self::High => Self::Medium,
            Self::Medium => Self::Low,
            Self::Low => Self::High,
        }
    }
}

/// A monthly objective, independent of the daily task schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyGoal {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub deadline: NaiveDate,
    /// 0–100 by convention. Not clamped on write; bounded input is the
    /// presentation layer's job.
    pub progress: i32,
    pub priority: GoalPriority,
}

impl MonthlyGoal {
    /// Create a goal with the standard defaults: medium priority, zero
    /// progress, deadline at the end of `today`'s month.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: "New Strategic Goal".to_string(),
            description: "Define the objective details here...".to_string(),
            deadline: end_of_month(today),
            progress: 0,
            priority: GoalPriority::Medium,
        }
    }
}

/// Partial update for a monthly goal.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GoalPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub deadline: Option<NaiveDate>,
    pub progress: Option<i32>,
    pub priority: Option<GoalPriority>,
}

impl GoalPatch {
    pub fn apply(self, goal: &mut MonthlyGoal) {
        if let Some(v) = self.title {
            goal.title = v;
        }
        if let Some(v) = self.description {
            goal.description = v;
        }
        if let Some(v) = self.deadline {
            goal.deadline = v;
        }
        if let Some(v) = self.progress {
            goal.progress = v;
        }
        if let Some(v) = self.priority {
            goal.priority = v;
        }
    }
}

/// Last calendar day of `date`'s month.
pub fn end_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1)
        .and_then(|first| first.checked_add_months(Months::new(1)))
        .and_then(|next| next.checked_sub_days(Days::new(1)))
        .unwrap_or(date)
}
