//! Derived metrics — pure functions over a task collection and a reference
//! date. No state, no side effects; callable from any renderer or test.

use chrono::{Datelike, Days, NaiveDate};

use crate::model::Task;

/// Allocated vs worked hours for one day.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DailyTotals {
    pub allocated: f64,
    pub worked: f64,
}

/// One day in the 7-day output series.
#[derive(Debug, Clone, PartialEq)]
pub struct WeeklyPoint {
    /// Weekday abbreviation, `Sun`…`Sat`.
    pub label: String,
    /// Allocated hours.
    pub target: f64,
    /// Worked hours.
    pub done: f64,
    /// `round(done / target * 100)`, `0` when nothing was allocated.
    pub score: u32,
}

/// One day in the 30-day efficiency series.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyPoint {
    /// Zero-padded day of month, `01`…`31`.
    pub day: String,
    /// `done / target * 100`, unrounded; `0.0` when nothing was allocated.
    pub efficiency: f64,
}

/// Stat-card summary for one day, in hours and whole minutes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DailySummary {
    pub total_hours: f64,
    pub worked_hours: f64,
    pub total_minutes: i64,
    pub worked_minutes: i64,
}

/// Sum allocated and worked hours over the tasks dated `date`.
pub fn daily_totals(tasks: &[Task], date: NaiveDate) -> DailyTotals {
    tasks
        .iter()
        .filter(|t| t.date == date)
        .fold(DailyTotals::default(), |acc, t| DailyTotals {
            allocated: acc.allocated + t.hours,
            worked: acc.worked + t.working_hours,
        })
}

/// Hour and minute totals for one day's stat cards.
pub fn daily_summary(tasks: &[Task], date: NaiveDate) -> DailySummary {
    let totals = daily_totals(tasks, date);
    DailySummary {
        total_hours: totals.allocated,
        worked_hours: totals.worked,
        total_minutes: (totals.allocated * 60.0).round() as i64,
        worked_minutes: (totals.worked * 60.0).round() as i64,
    }
}

/// The 7 calendar days ending at `end` inclusive, in chronological order.
///
/// Always exactly 7 entries; days without tasks score zero.
pub fn weekly_series(tasks: &[Task], end: NaiveDate) -> Vec<WeeklyPoint> {
    trailing_days(end, 7)
        .map(|day| {
            let totals = daily_totals(tasks, day);
            let score = if totals.allocated > 0.0 {
                (totals.worked / totals.allocated * 100.0).round() as u32
            } else {
                0
            };
            WeeklyPoint {
                label: day.format("%a").to_string(),
                target: totals.allocated,
                done: totals.worked,
                score,
            }
        })
        .collect()
}

/// The 30 calendar days ending at `end` inclusive, in chronological order.
///
/// Always exactly 30 entries; days without tasks have zero efficiency.
pub fn monthly_series(tasks: &[Task], end: NaiveDate) -> Vec<MonthlyPoint> {
    trailing_days(end, 30)
        .map(|day| {
            let totals = daily_totals(tasks, day);
            let efficiency = if totals.allocated > 0.0 {
                totals.worked / totals.allocated * 100.0
            } else {
                0.0
            };
            MonthlyPoint {
                day: format!("{:02}", day.day()),
                efficiency,
            }
        })
        .collect()
}

/// Worked-over-allocated percentage for one task.
///
/// Zero allocated hours are treated as one to keep the ratio defined. The
/// value is deliberately uncapped — spending 5h on a 1h allocation is 500%,
/// and only a renderer may clamp that.
pub fn efficiency_ratio(task: &Task) -> f64 {
    let denominator = if task.hours == 0.0 { 1.0 } else { task.hours };
    task.working_hours / denominator * 100.0
}

/// Chronological iterator over the `len` days ending at `end` inclusive.
fn trailing_days(end: NaiveDate, len: u64) -> impl Iterator<Item = NaiveDate> {
    (0..len)
        .rev()
        .map(move |back| end.checked_sub_days(Days::new(back)).unwrap_or(end))
}
