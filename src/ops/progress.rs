use serde::Serialize;

use crate::model::{Plan, TaskRecord};

use super::materialize::materialize;

/// Dashboard statistics for one point in time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ProgressSummary {
    /// Current sprint day (0 before the sprint starts)
    pub day: u32,
    pub today_done: usize,
    pub today_total: usize,
    /// Consecutive fully-completed days ending yesterday
    pub streak: u32,
    /// Stored records marked completed, across all days
    pub total_completed: usize,
}

impl ProgressSummary {
    pub fn compute(day: u32, plan: &Plan, stored: &[TaskRecord]) -> Self {
        let (today_done, today_total) = today_ratio(day, plan, stored);
        ProgressSummary {
            day,
            today_done,
            today_total,
            streak: streak(day, plan, stored),
            total_completed: total_completed(stored),
        }
    }
}

/// (completed, total) over the materialized tasks of `day`
pub fn today_ratio(day: u32, plan: &Plan, stored: &[TaskRecord]) -> (usize, usize) {
    let tasks = materialize(day, plan, stored);
    let done = tasks.iter().filter(|t| t.completed).count();
    (done, tasks.len())
}

/// Count fully-completed days walking backwards from the day before
/// `current_day`. A day with no tasks at all ends the streak, same as a
/// day with unfinished tasks.
pub fn streak(current_day: u32, plan: &Plan, stored: &[TaskRecord]) -> u32 {
    let mut count = 0;
    for day in (1..current_day).rev() {
        let tasks = materialize(day, plan, stored);
        if !tasks.is_empty() && tasks.iter().all(|t| t.completed) {
            count += 1;
        } else {
            break;
        }
    }
    count
}

/// Completed records in the store. Plan tasks that were never toggled have
/// no record and are not counted.
pub fn total_completed(stored: &[TaskRecord]) -> usize {
    stored.iter().filter(|t| t.completed).count()
}
