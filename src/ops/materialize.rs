//! Effective per-day task lists.
//!
//! Plan tasks are virtual: the store only holds a record for a plan task
//! once its checkbox has been toggled. Such records are recognized by their
//! [`BaseKey`] id. All knowledge of that id scheme lives in this module.

use std::fmt;

use crate::model::{Plan, TaskRecord};

/// Identifies a plan task by day and position within the day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BaseKey {
    pub day: u32,
    pub index: usize,
}

impl BaseKey {
    pub fn new(day: u32, index: usize) -> Self {
        BaseKey { day, index }
    }

    /// Parse a stored task id. Returns `None` for user-added ids and for
    /// spellings other than the canonical `base_{day}_{index}`.
    pub fn parse(id: &str) -> Option<BaseKey> {
        let rest = id.strip_prefix("base_")?;
        let (day, index) = rest.split_once('_')?;
        let key = BaseKey {
            day: day.parse().ok()?,
            index: index.parse().ok()?,
        };
        (key.id() == id).then_some(key)
    }

    pub fn id(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for BaseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "base_{}_{}", self.day, self.index)
    }
}

/// True if a stored id overrides a plan task rather than naming a user task
pub fn is_base_id(id: &str) -> bool {
    BaseKey::parse(id).is_some()
}

/// The full record for a plan task, with completion taken from `stored`
/// when an override exists. `None` if the plan has no such task.
pub fn base_record(key: BaseKey, plan: &Plan, stored: &[TaskRecord]) -> Option<TaskRecord> {
    let base = plan.base_tasks(key.day).get(key.index)?;
    let id = key.id();
    let completed = stored
        .iter()
        .find(|t| t.id == id)
        .is_some_and(|t| t.completed);
    Some(TaskRecord {
        id,
        day: key.day,
        desc: base.desc.to_string(),
        kind: base.kind.to_string(),
        completed,
    })
}

/// Compute the task list for `day`: the plan's base tasks in plan order,
/// followed by the user-added tasks for that day in store order.
pub fn materialize(day: u32, plan: &Plan, stored: &[TaskRecord]) -> Vec<TaskRecord> {
    let base_count = plan.base_tasks(day).len();
    let mut tasks: Vec<TaskRecord> = (0..base_count)
        .filter_map(|i| base_record(BaseKey::new(day, i), plan, stored))
        .collect();

    tasks.extend(
        stored
            .iter()
            .filter(|t| t.day == day && !is_base_id(&t.id))
            .cloned(),
    );
    tasks
}
