use uuid::Uuid;

use crate::model::{Plan, TaskRecord};

use super::materialize::{BaseKey, base_record};

/// Error type for task mutations
#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    #[error("task not found: {0}")]
    NotFound(String),
    #[error("invalid day: {0} (days start at 1)")]
    InvalidDay(u32),
    #[error("{0} must not be empty")]
    Empty(&'static str),
}

/// Find a task by id, either in the store or as a virtual plan task
pub fn find_task(id: &str, plan: &Plan, stored: &[TaskRecord]) -> Option<TaskRecord> {
    if let Some(task) = stored.iter().find(|t| t.id == id) {
        if let Some(key) = BaseKey::parse(id) {
            // Plan content wins over whatever text the override carries
            return base_record(key, plan, stored).or_else(|| Some(task.clone()));
        }
        return Some(task.clone());
    }
    BaseKey::parse(id).and_then(|key| base_record(key, plan, stored))
}

/// Return a new task list with `id` marked `completed`.
///
/// An existing record is updated in place. A plan task that has never been
/// stored is appended as a full record. Anything else is `NotFound`.
pub fn set_completed(
    id: &str,
    completed: bool,
    plan: &Plan,
    stored: &[TaskRecord],
) -> Result<Vec<TaskRecord>, TaskError> {
    let mut tasks = stored.to_vec();
    if let Some(task) = tasks.iter_mut().find(|t| t.id == id) {
        task.completed = completed;
        return Ok(tasks);
    }

    let mut record = BaseKey::parse(id)
        .and_then(|key| base_record(key, plan, stored))
        .ok_or_else(|| TaskError::NotFound(id.to_string()))?;
    record.completed = completed;
    tasks.push(record);
    Ok(tasks)
}

/// Flip the completion state of `id`. Returns the new list and new state.
pub fn toggle(
    id: &str,
    plan: &Plan,
    stored: &[TaskRecord],
) -> Result<(Vec<TaskRecord>, bool), TaskError> {
    let current = find_task(id, plan, stored)
        .ok_or_else(|| TaskError::NotFound(id.to_string()))?
        .completed;
    let tasks = set_completed(id, !current, plan, stored)?;
    Ok((tasks, !current))
}

/// Append a user task for `day`. Returns the new list and the new id.
pub fn add_task(
    day: u32,
    desc: &str,
    kind: &str,
    stored: &[TaskRecord],
) -> Result<(Vec<TaskRecord>, String), TaskError> {
    if day == 0 {
        return Err(TaskError::InvalidDay(day));
    }
    if desc.trim().is_empty() {
        return Err(TaskError::Empty("description"));
    }
    if kind.trim().is_empty() {
        return Err(TaskError::Empty("type"));
    }
    let id = format!("user_{}", Uuid::new_v4().simple());
    let mut tasks = stored.to_vec();
    tasks.push(TaskRecord::new(
        id.clone(),
        day,
        desc.trim().to_string(),
        kind.trim().to_string(),
    ));
    Ok((tasks, id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::materialize::materialize;
    use pretty_assertions::assert_eq;

    fn plan() -> Plan {
        Plan::builtin()
    }

    fn user(id: &str, day: u32, completed: bool) -> TaskRecord {
        TaskRecord {
            id: id.into(),
            day,
            desc: "mine".into(),
            kind: "DSA".into(),
            completed,
        }
    }

    #[test]
    fn checking_untouched_base_task_appends_full_record() {
        let stored = vec![user("u1", 1, false)];
        let tasks = set_completed("base_1_1", true, &plan(), &stored).unwrap();
        assert_eq!(tasks.len(), 2);
        assert_eq!(
            tasks[1],
            TaskRecord {
                id: "base_1_1".into(),
                day: 1,
                desc: "C++ Tutorial & 1 Array-Easy Problem".into(),
                kind: "DSA".into(),
                completed: true,
            }
        );
        // Stored input is untouched
        assert_eq!(stored.len(), 1);
    }

    #[test]
    fn existing_record_updates_in_place() {
        let stored = vec![user("u1", 1, false), user("u2", 1, false)];
        let tasks = set_completed("u1", true, &plan(), &stored).unwrap();
        assert_eq!(tasks.len(), 2);
        assert!(tasks[0].completed);
        assert!(!tasks[1].completed);
    }

    #[test]
    fn base_override_is_not_duplicated() {
        let stored = set_completed("base_1_0", true, &plan(), &[]).unwrap();
        let stored = set_completed("base_1_0", false, &plan(), &stored).unwrap();
        let stored = set_completed("base_1_0", true, &plan(), &stored).unwrap();
        assert_eq!(stored.len(), 1);
        assert!(stored[0].completed);
    }

    #[test]
    fn unknown_ids_are_not_found() {
        assert!(matches!(
            set_completed("nope", true, &plan(), &[]),
            Err(TaskError::NotFound(_))
        ));
        // Base id outside the plan
        assert!(matches!(
            set_completed("base_1_9", true, &plan(), &[]),
            Err(TaskError::NotFound(_))
        ));
        // Zero-padded spelling of base_1_0
        assert!(matches!(
            set_completed("base_01_0", true, &plan(), &[]),
            Err(TaskError::NotFound(_))
        ));
    }

    #[test]
    fn toggle_flips_state_and_materializes() {
        let (stored, now_done) = toggle("base_1_0", &plan(), &[]).unwrap();
        assert!(now_done);
        let today = materialize(1, &plan(), &stored);
        assert!(today[0].completed);
        assert!(!today[1].completed);

        let (stored, now_done) = toggle("base_1_0", &plan(), &stored).unwrap();
        assert!(!now_done);
        assert!(!materialize(1, &plan(), &stored)[0].completed);
    }

    #[test]
    fn find_task_uses_plan_content_for_overrides() {
        let stored = vec![TaskRecord {
            id: "base_1_0".into(),
            day: 1,
            desc: "stale".into(),
            kind: "stale".into(),
            completed: true,
        }];
        let task = find_task("base_1_0", &plan(), &stored).unwrap();
        assert_eq!(task.desc, "Percentages");
        assert!(task.completed);
    }

    #[test]
    fn add_task_appends_user_record() {
        let (tasks, id) = add_task(3, "  Revise graphs ", "DSA", &[]).unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].id, id);
        assert_eq!(tasks[0].desc, "Revise graphs");
        assert!(id.starts_with("user_"));
        assert!(BaseKey::parse(&id).is_none());
    }

    #[test]
    fn add_task_validates_input() {
        assert!(matches!(add_task(0, "x", "DSA", &[]), Err(TaskError::InvalidDay(0))));
        assert!(matches!(add_task(1, " ", "DSA", &[]), Err(TaskError::Empty(_))));
        assert!(matches!(add_task(1, "x", "", &[]), Err(TaskError::Empty(_))));
    }
}
