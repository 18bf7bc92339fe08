use serde::{Deserialize, Serialize};

/// A stored task record.
///
/// Records whose id follows the base-task convention (see
/// `ops::materialize::BaseKey`) override the completion state of a plan
/// task; every other record is a user-added task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub id: String,
    /// Sprint day this task belongs to (1-based)
    pub day: u32,
    pub desc: String,
    /// Free-form category such as `DSA` or `Apti`
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub completed: bool,
}

impl TaskRecord {
    pub fn new(id: String, day: u32, desc: String, kind: String) -> Self {
        TaskRecord {
            id,
            day,
            desc,
            kind,
            completed: false,
        }
    }
}

/// A reference link shown alongside the plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub title: String,
    pub url: String,
    pub desc: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_record_uses_type_field_name() {
        let task = TaskRecord::new("csv_1".into(), 2, "Do X".into(), "DSA".into());
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["type"], "DSA");
        assert_eq!(json["completed"], false);
        assert!(json.get("kind").is_none());
    }

    #[test]
    fn missing_completed_defaults_to_false() {
        let task: TaskRecord =
            serde_json::from_str(r#"{"id":"a","day":1,"desc":"d","type":"t"}"#).unwrap();
        assert!(!task.completed);
    }
}
