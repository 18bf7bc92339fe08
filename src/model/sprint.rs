use chrono::{DateTime, Local, NaiveDate, NaiveTime, TimeZone, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::task::{Resource, TaskRecord};

/// The single document persisted per identity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SprintState {
    #[serde(default)]
    pub tasks: Vec<TaskRecord>,
    #[serde(default)]
    pub resources: Vec<Resource>,
    /// Week id -> goal text, in insertion order
    #[serde(default)]
    pub weekly_goals: IndexMap<String, String>,
    pub start_date: DateTime<Utc>,
}

impl SprintState {
    /// Placeholder shown before the first snapshot arrives.
    pub fn empty(now: DateTime<Utc>) -> Self {
        SprintState {
            tasks: Vec::new(),
            resources: Vec::new(),
            weekly_goals: IndexMap::new(),
            start_date: now,
        }
    }

    /// The document written on first-ever access for an identity.
    /// The sprint starts at local midnight of `today`.
    pub fn initial(today: NaiveDate) -> Self {
        SprintState {
            tasks: Vec::new(),
            resources: vec![seed_resource()],
            weekly_goals: IndexMap::new(),
            start_date: local_midnight_utc(today),
        }
    }
}

fn seed_resource() -> Resource {
    Resource {
        title: "Aptitude Playlist".into(),
        url: "https://www.youtube.com/playlist?list=PLgH1hI-Bibo8o5-qzzG-Qp3Y-52s-aJ2F".into(),
        desc: "For Quantitative Aptitude".into(),
    }
}

fn local_midnight_utc(date: NaiveDate) -> DateTime<Utc> {
    let midnight = date.and_time(NaiveTime::MIN);
    match Local.from_local_datetime(&midnight).earliest() {
        Some(local) => local.with_timezone(&Utc),
        // Midnight skipped by a DST jump; fall back to treating it as UTC
        None => Utc.from_utc_datetime(&midnight),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn initial_state_is_seeded() {
        let today = NaiveDate::from_ymd_opt(2025, 8, 1).unwrap();
        let state = SprintState::initial(today);
        assert!(state.tasks.is_empty());
        assert!(state.weekly_goals.is_empty());
        assert_eq!(state.resources.len(), 1);
        assert_eq!(state.resources[0].title, "Aptitude Playlist");

        let local = state.start_date.with_timezone(&Local);
        assert_eq!(local.date_naive(), today);
        assert_eq!(local.hour(), 0);
        assert_eq!(local.minute(), 0);
    }

    #[test]
    fn serializes_camel_case() {
        let state = SprintState::initial(NaiveDate::from_ymd_opt(2025, 8, 1).unwrap());
        let json = serde_json::to_value(&state).unwrap();
        assert!(json.get("weeklyGoals").is_some());
        assert!(json.get("startDate").is_some());
        assert!(json.get("start_date").is_none());
    }

    #[test]
    fn reads_document_without_optional_fields() {
        let state: SprintState =
            serde_json::from_str(r#"{"startDate":"2025-08-01T00:00:00Z"}"#).unwrap();
        assert!(state.tasks.is_empty());
        assert!(state.resources.is_empty());
    }
}
