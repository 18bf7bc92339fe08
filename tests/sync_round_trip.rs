//! End-to-end checks of the sync contract: a task list written with
//! `replace_all` comes back unchanged through the live subscription.

use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};

use chrono::{Local, NaiveDate};
use pretty_assertions::assert_eq;
use sprint_os::io::identity::Identity;
use sprint_os::io::store::{DocumentStore, FileStore, MemoryStore};
use sprint_os::io::sync::{SyncChannel, WriteOutcome};
use sprint_os::model::{Plan, SprintState, TaskRecord};
use sprint_os::ops::import::import_tasks;
use sprint_os::ops::materialize::materialize;
use sprint_os::ops::progress::ProgressSummary;
use sprint_os::ops::task_ops;
use tempfile::TempDir;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 8, 1).unwrap()
}

fn identity() -> Identity {
    Identity::new("round-trip").unwrap()
}

fn fixture(name: &str) -> Vec<u8> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name);
    fs::read(&path).unwrap_or_else(|e| panic!("Could not read fixture {}: {}", name, e))
}

/// Poll until a snapshot satisfying `done` arrives, or give up after 5s
fn wait_for(sync: &mut SyncChannel, done: impl Fn(&SprintState) -> bool) -> Option<SprintState> {
    let deadline = Instant::now() + Duration::from_secs(5);
    while Instant::now() < deadline {
        if let Some(state) = sync.poll(today())
            && done(&state)
        {
            return Some(state);
        }
        std::thread::sleep(Duration::from_millis(20));
    }
    None
}

#[test]
fn memory_store_round_trip() {
    let plan = Plan::builtin();
    let mut sync = SyncChannel::new(Box::new(MemoryStore::new()));
    sync.attach(identity()).unwrap();
    let initial = sync.poll(today()).unwrap();
    assert!(initial.tasks.is_empty());

    let (tasks, _) = task_ops::toggle("base_1_1", &plan, &initial.tasks).unwrap();
    let result = import_tasks(&tasks, &fixture("week2_tasks.csv")).unwrap();
    assert_eq!(result.accepted, 5);
    assert!(matches!(sync.replace_all(&result.tasks), WriteOutcome::Written));

    let echoed = sync.poll(today()).unwrap();
    assert_eq!(echoed.tasks, result.tasks);
    assert_eq!(echoed.start_date, initial.start_date);
    assert_eq!(echoed.resources, initial.resources);
}

#[test]
fn imported_fixture_materializes_by_day() {
    let plan = Plan::builtin();
    let result = import_tasks(&[], &fixture("week2_tasks.csv")).unwrap();

    let day8 = materialize(8, &plan, &result.tasks);
    assert_eq!(
        day8.iter().map(|t| t.desc.as_str()).collect::<Vec<_>>(),
        vec!["Time and Work", "Two Sum + Valid Anagram"]
    );
    let day11 = materialize(11, &plan, &result.tasks);
    assert_eq!(day11[0].desc, "Stacks: Next Greater Element, Valid Parentheses");
    assert!(materialize(10, &plan, &result.tasks).is_empty());
}

#[test]
fn streak_over_imported_days() {
    let plan = Plan::builtin();
    let mut tasks = import_tasks(&[], &fixture("week2_tasks.csv")).unwrap().tasks;
    for task in tasks.iter_mut().filter(|t| t.day == 8 || t.day == 9) {
        task.completed = true;
    }

    // Day 10 has nothing, which ends any streak that reaches it
    assert_eq!(ProgressSummary::compute(10, &plan, &tasks).streak, 2);
    assert_eq!(ProgressSummary::compute(11, &plan, &tasks).streak, 0);
    assert_eq!(ProgressSummary::compute(11, &plan, &tasks).total_completed, 4);
}

#[test]
fn file_store_round_trip_through_watcher() {
    let tmp = TempDir::new().unwrap();
    let store = FileStore::open(tmp.path()).unwrap();
    let mut sync = SyncChannel::new(Box::new(store.clone()));
    sync.attach(identity()).unwrap();

    let initial = sync.poll(today()).expect("initial snapshot");
    assert!(initial.tasks.is_empty());
    assert_eq!(store.read(&identity()).unwrap(), Some(initial.clone()));

    let tasks = vec![
        TaskRecord::new("csv_1".into(), 2, "Do X".into(), "DSA".into()),
        TaskRecord {
            completed: true,
            ..TaskRecord::new("base_1_0".into(), 1, "Percentages".into(), "Apti".into())
        },
    ];
    assert!(matches!(sync.replace_all(&tasks), WriteOutcome::Written));

    let echoed = wait_for(&mut sync, |s| s.tasks == tasks).expect("write echoed by watcher");
    assert_eq!(echoed.start_date, initial.start_date);
}

#[test]
fn file_store_sees_writes_from_another_handle() {
    let tmp = TempDir::new().unwrap();
    let mut sync = SyncChannel::new(Box::new(FileStore::open(tmp.path()).unwrap()));
    sync.attach(identity()).unwrap();
    sync.poll(today()).expect("initial snapshot");

    // A second process would open its own store on the same directory
    let other = FileStore::open(tmp.path()).unwrap();
    let tasks = vec![TaskRecord::new("user_1".into(), 1, "Mock test".into(), "Apti".into())];
    other.update_tasks(&identity(), &tasks).unwrap();

    assert!(wait_for(&mut sync, |s| s.tasks == tasks).is_some());
}

#[test]
fn detached_channel_stops_receiving() {
    let store = MemoryStore::new();
    let mut sync = SyncChannel::new(Box::new(store.clone()));
    sync.attach(identity()).unwrap();
    let state = sync.poll(Local::now().date_naive()).unwrap();
    sync.detach();

    let tasks = vec![TaskRecord::new("user_1".into(), 1, "Late".into(), "DSA".into())];
    store.update_tasks(&identity(), &tasks).unwrap();
    assert_eq!(sync.poll(today()), None);
    assert_eq!(store.read(&identity()).unwrap().unwrap().start_date, state.start_date);
}
