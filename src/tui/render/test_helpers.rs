use chrono::{Duration, Local, NaiveDate};
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::io::identity::Identity;
use crate::io::store::{DocumentStore, MemoryStore};
use crate::io::sync::SyncChannel;
use crate::model::{AppConfig, SprintState, TaskRecord};
use crate::tui::app::App;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

pub fn test_identity() -> Identity {
    Identity::new("test-device").unwrap()
}

/// An App on day 1 of a sprint starting 2025-08-01, backed by a MemoryStore
/// holding `tasks`. The first snapshot has already been adopted.
pub fn app_with_store(tasks: Vec<TaskRecord>) -> (App, MemoryStore) {
    let store = MemoryStore::new();
    let mut state = SprintState::initial(NaiveDate::from_ymd_opt(2025, 8, 1).unwrap());
    state.tasks = tasks;
    store.create(&test_identity(), &state).unwrap();

    let mut sync = SyncChannel::new(Box::new(store.clone()));
    sync.attach(test_identity()).unwrap();

    let mut app = App::new(AppConfig::default(), sync);
    app.now = state.start_date.with_timezone(&Local) + Duration::hours(10);
    app.sync_poll();
    (app, store)
}

/// An App whose session failed to start
pub fn failed_app(message: &str) -> App {
    App::failed(AppConfig::default(), message)
}
