use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use chrono::{DateTime, Local, Utc};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::io::config_io;
use crate::io::identity::{AnonymousIdentity, IdentityProvider};
use crate::io::paths::DataPaths;
use crate::io::store::FileStore;
use crate::io::sync::{SyncChannel, WriteOutcome};
use crate::model::{AppConfig, Plan, PlanWeek, SprintState, TaskRecord};
use crate::ops::countdown::{Countdown, assessment_instant, countdown};
use crate::ops::day::current_day;
use crate::ops::materialize::materialize;
use crate::ops::progress::ProgressSummary;
use crate::ops::{import, task_ops};

use super::input;
use super::render;
use super::theme::Theme;

/// Which view is currently displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Dashboard,
    FullPlan,
    Progress,
}

impl View {
    pub const ALL: [View; 3] = [View::Dashboard, View::FullPlan, View::Progress];

    pub fn title(self) -> &'static str {
        match self {
            View::Dashboard => "Dashboard",
            View::FullPlan => "Full plan",
            View::Progress => "Progress",
        }
    }

    pub fn next(self) -> View {
        match self {
            View::Dashboard => View::FullPlan,
            View::FullPlan => View::Progress,
            View::Progress => View::Dashboard,
        }
    }

    pub fn prev(self) -> View {
        match self {
            View::Dashboard => View::Progress,
            View::FullPlan => View::Dashboard,
            View::Progress => View::FullPlan,
        }
    }
}

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    /// Typing the path of a CSV file to import
    Import,
}

/// Main application state
pub struct App {
    pub view: View,
    pub mode: Mode,
    pub should_quit: bool,
    pub theme: Theme,
    pub dark: bool,
    pub config: AppConfig,
    /// Where the theme preference is saved; None keeps it in memory only
    pub config_path: Option<PathBuf>,
    pub plan: Plan,
    /// None until the first snapshot arrives
    pub state: Option<SprintState>,
    pub sync: Option<SyncChannel>,
    /// Set when the session could not be opened; replaces the whole UI
    pub fatal_error: Option<String>,
    /// Cursor into today's task list
    pub cursor: usize,
    pub import_input: String,
    /// Byte offset into `import_input`
    pub import_cursor: usize,
    /// One-line message shown in the status row
    pub flash: Option<String>,
    pub countdown: Countdown,
    /// Wall clock used for the day number, refreshed on every tick
    pub now: DateTime<Local>,
}

impl App {
    pub fn new(config: AppConfig, sync: SyncChannel) -> Self {
        let mut app = App::blank(config);
        app.sync = Some(sync);
        app
    }

    /// An app that only shows `message` and exits on the next key
    pub fn failed(config: AppConfig, message: impl Into<String>) -> Self {
        let mut app = App::blank(config);
        app.fatal_error = Some(message.into());
        app
    }

    fn blank(config: AppConfig) -> Self {
        let dark = config.ui.is_dark();
        let theme = Theme::from_config(&config.ui);
        let now = Local::now();
        let countdown = countdown(
            now.with_timezone(&Utc),
            assessment_instant(config.sprint.assessment_date),
        );
        App {
            view: View::Dashboard,
            mode: Mode::Navigate,
            should_quit: false,
            theme,
            dark,
            config,
            config_path: None,
            plan: Plan::builtin(),
            state: None,
            sync: None,
            fatal_error: None,
            cursor: 0,
            import_input: String::new(),
            import_cursor: 0,
            flash: None,
            countdown,
            now,
        }
    }

    pub fn with_config_path(mut self, path: PathBuf) -> Self {
        self.config_path = Some(path);
        self
    }

    /// Current sprint day, 0 while loading
    pub fn day(&self) -> u32 {
        self.state
            .as_ref()
            .map_or(0, |s| current_day(&self.now, s.start_date))
    }

    pub fn stored_tasks(&self) -> &[TaskRecord] {
        self.state
            .as_ref()
            .map(|s| s.tasks.as_slice())
            .unwrap_or(&[])
    }

    /// Today's materialized task list
    pub fn today_tasks(&self) -> Vec<TaskRecord> {
        if self.state.is_none() {
            return Vec::new();
        }
        materialize(self.day(), &self.plan, self.stored_tasks())
    }

    pub fn summary(&self) -> ProgressSummary {
        ProgressSummary::compute(self.day(), &self.plan, self.stored_tasks())
    }

    pub fn current_week(&self) -> Option<&'static PlanWeek> {
        self.plan.week_of(self.day())
    }

    /// Advance the clock and recompute the countdown
    pub fn tick(&mut self, now: DateTime<Local>) {
        self.now = now;
        self.countdown = countdown(
            now.with_timezone(&Utc),
            assessment_instant(self.config.sprint.assessment_date),
        );
    }

    /// Adopt whatever the store has pushed since the last call
    pub fn sync_poll(&mut self) {
        let today = self.now.date_naive();
        let Some(sync) = self.sync.as_mut() else {
            return;
        };
        if let Some(state) = sync.poll(today) {
            self.state = Some(state);
            self.clamp_cursor();
        }
    }

    pub fn move_cursor(&mut self, delta: isize) {
        let len = self.today_tasks().len();
        if len == 0 {
            self.cursor = 0;
            return;
        }
        self.cursor = self.cursor.saturating_add_signed(delta).min(len - 1);
    }

    fn clamp_cursor(&mut self) {
        let len = self.today_tasks().len();
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }

    /// Flip completion of the task under the cursor
    pub fn toggle_selected(&mut self) {
        let Some(task) = self.today_tasks().into_iter().nth(self.cursor) else {
            return;
        };
        match task_ops::toggle(&task.id, &self.plan, self.stored_tasks()) {
            Ok((tasks, completed)) => {
                tracing::debug!(id = %task.id, completed, "toggled task");
                self.commit(tasks);
            }
            Err(e) => tracing::warn!(error = %e, "toggle failed"),
        }
    }

    /// Import the CSV file at `path`, appending the accepted rows
    pub fn import_file(&mut self, path: &str) {
        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                self.flash = Some(format!("could not read {}: {}", path, e));
                return;
            }
        };
        match import::import_tasks(self.stored_tasks(), &bytes) {
            Ok(result) => {
                self.flash = Some(import::imported_message(result.accepted));
                self.commit(result.tasks);
            }
            Err(e) => self.flash = Some(e.to_string()),
        }
    }

    /// Write a new task list through the sync channel. Local state only
    /// changes when the store's notification comes back; a failed or skipped
    /// write leaves it as it was.
    fn commit(&mut self, tasks: Vec<TaskRecord>) {
        let Some(sync) = &self.sync else {
            return;
        };
        match sync.replace_all(&tasks) {
            WriteOutcome::Written => self.sync_poll(),
            WriteOutcome::Skipped => {}
            WriteOutcome::Failed(e) => tracing::debug!(error = %e, "write dropped"),
        }
    }

    pub fn toggle_theme(&mut self) {
        self.dark = !self.dark;
        self.theme = Theme::for_mode(self.dark, &self.config.ui);
        self.config.ui.theme = self.dark.then(|| "dark".to_string());
        if let Some(path) = &self.config_path
            && let Err(e) = config_io::save_theme(path, self.dark)
        {
            tracing::warn!(error = %e, "could not save theme preference");
        }
    }

    pub fn begin_import(&mut self) {
        self.mode = Mode::Import;
        self.import_input.clear();
        self.import_cursor = 0;
        self.flash = None;
    }

    pub fn cancel_import(&mut self) {
        self.mode = Mode::Navigate;
        self.import_input.clear();
        self.import_cursor = 0;
    }

    pub fn submit_import(&mut self) {
        let path = self.import_input.trim().to_string();
        self.cancel_import();
        if !path.is_empty() {
            self.import_file(&path);
        }
    }
}

/// Sign in and subscribe to this device's sprint document
fn open_session(paths: &DataPaths) -> Result<SyncChannel, Box<dyn std::error::Error>> {
    let identity = AnonymousIdentity::new(paths.identity_file()).sign_in()?;
    let store = FileStore::open(&paths.documents_dir())?;
    let mut sync = SyncChannel::new(Box::new(store));
    sync.attach(identity)?;
    Ok(sync)
}

/// Run the TUI application
pub fn run(paths: &DataPaths) -> Result<(), Box<dyn std::error::Error>> {
    let config = match config_io::read_config(&paths.config_file()) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(error = %e, "ignoring unreadable config");
            AppConfig::default()
        }
    };

    let mut app = match open_session(paths) {
        Ok(sync) => App::new(config, sync).with_config_path(paths.config_file()),
        Err(e) => {
            tracing::error!(error = %e, "session failed to start");
            App::failed(config, e.to_string())
        }
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    // Release the subscription before the terminal is handed back
    if let Some(sync) = app.sync.as_mut() {
        sync.detach();
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut last_tick = Instant::now();
    loop {
        app.sync_poll();
        if last_tick.elapsed() >= Duration::from_secs(1) {
            app.tick(Local::now());
            last_tick = Instant::now();
        }

        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
