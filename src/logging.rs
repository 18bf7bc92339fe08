//! File-backed tracing setup.
//!
//! The TUI owns the terminal, so log lines go to `sprint.log` in the data
//! directory. Verbosity comes from `SPRINT_LOG` using `EnvFilter` syntax.

use std::fs::{self, OpenOptions};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::io::paths::DataPaths;

pub const LOG_ENV: &str = "SPRINT_LOG";

/// Install the global subscriber. Logging is best-effort: if the log file
/// cannot be opened nothing is installed and the app runs silently.
pub fn init(paths: &DataPaths) {
    let path = paths.log_file();
    if let Some(parent) = path.parent()
        && fs::create_dir_all(parent).is_err()
    {
        return;
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init();
}
