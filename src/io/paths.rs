use std::path::{Path, PathBuf};

/// Default data directory, respecting XDG_DATA_HOME
pub fn default_data_dir() -> PathBuf {
    let data_home = std::env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| dirs_home().join(".local").join("share"));
    data_home.join("sprint-os")
}

/// Get the user's home directory
fn dirs_home() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/"))
}

/// Locations of everything kept in a data directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    pub root: PathBuf,
}

impl DataPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        DataPaths { root: root.into() }
    }

    /// Use `dir` if given, otherwise the default location
    pub fn resolve(dir: Option<&Path>) -> Self {
        match dir {
            Some(d) => DataPaths::new(d),
            None => DataPaths::new(default_data_dir()),
        }
    }

    pub fn config_file(&self) -> PathBuf {
        self.root.join("config.toml")
    }

    pub fn identity_file(&self) -> PathBuf {
        self.root.join("identity")
    }

    /// Directory holding one JSON document per identity
    pub fn documents_dir(&self) -> PathBuf {
        self.root.join("sprints")
    }

    pub fn log_file(&self) -> PathBuf {
        self.root.join("sprint.log")
    }
}
