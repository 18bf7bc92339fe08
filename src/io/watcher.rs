use std::ffi::OsString;
use std::path::Path;

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

/// Watches a single document file by watching its parent directory.
///
/// Documents are replaced by rename, so watching the file's inode would miss
/// every write after the first. Dropping the watcher stops notifications.
pub struct DocumentWatcher {
    _watcher: RecommendedWatcher,
}

impl DocumentWatcher {
    /// Start watching `document`. `on_change` runs on the watcher's thread
    /// after every create, modify or remove touching the file.
    pub fn start<F>(document: &Path, mut on_change: F) -> Result<Self, notify::Error>
    where
        F: FnMut() + Send + 'static,
    {
        let dir = document
            .parent()
            .ok_or_else(|| notify::Error::path_not_found().add_path(document.to_path_buf()))?
            .to_path_buf();
        let file_name: OsString = document
            .file_name()
            .ok_or_else(|| notify::Error::path_not_found().add_path(document.to_path_buf()))?
            .to_os_string();

        let mut watcher = RecommendedWatcher::new(
            move |result: Result<Event, notify::Error>| {
                let event = match result {
                    Ok(e) => e,
                    Err(e) => {
                        tracing::warn!(error = %e, "document watcher error");
                        return;
                    }
                };

                match event.kind {
                    EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_) => {}
                    _ => return,
                }

                // Temp files and the lock file share the directory
                let relevant = event
                    .paths
                    .iter()
                    .any(|p| p.file_name() == Some(file_name.as_os_str()));
                if relevant {
                    on_change();
                }
            },
            Config::default(),
        )?;

        watcher.watch(&dir, RecursiveMode::NonRecursive)?;
        Ok(DocumentWatcher { _watcher: watcher })
    }
}
