use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::io::store::atomic_write;
use crate::model::config::AppConfig;

/// Error type for config.toml access
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError { path: PathBuf, source: io::Error },
    #[error("could not write {path}: {source}")]
    WriteError { path: PathBuf, source: io::Error },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Edit(#[from] toml_edit::TomlError),
}

/// Read the config file, returning defaults when it does not exist.
pub fn read_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let text = match read_text(path)? {
        Some(text) => text,
        None => return Ok(AppConfig::default()),
    };
    Ok(toml::from_str(&text)?)
}

/// Read the config as a toml_edit document for round-trip-safe editing.
pub fn read_document(path: &Path) -> Result<toml_edit::DocumentMut, ConfigError> {
    let text = read_text(path)?.unwrap_or_default();
    Ok(text.parse()?)
}

/// Write the config document back to disk, preserving formatting.
pub fn write_document(path: &Path, doc: &toml_edit::DocumentMut) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| ConfigError::WriteError {
            path: path.to_path_buf(),
            source: e,
        })?;
    }
    atomic_write(path, doc.to_string().as_bytes()).map_err(|e| ConfigError::WriteError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Set or clear the dark theme in the config document.
///
/// Light is the absence of the key, so switching to light removes it rather
/// than writing a value.
pub fn set_theme(doc: &mut toml_edit::DocumentMut, dark: bool) {
    if dark {
        if !doc.contains_key("ui") {
            doc["ui"] = toml_edit::Item::Table(toml_edit::Table::new());
        }
        doc["ui"]["theme"] = toml_edit::value("dark");
    } else if let Some(ui) = doc.get_mut("ui").and_then(|item| item.as_table_like_mut()) {
        ui.remove("theme");
    }
}

/// Persist the theme preference to `path`.
pub fn save_theme(path: &Path, dark: bool) -> Result<(), ConfigError> {
    let mut doc = read_document(path)?;
    set_theme(&mut doc, dark);
    write_document(path, &doc)
}

fn read_text(path: &Path) -> Result<Option<String>, ConfigError> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}
