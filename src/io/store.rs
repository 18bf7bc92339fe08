//! Document storage for sprint state.
//!
//! One document per identity. Readers subscribe and receive a full snapshot
//! of the document on every change; writers either create the whole
//! document or replace its `tasks` field.

use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex, MutexGuard, Weak};
use std::time::Duration;

use tempfile::NamedTempFile;

use crate::model::{SprintState, TaskRecord};

use super::identity::Identity;
use super::lock::{DocumentLock, LockError};
use super::watcher::DocumentWatcher;

/// What a subscriber sees: the whole document, or `None` if it does not exist
pub type Snapshot = Option<SprintState>;

/// Error type for document store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("no sprint document for identity {0}")]
    NotFound(String),
    #[error("could not read {path}: {source}")]
    ReadError { path: PathBuf, source: io::Error },
    #[error("could not write {path}: {source}")]
    WriteError { path: PathBuf, source: io::Error },
    #[error("malformed sprint document {path}: {source}")]
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("could not encode sprint document: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("could not watch {path}: {source}")]
    WatchError {
        path: PathBuf,
        source: notify::Error,
    },
    #[error(transparent)]
    Lock(#[from] LockError),
    #[error("document store unavailable")]
    Unavailable,
    #[error("not signed in")]
    NoIdentity,
}

/// Backing store for sprint documents
pub trait DocumentStore {
    /// Current document for `identity`, if any
    fn read(&self, identity: &Identity) -> Result<Snapshot, StoreError>;
    /// Write a complete document, replacing anything already there
    fn create(&self, identity: &Identity, state: &SprintState) -> Result<(), StoreError>;
    /// Replace only the `tasks` field of an existing document
    fn update_tasks(&self, identity: &Identity, tasks: &[TaskRecord]) -> Result<(), StoreError>;
    /// Subscribe to the document. The current snapshot is delivered first.
    fn watch(&self, identity: &Identity) -> Result<Subscription, StoreError>;
}

// ---------------------------------------------------------------------------
// Subscription
// ---------------------------------------------------------------------------

/// A live feed of snapshots. Dropping it (or calling [`cancel`]) releases the
/// underlying watcher exactly once.
///
/// [`cancel`]: Subscription::cancel
pub struct Subscription {
    rx: Receiver<Snapshot>,
    disposer: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(rx: Receiver<Snapshot>, disposer: impl FnOnce() + 'static) -> Self {
        Subscription {
            rx,
            disposer: Some(Box::new(disposer)),
        }
    }

    /// Non-blocking poll for pending snapshots, oldest first
    pub fn poll(&self) -> Vec<Snapshot> {
        let mut snapshots = Vec::new();
        while let Ok(snapshot) = self.rx.try_recv() {
            snapshots.push(snapshot);
        }
        snapshots
    }

    /// Wait up to `timeout` for the next snapshot
    pub fn recv_timeout(&self, timeout: Duration) -> Option<Snapshot> {
        self.rx.recv_timeout(timeout).ok()
    }

    /// Release the subscription now
    pub fn cancel(mut self) {
        self.dispose();
    }

    fn dispose(&mut self) {
        if let Some(disposer) = self.disposer.take() {
            disposer();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.dispose();
    }
}

// ---------------------------------------------------------------------------
// File-backed store
// ---------------------------------------------------------------------------

/// Keeps each document as `<dir>/<identity>.json`
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open (creating if needed) a document directory
    pub fn open(dir: &Path) -> Result<Self, StoreError> {
        fs::create_dir_all(dir).map_err(|e| StoreError::WriteError {
            path: dir.to_path_buf(),
            source: e,
        })?;
        let dir = fs::canonicalize(dir).map_err(|e| StoreError::ReadError {
            path: dir.to_path_buf(),
            source: e,
        })?;
        Ok(FileStore { dir })
    }

    pub fn document_path(&self, identity: &Identity) -> PathBuf {
        self.dir.join(format!("{}.json", identity.as_str()))
    }

    fn write_document(&self, path: &Path, state: &SprintState) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(state)?;
        atomic_write(path, content.as_bytes()).map_err(|e| StoreError::WriteError {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

/// Read a document file. A missing file is `Ok(None)`.
pub fn read_document(path: &Path) -> Result<Snapshot, StoreError> {
    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(StoreError::ReadError {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };
    serde_json::from_str(&content)
        .map(Some)
        .map_err(|e| StoreError::Malformed {
            path: path.to_path_buf(),
            source: e,
        })
}

/// Write a file atomically: write to a temp file in the same directory,
/// then rename over the target.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

impl DocumentStore for FileStore {
    fn read(&self, identity: &Identity) -> Result<Snapshot, StoreError> {
        read_document(&self.document_path(identity))
    }

    fn create(&self, identity: &Identity, state: &SprintState) -> Result<(), StoreError> {
        let path = self.document_path(identity);
        let _lock = DocumentLock::acquire_default(&path)?;
        self.write_document(&path, state)?;
        tracing::info!(%identity, "created sprint document");
        Ok(())
    }

    fn update_tasks(&self, identity: &Identity, tasks: &[TaskRecord]) -> Result<(), StoreError> {
        let path = self.document_path(identity);
        let _lock = DocumentLock::acquire_default(&path)?;
        let mut state =
            read_document(&path)?.ok_or_else(|| StoreError::NotFound(identity.to_string()))?;
        state.tasks = tasks.to_vec();
        self.write_document(&path, &state)?;
        tracing::debug!(%identity, count = tasks.len(), "updated tasks");
        Ok(())
    }

    fn watch(&self, identity: &Identity) -> Result<Subscription, StoreError> {
        let path = self.document_path(identity);
        let (tx, rx) = mpsc::channel();

        let watch_path = path.clone();
        let watch_tx = tx.clone();
        let watcher = DocumentWatcher::start(&path, move || match read_document(&watch_path) {
            Ok(snapshot) => {
                let _ = watch_tx.send(snapshot);
            }
            // Usually a half-visible write; the next event carries the result
            Err(e) => tracing::warn!(error = %e, "skipping unreadable document"),
        })
        .map_err(|e| StoreError::WatchError {
            path: path.clone(),
            source: e,
        })?;

        let _ = tx.send(read_document(&path)?);
        tracing::debug!(%identity, "subscribed to sprint document");
        Ok(Subscription::new(rx, move || drop(watcher)))
    }
}

// ---------------------------------------------------------------------------
// In-memory store
// ---------------------------------------------------------------------------

struct Subscriber {
    id: u64,
    identity: Identity,
    tx: Sender<Snapshot>,
}

#[derive(Default)]
struct MemoryInner {
    docs: HashMap<Identity, SprintState>,
    subscribers: Vec<Subscriber>,
    next_id: u64,
    unavailable: bool,
}

impl MemoryInner {
    fn notify(&mut self, identity: &Identity) {
        let snapshot = self.docs.get(identity).cloned();
        // Drop subscribers whose receiving end is gone
        self.subscribers
            .retain(|s| s.identity != *identity || s.tx.send(snapshot.clone()).is_ok());
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable {
            Err(StoreError::Unavailable)
        } else {
            Ok(())
        }
    }
}

/// Process-local store. Writes notify subscribers synchronously, before the
/// write call returns.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<MemoryInner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryInner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Make every subsequent call fail with [`StoreError::Unavailable`]
    pub fn set_unavailable(&self, unavailable: bool) {
        self.lock().unavailable = unavailable;
    }

    /// Number of live subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.lock().subscribers.len()
    }
}

impl DocumentStore for MemoryStore {
    fn read(&self, identity: &Identity) -> Result<Snapshot, StoreError> {
        let inner = self.lock();
        inner.check_available()?;
        Ok(inner.docs.get(identity).cloned())
    }

    fn create(&self, identity: &Identity, state: &SprintState) -> Result<(), StoreError> {
        let mut inner = self.lock();
        inner.check_available()?;
        inner.docs.insert(identity.clone(), state.clone());
        inner.notify(identity);
        Ok(())
    }

    fn update_tasks(&self, identity: &Identity, tasks: &[TaskRecord]) -> Result<(), StoreError> {
        let mut inner = self.lock();
        inner.check_available()?;
        let doc = inner
            .docs
            .get_mut(identity)
            .ok_or_else(|| StoreError::NotFound(identity.to_string()))?;
        doc.tasks = tasks.to_vec();
        inner.notify(identity);
        Ok(())
    }

    fn watch(&self, identity: &Identity) -> Result<Subscription, StoreError> {
        let mut inner = self.lock();
        inner.check_available()?;
        let (tx, rx) = mpsc::channel();
        let _ = tx.send(inner.docs.get(identity).cloned());

        let id = inner.next_id;
        inner.next_id += 1;
        inner.subscribers.push(Subscriber {
            id,
            identity: identity.clone(),
            tx,
        });

        let weak: Weak<Mutex<MemoryInner>> = Arc::downgrade(&self.inner);
        Ok(Subscription::new(rx, move || {
            if let Some(inner) = weak.upgrade() {
                let mut inner = inner.lock().unwrap_or_else(|e| e.into_inner());
                inner.subscribers.retain(|s| s.id != id);
            }
        }))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
