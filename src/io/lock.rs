//! Per-document advisory locking.
//!
//! A `FileStore` write is a read-modify-write of one JSON document, so two
//! processes (the TUI and a CLI call, say) must not interleave on the same
//! identity. Each document gets a sibling `<identity>.lock` that is taken
//! with `flock` for the length of the write.
//!
//! The lock file is left in place after release. Removing it would let a
//! waiter already holding the old inode and a newcomer creating a fresh
//! file both win.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);
const MAX_BACKOFF: Duration = Duration::from_millis(50);

#[derive(Debug, thiserror::Error)]
pub enum LockError {
    #[error("could not open lock file {path}: {source}")]
    Open { path: PathBuf, source: io::Error },
    #[error("sprint document {path} is busy (waited {waited:?}); another sprint process is writing")]
    Busy { path: PathBuf, waited: Duration },
    #[error("could not lock {path}: {source}")]
    Flock { path: PathBuf, source: io::Error },
}

/// Exclusive hold on one sprint document, released on drop
#[derive(Debug)]
pub struct DocumentLock {
    file: File,
    path: PathBuf,
}

impl DocumentLock {
    /// Lock file guarding `document`: same name, `.lock` extension
    pub fn lock_path(document: &Path) -> PathBuf {
        document.with_extension("lock")
    }

    /// Take the lock for `document`, retrying with backoff for up to
    /// `timeout` while another holder has it.
    pub fn acquire(document: &Path, timeout: Duration) -> Result<Self, LockError> {
        let path = Self::lock_path(document);
        let file = open_lock_file(&path).map_err(|source| LockError::Open {
            path: path.clone(),
            source,
        })?;

        let start = Instant::now();
        let mut backoff = Duration::from_millis(1);
        loop {
            match try_lock(&file) {
                Ok(()) => {
                    tracing::trace!(path = %path.display(), "document locked");
                    return Ok(DocumentLock { file, path });
                }
                Err(e)
                    if e.kind() != io::ErrorKind::WouldBlock
                        && e.kind() != io::ErrorKind::Interrupted =>
                {
                    return Err(LockError::Flock { path, source: e });
                }
                Err(_) => {
                    let waited = start.elapsed();
                    if waited >= timeout {
                        tracing::warn!(path = %path.display(), ?waited, "document lock busy");
                        return Err(LockError::Busy { path, waited });
                    }
                    std::thread::sleep(backoff.min(timeout - waited));
                    backoff = (backoff * 2).min(MAX_BACKOFF);
                }
            }
        }
    }

    pub fn acquire_default(document: &Path) -> Result<Self, LockError> {
        Self::acquire(document, DEFAULT_TIMEOUT)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for DocumentLock {
    fn drop(&mut self) {
        // Closing the handle would release it too; unlock first so waiters
        // are not held up by a slow close
        unlock(&self.file);
    }
}

fn open_lock_file(path: &Path) -> io::Result<File> {
    OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(false)
        .open(path)
}

#[cfg(unix)]
fn try_lock(file: &File) -> io::Result<()> {
    use std::os::unix::io::AsRawFd;
    if unsafe { libc::flock(file.as_raw_fd(), libc::LOCK_EX | libc::LOCK_NB) } == 0 {
        Ok(())
    } else {
        Err(io::Error::last_os_error())
    }
}

#[cfg(unix)]
fn unlock(file: &File) {
    use std::os::unix::io::AsRawFd;
    unsafe {
        libc::flock(file.as_raw_fd(), libc::LOCK_UN);
    }
}

#[cfg(not(unix))]
fn try_lock(_file: &File) -> io::Result<()> {
    Ok(())
}

#[cfg(not(unix))]
fn unlock(_file: &File) {}
