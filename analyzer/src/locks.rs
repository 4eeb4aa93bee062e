//! Per-directory session locks.

use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock};

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::debug;

static GLOBAL: LazyLock<DirectoryLocks> = LazyLock::new(DirectoryLocks::new);

/// Serializes analyses that share a fixed settings file path.
///
/// Clones share the same registry. An entry lives only while some task holds
/// or waits for its directory.
#[derive(Clone, Default)]
pub struct DirectoryLocks {
    locks: Arc<DashMap<PathBuf, Arc<Mutex<()>>>>,
}

impl DirectoryLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry.
    pub fn global() -> Self {
        GLOBAL.clone()
    }

    /// Wait until no other holder has `dir`, then hold it until the guard drops.
    pub async fn acquire(&self, dir: &Path) -> DirectoryGuard {
        let lock = Arc::clone(self.locks.entry(dir.to_path_buf()).or_default().value());
        if lock.try_lock().is_err() {
            debug!("Waiting for another analysis of {}", dir.display());
        }
        DirectoryGuard {
            guard: Some(lock.lock_owned().await),
            dir: dir.to_path_buf(),
            locks: Arc::clone(&self.locks),
        }
    }

    /// Number of directories currently held or waited for.
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}

/// Exclusive hold on one directory, released on drop.
pub struct DirectoryGuard {
    guard: Option<OwnedMutexGuard<()>>,
    dir: PathBuf,
    locks: Arc<DashMap<PathBuf, Arc<Mutex<()>>>>,
}

impl Drop for DirectoryGuard {
    fn drop(&mut self) {
        self.guard.take();
        // The map holds one reference; any other means a waiter still needs the entry.
        self.locks
            .remove_if(&self.dir, |_, lock| Arc::strong_count(lock) == 1);
    }
}
