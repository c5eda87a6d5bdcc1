//! File system watcher for live re-rendering.
//!
//! Watches the open document and the configuration file and reports which of
//! them changed, so the caller can start a fresh decoration pass or reload
//! settings.
//!
//! Each file is watched through its parent directory. Editors and
//! [`Config::save_to`](crate::config::Config::save_to) replace files by
//! renaming a temporary file over them, which a watch on the file itself would
//! not survive.

use notify::{
    Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher,
    event::{AccessKind, AccessMode, ModifyKind},
};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::time::{Duration, Instant};

/// Manages file watching for a small set of files.
pub struct FileWatcher {
    watcher: RecommendedWatcher,
    receiver: Receiver<Result<Event, notify::Error>>,
    paths: Vec<PathBuf>,
    dirs: Vec<PathBuf>,
    /// Debounce: ignore events within this duration of the last report
    last_report: Instant,
    debounce_duration: Duration,
}

impl FileWatcher {
    /// Create a new file watcher.
    pub fn new() -> Result<Self, notify::Error> {
        let (tx, rx) = mpsc::channel();
        let watcher = notify::recommended_watcher(tx)?;

        Ok(Self {
            watcher,
            receiver: rx,
            paths: Vec::new(),
            dirs: Vec::new(),
            last_report: Instant::now(),
            debounce_duration: Duration::from_millis(100),
        })
    }

    /// Start watching a file in addition to those already watched.
    pub fn watch(&mut self, path: &Path) -> Result<(), notify::Error> {
        let path = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        if self.paths.contains(&path) {
            return Ok(());
        }

        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."))
            .to_path_buf();
        if !self.dirs.contains(&dir) {
            self.watcher.watch(&dir, RecursiveMode::NonRecursive)?;
            self.dirs.push(dir);
        }
        tracing::debug!(path = %path.display(), "watching");
        self.paths.push(path);

        self.last_report = Instant::now();
        Ok(())
    }

    /// Stop watching every file.
    pub fn unwatch_all(&mut self) {
        for dir in self.dirs.drain(..) {
            let _ = self.watcher.unwatch(&dir);
        }
        self.paths.clear();
    }

    /// Drain pending events and return the watched files that changed.
    ///
    /// Returns an empty list while inside the debounce window.
    pub fn changed_paths(&mut self) -> Vec<PathBuf> {
        let mut changed: Vec<PathBuf> = Vec::new();

        loop {
            match self.receiver.try_recv() {
                Ok(Ok(event)) => {
                    for path in self.relevant_paths(&event) {
                        if !changed.contains(&path) {
                            changed.push(path);
                        }
                    }
                }
                Ok(Err(e)) => {
                    tracing::warn!(error = %e, "watch error");
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => break,
            }
        }

        if changed.is_empty() {
            return changed;
        }

        let now = Instant::now();
        if now.duration_since(self.last_report) < self.debounce_duration {
            return Vec::new();
        }
        self.last_report = now;
        changed
    }

    /// Watched paths an event refers to, if it is a modification we care about.
    fn relevant_paths(&self, event: &Event) -> Vec<PathBuf> {
        let is_write = matches!(
            event.kind,
            EventKind::Modify(ModifyKind::Data(_))
                | EventKind::Modify(ModifyKind::Any)
                | EventKind::Modify(ModifyKind::Name(_))
                | EventKind::Access(AccessKind::Close(AccessMode::Write))
                | EventKind::Create(_)
        );
        if !is_write {
            return Vec::new();
        }

        event
            .paths
            .iter()
            .filter(|p| self.paths.contains(*p))
            .cloned()
            .collect()
    }

    /// Currently watched paths.
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }
}
