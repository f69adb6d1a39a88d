//! Filesystem watching for watch mode.
//!
//! Wraps a recursive [`notify`] watcher behind a plain channel of
//! [`ChangeEvent`]s so the engine never touches backend-specific event
//! types.
//!
//! ## Startup events
//!
//! Consumers need to know where "already existed" ends and "actually
//! changed" begins. On startup the watcher walks the tree once and sends a
//! synthetic [`ChangeKind::Added`] event for every existing entry (the
//! root included); [`Watcher::startup_events`] reports how many. The
//! engine drains exactly that many events before treating anything as a
//! real change, so a freshly started watch session does not trigger a
//! redundant rebuild per pre-existing file.

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher as _};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver, Sender, TryRecvError};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum WatchError {
    #[error("could not watch '{path}': {source}")]
    Backend {
        path: PathBuf,
        #[source]
        source: notify::Error,
    },
    #[error("watch channel closed")]
    Closed,
}

/// What happened to a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Added,
    Modified,
    Removed,
}

/// One filesystem change, already reduced to what the engine cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    pub kind: ChangeKind,
    pub path: PathBuf,
}

/// Recursive watcher over the pages directory.
///
/// The notify backend must stay alive for events to keep flowing; dropping
/// the `Watcher` stops the watch.
pub struct Watcher {
    rx: Receiver<ChangeEvent>,
    startup_events: usize,
    _backend: RecommendedWatcher,
}

impl Watcher {
    /// Start watching `dir` recursively.
    ///
    /// Synthetic `Added` events for all pre-existing entries are queued
    /// before the backend watch begins, so they are always delivered first.
    pub fn watch(dir: &Path) -> Result<Self, WatchError> {
        let (tx, rx) = channel::<ChangeEvent>();

        let startup_events = send_startup_events(dir, &tx);
        debug!(
            "watching '{}' ({} pre-existing entries)",
            dir.display(),
            startup_events
        );

        let event_tx = tx.clone();
        let mut backend =
            notify::recommended_watcher(move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if let Some(kind) = map_kind(&event.kind) {
                        for path in event.paths {
                            let _ = event_tx.send(ChangeEvent { kind, path });
                        }
                    }
                }
                Err(err) => debug!("watch backend error: {err}"),
            })
            .map_err(|source| WatchError::Backend {
                path: dir.to_path_buf(),
                source,
            })?;

        backend
            .watch(dir, RecursiveMode::Recursive)
            .map_err(|source| WatchError::Backend {
                path: dir.to_path_buf(),
                source,
            })?;

        Ok(Self {
            rx,
            startup_events,
            _backend: backend,
        })
    }

    /// Number of synthetic startup events queued at creation.
    pub fn startup_events(&self) -> usize {
        self.startup_events
    }

    /// Block until the next event.
    pub fn recv(&self) -> Result<ChangeEvent, WatchError> {
        self.rx.recv().map_err(|_| WatchError::Closed)
    }

    /// Non-blocking receive, used to coalesce event bursts.
    pub fn try_recv(&self) -> Result<Option<ChangeEvent>, WatchError> {
        match self.rx.try_recv() {
            Ok(event) => Ok(Some(event)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(WatchError::Closed),
        }
    }

    /// Blocking receive with a deadline. `Ok(None)` on timeout.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<Option<ChangeEvent>, WatchError> {
        match self.rx.recv_timeout(timeout) {
            Ok(event) => Ok(Some(event)),
            Err(std::sync::mpsc::RecvTimeoutError::Timeout) => Ok(None),
            Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => Err(WatchError::Closed),
        }
    }
}

/// Queue a synthetic `Added` event per existing entry; returns the count.
fn send_startup_events(dir: &Path, tx: &Sender<ChangeEvent>) -> usize {
    let mut count = 0;
    for entry in WalkDir::new(dir).into_iter().filter_map(|e| e.ok()) {
        let _ = tx.send(ChangeEvent {
            kind: ChangeKind::Added,
            path: entry.path().to_path_buf(),
        });
        count += 1;
    }
    count
}

/// Reduce a notify event kind to ours; access and metadata-only noise is
/// dropped.
fn map_kind(kind: &EventKind) -> Option<ChangeKind> {
    match kind {
        EventKind::Create(_) => Some(ChangeKind::Added),
        EventKind::Modify(_) => Some(ChangeKind::Modified),
        EventKind::Remove(_) => Some(ChangeKind::Removed),
        _ => None,
    }
}
