//! Debounced filesystem watcher feeding registry events

use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use notify_debouncer_mini::{new_debouncer, DebounceEventResult, Debouncer};
use tokio::sync::mpsc;
use tracing::{debug, error};
use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::registry::WatchEvent;

/// Quiet period before a burst of changes is reported
const DEBOUNCE_MS: u64 = 100;

/// Keeps the underlying watcher alive; dropping it stops the event stream
pub struct EntrypointWatcher {
    _debouncer: Debouncer<RecommendedWatcher>,
}

impl EntrypointWatcher {
    /// Watch `root` recursively
    ///
    /// Events are delivered on the returned channel in the order the
    /// watcher reports them.
    pub fn start(root: &Path) -> Result<(Self, mpsc::UnboundedReceiver<WatchEvent>)> {
        let (tx, rx) = mpsc::unbounded_channel();

        let mut debouncer = new_debouncer(
            Duration::from_millis(DEBOUNCE_MS),
            move |result: DebounceEventResult| match result {
                Ok(events) => {
                    for event in events {
                        for event in classify(event.path) {
                            // Receiver gone means the session is shutting down
                            let _ = tx.send(event);
                        }
                    }
                }
                Err(e) => {
                    error!("Watch error: {:?}", e);
                }
            },
        )
        .map_err(|source| Error::Watch {
            path: root.to_path_buf(),
            source,
        })?;

        debouncer
            .watcher()
            .watch(root, RecursiveMode::Recursive)
            .map_err(|source| Error::Watch {
                path: root.to_path_buf(),
                source,
            })?;

        debug!("Watching {}", root.display());

        Ok((
            Self {
                _debouncer: debouncer,
            },
            rx,
        ))
    }
}

/// Map a debounced path onto add or remove events
///
/// The debouncer only reports that something happened at a path, so the
/// current state of the filesystem decides which one it was. A directory
/// moved in is reported as one path and expands to an add per file in it.
pub fn classify(path: PathBuf) -> Vec<WatchEvent> {
    if path.is_dir() {
        return WalkDir::new(&path)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| WatchEvent::Add(entry.into_path()))
            .collect();
    }

    if path.exists() {
        vec![WatchEvent::Add(path)]
    } else {
        vec![WatchEvent::Remove(path)]
    }
}
