//! Live entrypoint registry for development mode
//!
//! The registry maps logical entry names (paths relative to the entrypoints
//! root) to absolute source paths. It is an owned value: each watch event
//! consumes the current registry and yields the next one together with a
//! verdict on whether the tag snippet has to be rewritten.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::manifest::is_entry_candidate;
use crate::tags::{Snippet, TagBlock, TagRenderer};
use crate::utils::entry_name;

/// A filesystem notification relevant to the registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchEvent {
    /// A file appeared
    Add(PathBuf),
    /// A file disappeared
    Remove(PathBuf),
}

impl WatchEvent {
    pub fn path(&self) -> &Path {
        match self {
            WatchEvent::Add(path) | WatchEvent::Remove(path) => path,
        }
    }
}

/// What an event means for the rendered output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    /// Re-render and persist the tag snippet
    Rerender,
    /// Nothing to do
    Ignored,
}

/// Result of applying one event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub registry: EntrypointRegistry,
    pub change: Change,
}

/// Ordered mapping of entry name to source path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntrypointRegistry {
    root: PathBuf,
    entries: IndexMap<String, PathBuf>,
}

impl EntrypointRegistry {
    /// Create an empty registry for the entrypoints directory `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            entries: IndexMap::new(),
        }
    }

    /// Create a registry seeded with the configured input files
    ///
    /// Paths without a recognized entry extension, or outside `root`, are
    /// dropped.
    pub fn seeded<I>(root: impl Into<PathBuf>, paths: I) -> Self
    where
        I: IntoIterator<Item = PathBuf>,
    {
        paths
            .into_iter()
            .fold(Self::new(root), |registry, path| registry.add(path).registry)
    }

    /// Entrypoints directory names are relative to
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Logical entry name of `path`, if it lives under the root
    pub fn relative_name(&self, path: &Path) -> Option<String> {
        entry_name(&self.root, path)
    }

    /// Track `path`, re-rendering if it is a new entry candidate
    ///
    /// Re-adding a path that is already tracked (a content save) is ignored.
    pub fn add(mut self, path: PathBuf) -> Transition {
        if !is_entry_candidate(&path.to_string_lossy()) {
            debug!("Ignoring non-entry file: {}", path.display());
            return self.ignored();
        }

        let Some(name) = self.relative_name(&path) else {
            warn!(
                "Ignoring entrypoint outside {}: {}",
                self.root.display(),
                path.display()
            );
            return self.ignored();
        };

        if self.entries.get(&name) == Some(&path) {
            debug!("Entrypoint unchanged: {}", name);
            return self.ignored();
        }

        debug!("Entrypoint added: {} -> {}", name, path.display());
        self.entries.insert(name, path);

        Transition {
            registry: self,
            change: Change::Rerender,
        }
    }

    /// Stop tracking `path`
    ///
    /// An untracked entry name leaves the registry as it is, but still asks
    /// for a (byte-identical) re-render. Any other path is treated as a
    /// directory and drops every entry beneath it.
    pub fn remove(mut self, path: &Path) -> Transition {
        let Some(name) = self.relative_name(path) else {
            debug!("Ignoring removal outside {}: {}", self.root.display(), path.display());
            return self.ignored();
        };

        if !is_entry_candidate(&name) {
            return self.remove_dir(&name);
        }

        if self.entries.shift_remove(&name).is_some() {
            debug!("Entrypoint removed: {}", name);
        }

        Transition {
            registry: self,
            change: Change::Rerender,
        }
    }

    fn remove_dir(mut self, name: &str) -> Transition {
        let prefix = format!("{}/", name);
        let before = self.entries.len();
        self.entries.retain(|entry, _| !entry.starts_with(&prefix));

        let removed = before - self.entries.len();
        if removed == 0 {
            debug!("Ignoring non-entry file: {}", name);
            return self.ignored();
        }

        debug!("Removed {} entrypoint(s) under {}", removed, name);
        Transition {
            registry: self,
            change: Change::Rerender,
        }
    }

    /// Apply a watch event
    pub fn apply(self, event: WatchEvent) -> Transition {
        match event {
            WatchEvent::Add(path) => self.add(path),
            WatchEvent::Remove(path) => self.remove(&path),
        }
    }

    /// One block per entry, in registry order, each holding a single tag
    pub fn render(&self, renderer: &TagRenderer) -> Snippet {
        Snippet::new(
            self.entries
                .keys()
                .map(|name| TagBlock::new(name.as_str(), vec![renderer.entry_tag(name)]))
                .collect(),
        )
    }

    /// Source path of `name`
    pub fn get(&self, name: &str) -> Option<&Path> {
        self.entries.get(name).map(PathBuf::as_path)
    }

    /// Entries in registry order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Path)> {
        self.entries
            .iter()
            .map(|(name, path)| (name.as_str(), path.as_path()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn ignored(self) -> Transition {
        Transition {
            registry: self,
            change: Change::Ignored,
        }
    }
}
