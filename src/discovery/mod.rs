//! Entrypoint discovery
//!
//! Resolves the configured `input` glob patterns into concrete files under
//! the project root and keeps only those with a recognized entry extension.

use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use tracing::debug;
use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::manifest::is_entry_candidate;

/// Compile `patterns` into one matcher
pub fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();

    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|source| Error::InvalidPattern {
            pattern: pattern.clone(),
            source,
        })?;
        builder.add(glob);
    }

    builder.build().map_err(|source| Error::InvalidPattern {
        pattern: patterns.join(", "),
        source,
    })
}

/// Files under `root` matching `patterns` (relative to `root`), sorted by path
pub fn discover_entrypoints(root: &Path, patterns: &[String]) -> Result<Vec<PathBuf>> {
    let matcher = build_globset(patterns)?;

    let mut found: Vec<PathBuf> = WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            entry
                .path()
                .strip_prefix(root)
                .map(|relative| matcher.is_match(relative))
                .unwrap_or(false)
        })
        .map(|entry| entry.into_path())
        .filter(|path| is_entry_candidate(&path.to_string_lossy()))
        .collect();

    found.sort();
    debug!("Discovered {} entrypoint(s) under {}", found.len(), root.display());

    Ok(found)
}
