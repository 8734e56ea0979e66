//! Snippet persistence
//!
//! Rendering never touches the filesystem directly; finished text is handed
//! to a [`SnippetWriter`] together with one of the two fixed file names.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Error, Result};

/// File holding every per-entry conditional block
pub const TAG_SNIPPET_FILE: &str = "vite-tag.liquid";

/// File holding the live-reload client tag
pub const CLIENT_SNIPPET_FILE: &str = "vite-client.liquid";

/// Directory, relative to the theme root, snippets are written to
pub const SNIPPETS_DIR: &str = "snippets";

/// Destination for rendered snippets
pub trait SnippetWriter {
    /// Persist `content` under `filename`, replacing any previous content
    fn write(&mut self, filename: &str, content: &str) -> Result<()>;
}

/// Writes snippets into `<theme_root>/snippets`
#[derive(Debug, Clone)]
pub struct FsSnippetWriter {
    dir: PathBuf,
}

impl FsSnippetWriter {
    /// Writer for the given theme root
    pub fn new(theme_root: &Path) -> Self {
        Self {
            dir: theme_root.join(SNIPPETS_DIR),
        }
    }

    /// Target directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl SnippetWriter for FsSnippetWriter {
    fn write(&mut self, filename: &str, content: &str) -> Result<()> {
        let path = self.dir.join(filename);

        fs::create_dir_all(&self.dir).map_err(|source| Error::SnippetWrite {
            path: path.clone(),
            source,
        })?;
        fs::write(&path, content).map_err(|source| Error::SnippetWrite {
            path: path.clone(),
            source,
        })?;

        debug!("Wrote {} ({} bytes)", path.display(), content.len());
        Ok(())
    }
}
