//! Read-only view over a bundler manifest
//!
//! The manifest maps chunk keys to [`Chunk`] records. Key order is kept
//! exactly as it appears in the JSON document because rendered snippets must
//! follow it.

mod chunk;

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::error::{Error, Result};

pub use chunk::Chunk;

/// Stylesheet languages the bundler emits CSS for
pub const CSS_EXTENSIONS: &[&str] = &["css", "less", "sass", "scss", "styl", "stylus", "pcss", "postcss"];

/// Script languages accepted as entrypoints
pub const SCRIPT_EXTENSIONS: &[&str] = &["js", "jsx", "mjs", "cjs", "ts", "tsx", "mts", "cts"];

/// `src` of the single combined stylesheet emitted when CSS code splitting is off
pub const COMBINED_STYLESHEET: &str = "style.css";

/// Matches stylesheet paths, tolerating a query suffix (`main.scss?inline`)
static CSS_EXTENSIONS_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"\.({})(?:$|\?)", CSS_EXTENSIONS.join("|"))).unwrap()
});

static ENTRYPOINT_TYPES_REGEX: Lazy<Regex> = Lazy::new(|| {
    let all: Vec<&str> = SCRIPT_EXTENSIONS.iter().chain(CSS_EXTENSIONS).copied().collect();
    Regex::new(&format!(r"\.({})(?:$|\?)", all.join("|"))).unwrap()
});

/// Whether `path` names a stylesheet
pub fn is_css_path(path: &str) -> bool {
    CSS_EXTENSIONS_REGEX.is_match(path)
}

/// Whether `path` is a legitimate entrypoint at all
pub fn is_entry_candidate(path: &str) -> bool {
    ENTRYPOINT_TYPES_REGEX.is_match(path)
}

/// Immutable chunk graph loaded from a manifest
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManifestGraph {
    chunks: IndexMap<String, Chunk>,
}

impl ManifestGraph {
    /// Load and parse the manifest at `path`
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| Error::ManifestNotFound {
            path: path.to_path_buf(),
            source,
        })?;

        let graph = Self::from_json(&content)?;
        debug!("Loaded {} chunk(s) from {}", graph.len(), path.display());

        Ok(graph)
    }

    /// Parse a manifest document
    pub fn from_json(content: &str) -> Result<Self> {
        let chunks: IndexMap<String, Chunk> =
            serde_json::from_str(content).map_err(|source| Error::ManifestParse { source })?;
        Ok(Self { chunks })
    }

    /// Build a graph from already-typed chunks, keeping iteration order
    pub fn from_chunks<I, K>(chunks: I) -> Self
    where
        I: IntoIterator<Item = (K, Chunk)>,
        K: Into<String>,
    {
        Self {
            chunks: chunks.into_iter().map(|(key, chunk)| (key.into(), chunk)).collect(),
        }
    }

    /// Look up a chunk by key
    pub fn chunk(&self, key: &str) -> Option<&Chunk> {
        self.chunks.get(key)
    }

    /// Iterate chunks in manifest order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Chunk)> {
        self.chunks.iter().map(|(key, chunk)| (key.as_str(), chunk))
    }

    /// Emitted file of the chunk at `key`
    ///
    /// Fails when the chunk is unknown or has no non-empty `file`.
    pub fn file_of(&self, key: &str) -> Result<&str> {
        let chunk = self.chunks.get(key).ok_or_else(|| Error::MissingField {
            chunk: key.to_string(),
            field: "file",
        })?;

        match chunk.file.as_deref() {
            Some(file) if !file.is_empty() => Ok(file),
            _ => Err(Error::MissingField {
                chunk: key.to_string(),
                field: "file",
            }),
        }
    }

    /// Chunks listed in the `imports` of `key`, in manifest order
    ///
    /// Only the chunk's own list is followed; the bundler already flattens
    /// everything an entry needs into it. An unknown import key is fatal.
    pub fn imports_of(&self, key: &str) -> Result<Vec<(&str, &Chunk)>> {
        let Some(chunk) = self.chunks.get(key) else {
            return Ok(Vec::new());
        };

        chunk
            .import_keys()
            .iter()
            .map(|import| {
                self.chunks
                    .get_key_value(import)
                    .map(|(import_key, imported)| (import_key.as_str(), imported))
                    .ok_or_else(|| Error::DanglingImport {
                        chunk: key.to_string(),
                        import: import.to_string(),
                    })
            })
            .collect()
    }

    /// Number of chunks
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Check if the manifest is empty
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}
