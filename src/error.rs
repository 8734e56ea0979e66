//! Error types shared by the tag-resolution engine and its collaborators

use std::path::PathBuf;

use thiserror::Error;

/// Result alias used throughout the library
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors produced while loading configuration, reading the manifest or
/// writing snippets
#[derive(Debug, Error)]
pub enum Error {
    /// No configuration was supplied at all
    #[error("vite-liquid: missing configuration.")]
    MissingConfig,

    /// The configuration has no `input` entry
    #[error("vite-liquid: missing configuration for \"input\".")]
    MissingInput,

    /// `theme_root` was empty after normalisation
    #[error("themeRoot must be a directory. E.g. 'shopify'.")]
    InvalidThemeRoot,

    /// The configuration file could not be read
    #[error("failed to read config file {path}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for our schema
    #[error("failed to parse config file {path}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// An `input` glob pattern is malformed
    #[error("invalid input pattern '{pattern}'")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    /// The dev server scheme/host/port do not form a valid origin
    #[error("invalid dev server origin '{origin}'")]
    InvalidOrigin {
        origin: String,
        #[source]
        source: url::ParseError,
    },

    /// The manifest file does not exist or cannot be read
    #[error("manifest not found at {path}")]
    ManifestNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The manifest is not a well-formed chunk mapping
    #[error("failed to parse manifest: {source}")]
    ManifestParse {
        #[source]
        source: serde_json::Error,
    },

    /// A chunk lists an import key that is not in the manifest
    #[error("chunk '{chunk}' imports '{import}', which is not in the manifest")]
    DanglingImport { chunk: String, import: String },

    /// A dereferenced chunk lacks a field required for rendering
    #[error("chunk '{chunk}' is missing required field '{field}'")]
    MissingField { chunk: String, field: &'static str },

    /// A snippet file could not be written
    #[error("failed to write snippet {path}")]
    SnippetWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The filesystem watcher could not be started
    #[error("failed to watch {path}")]
    Watch {
        path: PathBuf,
        #[source]
        source: notify::Error,
    },
}

impl Error {
    /// Whether the error is a configuration problem caught before rendering
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            Error::MissingConfig
                | Error::MissingInput
                | Error::InvalidThemeRoot
                | Error::ConfigRead { .. }
                | Error::ConfigParse { .. }
                | Error::InvalidPattern { .. }
                | Error::InvalidOrigin { .. }
        )
    }
}
