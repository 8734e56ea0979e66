//! Configuration handling
//!
//! Parses and validates `vite-liquid.toml`. Validation happens once, before
//! any rendering, so the rest of the crate can rely on a resolved config.

mod schema;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::tags::ServerOrigin;
use crate::utils::normalize_theme_root;

pub use schema::*;

/// Default configuration file name
pub const CONFIG_FILE: &str = "vite-liquid.toml";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Entry patterns, relative to the project root
    #[serde(default)]
    pub input: Option<InputConfig>,

    /// Theme directory receiving `assets/` and `snippets/`
    #[serde(default = "default_theme_root")]
    pub theme_root: String,

    /// Directory dev-mode entry names are relative to
    #[serde(default = "default_entrypoints_dir")]
    pub entrypoints_dir: String,

    /// Production build settings
    #[serde(default)]
    pub build: BuildConfig,

    /// Development server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Root directory (computed from config file location)
    #[serde(skip)]
    pub root: PathBuf,
}

fn default_theme_root() -> String {
    ".".to_string()
}

fn default_entrypoints_dir() -> String {
    "frontend/entrypoints".to_string()
}

impl Config {
    /// Load configuration from a file path
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let canonical_path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()
                .map_err(|source| Error::ConfigRead {
                    path: path.to_path_buf(),
                    source,
                })?
                .join(path)
        };

        let content = fs::read_to_string(&canonical_path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                Error::MissingConfig
            } else {
                Error::ConfigRead {
                    path: canonical_path.clone(),
                    source,
                }
            }
        })?;

        // Set root directory to the directory containing the config file
        let root = canonical_path
            .parent()
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."));

        Self::from_toml(&content, root).map_err(|err| match err {
            Error::ConfigParse { source, .. } => Error::ConfigParse {
                path: canonical_path,
                source,
            },
            other => other,
        })
    }

    /// Parse and validate configuration text rooted at `root`
    pub fn from_toml(content: &str, root: impl Into<PathBuf>) -> Result<Self> {
        let mut config: Config = toml::from_str(content).map_err(|source| Error::ConfigParse {
            path: PathBuf::from(CONFIG_FILE),
            source,
        })?;
        config.root = root.into();
        config.resolve()?;

        Ok(config)
    }

    /// Validate the configuration and normalise the theme root
    fn resolve(&mut self) -> Result<()> {
        match &self.input {
            Some(input) if !input.is_empty() => {}
            _ => return Err(Error::MissingInput),
        }

        self.theme_root = normalize_theme_root(&self.theme_root);
        if self.theme_root.is_empty() {
            return Err(Error::InvalidThemeRoot);
        }

        Ok(())
    }

    /// Input patterns
    pub fn input_patterns(&self) -> Vec<String> {
        self.input
            .as_ref()
            .map(InputConfig::patterns)
            .unwrap_or_default()
    }

    /// Absolute theme directory
    pub fn theme_root_dir(&self) -> PathBuf {
        self.root.join(&self.theme_root)
    }

    /// Absolute manifest path
    pub fn manifest_path(&self) -> PathBuf {
        self.theme_root_dir().join(&self.build.manifest)
    }

    /// Absolute entrypoints directory
    pub fn entrypoints_root(&self) -> PathBuf {
        self.root.join(&self.entrypoints_dir)
    }

    /// Origin of the development server
    ///
    /// Only `dev` needs it, so it is validated here rather than at load time.
    pub fn origin(&self) -> Result<ServerOrigin> {
        ServerOrigin::new(self.server.https, self.server.host.clone(), self.server.port)
    }
}
