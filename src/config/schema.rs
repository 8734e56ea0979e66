//! Configuration schema definitions

use serde::{Deserialize, Serialize};

/// Entry input: one pattern or a list of patterns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InputConfig {
    One(String),
    Many(Vec<String>),
}

impl InputConfig {
    /// All patterns, in declaration order
    pub fn patterns(&self) -> Vec<String> {
        match self {
            InputConfig::One(pattern) => vec![pattern.clone()],
            InputConfig::Many(patterns) => patterns.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            InputConfig::One(pattern) => pattern.trim().is_empty(),
            InputConfig::Many(patterns) => patterns.is_empty(),
        }
    }
}

/// Production build settings mirrored from the bundler
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Whether the bundler emits one stylesheet per entry
    #[serde(default = "default_true")]
    pub css_code_split: bool,

    /// Manifest location, relative to the theme root
    #[serde(default = "default_manifest")]
    pub manifest: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            css_code_split: true,
            manifest: default_manifest(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_manifest() -> String {
    "assets/manifest.json".to_string()
}

/// Development server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Serve over https
    #[serde(default)]
    pub https: bool,

    /// Host the dev server is reachable at
    #[serde(default = "default_host")]
    pub host: String,

    /// Port the dev server listens on
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            https: false,
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    5173
}
