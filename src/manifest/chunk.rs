//! Chunk records as emitted in a Vite build manifest

use serde::{Deserialize, Serialize};

/// One unit of bundler output
///
/// Every field is optional in the manifest and absence carries meaning:
/// a chunk without `is_entry` is a shared dependency that can only be
/// reached through another chunk's `imports`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chunk {
    /// Source path relative to the bundler root (may be virtual)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,

    /// Emitted output path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,

    /// Present when the chunk is directly selectable by name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_entry: Option<bool>,

    /// Keys of chunks pulled in at load time, in manifest order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imports: Option<Vec<String>>,

    /// Stylesheets emitted for this chunk
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub css: Option<Vec<String>>,
}

impl Chunk {
    /// Create an addressable entry chunk
    pub fn entry(src: impl Into<String>, file: impl Into<String>) -> Self {
        Self {
            src: Some(src.into()),
            file: Some(file.into()),
            is_entry: Some(true),
            ..Self::default()
        }
    }

    /// Create a dependency-only chunk
    pub fn shared(file: impl Into<String>) -> Self {
        Self {
            file: Some(file.into()),
            ..Self::default()
        }
    }

    /// Set the chunk's imports
    pub fn with_imports<I, S>(mut self, imports: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.imports = Some(imports.into_iter().map(Into::into).collect());
        self
    }

    /// Set the chunk's stylesheets
    pub fn with_css<I, S>(mut self, css: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.css = Some(css.into_iter().map(Into::into).collect());
        self
    }

    /// True iff the manifest flags this chunk as an entry
    pub fn is_addressable(&self) -> bool {
        self.is_entry.is_some()
    }

    /// Stylesheets of this chunk, empty when the field is absent
    pub fn css_files(&self) -> &[String] {
        self.css.as_deref().unwrap_or_default()
    }

    /// Import keys of this chunk, empty when the field is absent
    pub fn import_keys(&self) -> &[String] {
        self.imports.as_deref().unwrap_or_default()
    }
}
