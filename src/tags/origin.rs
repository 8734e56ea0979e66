//! URL policies for the two render modes

use std::fmt;

use url::Url;

use crate::error::{Error, Result};

/// Scheme, host and port of the live development server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerOrigin {
    https: bool,
    host: String,
    port: u16,
}

impl ServerOrigin {
    /// Build an origin, rejecting host names that cannot appear in a URL
    pub fn new(https: bool, host: impl Into<String>, port: u16) -> Result<Self> {
        let origin = Self {
            https,
            host: host.into(),
            port,
        };

        // Only validated here; the origin is always emitted verbatim.
        let text = origin.to_string();
        Url::parse(&text).map_err(|source| Error::InvalidOrigin {
            origin: text.clone(),
            source,
        })?;

        Ok(origin)
    }

    pub fn scheme(&self) -> &'static str {
        if self.https {
            "https"
        } else {
            "http"
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// `origin/path`, with exactly one slash between the two
    pub fn join(&self, path: &str) -> String {
        format!("{}/{}", self, path.trim_start_matches('/'))
    }
}

impl fmt::Display for ServerOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}:{}", self.scheme(), self.host, self.port)
    }
}

/// How an asset path becomes a URL in rendered markup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlStrategy {
    /// Liquid `asset_url` filter, resolved by the theme host at request time
    Cdn,
    /// Absolute URL on the live development server
    DevServer(ServerOrigin),
}

impl UrlStrategy {
    /// Resolve `path` under this strategy
    pub fn asset_url(&self, path: &str) -> String {
        match self {
            UrlStrategy::Cdn => format!("{{{{ '{}' | asset_url }}}}", path),
            UrlStrategy::DevServer(origin) => origin.join(path),
        }
    }

    /// Whether script and preload tags carry `crossorigin="anonymous"`
    pub fn crossorigin(&self) -> bool {
        matches!(self, UrlStrategy::Cdn)
    }
}
