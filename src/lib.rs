//! vite-liquid library
//!
//! Turns a Vite build manifest, or a live set of entrypoint files during
//! development, into Liquid theme snippets that emit the right script,
//! modulepreload and stylesheet tags for a named entry.

pub mod cli;
pub mod config;
pub mod discovery;
pub mod error;
pub mod manifest;
pub mod registry;
pub mod resolver;
pub mod server;
pub mod snippet;
pub mod tags;
pub mod utils;

pub use cli::Cli;
pub use config::Config;
pub use error::{Error, Result};
pub use manifest::{Chunk, ManifestGraph};
pub use registry::EntrypointRegistry;
pub use resolver::ProductionResolver;
pub use tags::{Snippet, TagRenderer};
