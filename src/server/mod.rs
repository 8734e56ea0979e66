//! Development session
//!
//! Owns the entrypoint registry, the snippet writer and the dev server origin
//! for the lifetime of `vite-liquid dev`. Watch events are applied one at a
//! time; each re-render is written before the next event is taken.

mod watcher;

use std::future::Future;

use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::error::Result;
use crate::registry::{Change, EntrypointRegistry, Transition, WatchEvent};
use crate::snippet::{SnippetWriter, CLIENT_SNIPPET_FILE, TAG_SNIPPET_FILE};
use crate::tags::{client_snippet, ServerOrigin, TagRenderer};

pub use watcher::{classify, EntrypointWatcher};

/// Dev-mode render pipeline
pub struct DevSession<W> {
    registry: EntrypointRegistry,
    origin: ServerOrigin,
    renderer: TagRenderer,
    writer: W,
}

impl<W: SnippetWriter> DevSession<W> {
    /// Create a session over a seeded registry
    pub fn new(registry: EntrypointRegistry, origin: ServerOrigin, writer: W) -> Self {
        Self {
            registry,
            renderer: TagRenderer::dev_server(origin.clone()),
            origin,
            writer,
        }
    }

    /// Write the client snippet and the initial tag snippet
    pub fn start(&mut self) -> Result<()> {
        self.writer
            .write(CLIENT_SNIPPET_FILE, &client_snippet(&self.origin))?;
        self.write_tags()?;

        info!(
            "Tracking {} entrypoint(s) from {}",
            self.registry.len(),
            self.registry.root().display()
        );
        Ok(())
    }

    /// Apply one event, rewriting the tag snippet when it asks for it
    pub fn handle(mut self, event: WatchEvent) -> Result<Self> {
        debug!("Watch event: {:?}", event);

        let Transition { registry, change } = self.registry.apply(event);
        self.registry = registry;

        if change == Change::Rerender {
            self.write_tags()?;
        }

        Ok(self)
    }

    /// Process events until the channel closes or `shutdown` resolves
    pub async fn run<F>(
        mut self,
        mut events: mpsc::UnboundedReceiver<WatchEvent>,
        shutdown: F,
    ) -> Result<Self>
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    debug!("Shutting down dev session");
                    break;
                }
                event = events.recv() => match event {
                    Some(event) => self = self.handle(event)?,
                    None => break,
                },
            }
        }

        Ok(self)
    }

    pub fn registry(&self) -> &EntrypointRegistry {
        &self.registry
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    fn write_tags(&mut self) -> Result<()> {
        let snippet = self.registry.render(&self.renderer);
        self.writer.write(TAG_SNIPPET_FILE, &snippet.to_string())
    }
}
