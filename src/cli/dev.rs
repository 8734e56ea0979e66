//! Development command implementation

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use tracing::info;

use crate::config::Config;
use crate::discovery::discover_entrypoints;
use crate::registry::EntrypointRegistry;
use crate::server::{DevSession, EntrypointWatcher};
use crate::snippet::FsSnippetWriter;
use crate::tags::ServerOrigin;

/// Track entrypoints and render tag snippets for the dev server
#[derive(Args, Debug)]
pub struct DevCommand {
    /// Port the dev server listens on
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Host the dev server is reachable at
    #[arg(long)]
    pub host: Option<String>,

    /// Whether the dev server uses https, overriding the config
    #[arg(long)]
    pub https: Option<bool>,
}

impl DevCommand {
    pub async fn execute(&self, config_path: &str) -> Result<()> {
        info!("Loading configuration from {}", config_path);
        let config = Config::load(config_path)?;
        let options = DevServerOptions::resolve(self, &config);
        let origin = ServerOrigin::new(options.https, options.host.clone(), options.port)?;

        let root = config.entrypoints_root();
        let inputs = discover_entrypoints(&config.root, &config.input_patterns())?;
        let registry = EntrypointRegistry::seeded(root.clone(), inputs);

        eprintln!(
            "{} Rendering dev snippets for {}\n",
            "→".blue(),
            origin.to_string().cyan().underline()
        );
        eprintln!(
            "  {} Watching {}",
            "•".dimmed(),
            root.display().to_string().dimmed()
        );
        eprintln!("  {} Press {} to stop\n", "•".dimmed(), "Ctrl+C".yellow());

        let mut session = DevSession::new(
            registry,
            origin,
            FsSnippetWriter::new(&config.theme_root_dir()),
        );
        session.start()?;

        let (_watcher, events) = EntrypointWatcher::start(&root)?;
        let shutdown = async {
            let _ = tokio::signal::ctrl_c().await;
        };

        let session = session.run(events, shutdown).await?;
        info!(
            "Stopped with {} tracked entrypoint(s)",
            session.registry().len()
        );

        Ok(())
    }
}

/// Dev server options resolved from config and command arguments
#[derive(Debug, Clone)]
pub struct DevServerOptions {
    pub host: String,
    pub port: u16,
    pub https: bool,
}

impl DevServerOptions {
    fn resolve(cmd: &DevCommand, config: &Config) -> Self {
        Self {
            host: cmd.host.clone().unwrap_or_else(|| config.server.host.clone()),
            port: cmd.port.unwrap_or(config.server.port),
            https: cmd.https.unwrap_or(config.server.https),
        }
    }
}
