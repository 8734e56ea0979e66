//! Build command implementation

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use tracing::info;

use crate::config::Config;
use crate::resolver::ProductionResolver;
use crate::snippet::{FsSnippetWriter, SnippetWriter, CLIENT_SNIPPET_FILE, TAG_SNIPPET_FILE};
use crate::utils::format_duration;

/// Render tag snippets from the production manifest
#[derive(Args, Debug)]
pub struct BuildCommand {
    /// Manifest path (defaults to <theme_root>/assets/manifest.json)
    #[arg(short, long)]
    pub manifest: Option<PathBuf>,

    /// Override the bundler's CSS code splitting setting
    #[arg(long)]
    pub css_code_split: Option<bool>,
}

impl BuildCommand {
    pub async fn execute(&self, config_path: &str) -> Result<()> {
        let start = Instant::now();

        info!("Loading configuration from {}", config_path);
        let config = Config::load(config_path)?;
        let options = BuildOptions::resolve(self, &config);

        eprintln!(
            "{} Rendering snippets from {}",
            "→".blue(),
            options.manifest.display().to_string().cyan()
        );

        let snippet = ProductionResolver::new(options.css_code_split)
            .render_file(&options.manifest)
            .with_context(|| format!("Failed to render {}", options.manifest.display()))?;

        let mut writer = FsSnippetWriter::new(&config.theme_root_dir());
        writer.write(TAG_SNIPPET_FILE, &snippet.to_string())?;
        writer.write(CLIENT_SNIPPET_FILE, "")?;

        eprintln!(
            "\n{} Rendered {} entr{} in {}\n",
            "✓".green().bold(),
            snippet.len(),
            if snippet.len() == 1 { "y" } else { "ies" },
            format_duration(start.elapsed())
        );

        for key in snippet.keys() {
            eprintln!("  {} {}", "•".dimmed(), key.cyan());
        }

        eprintln!(
            "\n  {} {}\n",
            "→".dimmed(),
            writer.dir().join(TAG_SNIPPET_FILE).display().to_string().dimmed()
        );

        Ok(())
    }
}

/// Build options resolved from config and command arguments
#[derive(Debug, Clone)]
pub struct BuildOptions {
    pub manifest: PathBuf,
    pub css_code_split: bool,
}

impl BuildOptions {
    fn resolve(cmd: &BuildCommand, config: &Config) -> Self {
        Self {
            manifest: cmd
                .manifest
                .clone()
                .unwrap_or_else(|| config.manifest_path()),
            css_code_split: cmd.css_code_split.unwrap_or(config.build.css_code_split),
        }
    }
}
