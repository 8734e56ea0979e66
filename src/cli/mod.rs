//! Command-line interface for vite-liquid
//!
//! Provides the main CLI structure using clap with subcommands for:
//! - `build`: Render snippets from a finished build's manifest
//! - `dev`: Keep snippets in sync with a live dev server

mod build;
mod dev;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;

use crate::config::CONFIG_FILE;

pub use build::{BuildCommand, BuildOptions};
pub use dev::{DevCommand, DevServerOptions};

/// Render Liquid snippets that load Vite entrypoints
#[derive(Parser, Debug)]
#[command(name = "vite-liquid")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to the vite-liquid.toml config file
    #[arg(short, long, global = true, default_value = CONFIG_FILE)]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render tag snippets from the production manifest
    Build(BuildCommand),

    /// Track entrypoints and render tag snippets for the dev server
    Dev(DevCommand),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<()> {
        print_banner();

        match &self.command {
            Commands::Build(cmd) => cmd.execute(&self.config).await,
            Commands::Dev(cmd) => cmd.execute(&self.config).await,
        }
    }
}

/// Print the vite-liquid banner
fn print_banner() {
    eprintln!(
        "\n{} {}\n",
        "vite-liquid".bold().cyan(),
        format!("v{}", env!("CARGO_PKG_VERSION")).dimmed()
    );
}
