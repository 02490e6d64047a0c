//! daily-news CLI - builds the daily news website from dated Markdown reports.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod config;

use config::{load_config, Overrides};

#[derive(Parser)]
#[command(name = "daily-news")]
#[command(about = "Build the daily news website from dated Markdown reports")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to daily-news.toml config file
    #[arg(short, long, default_value = "daily-news.toml", global = true)]
    config: PathBuf,

    /// Directory of dated Markdown reports
    #[arg(short, long, env = "DAILY_NEWS_INPUT", global = true)]
    input: Option<PathBuf>,

    /// Output directory (replaced on every build)
    #[arg(short, long, env = "DAILY_NEWS_OUTPUT", global = true)]
    output: Option<PathBuf>,

    /// Abort on malformed or duplicate report names instead of skipping them
    #[arg(long, global = true)]
    strict: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the site (default)
    Build {
        /// Skip stylesheet minification
        #[arg(long)]
        no_minify: bool,
    },

    /// Parse and render every report without writing the site
    Check,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    fmt().with_env_filter(filter).with_target(false).init();

    let command = cli.command.unwrap_or(Commands::Build { no_minify: false });

    let overrides = Overrides {
        input: cli.input,
        output: cli.output,
        minify: match command {
            Commands::Build { no_minify: true } => Some(false),
            _ => None,
        },
        strict: cli.strict.then_some(true),
    };

    let config = load_config(&cli.config)?.resolve(overrides);

    // Execute command
    match command {
        Commands::Build { .. } => commands::build::run(config)?,
        Commands::Check => commands::check::run(config)?,
    }

    Ok(())
}
