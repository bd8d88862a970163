use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use swipedeck_core::AppConfig;

mod commands;

#[derive(Parser)]
#[command(name = "swipedeck")]
#[command(author, version, about = "A terminal vertical card carousel")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Deck file to load (overrides the configured deck)
    #[arg(short = 'd', long = "deck")]
    deck_path: Option<PathBuf>,

    /// Disable looping at the deck boundaries
    #[arg(long = "no-loop")]
    no_loop: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the TUI
    Run,
    /// Print the effective configuration
    Config {
        /// Write the default configuration file if it does not exist
        #[arg(long)]
        write: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();

    // Load configuration, then apply command-line overrides
    let mut config = AppConfig::load()?;
    if let Some(path) = cli.deck_path {
        config.general.deck_path = Some(path);
    }
    if cli.no_loop {
        config.carousel.looping = false;
    }
    let config = Arc::new(config);

    match cli.command {
        Some(Commands::Run) | None => commands::run::run(config).await,
        Some(Commands::Config { write }) => commands::config::run(&config, write),
    }
}
