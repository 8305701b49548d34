//! chapsplit CLI
//!
//! Cuts a downloaded video and its SubRip subtitle track into one file pair
//! per chapter, numbered in chapter order.
//!
//! # Usage
//!
//! ```bash
//! chapsplit inspect --info "Talk.info.json"
//! chapsplit split --info "Talk.info.json" --language en
//! chapsplit split --video talk.mp4 --subtitles talk.srt --chapter 0-20=Intro --chapter 20-95=Main
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use chapsplit_cli::app::DefaultAppContainer;
use chapsplit_cli::cli::{commands, Cli, Commands, LogFormat};
use chapsplit_cli::config_initialization::initialize_configuration_hierarchy;

/// Main entry point for the chapsplit CLI application
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    let config = initialize_configuration_hierarchy(&cli)?;
    init_logging(&config.log_level, cli.log_format);

    info!("Starting chapsplit");

    let container =
        DefaultAppContainer::new(&config).context("Failed to initialize application")?;

    // Execute the requested command
    match cli.command {
        Commands::Split(args) => {
            info!("Executing split command");
            commands::split(args, &config, &container).await?;
        }
        Commands::Inspect(args) => {
            info!("Executing inspect command");
            commands::inspect(args, &config, &container).await?;
        }
    }

    info!("chapsplit completed successfully");
    Ok(())
}

/// `RUST_LOG` wins over the configured level
fn init_logging(level: &str, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}
