//! clipstitch CLI
//!
//! Mark clip ranges on a media file and stitch them losslessly into one
//! output.
//!
//! # Usage
//!
//! ```bash
//! clipstitch cut --input talk.mp4 --clip 2-5 --clip 7-9 --output best.mp4
//! clipstitch thumbs --input talk.mp4 --out-dir strip/
//! clipstitch probe --input talk.mp4 --json
//! ```

use anyhow::Result;
use clap::Parser;

use clipstitch::cli::{commands, Cli, Commands};
use clipstitch::config::AppConfig;

/// Main entry point for the clipstitch CLI
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Parse command line arguments
    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref())?;

    // Execute the requested command
    match cli.command {
        Commands::Cut(args) => commands::cut(args, &config).await,
        Commands::Thumbs(args) => commands::thumbs(args, &config).await,
        Commands::Probe(args) => commands::probe(args, &config).await,
    }
}
