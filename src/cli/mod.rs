//! CLI module for clipstitch
//!
//! This module handles command-line argument parsing and command execution.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub mod args;
pub mod commands;

/// clipstitch - clip-based media trimming and lossless concatenation
#[derive(Parser)]
#[command(name = "clipstitch")]
#[command(about = "Mark clip ranges on a media file and stitch them into one output")]
#[command(version)]
#[command(long_about = None)]
pub struct Cli {
    /// Optional TOML configuration file
    #[arg(long, global = true, env = "CLIPSTITCH_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// The command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Extract clip ranges and concatenate them into a single file
    Cut(args::CutArgs),
    /// Sample a thumbnail strip across the asset
    Thumbs(args::ThumbsArgs),
    /// Report the asset's duration and playability
    Probe(args::ProbeArgs),
}
