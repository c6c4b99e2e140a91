//! Command-line argument definitions

use std::path::PathBuf;

use clap::Args;
use clap_num::number_range;

fn thumb_count(s: &str) -> Result<u32, String> {
    number_range(s, 1, 64)
}

/// Arguments for the cut command
#[derive(Args, Debug)]
pub struct CutArgs {
    /// Input media file path
    #[arg(short, long)]
    pub input: PathBuf,

    /// Clip range to extract; repeatable, processed in the order given
    #[arg(long = "clip", value_name = "START-END")]
    pub clip: Vec<String>,

    /// JSON file holding a clip list: [{"start": 2, "end": 5}, ...]
    #[arg(long, value_name = "FILE")]
    pub clips_file: Option<PathBuf>,

    /// Output file path for the stitched deliverable
    #[arg(short, long)]
    pub output: PathBuf,
}

/// Arguments for the thumbs command
#[derive(Args, Debug)]
pub struct ThumbsArgs {
    /// Input media file path
    #[arg(short, long)]
    pub input: PathBuf,

    /// Approximate number of thumbnails (1-64; default from config)
    #[arg(long, value_parser = thumb_count)]
    pub count: Option<u32>,

    /// Directory to write the sampled frames into
    #[arg(long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Print sample metadata as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the probe command
#[derive(Args, Debug)]
pub struct ProbeArgs {
    /// Input media file path
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}
