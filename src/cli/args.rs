//! Command-line argument definitions

use std::path::PathBuf;

use clap::Args;

/// Arguments for the phases command
#[derive(Args, Debug)]
pub struct PhasesArgs {
    /// Source video file path
    #[arg(short, long)]
    pub video: PathBuf,

    /// Analysis identifier naming the output directory
    #[arg(short, long)]
    pub analysis_id: String,

    /// Analysis JSON: a document with `swingPhases` or a bare phase array
    #[arg(long, conflicts_with = "phase")]
    pub phases_file: Option<PathBuf>,

    /// Inline phase as NAME=TIMESTAMP, repeatable
    #[arg(short, long)]
    pub phase: Vec<String>,

    /// Extract still JPEG frames instead of GIFs
    #[arg(long)]
    pub stills: bool,
}

/// Arguments for the full-clip command
#[derive(Args, Debug)]
pub struct FullClipArgs {
    /// Source video file path
    #[arg(short, long)]
    pub video: PathBuf,

    /// Analysis identifier naming the output directory
    #[arg(short, long)]
    pub analysis_id: String,
}

/// Arguments for the url command
#[derive(Args, Debug)]
pub struct UrlArgs {
    /// Analysis identifier
    #[arg(short, long)]
    pub analysis_id: String,

    /// Phase name as it appears in the analysis
    #[arg(short, long)]
    pub phase: String,

    /// URL of the still frame instead of the GIF
    #[arg(long)]
    pub still: bool,
}
