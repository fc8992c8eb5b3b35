//! CLI module for SwingFrames
//!
//! This module handles command-line argument parsing and command execution.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub mod args;
pub mod commands;

pub use args::{FullClipArgs, PhasesArgs, UrlArgs};

/// SwingFrames phase extractor
///
/// Turns the phases of an analysed golf swing video into looping GIFs or
/// still frames that clients can fetch by phase name.
#[derive(Parser, Debug)]
#[command(name = "swingframes")]
#[command(about = "Extract per-phase GIFs and stills from golf swing videos")]
#[command(version)]
pub struct Cli {
    /// Configuration file (default: swingframes.toml or config/swingframes.toml)
    #[arg(long, global = true, env = "SWINGFRAMES_CONFIG")]
    pub config: Option<PathBuf>,

    /// Logging level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Logging format (pretty, compact, json)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Root directory that returned frame paths are relative to
    #[arg(long, global = true)]
    pub media_root: Option<PathBuf>,

    /// Transcoder binary
    #[arg(long, global = true)]
    pub ffmpeg: Option<PathBuf>,

    /// Per-invocation transcoder timeout in seconds, 0 disables it
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    /// The command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract one GIF (or still) per swing phase and print the results as JSON
    Phases(PhasesArgs),
    /// Encode the whole video as one GIF and print its relative path
    FullClip(FullClipArgs),
    /// Print the public URL a phase output is served at
    Url(UrlArgs),
}
