//! SwingFrames CLI
//!
//! Extracts per-phase GIFs and still frames from golf swing videos.
//!
//! # Usage
//!
//! ```bash
//! swingframes phases --video swing.mp4 --analysis-id a1 --phases-file analysis.json
//! swingframes phases --video swing.mp4 --analysis-id a1 --phase "Impact=00:01 - 00:02" --stills
//! swingframes full-clip --video swing.mp4 --analysis-id a1
//! swingframes url --analysis-id a1 --phase "Follow-Through"
//! ```

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};

use swing_frames::cli::{commands, Cli};
use swing_frames::config_initialization::initialize_configuration_hierarchy;
use swing_frames::utils::logging::LoggingSystem;
use swing_frames::{DefaultAppContainer, DomainError, SwingFramesError};

/// Main entry point for the SwingFrames CLI application
#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            if is_usage_error(&e) {
                ExitCode::from(2)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    let config = initialize_configuration_hierarchy(&cli).context("Failed to load configuration")?;
    LoggingSystem::new(config.logging()).initialize();

    info!("Starting SwingFrames {}", env!("CARGO_PKG_VERSION"));
    info!(
        "Media root: {}, transcoder: {}",
        config.media_root.display(),
        config.transcoder_path.display()
    );

    let container = DefaultAppContainer::new(&config);
    commands::execute(&container, cli.command).await
}

/// Bad input exits with 2, environment and transcoder failures with 1
fn is_usage_error(error: &anyhow::Error) -> bool {
    error.chain().any(|cause| {
        if let Some(e) = cause.downcast_ref::<SwingFramesError>() {
            e.is_usage_error()
        } else if let Some(e) = cause.downcast_ref::<DomainError>() {
            e.is_usage_error()
        } else {
            false
        }
    })
}
