//! Command implementations

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::app::{AppContainer, DefaultAppContainer};
use crate::cli::args::{FullClipArgs, PhasesArgs, UrlArgs};
use crate::cli::Commands;
use crate::domain::model::{AnalysisDocument, SwingPhase};
use crate::error::{SwingFramesError, SwingFramesResult};

/// Dispatch a parsed command
pub async fn execute(container: &DefaultAppContainer, command: Commands) -> Result<()> {
    match command {
        Commands::Phases(args) => phases(container, args).await,
        Commands::FullClip(args) => full_clip(container, args).await,
        Commands::Url(args) => url(container, args),
    }
}

/// Execute the phases command
pub async fn phases(container: &DefaultAppContainer, args: PhasesArgs) -> Result<()> {
    info!("Starting phase extraction");
    info!("Video: {}", args.video.display());
    info!("Analysis: {}", args.analysis_id);

    ensure_video_exists(&args.video)?;
    let swing_phases = load_phases(&args).context("Failed to read swing phases")?;

    let interactor = container.extract_interactor();
    let extractions = if args.stills {
        interactor
            .extract_phase_stills(&args.video, &args.analysis_id, &swing_phases)
            .await
    } else {
        interactor
            .extract_phase_frames(&args.video, &args.analysis_id, &swing_phases)
            .await
    }
    .context("Phase extraction failed")?;

    let json = serde_json::to_string_pretty(&extractions)
        .context("Failed to serialize extraction results to JSON")?;
    println!("{}", json);

    info!("Phase extraction completed");
    Ok(())
}

/// Execute the full-clip command
pub async fn full_clip(container: &DefaultAppContainer, args: FullClipArgs) -> Result<()> {
    info!("Starting full swing extraction");
    info!("Video: {}", args.video.display());

    ensure_video_exists(&args.video)?;

    let frame_path = container
        .extract_interactor()
        .extract_full_clip(&args.video, &args.analysis_id)
        .await
        .context("Full swing extraction failed")?;

    println!("{}", frame_path);
    Ok(())
}

/// Execute the url command
pub fn url(container: &DefaultAppContainer, args: UrlArgs) -> Result<()> {
    let interactor = container.extract_interactor();
    let url = if args.still {
        interactor.url_for_phase_still(&args.analysis_id, &args.phase)
    } else {
        interactor.url_for_phase(&args.analysis_id, &args.phase)
    };

    println!("{}", url);
    Ok(())
}

fn ensure_video_exists(video: &Path) -> Result<()> {
    if !video.is_file() {
        return Err(anyhow::anyhow!("Input video does not exist: {}", video.display()));
    }
    Ok(())
}

/// Phases from `--phases-file` or repeated `--phase NAME=TIMESTAMP`
fn load_phases(args: &PhasesArgs) -> SwingFramesResult<Vec<SwingPhase>> {
    if let Some(path) = &args.phases_file {
        let content = std::fs::read_to_string(path)?;
        let document = AnalysisDocument::from_json(&content)?;
        return Ok(document.swing_phases);
    }

    if args.phase.is_empty() {
        return Err(SwingFramesError::NoPhases);
    }

    args.phase.iter().map(String::as_str).map(parse_phase_arg).collect()
}

/// Split at the first `=`; the timestamp keeps any later `=` verbatim
fn parse_phase_arg(arg: &str) -> SwingFramesResult<SwingPhase> {
    let (name, timestamp) = arg
        .split_once('=')
        .ok_or_else(|| SwingFramesError::InvalidPhaseArg { arg: arg.to_string() })?;

    SwingPhase::new(name.trim(), timestamp.trim())
        .map_err(|_| SwingFramesError::InvalidPhaseArg { arg: arg.to_string() })
}
