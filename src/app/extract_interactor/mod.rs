// Extract interactor - Orchestrates per-phase extraction for one analysis

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules;
use crate::engine::FrameJobRunner;
use crate::ports::*;
use crate::utils::path::PathUtils;
use crate::utils::time::TimestampParser;

/// Where outputs land on disk and how clients retrieve them
#[derive(Debug, Clone, PartialEq)]
pub struct MediaLayout {
    /// Root that every returned `framePath` is relative to
    pub media_root: PathBuf,
    /// Subdirectory of the media root holding per-analysis directories
    pub frames_dir: String,
    /// Public URL prefix serving the frames directory
    pub url_prefix: String,
}

impl Default for MediaLayout {
    fn default() -> Self {
        Self {
            media_root: PathBuf::from("uploads"),
            frames_dir: "frames".to_string(),
            url_prefix: "/api/frames".to_string(),
        }
    }
}

impl MediaLayout {
    /// Per-analysis output directory: `<media_root>/<frames_dir>/<analysis_id>`
    pub fn analysis_dir(&self, analysis_id: &str) -> PathBuf {
        self.media_root.join(&self.frames_dir).join(analysis_id)
    }
}

/// Interactor for phase extraction use cases.
///
/// Phases run strictly one after another. A failed phase is reported as an
/// [`ExtractionEvent`] and skipped; only failing to prepare the output
/// directory aborts a call.
pub struct ExtractInteractor {
    runner: FrameJobRunner,
    fs_port: Arc<dyn FsPort>,
    log_port: Arc<dyn LogPort>,
    layout: MediaLayout,
    parser: TimestampParser,
    paths: PathUtils,
}

impl ExtractInteractor {
    /// Create new extract interactor with injected ports
    pub fn new(
        runner: FrameJobRunner,
        fs_port: Arc<dyn FsPort>,
        log_port: Arc<dyn LogPort>,
        layout: MediaLayout,
    ) -> Self {
        Self {
            runner,
            fs_port,
            log_port,
            layout,
            parser: TimestampParser::new(),
            paths: PathUtils::new(),
        }
    }

    /// Extract one looping GIF per phase
    pub async fn extract_phase_frames(
        &self,
        video_path: &Path,
        analysis_id: &str,
        phases: &[SwingPhase],
    ) -> Result<Vec<FrameExtraction>, DomainError> {
        self.extract_phases(video_path, analysis_id, phases, OutputKind::Gif)
            .await
    }

    /// Extract one still JPEG per phase
    pub async fn extract_phase_stills(
        &self,
        video_path: &Path,
        analysis_id: &str,
        phases: &[SwingPhase],
    ) -> Result<Vec<FrameExtraction>, DomainError> {
        self.extract_phases(video_path, analysis_id, phases, OutputKind::Still)
            .await
    }

    /// Encode the whole source as one GIF and return its media-root-relative path
    pub async fn extract_full_clip(
        &self,
        video_path: &Path,
        analysis_id: &str,
    ) -> Result<String, DomainError> {
        let dir = self.prepare_directory(analysis_id).await?;
        let output = dir.join(rules::output_file_name(rules::FULL_CLIP_NAME, OutputKind::Gif));
        let job = ExtractionJob::full_clip(video_path, output);

        self.log_port
            .info(&format!(
                "Creating full swing GIF for analysis {} from {}",
                analysis_id,
                video_path.display()
            ))
            .await;

        let state = JobState::Pending.start();
        match self.runner.run(&job).await {
            Ok(outcome) => {
                let relative = self.paths.relative_to(&self.layout.media_root, &job.output);
                let event = ExtractionEvent::new(analysis_id, &job.phase_name, job.kind, state.finish(true))
                    .with_filter(outcome.filter)
                    .with_output(relative.clone());
                self.log_port.log_event(&event).await;
                Ok(relative)
            }
            Err(e) => {
                let event = ExtractionEvent::new(analysis_id, &job.phase_name, job.kind, state.finish(false))
                    .with_error(&e);
                self.log_port.log_event(&event).await;
                Err(e)
            }
        }
    }

    /// Public URL of a phase GIF, derived with the same naming rule as extraction
    pub fn url_for_phase(&self, analysis_id: &str, phase_name: &str) -> String {
        rules::public_url(&self.layout.url_prefix, analysis_id, phase_name, OutputKind::Gif)
    }

    /// Public URL of a phase still
    pub fn url_for_phase_still(&self, analysis_id: &str, phase_name: &str) -> String {
        rules::public_url(&self.layout.url_prefix, analysis_id, phase_name, OutputKind::Still)
    }

    async fn extract_phases(
        &self,
        video_path: &Path,
        analysis_id: &str,
        phases: &[SwingPhase],
        kind: OutputKind,
    ) -> Result<Vec<FrameExtraction>, DomainError> {
        let dir = self.prepare_directory(analysis_id).await?;

        self.log_port
            .info(&format!(
                "Extracting {} {} outputs for analysis {}",
                phases.len(),
                kind.extension(),
                analysis_id
            ))
            .await;

        let mut extractions = Vec::with_capacity(phases.len());
        for phase in phases {
            let state = JobState::Pending;

            if phase.name.trim().is_empty() {
                let error = DomainError::BadArgs("Phase name cannot be empty".to_string());
                let event = ExtractionEvent::new(analysis_id, &phase.name, kind, state.start().finish(false))
                    .with_error(&error);
                self.log_port.log_event(&event).await;
                continue;
            }

            let job = self.build_job(video_path, &dir, phase, kind);
            self.log_port
                .debug(&format!(
                    "Extracting {} for phase '{}' from timestamp '{}'",
                    kind.extension(),
                    phase.name,
                    phase.timestamp
                ))
                .await;

            let state = state.start();
            match self.runner.run(&job).await {
                Ok(outcome) => {
                    let frame_path = self.paths.relative_to(&self.layout.media_root, &job.output);
                    let event = ExtractionEvent::new(analysis_id, &phase.name, kind, state.finish(true))
                        .with_filter(outcome.filter)
                        .with_output(frame_path.clone());
                    self.log_port.log_event(&event).await;

                    extractions.push(FrameExtraction {
                        timestamp: phase.timestamp.clone(),
                        frame_path,
                    });
                }
                Err(e) => {
                    let event = ExtractionEvent::new(analysis_id, &phase.name, kind, state.finish(false))
                        .with_error(&e);
                    self.log_port.log_event(&event).await;
                }
            }
        }

        let message = format!(
            "Extracted {} of {} phases for analysis {}",
            extractions.len(),
            phases.len(),
            analysis_id
        );
        if extractions.len() < phases.len() {
            self.log_port.warn(&message).await;
        } else {
            self.log_port.info(&message).await;
        }

        Ok(extractions)
    }

    fn build_job(&self, video_path: &Path, dir: &Path, phase: &SwingPhase, kind: OutputKind) -> ExtractionJob {
        let output = dir.join(rules::output_file_name(&phase.name, kind));
        let parsed = self.parser.parse(&phase.timestamp);

        match kind {
            OutputKind::Gif => ExtractionJob::gif(&phase.name, video_path, parsed.to_range(), output),
            OutputKind::Still => ExtractionJob::still(&phase.name, video_path, parsed.seek_point(), output),
        }
    }

    /// Validate the id and create the per-analysis directory. Fatal on failure.
    async fn prepare_directory(&self, analysis_id: &str) -> Result<PathBuf, DomainError> {
        rules::validate_analysis_id(analysis_id)?;

        let dir = self.layout.analysis_dir(analysis_id);
        self.fs_port.create_directory(&dir).await?;
        Ok(dir)
    }
}
