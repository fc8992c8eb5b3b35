//! Single-job transcoder driver with motion-highlight to standard fallback

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::domain::errors::DomainError;
use crate::domain::model::{ClipSpan, ExtractionJob, FilterVariant, OutputKind, TimeRange};
use crate::engine::filter_graph::{FilterGraph, FilterGraphBuilder};
use crate::engine::GifSettings;
use crate::ports::{FsPort, TranscodePort, TranscodeRequest};
use crate::utils::path::PathUtils;
use crate::utils::Utils;

/// What a successful job actually did
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JobOutcome {
    /// Filter pipeline the output was encoded with; `None` for stills
    pub filter: Option<FilterVariant>,
    /// The motion-highlight attempt failed and the standard graph was used
    pub fell_back: bool,
}

/// Runs one [`ExtractionJob`] against the transcoder.
///
/// GIF jobs with `track_motion` try the motion-highlight graph first and retry
/// once with the standard graph. Every other failure is terminal.
///
/// The transcoder writes to a staging sibling of the output that is renamed
/// into place only on success, so a failed job never touches a file an
/// earlier job produced.
pub struct FrameJobRunner {
    transcoder: Arc<dyn TranscodePort>,
    fs_port: Arc<dyn FsPort>,
    settings: GifSettings,
    paths: PathUtils,
}

impl FrameJobRunner {
    /// Create new runner with injected ports
    pub fn new(
        transcoder: Arc<dyn TranscodePort>,
        fs_port: Arc<dyn FsPort>,
        settings: GifSettings,
    ) -> Self {
        Self {
            transcoder,
            fs_port,
            settings,
            paths: PathUtils::new(),
        }
    }

    /// Run a job to a terminal state
    pub async fn run(&self, job: &ExtractionJob) -> Result<JobOutcome, DomainError> {
        let started = Instant::now();
        let source = self.paths.to_absolute(&job.source)?;
        let staging = Self::staging_path(&job.output);

        let result = match job.kind {
            OutputKind::Gif => self.run_gif(job, &source, &staging).await,
            OutputKind::Still => self.run_still(job, &source, &staging).await,
        };
        let result = match result {
            Ok(outcome) => self
                .fs_port
                .rename_file(&staging, &job.output)
                .await
                .map(|()| outcome),
            Err(e) => Err(e),
        };

        match result {
            Ok(outcome) => {
                let size = self.fs_port.file_size(&job.output).await.unwrap_or(0);
                info!(
                    phase = %job.phase_name,
                    output = %job.output.display(),
                    size = %Utils::format_file_size(size),
                    elapsed = %Utils::format_duration(started.elapsed()),
                    "Extraction job succeeded"
                );
                Ok(outcome)
            }
            Err(e) => {
                if self.settings.cleanup_failed_outputs {
                    self.remove_partial_output(&staging).await;
                }
                Err(e)
            }
        }
    }

    async fn run_gif(
        &self,
        job: &ExtractionJob,
        source: &Path,
        staging: &Path,
    ) -> Result<JobOutcome, DomainError> {
        let primary = FilterGraphBuilder::build(&self.settings.intent(job.track_motion));
        let first_attempt = self
            .transcoder
            .transcode(&Self::gif_request(job, source, staging, &primary))
            .await;

        match first_attempt {
            Ok(()) => Ok(JobOutcome {
                filter: Some(primary.variant()),
                fell_back: false,
            }),
            Err(e) if job.track_motion => {
                warn!(
                    phase = %job.phase_name,
                    error = %e,
                    "Motion-highlight encode failed, retrying with standard filter graph"
                );
                let standard = FilterGraphBuilder::build(&self.settings.intent(false));
                self.transcoder
                    .transcode(&Self::gif_request(job, source, staging, &standard))
                    .await?;
                Ok(JobOutcome {
                    filter: Some(standard.variant()),
                    fell_back: true,
                })
            }
            Err(e) => Err(e),
        }
    }

    async fn run_still(
        &self,
        job: &ExtractionJob,
        source: &Path,
        staging: &Path,
    ) -> Result<JobOutcome, DomainError> {
        let seek = match job.span {
            ClipSpan::Range(range) => Some(range.midpoint()),
            ClipSpan::Point(t) => Some(t),
            ClipSpan::Whole => None,
        };

        let request = TranscodeRequest {
            input: source.to_path_buf(),
            seek,
            duration: None,
            filter_graph: None,
            frame_limit: Some(1),
            loop_forever: false,
            output: staging.to_path_buf(),
        };
        self.transcoder.transcode(&request).await?;

        Ok(JobOutcome {
            filter: None,
            fell_back: false,
        })
    }

    fn gif_request(
        job: &ExtractionJob,
        source: &Path,
        staging: &Path,
        graph: &FilterGraph,
    ) -> TranscodeRequest {
        let (seek, duration) = match job.span {
            ClipSpan::Range(range) => (Some(range.start()), Some(range.duration())),
            ClipSpan::Point(t) => (Some(t), Some(TimeRange::MIN_WIDTH)),
            ClipSpan::Whole => (None, None),
        };

        debug!(
            phase = %job.phase_name,
            variant = %graph.variant(),
            ?seek,
            ?duration,
            "Building GIF transcode request"
        );

        TranscodeRequest {
            input: source.to_path_buf(),
            seek,
            duration,
            filter_graph: Some(graph.render()),
            frame_limit: None,
            loop_forever: true,
            output: staging.to_path_buf(),
        }
    }

    /// `impact.gif` stages as `impact.part.gif`; the extension stays last so
    /// the transcoder still picks its muxer from it
    pub fn staging_path(output: &Path) -> PathBuf {
        let stem = output
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        let name = match output.extension() {
            Some(ext) => format!("{}.part.{}", stem, ext.to_string_lossy()),
            None => format!("{}.part", stem),
        };
        output.with_file_name(name)
    }

    /// The transcoder may leave zero-byte or truncated staging files behind
    async fn remove_partial_output(&self, output: &Path) {
        match self.fs_port.file_exists(output).await {
            Ok(true) => {
                if let Err(e) = self.fs_port.delete_file(output).await {
                    warn!(output = %output.display(), error = %e, "Failed to remove partial output");
                } else {
                    debug!(output = %output.display(), "Removed partial output");
                }
            }
            Ok(false) => {}
            Err(e) => warn!(output = %output.display(), error = %e, "Failed to check partial output"),
        }
    }
}
