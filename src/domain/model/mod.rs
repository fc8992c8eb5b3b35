// Domain models - Core types and data structures

use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;
use crate::domain::rules;

/// A named, timestamped segment of a swing as reported by the analysis provider.
///
/// `timestamp` is free text and is never validated here; see
/// [`crate::utils::time::TimestampParser`] for how it is interpreted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwingPhase {
    pub name: String,
    pub timestamp: String,
}

impl SwingPhase {
    /// Create a new phase, rejecting an empty name
    pub fn new(name: impl Into<String>, timestamp: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::BadArgs("Phase name cannot be empty".to_string()));
        }
        Ok(Self {
            name,
            timestamp: timestamp.into(),
        })
    }
}

/// Analysis provider output. Only the phase list matters here; every other
/// field of the document is ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AnalysisDocument {
    #[serde(rename = "swingPhases")]
    pub swing_phases: Vec<SwingPhase>,
}

impl AnalysisDocument {
    /// Parse either a full analysis document or a bare array of phases
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Shape {
            Document(AnalysisDocument),
            Phases(Vec<SwingPhase>),
        }

        Ok(match serde_json::from_str::<Shape>(json)? {
            Shape::Document(doc) => doc,
            Shape::Phases(swing_phases) => Self { swing_phases },
        })
    }
}

/// Half-open `[start, end)` interval in seconds with `end > start`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimeRange {
    start: f64,
    end: f64,
}

impl TimeRange {
    /// Width given to ranges that would otherwise have no duration
    pub const MIN_WIDTH: f64 = 1.0;

    /// Shortest span kept as written; anything below it is widened
    pub const MIN_DURATION: f64 = 0.001;

    /// Build a range, swapping reversed endpoints and widening a zero-length
    /// or sub-millisecond interval to [`Self::MIN_WIDTH`].
    pub fn new(start: f64, end: f64) -> Self {
        let (start, end) = if end < start { (end, start) } else { (start, end) };
        if end - start < Self::MIN_DURATION {
            Self::starting_at(start)
        } else {
            Self { start, end }
        }
    }

    /// Synthetic range for a single point: `[t, t + 1)`
    pub fn starting_at(start: f64) -> Self {
        Self {
            start,
            end: start + Self::MIN_WIDTH,
        }
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    pub fn midpoint(&self) -> f64 {
        (self.start + self.end) / 2.0
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}s - {:.3}s", self.start, self.end)
    }
}

/// Result of interpreting a raw timestamp string before range widening
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParsedTimestamp {
    Point(f64),
    Range { start: f64, end: f64 },
}

impl ParsedTimestamp {
    /// Range used for clip extraction
    pub fn to_range(&self) -> TimeRange {
        match *self {
            ParsedTimestamp::Point(t) => TimeRange::starting_at(t),
            ParsedTimestamp::Range { start, end } => TimeRange::new(start, end),
        }
    }

    /// Seek target used for still-frame extraction
    pub fn seek_point(&self) -> f64 {
        match *self {
            ParsedTimestamp::Point(t) => t,
            ParsedTimestamp::Range { start, end } => (start + end) / 2.0,
        }
    }
}

/// Portion of the source video a job covers
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClipSpan {
    /// Seek to `start`, limit output to the range duration
    Range(TimeRange),
    /// Seek to a single instant
    Point(f64),
    /// Entire source, no seek or duration limit
    Whole,
}

/// Kind of file a job writes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputKind {
    /// Looping palette-optimized GIF
    Gif,
    /// Single JPEG frame
    Still,
}

impl OutputKind {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputKind::Gif => "gif",
            OutputKind::Still => "jpg",
        }
    }
}

/// Filter pipeline a GIF job was encoded with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterVariant {
    MotionHighlight,
    Standard,
}

impl fmt::Display for FilterVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterVariant::MotionHighlight => write!(f, "motion_highlight"),
            FilterVariant::Standard => write!(f, "standard"),
        }
    }
}

/// One transcoding job, created per phase and discarded once run
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionJob {
    pub phase_name: String,
    pub source: PathBuf,
    pub span: ClipSpan,
    pub output: PathBuf,
    pub kind: OutputKind,
    pub track_motion: bool,
}

impl ExtractionJob {
    /// Ranged GIF for a phase; motion highlighting follows the phase name
    pub fn gif(
        phase_name: impl Into<String>,
        source: impl Into<PathBuf>,
        range: TimeRange,
        output: impl Into<PathBuf>,
    ) -> Self {
        let phase_name = phase_name.into();
        let track_motion = rules::tracks_motion(&phase_name);
        Self {
            phase_name,
            source: source.into(),
            span: ClipSpan::Range(range),
            output: output.into(),
            kind: OutputKind::Gif,
            track_motion,
        }
    }

    /// Single JPEG frame at `seek` seconds
    pub fn still(
        phase_name: impl Into<String>,
        source: impl Into<PathBuf>,
        seek: f64,
        output: impl Into<PathBuf>,
    ) -> Self {
        Self {
            phase_name: phase_name.into(),
            source: source.into(),
            span: ClipSpan::Point(seek),
            output: output.into(),
            kind: OutputKind::Still,
            track_motion: false,
        }
    }

    /// GIF over the whole source, motion highlight attempted first
    pub fn full_clip(source: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            phase_name: rules::FULL_CLIP_NAME.to_string(),
            source: source.into(),
            span: ClipSpan::Whole,
            output: output.into(),
            kind: OutputKind::Gif,
            track_motion: true,
        }
    }
}

/// Per-job lifecycle: `Pending -> Running -> {Succeeded, Failed}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JobState {
    Pending,
    Running,
    Succeeded,
    Failed,
}

impl JobState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobState::Succeeded | JobState::Failed)
    }

    /// Move a pending job to running; any other state is left unchanged
    pub fn start(self) -> Self {
        match self {
            JobState::Pending => JobState::Running,
            other => other,
        }
    }

    /// Settle a running job; terminal states are never re-entered
    pub fn finish(self, succeeded: bool) -> Self {
        match (self, succeeded) {
            (JobState::Running, true) => JobState::Succeeded,
            (JobState::Running, false) => JobState::Failed,
            (other, _) => other,
        }
    }
}

/// Output record for one successful phase job
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameExtraction {
    /// Timestamp string exactly as the provider wrote it
    pub timestamp: String,
    /// Path relative to the media root
    pub frame_path: String,
}

/// Structured record emitted for every settled phase job
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractionEvent {
    pub analysis_id: String,
    pub phase: String,
    pub kind: OutputKind,
    pub state: JobState,
    pub filter: Option<FilterVariant>,
    pub output: Option<String>,
    pub error: Option<String>,
    pub occurred_at: DateTime<Utc>,
}

impl ExtractionEvent {
    pub fn new(analysis_id: &str, phase: &str, kind: OutputKind, state: JobState) -> Self {
        Self {
            analysis_id: analysis_id.to_string(),
            phase: phase.to_string(),
            kind,
            state,
            filter: None,
            output: None,
            error: None,
            occurred_at: Utc::now(),
        }
    }

    pub fn with_filter(mut self, filter: Option<FilterVariant>) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_output(mut self, output: impl Into<String>) -> Self {
        self.output = Some(output.into());
        self
    }

    pub fn with_error(mut self, error: &DomainError) -> Self {
        self.error = Some(error.to_string());
        self
    }
}
