// Ports - Interface definitions (contracts)

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::domain::errors::*;
use crate::domain::model::*;

/// One transcoder invocation, independent of the tool's argument syntax
#[derive(Debug, Clone, PartialEq)]
pub struct TranscodeRequest {
    /// Absolute source path
    pub input: PathBuf,
    /// Input seek offset in seconds
    pub seek: Option<f64>,
    /// Output duration limit in seconds
    pub duration: Option<f64>,
    /// Rendered filter graph
    pub filter_graph: Option<String>,
    /// Exact number of video frames to write
    pub frame_limit: Option<u32>,
    /// Request infinite-loop metadata on the output container
    pub loop_forever: bool,
    pub output: PathBuf,
}

/// Port for the external media transcoder
#[async_trait]
pub trait TranscodePort: Send + Sync {
    /// Run one invocation to completion; the output file is the side effect
    async fn transcode(&self, request: &TranscodeRequest) -> Result<(), DomainError>;
}

/// Port for file system operations
#[async_trait]
pub trait FsPort: Send + Sync {
    /// Create directory and any missing ancestors; succeeds if it already exists
    async fn create_directory(&self, dir_path: &Path) -> Result<(), DomainError>;

    /// Check if file exists
    async fn file_exists(&self, file_path: &Path) -> Result<bool, DomainError>;

    /// Get file size
    async fn file_size(&self, file_path: &Path) -> Result<u64, DomainError>;

    /// Delete file
    async fn delete_file(&self, file_path: &Path) -> Result<(), DomainError>;

    /// Move a file into place, replacing any file already at `to`
    async fn rename_file(&self, from: &Path, to: &Path) -> Result<(), DomainError>;
}

/// Port for logging and observability
#[async_trait]
pub trait LogPort: Send + Sync {
    /// Log info message
    async fn info(&self, message: &str);

    /// Log warning message
    async fn warn(&self, message: &str);

    /// Log debug message
    async fn debug(&self, message: &str);

    /// Emit a structured per-phase extraction event
    async fn log_event(&self, event: &ExtractionEvent);
}
