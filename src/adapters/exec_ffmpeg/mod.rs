//! FFmpeg execution adapter
//!
//! Drives the `ffmpeg` command-line tool as a child process. Each invocation is
//! bounded by an optional timeout; on expiry the child is killed and the
//! invocation reported as [`DomainError::Timeout`].

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::domain::errors::*;
use crate::ports::*;

/// Lines of transcoder stderr kept in error messages
const STDERR_TAIL_LINES: usize = 5;

/// Smallest `-t` value rendered; millisecond precision would print shorter
/// limits as `0.000`
const MIN_RENDERED_DURATION: f64 = 0.001;

/// Transcoder process configuration, injected at construction
#[derive(Debug, Clone, PartialEq)]
pub struct TranscoderConfig {
    /// Binary to execute, looked up on `PATH` when not absolute
    pub binary: PathBuf,
    /// Upper bound for one invocation; `None` waits indefinitely
    pub timeout: Option<Duration>,
}

impl Default for TranscoderConfig {
    fn default() -> Self {
        Self {
            binary: PathBuf::from("ffmpeg"),
            timeout: Some(Duration::from_secs(120)),
        }
    }
}

/// FFmpeg-based execution adapter
pub struct FFmpegAdapter {
    config: TranscoderConfig,
}

impl FFmpegAdapter {
    /// Create new FFmpeg adapter
    pub fn new(config: TranscoderConfig) -> Self {
        Self { config }
    }

    /// Render a request to ffmpeg arguments.
    ///
    /// Seeking happens on the input (`-ss` before `-i`); the duration limit
    /// applies to the output.
    pub fn build_args(request: &TranscodeRequest) -> Vec<OsString> {
        let mut args: Vec<OsString> = ["-hide_banner", "-nostdin", "-loglevel", "error", "-y"]
            .iter()
            .map(OsString::from)
            .collect();

        if let Some(seek) = request.seek {
            args.push("-ss".into());
            args.push(format!("{:.3}", seek).into());
        }

        args.push("-i".into());
        args.push(request.input.clone().into_os_string());

        if let Some(duration) = request.duration {
            args.push("-t".into());
            args.push(format!("{:.3}", duration.max(MIN_RENDERED_DURATION)).into());
        }

        if let Some(graph) = &request.filter_graph {
            args.push("-filter_complex".into());
            args.push(graph.into());
        }

        if let Some(frames) = request.frame_limit {
            args.push("-frames:v".into());
            args.push(frames.to_string().into());
        }

        if request.loop_forever {
            args.push("-loop".into());
            args.push("0".into());
        }

        args.push(request.output.clone().into_os_string());
        args
    }

    fn stderr_tail(stderr: &[u8]) -> String {
        let text = String::from_utf8_lossy(stderr);
        let lines: Vec<&str> = text.lines().filter(|line| !line.trim().is_empty()).collect();
        let start = lines.len().saturating_sub(STDERR_TAIL_LINES);
        lines[start..].join(" | ")
    }
}

#[async_trait]
impl TranscodePort for FFmpegAdapter {
    async fn transcode(&self, request: &TranscodeRequest) -> Result<(), DomainError> {
        let args = Self::build_args(request);
        debug!(binary = %self.config.binary.display(), ?args, "Spawning transcoder");

        let child = Command::new(&self.config.binary)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                DomainError::TranscoderUnavailable(format!(
                    "Failed to start {}: {}",
                    self.config.binary.display(),
                    e
                ))
            })?;

        // Dropping the wait future on timeout drops the child, which kills it
        let wait = child.wait_with_output();
        let output = match self.config.timeout {
            Some(limit) => tokio::time::timeout(limit, wait).await.map_err(|_| {
                DomainError::Timeout(format!(
                    "{} exceeded {:.1}s writing {}",
                    self.config.binary.display(),
                    limit.as_secs_f64(),
                    request.output.display()
                ))
            })?,
            None => wait.await,
        }
        .map_err(|e| DomainError::TranscodeFailed(format!("Failed to wait for transcoder: {}", e)))?;

        if !output.status.success() {
            return Err(DomainError::TranscodeFailed(format!(
                "{} ({})",
                output.status,
                Self::stderr_tail(&output.stderr)
            )));
        }

        Ok(())
    }
}
