// Domain errors - Error types for the domain layer

use std::fmt;

/// Domain-specific error types
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Invalid arguments provided
    BadArgs(String),
    /// Filesystem operation failed
    FsFail(String),
    /// The transcoder ran but reported failure
    TranscodeFailed(String),
    /// The transcoder did not finish within the configured bound
    Timeout(String),
    /// The transcoder binary could not be started
    TranscoderUnavailable(String),
    /// Configuration value out of range or malformed
    ConfigInvalid(String),
}

impl DomainError {
    /// Whether the caller supplied bad input, as opposed to the environment or
    /// the transcoder failing
    pub fn is_usage_error(&self) -> bool {
        matches!(self, DomainError::BadArgs(_) | DomainError::ConfigInvalid(_))
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::BadArgs(msg) => write!(f, "Bad arguments: {}", msg),
            DomainError::FsFail(msg) => write!(f, "Filesystem failure: {}", msg),
            DomainError::TranscodeFailed(msg) => write!(f, "Transcode failed: {}", msg),
            DomainError::Timeout(msg) => write!(f, "Transcoder timed out: {}", msg),
            DomainError::TranscoderUnavailable(msg) => {
                write!(f, "Transcoder unavailable: {}", msg)
            }
            DomainError::ConfigInvalid(msg) => write!(f, "Invalid configuration: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}
