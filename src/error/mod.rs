//! Error handling module for SwingFrames

use thiserror::Error;

use crate::domain::errors::DomainError;

/// Main error type for SwingFrames plumbing outside the domain layer
#[derive(Error, Debug)]
pub enum SwingFramesError {
    /// Error raised by a domain operation or port
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// `--phase` value without a `NAME=TIMESTAMP` shape
    #[error("Invalid phase argument '{arg}'. Expected NAME=TIMESTAMP")]
    InvalidPhaseArg { arg: String },

    /// Neither a phases file nor inline phases were supplied
    #[error("No swing phases supplied. Use --phases-file or --phase")]
    NoPhases,

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Analysis document or output serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl SwingFramesError {
    /// Whether the error came from bad user input rather than the environment
    pub fn is_usage_error(&self) -> bool {
        match self {
            SwingFramesError::Domain(e) => e.is_usage_error(),
            SwingFramesError::InvalidPhaseArg { .. }
            | SwingFramesError::NoPhases
            | SwingFramesError::JsonError(_) => true,
            SwingFramesError::IoError(_) => false,
        }
    }
}

/// Result type alias for SwingFrames operations
pub type SwingFramesResult<T> = std::result::Result<T, SwingFramesError>;
