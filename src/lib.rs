//! SwingFrames phase extraction library
//!
//! Turns the named, timestamped phases of a golf swing analysis into looping
//! GIFs or still frames by driving an external ffmpeg binary.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config_initialization;
pub mod domain;
pub mod engine;
pub mod error;
pub mod ports;
pub mod utils;

// Re-export commonly used types
pub use app::{AppContainer, DefaultAppContainer, ExtractInteractor, MediaLayout};
pub use config_initialization::ExtractorConfig;
pub use domain::errors::DomainError;
pub use domain::model::{FrameExtraction, SwingPhase};
pub use error::{SwingFramesError, SwingFramesResult};
