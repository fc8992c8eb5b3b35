//! Extraction engine: filter-graph construction and per-job transcoder driving

use serde::{Deserialize, Serialize};

pub mod filter_graph;
pub mod runner;

pub use filter_graph::{Filter, FilterChain, FilterGraph, FilterGraphBuilder, GifIntent};
pub use runner::{FrameJobRunner, JobOutcome};

/// Encoding settings shared by every GIF job of a runner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GifSettings {
    /// Output frame rate
    pub fps: u32,
    /// Output width in pixels, height follows the aspect ratio
    pub width: u32,
    /// Remove whatever a failed job left at its output path
    pub cleanup_failed_outputs: bool,
}

impl Default for GifSettings {
    fn default() -> Self {
        Self {
            fps: 15,
            width: 480,
            cleanup_failed_outputs: true,
        }
    }
}

impl GifSettings {
    /// Filter intent for a job with or without the motion highlight
    pub fn intent(&self, motion_highlight: bool) -> GifIntent {
        GifIntent {
            motion_highlight,
            fps: self.fps,
            width: self.width,
        }
    }
}
