// Tracing log adapter - Structured logging using tracing crate

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::domain::model::*;
use crate::ports::*;

/// Tracing log adapter
#[derive(Debug, Default)]
pub struct TracingLogAdapter;

impl TracingLogAdapter {
    /// Create new tracing log adapter. The subscriber is installed by
    /// [`crate::utils::logging::LoggingSystem`].
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl LogPort for TracingLogAdapter {
    async fn info(&self, message: &str) {
        info!("{}", message);
    }

    async fn warn(&self, message: &str) {
        warn!("{}", message);
    }

    async fn debug(&self, message: &str) {
        debug!("{}", message);
    }

    async fn log_event(&self, event: &ExtractionEvent) {
        let occurred_at = event.occurred_at.to_rfc3339();
        let filter = event.filter.map(|f| f.to_string());

        match event.state {
            JobState::Failed => warn!(
                event = "phase_extraction",
                analysis_id = %event.analysis_id,
                phase = %event.phase,
                kind = ?event.kind,
                state = ?event.state,
                error = event.error.as_deref().unwrap_or("unknown"),
                occurred_at = %occurred_at,
                "Phase extraction failed"
            ),
            _ => info!(
                event = "phase_extraction",
                analysis_id = %event.analysis_id,
                phase = %event.phase,
                kind = ?event.kind,
                state = ?event.state,
                filter = filter.as_deref().unwrap_or("none"),
                output = event.output.as_deref().unwrap_or(""),
                occurred_at = %occurred_at,
                "Phase extraction settled"
            ),
        }
    }
}
