use std::sync::Arc;

use crate::adapters::{FFmpegAdapter, LocalFsAdapter, TracingLogAdapter};
use crate::app::extract_interactor::{ExtractInteractor, MediaLayout};
use crate::config_initialization::ExtractorConfig;
use crate::engine::{FrameJobRunner, GifSettings};
use crate::ports::{FsPort, LogPort, TranscodePort};

pub trait AppContainer: Send + Sync {
    fn extract_interactor(&self) -> Arc<ExtractInteractor>;
}

pub struct DefaultAppContainer {
    extract_interactor: Arc<ExtractInteractor>,
}

impl DefaultAppContainer {
    /// Wire the production adapters from resolved configuration
    pub fn new(config: &ExtractorConfig) -> Self {
        let transcode_port = Arc::new(FFmpegAdapter::new(config.transcoder()));
        let fs_port = Arc::new(LocalFsAdapter::new());
        let log_port = Arc::new(TracingLogAdapter::new());

        Self::with_ports(
            transcode_port,
            fs_port,
            log_port,
            config.gif_settings(),
            config.layout(),
        )
    }

    /// Wire arbitrary port implementations
    pub fn with_ports(
        transcode_port: Arc<dyn TranscodePort>,
        fs_port: Arc<dyn FsPort>,
        log_port: Arc<dyn LogPort>,
        settings: GifSettings,
        layout: MediaLayout,
    ) -> Self {
        let runner = FrameJobRunner::new(
            Arc::clone(&transcode_port),
            Arc::clone(&fs_port),
            settings,
        );

        let extract_interactor = Arc::new(ExtractInteractor::new(
            runner,
            Arc::clone(&fs_port),
            Arc::clone(&log_port),
            layout,
        ));

        Self { extract_interactor }
    }
}

impl AppContainer for DefaultAppContainer {
    fn extract_interactor(&self) -> Arc<ExtractInteractor> {
        Arc::clone(&self.extract_interactor)
    }
}
