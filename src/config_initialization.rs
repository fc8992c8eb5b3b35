//! Configuration initialization and hierarchy management

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::adapters::{FileConfig, TomlConfigAdapter, TranscoderConfig};
use crate::app::MediaLayout;
use crate::cli::Cli;
use crate::domain::errors::DomainError;
use crate::engine::GifSettings;
use crate::error::SwingFramesResult;
use crate::utils::logging::{LogFormat, LogLevel, LoggingConfig};

/// Prefix of every environment override
pub const ENV_PREFIX: &str = "SWINGFRAMES_";

/// Fully resolved extractor configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractorConfig {
    pub transcoder_path: PathBuf,
    pub media_root: PathBuf,
    pub frames_dir: String,
    pub url_prefix: String,
    pub gif_fps: u32,
    pub gif_width: u32,
    /// Per-invocation bound in seconds; 0 disables it
    pub job_timeout_secs: u64,
    pub cleanup_failed_outputs: bool,
    pub log_level: LogLevel,
    pub log_format: LogFormat,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            transcoder_path: PathBuf::from("ffmpeg"),
            media_root: PathBuf::from("uploads"),
            frames_dir: "frames".to_string(),
            url_prefix: "/api/frames".to_string(),
            gif_fps: 15,
            gif_width: 480,
            job_timeout_secs: 120,
            cleanup_failed_outputs: true,
            log_level: LogLevel::Info,
            log_format: LogFormat::Pretty,
        }
    }
}

impl ExtractorConfig {
    /// Apply values set in a configuration file
    pub fn apply_file(&mut self, file: FileConfig) -> Result<(), DomainError> {
        if let Some(path) = file.transcoder_path {
            self.transcoder_path = path;
        }
        if let Some(root) = file.media_root {
            self.media_root = root;
        }
        if let Some(dir) = file.frames_dir {
            self.frames_dir = dir;
        }
        if let Some(prefix) = file.url_prefix {
            self.url_prefix = prefix;
        }
        if let Some(fps) = file.gif_fps {
            self.gif_fps = fps;
        }
        if let Some(width) = file.gif_width {
            self.gif_width = width;
        }
        if let Some(secs) = file.job_timeout_secs {
            self.job_timeout_secs = secs;
        }
        if let Some(cleanup) = file.cleanup_failed_outputs {
            self.cleanup_failed_outputs = cleanup;
        }
        if let Some(level) = file.log_level {
            self.log_level = LogLevel::parse(&level)?;
        }
        if let Some(format) = file.log_format {
            self.log_format = LogFormat::parse(&format)?;
        }
        Ok(())
    }

    /// Apply `SWINGFRAMES_*` overrides. Unrelated variables are ignored.
    pub fn apply_env<I>(&mut self, vars: I) -> Result<usize, DomainError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut applied = 0;
        for (name, value) in vars {
            let Some(key) = name.strip_prefix(ENV_PREFIX) else {
                continue;
            };

            match key {
                "TRANSCODER_PATH" => self.transcoder_path = PathBuf::from(&value),
                "MEDIA_ROOT" => self.media_root = PathBuf::from(&value),
                "FRAMES_DIR" => self.frames_dir = value.clone(),
                "URL_PREFIX" => self.url_prefix = value.clone(),
                "GIF_FPS" => self.gif_fps = parse_env(&name, &value)?,
                "GIF_WIDTH" => self.gif_width = parse_env(&name, &value)?,
                "JOB_TIMEOUT_SECS" => self.job_timeout_secs = parse_env(&name, &value)?,
                "CLEANUP_FAILED_OUTPUTS" => self.cleanup_failed_outputs = parse_env(&name, &value)?,
                "LOG_LEVEL" => self.log_level = LogLevel::parse(&value)?,
                "LOG_FORMAT" => self.log_format = LogFormat::parse(&value)?,
                _ => continue,
            }

            debug!("Environment override: {} = {}", name, value);
            applied += 1;
        }
        Ok(applied)
    }

    /// Apply global command-line flags, the highest-precedence layer
    pub fn apply_cli(&mut self, cli: &Cli) -> Result<(), DomainError> {
        if let Some(level) = &cli.log_level {
            self.log_level = LogLevel::parse(level)?;
        }
        if let Some(format) = &cli.log_format {
            self.log_format = LogFormat::parse(format)?;
        }
        if let Some(root) = &cli.media_root {
            self.media_root = root.clone();
        }
        if let Some(path) = &cli.ffmpeg {
            self.transcoder_path = path.clone();
        }
        if let Some(secs) = cli.timeout_secs {
            self.job_timeout_secs = secs;
        }
        Ok(())
    }

    /// Reject values no job could run with
    pub fn validate(&self) -> Result<(), DomainError> {
        if !(1..=60).contains(&self.gif_fps) {
            return Err(DomainError::ConfigInvalid(format!(
                "gif_fps must be between 1 and 60, got {}",
                self.gif_fps
            )));
        }
        if !(16..=4096).contains(&self.gif_width) {
            return Err(DomainError::ConfigInvalid(format!(
                "gif_width must be between 16 and 4096, got {}",
                self.gif_width
            )));
        }
        if self.transcoder_path.as_os_str().is_empty() {
            return Err(DomainError::ConfigInvalid(
                "transcoder_path cannot be empty".to_string(),
            ));
        }
        if self.media_root.as_os_str().is_empty() {
            return Err(DomainError::ConfigInvalid(
                "media_root cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn logging(&self) -> LoggingConfig {
        LoggingConfig {
            level: self.log_level,
            format: self.log_format,
        }
    }

    pub fn gif_settings(&self) -> GifSettings {
        GifSettings {
            fps: self.gif_fps,
            width: self.gif_width,
            cleanup_failed_outputs: self.cleanup_failed_outputs,
        }
    }

    pub fn transcoder(&self) -> TranscoderConfig {
        TranscoderConfig {
            binary: self.transcoder_path.clone(),
            timeout: (self.job_timeout_secs > 0).then(|| Duration::from_secs(self.job_timeout_secs)),
        }
    }

    pub fn layout(&self) -> MediaLayout {
        MediaLayout {
            media_root: self.media_root.clone(),
            frames_dir: self.frames_dir.clone(),
            url_prefix: self.url_prefix.clone(),
        }
    }
}

fn parse_env<T: std::str::FromStr>(name: &str, value: &str) -> Result<T, DomainError> {
    value.trim().parse().map_err(|_| {
        DomainError::ConfigInvalid(format!("Invalid value for {}: '{}'", name, value))
    })
}

/// Resolve configuration following precedence: CLI > Env > File > Defaults
pub fn initialize_configuration_hierarchy(cli: &Cli) -> SwingFramesResult<ExtractorConfig> {
    let mut config = ExtractorConfig::default();

    // An explicit --config must exist; discovered files are optional
    let file_path = match &cli.config {
        Some(path) => Some(path.clone()),
        None => TomlConfigAdapter::discover(),
    };
    if let Some(path) = file_path {
        load_config_file(&mut config, &path)?;
    }

    let overrides = config.apply_env(std::env::vars())?;
    if overrides > 0 {
        debug!("Applied {} environment variable overrides", overrides);
    }

    config.apply_cli(cli)?;
    config.validate()?;

    Ok(config)
}

fn load_config_file(config: &mut ExtractorConfig, path: &Path) -> SwingFramesResult<()> {
    debug!("Loading configuration from: {}", path.display());
    let file = TomlConfigAdapter::load(path)?;
    config.apply_file(file)?;
    Ok(())
}
