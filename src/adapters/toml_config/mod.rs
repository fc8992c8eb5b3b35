// TOML config adapter - Reads the [swingframes] table of a configuration file

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::domain::errors::*;

/// Values a configuration file may set; anything absent keeps its lower-precedence value
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub transcoder_path: Option<PathBuf>,
    pub media_root: Option<PathBuf>,
    pub frames_dir: Option<String>,
    pub url_prefix: Option<String>,
    pub gif_fps: Option<u32>,
    pub gif_width: Option<u32>,
    pub job_timeout_secs: Option<u64>,
    pub cleanup_failed_outputs: Option<bool>,
    pub log_level: Option<String>,
    pub log_format: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigDocument {
    #[serde(default)]
    swingframes: FileConfig,
}

/// TOML configuration adapter
pub struct TomlConfigAdapter;

impl TomlConfigAdapter {
    /// Default search locations, first match wins
    pub const SEARCH_PATHS: &'static [&'static str] =
        &["swingframes.toml", "config/swingframes.toml"];

    /// Parse configuration text
    pub fn parse(toml_content: &str) -> Result<FileConfig, DomainError> {
        let document: ConfigDocument = toml::from_str(toml_content)
            .map_err(|e| DomainError::ConfigInvalid(format!("Failed to parse TOML config: {}", e)))?;
        Ok(document.swingframes)
    }

    /// Load configuration from a file
    pub fn load(file_path: &Path) -> Result<FileConfig, DomainError> {
        let content = std::fs::read_to_string(file_path).map_err(|e| {
            DomainError::FsFail(format!(
                "Failed to read config file {}: {}",
                file_path.display(),
                e
            ))
        })?;

        Self::parse(&content)
    }

    /// First existing file among [`Self::SEARCH_PATHS`]
    pub fn discover() -> Option<PathBuf> {
        Self::SEARCH_PATHS
            .iter()
            .map(PathBuf::from)
            .find(|path| path.is_file())
    }
}
