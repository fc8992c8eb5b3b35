//! Path utilities for source resolution and media-root-relative output paths

use std::path::{Component, Path, PathBuf};

use crate::domain::errors::DomainError;

/// Path utilities shared by the runner and the orchestrator
pub struct PathUtils;

impl PathUtils {
    /// Create a new path utils instance
    pub fn new() -> Self {
        Self
    }
}

impl Default for PathUtils {
    fn default() -> Self {
        Self::new()
    }
}

impl PathUtils {
    /// Resolve a path against the working directory; absolute paths pass through
    pub fn to_absolute(&self, path: &Path) -> Result<PathBuf, DomainError> {
        if path.is_absolute() {
            return Ok(path.to_path_buf());
        }

        let cwd = std::env::current_dir()
            .map_err(|e| DomainError::FsFail(format!("Failed to read working directory: {}", e)))?;
        Ok(cwd.join(path))
    }

    /// Express `path` relative to `root` with forward slashes.
    ///
    /// Falls back to the full path when `path` is not under `root`.
    pub fn relative_to(&self, root: &Path, path: &Path) -> String {
        let relative = path.strip_prefix(root).unwrap_or(path);
        relative
            .components()
            .filter_map(|component| match component {
                Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
                Component::RootDir | Component::Prefix(_) | Component::CurDir => None,
                Component::ParentDir => Some("..".to_string()),
            })
            .collect::<Vec<_>>()
            .join("/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_path_passes_through() {
        let utils = PathUtils::new();
        let path = std::env::temp_dir().join("swing.mp4");
        assert_eq!(utils.to_absolute(&path).unwrap(), path);
    }

    #[test]
    fn test_relative_path_is_resolved() {
        let utils = PathUtils::new();
        let resolved = utils.to_absolute(Path::new("uploads/swing.mp4")).unwrap();
        assert!(resolved.is_absolute());
        assert!(resolved.ends_with("uploads/swing.mp4"));
    }

    #[test]
    fn test_relative_to_media_root() {
        let utils = PathUtils::new();
        let root = Path::new("uploads");
        let path = root.join("frames").join("a1").join("impact.gif");
        assert_eq!(utils.relative_to(root, &path), "frames/a1/impact.gif");
    }
}
