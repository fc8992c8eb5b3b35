// Local filesystem adapter - File system operations through tokio::fs

use std::path::Path;

use async_trait::async_trait;

use crate::domain::errors::*;
use crate::ports::*;

/// Local filesystem adapter
#[derive(Debug, Default)]
pub struct LocalFsAdapter;

impl LocalFsAdapter {
    /// Create new local filesystem adapter
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl FsPort for LocalFsAdapter {
    async fn create_directory(&self, dir_path: &Path) -> Result<(), DomainError> {
        tokio::fs::create_dir_all(dir_path).await.map_err(|e| {
            DomainError::FsFail(format!(
                "Failed to create directory {}: {}",
                dir_path.display(),
                e
            ))
        })
    }

    async fn file_exists(&self, file_path: &Path) -> Result<bool, DomainError> {
        tokio::fs::try_exists(file_path).await.map_err(|e| {
            DomainError::FsFail(format!("Failed to check {}: {}", file_path.display(), e))
        })
    }

    async fn file_size(&self, file_path: &Path) -> Result<u64, DomainError> {
        let metadata = tokio::fs::metadata(file_path)
            .await
            .map_err(|e| DomainError::FsFail(format!("Failed to get file size: {}", e)))?;
        Ok(metadata.len())
    }

    async fn delete_file(&self, file_path: &Path) -> Result<(), DomainError> {
        tokio::fs::remove_file(file_path)
            .await
            .map_err(|e| DomainError::FsFail(format!("Failed to delete file: {}", e)))
    }

    async fn rename_file(&self, from: &Path, to: &Path) -> Result<(), DomainError> {
        tokio::fs::rename(from, to).await.map_err(|e| {
            DomainError::FsFail(format!(
                "Failed to move {} to {}: {}",
                from.display(),
                to.display(),
                e
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_create_directory_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("frames").join("a1");
        let fs = LocalFsAdapter::new();

        fs.create_directory(&nested).await.unwrap();
        fs.create_directory(&nested).await.unwrap();
        assert!(nested.is_dir());
    }

    #[tokio::test]
    async fn test_create_directory_under_file_fails() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("taken");
        std::fs::write(&file, b"x").unwrap();

        let result = LocalFsAdapter::new().create_directory(&file.join("frames")).await;
        assert!(matches!(result, Err(DomainError::FsFail(_))));
    }

    #[tokio::test]
    async fn test_file_lifecycle() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("impact.gif");
        let fs = LocalFsAdapter::new();

        assert!(!fs.file_exists(&file).await.unwrap());
        std::fs::write(&file, b"GIF89a").unwrap();
        assert!(fs.file_exists(&file).await.unwrap());
        assert_eq!(fs.file_size(&file).await.unwrap(), 6);

        fs.delete_file(&file).await.unwrap();
        assert!(!fs.file_exists(&file).await.unwrap());
    }

    #[tokio::test]
    async fn test_rename_replaces_target() {
        let dir = TempDir::new().unwrap();
        let staged = dir.path().join("impact.part.gif");
        let target = dir.path().join("impact.gif");
        std::fs::write(&staged, b"new").unwrap();
        std::fs::write(&target, b"old").unwrap();
        let fs = LocalFsAdapter::new();

        fs.rename_file(&staged, &target).await.unwrap();
        assert_eq!(std::fs::read(&target).unwrap(), b"new");
        assert!(!staged.exists());

        let result = fs.rename_file(&staged, &target).await;
        assert!(matches!(result, Err(DomainError::FsFail(_))));
    }
}
