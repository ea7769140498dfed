//! Implements ScratchPort on the local filesystem.
//! One file per upload: {base_dir}/{filename}. Same filename overwrites; no locking.

use crate::domain::DomainError;
use crate::ports::ScratchPort;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// File-system scratch directory.
pub struct FsScratch {
    base_dir: PathBuf,
}

impl FsScratch {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Create the scratch directory if missing. Called once at startup.
    pub async fn ensure_dir(&self) -> Result<(), DomainError> {
        fs::create_dir_all(&self.base_dir)
            .await
            .map_err(|e| DomainError::Scratch(format!("create scratch dir: {}", e)))
    }
}

#[async_trait::async_trait]
impl ScratchPort for FsScratch {
    fn path_for(&self, filename: &str) -> PathBuf {
        self.base_dir.join(filename)
    }

    async fn write(&self, filename: &str, bytes: &[u8]) -> Result<PathBuf, DomainError> {
        // Directory may have been removed since startup
        self.ensure_dir().await?;
        let path = self.path_for(filename);
        fs::write(&path, bytes)
            .await
            .map_err(|e| DomainError::Scratch(format!("write {}: {}", path.display(), e)))?;
        debug!(path = %path.display(), bytes = bytes.len(), "scratch file written");
        Ok(path)
    }

    async fn remove(&self, path: &Path) -> Result<(), DomainError> {
        fs::remove_file(path)
            .await
            .map_err(|e| DomainError::Scratch(format!("remove {}: {}", path.display(), e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_write_creates_dir_and_overwrites() {
        let tmp = tempfile::tempdir().unwrap();
        let scratch = FsScratch::new(tmp.path().join("downloads"));

        let path = scratch.write("report.pdf", b"first").await.unwrap();
        assert_eq!(path, tmp.path().join("downloads").join("report.pdf"));

        let again = scratch.write("report.pdf", b"second").await.unwrap();
        assert_eq!(again, path);
        assert_eq!(std::fs::read(&path).unwrap(), b"second");
    }

    #[tokio::test]
    async fn test_ensure_dir_creates_nested_and_is_idempotent() {
        let tmp = tempfile::tempdir().unwrap();
        let scratch = FsScratch::new(tmp.path().join("a").join("downloads"));
        scratch.ensure_dir().await.unwrap();
        scratch.ensure_dir().await.unwrap();
        assert!(scratch.base_dir().is_dir());
    }

    #[tokio::test]
    async fn test_remove_missing_file_is_error() {
        let tmp = tempfile::tempdir().unwrap();
        let scratch = FsScratch::new(tmp.path());
        let err = scratch.remove(&tmp.path().join("nope.bin")).await.unwrap_err();
        assert!(matches!(err, DomainError::Scratch(_)));
    }
}
