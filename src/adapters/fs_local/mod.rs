// Local filesystem adapter - File system operations on the host filesystem

use std::io::Write;
use std::path::Path;

use async_trait::async_trait;

use crate::domain::errors::*;
use crate::ports::*;

/// Local filesystem adapter
pub struct FsLocalAdapter;

impl FsLocalAdapter {
    /// Create new local filesystem adapter
    pub fn new() -> Result<Self, DomainError> {
        Ok(Self)
    }

    fn fail(action: &str, path: &Path, e: impl std::fmt::Display) -> DomainError {
        DomainError::FsFail(format!("Failed to {} {}: {}", action, path.display(), e))
    }
}

#[async_trait]
impl FsPort for FsLocalAdapter {
    async fn file_exists(&self, path: &Path) -> Result<bool, DomainError> {
        Ok(path.is_file())
    }

    async fn create_directory(&self, path: &Path) -> Result<(), DomainError> {
        std::fs::create_dir_all(path).map_err(|e| Self::fail("create directory", path, e))
    }

    async fn read_text(&self, path: &Path) -> Result<String, DomainError> {
        std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => DomainError::FileNotFound(path.display().to_string()),
            _ => Self::fail("read", path, e),
        })
    }

    async fn write_text(&self, path: &Path, contents: &str) -> Result<(), DomainError> {
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        // Stage next to the target so the final rename stays on one filesystem
        let mut staged = tempfile::Builder::new()
            .prefix(".chapsplit-")
            .suffix(".tmp")
            .tempfile_in(parent)
            .map_err(|e| Self::fail("stage", path, e))?;
        staged
            .write_all(contents.as_bytes())
            .and_then(|_| staged.as_file().sync_all())
            .map_err(|e| Self::fail("write", path, e))?;
        staged
            .persist(path)
            .map_err(|e| Self::fail("persist", path, e.error))?;
        Ok(())
    }
}
