// Ports - Interface definitions (contracts)

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::domain::errors::*;
use crate::domain::model::*;

/// Port for cutting a time range out of a media file without re-encoding
#[async_trait]
pub trait TrimPort: Send + Sync {
    /// Stream-copy `[start, end]` of `input` into `output` and return the written path.
    ///
    /// The cut snaps to the keyframe at or before `start`, so the clip may run
    /// up to one GOP longer than requested.
    async fn trim(
        &self,
        input: &Path,
        start: TimeSpec,
        end: TimeSpec,
        output: &Path,
    ) -> Result<PathBuf, DomainError>;
}

/// Port for the metadata document a downloader leaves next to the media
#[async_trait]
pub trait MetadataPort: Send + Sync {
    /// Load video or playlist metadata from `source`
    async fn load_metadata(&self, source: &Path) -> Result<MediaMetadata, DomainError>;
}

/// Port for file system operations
#[async_trait]
pub trait FsPort: Send + Sync {
    /// Check if file exists
    async fn file_exists(&self, path: &Path) -> Result<bool, DomainError>;

    /// Create directory (including parent directories)
    async fn create_directory(&self, path: &Path) -> Result<(), DomainError>;

    /// Read a UTF-8 text file
    async fn read_text(&self, path: &Path) -> Result<String, DomainError>;

    /// Write a text file atomically; a failed write leaves no partial file behind
    async fn write_text(&self, path: &Path, contents: &str) -> Result<(), DomainError>;
}

/// Port for logging and observability
#[async_trait]
pub trait LogPort: Send + Sync {
    /// Log info message
    async fn info(&self, message: &str);

    /// Log warning message
    async fn warn(&self, message: &str);

    /// Log error message
    async fn error(&self, message: &str);

    /// Log debug message
    async fn debug(&self, message: &str);
}
