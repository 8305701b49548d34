//! Info-document metadata adapter
//!
//! Reads the `.info.json` document yt-dlp writes next to a download and maps it
//! onto [`MediaMetadata`]. Only the fields chapsplit needs are read.

use std::collections::BTreeMap;
use std::path::Path;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;

/// Subtitle keys that are not caption languages
const NON_CAPTION_KEYS: &[&str] = &["live_chat", "rechat"];

#[derive(Debug, Deserialize)]
struct InfoDocument {
    #[serde(rename = "_type")]
    kind: Option<String>,
    id: Option<String>,
    #[serde(default)]
    title: String,
    duration: Option<f64>,
    description: Option<String>,
    chapters: Option<Vec<Chapter>>,
    #[serde(default)]
    subtitles: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    entries: Vec<Option<InfoDocument>>,
}

impl InfoDocument {
    fn into_video(self) -> VideoMetadata {
        let subtitle_languages = self
            .subtitles
            .into_keys()
            .filter(|key| !NON_CAPTION_KEYS.contains(&key.as_str()))
            .collect();

        VideoMetadata {
            id: self.id,
            title: self.title,
            duration: self.duration,
            description: self.description.filter(|d| !d.trim().is_empty()),
            chapters: self.chapters.unwrap_or_default(),
            subtitle_languages,
        }
    }

    fn into_metadata(self) -> MediaMetadata {
        if self.kind.as_deref() == Some("playlist") {
            MediaMetadata::Playlist(PlaylistMetadata {
                id: self.id,
                title: self.title,
                // unavailable playlist entries come through as null
                entries: self
                    .entries
                    .into_iter()
                    .flatten()
                    .map(InfoDocument::into_video)
                    .collect(),
            })
        } else {
            MediaMetadata::Video(self.into_video())
        }
    }
}

/// Parse an info document from its JSON text
pub fn parse_info_document(json: &str) -> Result<MediaMetadata, DomainError> {
    let document: InfoDocument = serde_json::from_str(json)
        .map_err(|e| DomainError::InvalidFormat(format!("metadata document: {}", e)))?;
    Ok(document.into_metadata())
}

/// Metadata adapter over yt-dlp info documents on disk
pub struct InfoJsonAdapter;

impl InfoJsonAdapter {
    /// Create new info-document adapter
    pub fn new() -> Result<Self, DomainError> {
        Ok(Self)
    }
}

#[async_trait]
impl MetadataPort for InfoJsonAdapter {
    async fn load_metadata(&self, source: &Path) -> Result<MediaMetadata, DomainError> {
        let json = tokio::fs::read_to_string(source).await.map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => DomainError::FileNotFound(source.display().to_string()),
            _ => DomainError::FsFail(format!("Failed to read {}: {}", source.display(), e)),
        })?;

        let metadata = parse_info_document(&json)?;
        debug!("Loaded metadata for '{}' from {}", metadata.title(), source.display());
        Ok(metadata)
    }
}
