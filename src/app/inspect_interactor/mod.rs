// Inspect interactor - Orchestrates metadata inspection use case

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules::*;
use crate::ports::*;
use crate::utils::Utils;

/// Interactor for metadata inspection use case
pub struct InspectInteractor {
    metadata_port: Arc<dyn MetadataPort>,
    log_port: Arc<dyn LogPort>,
}

impl InspectInteractor {
    /// Create new inspect interactor with injected ports
    pub fn new(metadata_port: Arc<dyn MetadataPort>, log_port: Arc<dyn LogPort>) -> Self {
        Self {
            metadata_port,
            log_port,
        }
    }

    /// Execute metadata inspection
    pub async fn execute(&self, request: InspectRequest) -> Result<InspectResponse, DomainError> {
        self.log_port
            .info(&format!("Inspecting metadata document: {}", request.source.display()))
            .await;

        let metadata = self.metadata_port.load_metadata(&request.source).await?;

        let summary = match request.format {
            OutputFormat::Json => self.format_as_json(&metadata)?,
            OutputFormat::Yaml => self.format_as_yaml(&metadata)?,
            OutputFormat::Text => self.format_as_text(&metadata, &request),
        };

        self.log_port.debug("Metadata inspection completed").await;
        Ok(InspectResponse { metadata, summary })
    }

    /// Format metadata as JSON
    fn format_as_json(&self, metadata: &MediaMetadata) -> Result<String, DomainError> {
        serde_json::to_string_pretty(metadata)
            .map_err(|e| DomainError::InternalError(format!("JSON serialization failed: {}", e)))
    }

    /// Format metadata as YAML
    fn format_as_yaml(&self, metadata: &MediaMetadata) -> Result<String, DomainError> {
        serde_yaml::to_string(metadata)
            .map_err(|e| DomainError::InternalError(format!("YAML serialization failed: {}", e)))
    }

    /// Format metadata as human-readable text
    fn format_as_text(&self, metadata: &MediaMetadata, request: &InspectRequest) -> String {
        match metadata {
            MediaMetadata::Video(video) => Self::video_text(video, request),
            MediaMetadata::Playlist(playlist) => Self::playlist_text(playlist),
        }
    }

    fn video_text(video: &VideoMetadata, request: &InspectRequest) -> String {
        let mut output = String::new();

        output.push_str("Video Information:\n");
        output.push_str(&format!("  Title: {}\n", video.title));
        match video.duration {
            Some(duration) => output.push_str(&format!(
                "  Duration: {}\n",
                Utils::format_video_length(duration)
            )),
            None => output.push_str("  Duration: unknown\n"),
        }
        output.push_str(&Self::languages_line("Video", &video.subtitle_languages));

        if let Some(description) = &video.description {
            output.push_str("\nDescription:\n");
            for line in description.lines() {
                output.push_str(&format!("  {}\n", line));
            }
        }

        if video.has_chapters() {
            let media_dir = request.source.parent().unwrap_or(Path::new(""));
            let output_dir = request
                .output_dir
                .clone()
                .unwrap_or_else(|| MediaLocator::default_output_dir(media_dir, &video.title));
            let plan = OutputPlanner::plan(&video.chapters, &output_dir, &request.video_extension);

            output.push_str(&format!("\nChapters ({}):\n", video.chapters.len()));
            for (chapter, planned) in video.chapters.iter().zip(&plan) {
                output.push_str(&format!(
                    "  {} - {}  {}\n      -> {}\n",
                    chapter.start(),
                    chapter.end(),
                    chapter.title,
                    planned.video_path.display()
                ));
            }
        } else {
            output.push_str("\nNo chapters\n");
        }

        output
    }

    fn playlist_text(playlist: &PlaylistMetadata) -> String {
        let mut output = String::new();

        output.push_str("Playlist Information:\n");
        output.push_str(&format!("  Title: {}\n", playlist.title));
        output.push_str(&format!("  Number of Videos: {}\n", playlist.entries.len()));
        output.push_str(&format!(
            "  Total Duration: {}\n",
            Utils::format_video_length(playlist.total_duration())
        ));
        output.push_str(&Self::languages_line("Playlist", playlist.subtitle_languages()));

        if !playlist.entries.is_empty() {
            output.push_str("\nVideos:\n");
            for (index, entry) in playlist.entries.iter().enumerate() {
                output.push_str(&format!(
                    "  {}{}\n",
                    OrdinalLabeler::label(index + 1, playlist.entries.len()),
                    entry.title
                ));
            }
        }

        output
    }

    fn languages_line(kind: &str, languages: &[String]) -> String {
        if languages.is_empty() {
            format!("  {} has no subtitles\n", kind)
        } else {
            format!("  {} has subtitles: {}\n", kind, languages.join(", "))
        }
    }
}

/// Output format for inspection results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Yaml,
}

impl OutputFormat {
    /// Parse output format from string
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        match value.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            _ => Err(DomainError::BadArgs(format!(
                "Invalid output format: {}. Valid formats: text, json, yaml",
                value
            ))),
        }
    }
}

/// Request for metadata inspection
#[derive(Debug, Clone)]
pub struct InspectRequest {
    pub source: PathBuf,
    pub format: OutputFormat,
    /// Directory used when showing planned chapter file names
    pub output_dir: Option<PathBuf>,
    pub video_extension: String,
}

impl InspectRequest {
    /// Create new inspect request
    pub fn new(source: PathBuf) -> Self {
        Self {
            source,
            format: OutputFormat::Text,
            output_dir: None,
            video_extension: "mp4".to_string(),
        }
    }

    /// Create new inspect request with format
    pub fn with_format(source: PathBuf, format: OutputFormat) -> Self {
        Self {
            format,
            ..Self::new(source)
        }
    }
}

/// Response from metadata inspection
#[derive(Debug, Clone)]
pub struct InspectResponse {
    pub metadata: MediaMetadata,
    pub summary: String,
}
