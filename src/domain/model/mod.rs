// Domain models - Core types and data structures

use std::fmt;
use std::ops::Sub;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

/// Time specification with precision - represents time in seconds with fractional precision
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct TimeSpec {
    pub seconds: f64,
}

impl TimeSpec {
    /// Create a new TimeSpec from seconds
    pub fn from_seconds(seconds: f64) -> Self {
        Self { seconds }
    }

    /// Parse time string in various formats
    pub fn parse(time_str: &str) -> Result<Self, DomainError> {
        let trimmed = time_str.trim();

        // Try parsing as seconds (float)
        if let Ok(seconds) = trimmed.parse::<f64>() {
            if seconds < 0.0 || !seconds.is_finite() {
                return Err(DomainError::BadArgs(format!(
                    "Time must be a non-negative number: {}",
                    trimmed
                )));
            }
            return Ok(Self::from_seconds(seconds));
        }

        let parts: Vec<&str> = trimmed.split(':').collect();
        let (hours, minutes, seconds_part) = match parts.as_slice() {
            [m, s] => (0, Self::parse_field(m, "minutes")?, *s),
            [h, m, s] => {
                let minutes = Self::parse_field(m, "minutes")?;
                if minutes >= 60 {
                    return Err(DomainError::BadArgs("Minutes must be less than 60".to_string()));
                }
                (Self::parse_field(h, "hours")?, minutes, *s)
            }
            _ => {
                return Err(DomainError::BadArgs(format!(
                    "Invalid time format '{}'. Supported formats: seconds (e.g., 123.45), MM:SS.ms (e.g., 2:30.5), HH:MM:SS.ms (e.g., 1:02:30.5)",
                    trimmed
                )))
            }
        };

        let seconds = seconds_part
            .parse::<f64>()
            .map_err(|_| DomainError::BadArgs(format!("Invalid seconds format: {}", seconds_part)))?;
        if !(0.0..60.0).contains(&seconds) {
            return Err(DomainError::BadArgs("Seconds must be less than 60".to_string()));
        }

        Ok(Self::from_seconds(
            hours as f64 * 3600.0 + minutes as f64 * 60.0 + seconds,
        ))
    }

    fn parse_field(value: &str, name: &str) -> Result<u32, DomainError> {
        value
            .parse::<u32>()
            .map_err(|_| DomainError::BadArgs(format!("Invalid {} format: {}", name, value)))
    }

    /// Nearest millisecond
    pub fn to_cue_time(&self) -> CueTime {
        CueTime::from_seconds(self.seconds)
    }

    /// Render as a fractional-second argument for external tools
    pub fn to_arg(&self) -> String {
        format!("{:.3}", self.seconds)
    }

    /// Format as HH:MM:SS.mmm, or MM:SS.mmm below one hour
    pub fn format_hms(&self) -> String {
        let total_ms = (self.seconds * 1000.0).round() as u64;
        let hours = total_ms / 3_600_000;
        let minutes = (total_ms % 3_600_000) / 60_000;
        let seconds = (total_ms % 60_000) / 1000;
        let milliseconds = total_ms % 1000;

        if hours > 0 {
            format!("{:02}:{:02}:{:02}.{:03}", hours, minutes, seconds, milliseconds)
        } else {
            format!("{:02}:{:02}.{:03}", minutes, seconds, milliseconds)
        }
    }
}

impl fmt::Display for TimeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_hms())
    }
}

/// Signed cue timestamp in milliseconds.
///
/// Re-based cues can start before their chapter, so the value is allowed to
/// go negative; `Display` renders SubRip syntax with a leading `-` in that case.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct CueTime {
    millis: i64,
}

impl CueTime {
    pub const ZERO: CueTime = CueTime { millis: 0 };

    pub fn from_millis(millis: i64) -> Self {
        Self { millis }
    }

    /// Seconds to milliseconds, rounded to the nearest millisecond
    pub fn from_seconds(seconds: f64) -> Self {
        Self {
            millis: (seconds * 1000.0).round() as i64,
        }
    }

    pub fn millis(&self) -> i64 {
        self.millis
    }

    pub fn is_negative(&self) -> bool {
        self.millis < 0
    }
}

impl Sub for CueTime {
    type Output = CueTime;

    fn sub(self, rhs: CueTime) -> CueTime {
        CueTime::from_millis(self.millis.saturating_sub(rhs.millis))
    }
}

impl fmt::Display for CueTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_negative() { "-" } else { "" };
        let total = self.millis.unsigned_abs();
        let hours = total / 3_600_000;
        let minutes = (total % 3_600_000) / 60_000;
        let seconds = (total % 60_000) / 1000;
        let millis = total % 1000;
        write!(
            f,
            "{}{:02}:{:02}:{:02},{:03}",
            sign, hours, minutes, seconds, millis
        )
    }
}

/// A single timed caption entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubtitleCue {
    /// 1-based position in the track it was read from
    pub sequence_index: usize,
    pub start: CueTime,
    pub end: CueTime,
    pub text: String,
}

impl SubtitleCue {
    pub fn new(sequence_index: usize, start: CueTime, end: CueTime, text: impl Into<String>) -> Self {
        Self {
            sequence_index,
            start,
            end,
            text: text.into(),
        }
    }

    /// Shift both timestamps so that `origin` becomes zero
    pub fn rebased(&self, origin: CueTime, sequence_index: usize) -> Self {
        Self {
            sequence_index,
            start: self.start - origin,
            end: self.end - origin,
            text: self.text.clone(),
        }
    }
}

/// A named, time-bounded segment of a video
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chapter {
    pub start_time: f64,
    pub end_time: f64,
    #[serde(default)]
    pub title: String,
}

impl Chapter {
    /// Create a new chapter with validation
    pub fn new(title: impl Into<String>, start_time: f64, end_time: f64) -> Result<Self, DomainError> {
        let chapter = Self {
            start_time,
            end_time,
            title: title.into(),
        };
        chapter.validate()?;
        Ok(chapter)
    }

    /// Parse a `START-END=TITLE` chapter specification, e.g. `0:20-2:52=Inline Middleware`
    pub fn parse_spec(spec: &str) -> Result<Self, DomainError> {
        let (range, title) = spec.split_once('=').ok_or_else(|| {
            DomainError::BadArgs(format!(
                "Invalid chapter '{}'. Expected START-END=TITLE",
                spec
            ))
        })?;
        let (start, end) = range.split_once('-').ok_or_else(|| {
            DomainError::BadArgs(format!("Invalid chapter range '{}'. Expected START-END", range))
        })?;

        let start = TimeSpec::parse(start)?;
        let end = TimeSpec::parse(end)?;
        Self::new(title.trim(), start.seconds, end.seconds)
    }

    /// Check the bounds are finite, non-negative and ordered
    pub fn validate(&self) -> Result<(), DomainError> {
        if !self.start_time.is_finite() || !self.end_time.is_finite() {
            return Err(DomainError::InvalidTimeRange(format!(
                "chapter '{}' has non-finite bounds",
                self.title
            )));
        }
        if self.start_time < 0.0 {
            return Err(DomainError::InvalidTimeRange(format!(
                "chapter '{}' starts before zero ({})",
                self.title, self.start_time
            )));
        }
        if self.start_time >= self.end_time {
            return Err(DomainError::InvalidTimeRange(format!(
                "chapter '{}': start ({}) must be less than end ({})",
                self.title, self.start_time, self.end_time
            )));
        }
        Ok(())
    }

    pub fn start(&self) -> TimeSpec {
        TimeSpec::from_seconds(self.start_time)
    }

    pub fn end(&self) -> TimeSpec {
        TimeSpec::from_seconds(self.end_time)
    }

    pub fn duration(&self) -> TimeSpec {
        TimeSpec::from_seconds(self.end_time - self.start_time)
    }
}

/// Metadata for a single video, as supplied by the metadata provider
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VideoMetadata {
    pub id: Option<String>,
    pub title: String,
    pub duration: Option<f64>,
    pub description: Option<String>,
    pub chapters: Vec<Chapter>,
    pub subtitle_languages: Vec<String>,
}

impl VideoMetadata {
    pub fn has_chapters(&self) -> bool {
        !self.chapters.is_empty()
    }
}

/// Metadata for a playlist of videos
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlaylistMetadata {
    pub id: Option<String>,
    pub title: String,
    pub entries: Vec<VideoMetadata>,
}

impl PlaylistMetadata {
    /// Sum of the known entry durations
    pub fn total_duration(&self) -> f64 {
        self.entries.iter().filter_map(|entry| entry.duration).sum()
    }

    /// Caption languages offered by the first entry
    pub fn subtitle_languages(&self) -> &[String] {
        self.entries
            .first()
            .map(|entry| entry.subtitle_languages.as_slice())
            .unwrap_or(&[])
    }
}

/// Either kind of metadata document
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum MediaMetadata {
    Video(VideoMetadata),
    Playlist(PlaylistMetadata),
}

impl MediaMetadata {
    pub fn title(&self) -> &str {
        match self {
            MediaMetadata::Video(video) => &video.title,
            MediaMetadata::Playlist(playlist) => &playlist.title,
        }
    }
}

/// What to do when the trimmer fails for one chapter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailurePolicy {
    /// Record the failure and move on to the next chapter
    #[default]
    Continue,
    /// Stop the run at the first failed chapter
    Abort,
}

impl FailurePolicy {
    /// Parse failure policy from string
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        match value.to_lowercase().as_str() {
            "continue" => Ok(FailurePolicy::Continue),
            "abort" => Ok(FailurePolicy::Abort),
            _ => Err(DomainError::BadArgs(format!(
                "Invalid failure policy: {}. Valid policies: continue, abort",
                value
            ))),
        }
    }
}

impl fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailurePolicy::Continue => write!(f, "continue"),
            FailurePolicy::Abort => write!(f, "abort"),
        }
    }
}

/// Which cues belong to a chapter, judged by cue start time only
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CueBoundary {
    /// `start <= cue.start <= end`; a cue on a shared boundary lands in both chapters
    #[default]
    Inclusive,
    /// `start <= cue.start < end`, closed at the end for the last chapter only
    HalfOpen,
}

impl CueBoundary {
    /// Parse cue boundary policy from string
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        match value.to_lowercase().as_str() {
            "inclusive" => Ok(CueBoundary::Inclusive),
            "half-open" | "half_open" => Ok(CueBoundary::HalfOpen),
            _ => Err(DomainError::BadArgs(format!(
                "Invalid cue boundary: {}. Valid values: inclusive, half-open",
                value
            ))),
        }
    }
}

impl fmt::Display for CueBoundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CueBoundary::Inclusive => write!(f, "inclusive"),
            CueBoundary::HalfOpen => write!(f, "half-open"),
        }
    }
}

/// Tunables for one segmentation run
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentOptions {
    pub failure_policy: FailurePolicy,
    pub cue_boundary: CueBoundary,
    /// Extension of the per-chapter video files, without the dot
    pub video_extension: String,
}

impl Default for SegmentOptions {
    fn default() -> Self {
        Self {
            failure_policy: FailurePolicy::default(),
            cue_boundary: CueBoundary::default(),
            video_extension: "mp4".to_string(),
        }
    }
}

/// Fully resolved input for the chapter segmenter
#[derive(Debug, Clone)]
pub struct SegmentRequest {
    pub video_path: PathBuf,
    pub subtitle_path: Option<PathBuf>,
    pub chapters: Vec<Chapter>,
    pub output_dir: PathBuf,
    /// Known duration of the source video, used to bound the chapter list
    pub video_duration: Option<f64>,
    pub options: SegmentOptions,
}

impl SegmentRequest {
    /// Create new segment request with validation
    pub fn new(
        video_path: PathBuf,
        subtitle_path: Option<PathBuf>,
        chapters: Vec<Chapter>,
        output_dir: PathBuf,
    ) -> Result<Self, DomainError> {
        if video_path.as_os_str().is_empty() {
            return Err(DomainError::BadArgs("Video path cannot be empty".to_string()));
        }
        if output_dir.as_os_str().is_empty() {
            return Err(DomainError::BadArgs("Output directory cannot be empty".to_string()));
        }

        Ok(Self {
            video_path,
            subtitle_path,
            chapters,
            output_dir,
            video_duration: None,
            options: SegmentOptions::default(),
        })
    }

    pub fn with_video_duration(mut self, duration: Option<f64>) -> Self {
        self.video_duration = duration;
        self
    }

    pub fn with_options(mut self, options: SegmentOptions) -> Self {
        self.options = options;
        self
    }
}

/// Planned output paths for one chapter
#[derive(Debug, Clone, PartialEq)]
pub struct ChapterOutput {
    /// 1-based position in the chapter list
    pub ordinal: usize,
    /// Ordinal label plus sanitized title, shared by all files of the chapter
    pub stem: String,
    pub video_path: PathBuf,
    pub subtitle_path: PathBuf,
}

/// Outcome of producing one output file
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ArtifactStatus {
    Written { path: PathBuf },
    Failed { path: PathBuf, reason: String },
}

impl ArtifactStatus {
    pub fn is_failed(&self) -> bool {
        matches!(self, ArtifactStatus::Failed { .. })
    }

    pub fn path(&self) -> &PathBuf {
        match self {
            ArtifactStatus::Written { path } | ArtifactStatus::Failed { path, .. } => path,
        }
    }
}

/// Per-chapter entry in the run report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChapterReport {
    pub ordinal: usize,
    pub title: String,
    pub start_time: f64,
    pub end_time: f64,
    pub video: ArtifactStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitles: Option<ArtifactStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cue_count: Option<usize>,
}

impl ChapterReport {
    pub fn is_failed(&self) -> bool {
        self.video.is_failed() || self.subtitles.as_ref().is_some_and(|s| s.is_failed())
    }
}

/// Result of a whole segmentation run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SegmentReport {
    pub output_dir: PathBuf,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub chapter_count: usize,
    /// Set when the abort policy stopped the run early
    pub aborted: bool,
    pub chapters: Vec<ChapterReport>,
}

impl SegmentReport {
    pub fn failed_chapters(&self) -> impl Iterator<Item = &ChapterReport> {
        self.chapters.iter().filter(|chapter| chapter.is_failed())
    }

    pub fn is_success(&self) -> bool {
        !self.aborted && self.failed_chapters().next().is_none()
    }
}

#[cfg(test)]
mod tests;
