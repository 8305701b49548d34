// Domain rules - Business logic and policies

use std::path::{Path, PathBuf};

use crate::domain::errors::*;
use crate::domain::model::*;

/// Zero-padded ordinal labels that keep chapter files sorted on disk
pub struct OrdinalLabeler;

impl OrdinalLabeler {
    /// Number of decimal digits in `count`
    pub fn width(count: usize) -> usize {
        count.max(1).to_string().len()
    }

    /// Label for 1-based `position` in a list of `count`, e.g. `07. ` for 7 of 12
    pub fn label(position: usize, count: usize) -> String {
        format!("{:0width$}. ", position, width = Self::width(count))
    }
}

/// Removes characters that are illegal in common filesystem paths
pub struct FilenameSanitizer;

impl FilenameSanitizer {
    const ILLEGAL: [char; 9] = ['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

    /// Delete `< > : " / \ | ? *` and control characters 0x00-0x1F
    pub fn clean(name: &str) -> String {
        name.chars().filter(|c| !Self::is_illegal(*c)).collect()
    }

    fn is_illegal(c: char) -> bool {
        ('\u{0}'..='\u{1f}').contains(&c) || Self::ILLEGAL.contains(&c)
    }
}

/// Preconditions the segmenter checks before touching the filesystem
pub struct ChapterListValidator;

impl ChapterListValidator {
    /// Fail fast on an empty list, a malformed chapter, or one that runs past the video
    pub fn validate(chapters: &[Chapter], video_duration: Option<f64>) -> Result<(), DomainError> {
        if chapters.is_empty() {
            return Err(DomainError::BadArgs("Chapter list cannot be empty".to_string()));
        }

        for (index, chapter) in chapters.iter().enumerate() {
            chapter.validate().map_err(|e| match e {
                DomainError::InvalidTimeRange(msg) => {
                    DomainError::InvalidTimeRange(format!("chapter {}: {}", index + 1, msg))
                }
                other => other,
            })?;

            if let Some(duration) = video_duration {
                // chapter ends reported by providers are often rounded up by a fraction
                if chapter.end_time > duration + 1.0 {
                    return Err(DomainError::InvalidTimeRange(format!(
                        "chapter {} '{}' ends at {}s, past the video duration of {}s",
                        index + 1,
                        chapter.title,
                        chapter.end_time,
                        duration
                    )));
                }
            }
        }

        Ok(())
    }
}

/// Assigns cues to chapters by cue start time and re-bases them to chapter-local zero
pub struct CuePartitioner;

impl CuePartitioner {
    /// Cues belonging to `chapter`, re-based and renumbered from 1.
    ///
    /// Membership looks at the cue start only, so a cue that crosses a chapter
    /// boundary goes wholly to the chapter it starts in, and its local end may
    /// run past the chapter's length. Whether overlap should be judged on the
    /// full interval is still open; `CueBoundary::HalfOpen` is the candidate
    /// fix for boundary cues and is opt-in.
    pub fn select(
        cues: &[SubtitleCue],
        chapter: &Chapter,
        boundary: CueBoundary,
        is_last: bool,
    ) -> Vec<SubtitleCue> {
        let start = chapter.start().to_cue_time();
        let end = chapter.end().to_cue_time();

        cues.iter()
            .filter(|cue| Self::contains(start, end, cue.start, boundary, is_last))
            .enumerate()
            .map(|(index, cue)| cue.rebased(start, index + 1))
            .collect()
    }

    fn contains(
        start: CueTime,
        end: CueTime,
        cue_start: CueTime,
        boundary: CueBoundary,
        is_last: bool,
    ) -> bool {
        match boundary {
            CueBoundary::Inclusive => start <= cue_start && cue_start <= end,
            CueBoundary::HalfOpen if is_last => start <= cue_start && cue_start <= end,
            CueBoundary::HalfOpen => start <= cue_start && cue_start < end,
        }
    }
}

/// Derives the per-chapter output file names
pub struct OutputPlanner;

impl OutputPlanner {
    /// `<output_dir>/<label><sanitized title>.<ext>` and `.srt` for every chapter, in order
    pub fn plan(chapters: &[Chapter], output_dir: &Path, video_extension: &str) -> Vec<ChapterOutput> {
        let count = chapters.len();
        let extension = video_extension.trim_start_matches('.');

        chapters
            .iter()
            .enumerate()
            .map(|(index, chapter)| {
                let ordinal = index + 1;
                let stem = format!(
                    "{}{}",
                    OrdinalLabeler::label(ordinal, count),
                    FilenameSanitizer::clean(&chapter.title)
                );
                ChapterOutput {
                    ordinal,
                    video_path: output_dir.join(format!("{}.{}", stem, extension)),
                    subtitle_path: output_dir.join(format!("{}.srt", stem)),
                    stem,
                }
            })
            .collect()
    }
}

/// Where the downloader is expected to have left media for a given title
pub struct MediaLocator;

impl MediaLocator {
    /// `<media_dir>/<sanitized title>.<ext>`
    pub fn video_path(media_dir: &Path, title: &str, extension: &str) -> PathBuf {
        media_dir.join(format!(
            "{}.{}",
            FilenameSanitizer::clean(title),
            extension.trim_start_matches('.')
        ))
    }

    /// Candidate subtitle files, most specific first
    pub fn subtitle_candidates(media_dir: &Path, title: &str, language: Option<&str>) -> Vec<PathBuf> {
        let base = FilenameSanitizer::clean(title);
        let mut candidates = Vec::new();
        if let Some(language) = language {
            candidates.push(media_dir.join(format!("{}.{}.srt", base, language)));
        }
        candidates.push(media_dir.join(format!("{}.srt", base)));
        candidates
    }

    /// `<media_dir>/<sanitized title>`
    pub fn default_output_dir(media_dir: &Path, title: &str) -> PathBuf {
        media_dir.join(FilenameSanitizer::clean(title))
    }
}
