// Split interactor - Orchestrates the chapter segmentation use case

use std::path::Path;
use std::sync::Arc;

use chrono::Utc;

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules::*;
use crate::ports::*;
use crate::subtitle::{parse_srt, render_srt};

/// Interactor that cuts a video and its subtitle track into per-chapter files.
///
/// Chapters are processed one at a time in list order. A trim or write failure
/// is recorded against its chapter; whether the run goes on afterwards is
/// decided by [`FailurePolicy`].
pub struct SplitInteractor {
    trim_port: Arc<dyn TrimPort>,
    fs_port: Arc<dyn FsPort>,
    log_port: Arc<dyn LogPort>,
}

impl SplitInteractor {
    /// Create new split interactor with injected ports
    pub fn new(
        trim_port: Arc<dyn TrimPort>,
        fs_port: Arc<dyn FsPort>,
        log_port: Arc<dyn LogPort>,
    ) -> Self {
        Self {
            trim_port,
            fs_port,
            log_port,
        }
    }

    /// Execute chapter segmentation
    pub async fn execute(&self, request: SegmentRequest) -> Result<SegmentReport, DomainError> {
        let started_at = Utc::now();

        ChapterListValidator::validate(&request.chapters, request.video_duration)?;

        if !self.fs_port.file_exists(&request.video_path).await? {
            return Err(DomainError::FileNotFound(format!(
                "source video {}",
                request.video_path.display()
            )));
        }

        let cues = match &request.subtitle_path {
            Some(path) => Some(self.load_cues(path).await?),
            None => {
                self.log_port
                    .info("No subtitle source supplied, skipping subtitle segmentation")
                    .await;
                None
            }
        };

        self.fs_port.create_directory(&request.output_dir).await?;

        let plan = OutputPlanner::plan(
            &request.chapters,
            &request.output_dir,
            &request.options.video_extension,
        );
        let count = plan.len();
        self.log_port
            .info(&format!(
                "Splitting {} into {} chapters under {}",
                request.video_path.display(),
                count,
                request.output_dir.display()
            ))
            .await;

        let mut chapters = Vec::with_capacity(count);
        let mut aborted = false;

        for (output, chapter) in plan.iter().zip(&request.chapters) {
            self.log_port
                .info(&format!(
                    "[{}/{}] {} ({} - {}, {})",
                    output.ordinal,
                    count,
                    chapter.title,
                    chapter.start(),
                    chapter.end(),
                    chapter.duration()
                ))
                .await;

            let video = self.cut_video(&request.video_path, chapter, output).await;

            let (subtitles, cue_count) = match &cues {
                Some(cues) => {
                    let is_last = output.ordinal == count;
                    let (status, written) = self
                        .write_subtitles(cues, chapter, output, request.options.cue_boundary, is_last)
                        .await;
                    (Some(status), Some(written))
                }
                None => (None, None),
            };

            let report = ChapterReport {
                ordinal: output.ordinal,
                title: chapter.title.clone(),
                start_time: chapter.start_time,
                end_time: chapter.end_time,
                video,
                subtitles,
                cue_count,
            };
            let failed = report.is_failed();
            chapters.push(report);

            if failed && request.options.failure_policy == FailurePolicy::Abort {
                self.log_port
                    .error(&format!(
                        "Stopping after chapter {} of {} (failure policy: abort)",
                        output.ordinal, count
                    ))
                    .await;
                aborted = true;
                break;
            }
        }

        let report = SegmentReport {
            output_dir: request.output_dir.clone(),
            started_at,
            finished_at: Utc::now(),
            chapter_count: count,
            aborted,
            chapters,
        };

        let failures = report.failed_chapters().count();
        if failures == 0 && !aborted {
            self.log_port
                .info(&format!("All {} chapters written", count))
                .await;
        } else {
            self.log_port
                .warn(&format!("{} of {} chapters failed", failures, count))
                .await;
        }

        Ok(report)
    }

    /// Read and parse the full-length subtitle track
    async fn load_cues(&self, path: &Path) -> Result<Vec<SubtitleCue>, DomainError> {
        let content = self.fs_port.read_text(path).await?;
        let cues = parse_srt(&content)
            .map_err(|e| DomainError::InvalidFormat(format!("{}: {}", path.display(), e)))?;
        self.log_port
            .debug(&format!("Loaded {} cues from {}", cues.len(), path.display()))
            .await;
        Ok(cues)
    }

    /// Stream-copy one chapter; a failed trim is reported, never raised
    async fn cut_video(&self, source: &Path, chapter: &Chapter, output: &ChapterOutput) -> ArtifactStatus {
        match self
            .trim_port
            .trim(source, chapter.start(), chapter.end(), &output.video_path)
            .await
        {
            Ok(path) => ArtifactStatus::Written { path },
            Err(e) => {
                self.log_port
                    .warn(&format!(
                        "Chapter {} '{}': video trim failed for {}: {}",
                        output.ordinal,
                        chapter.title,
                        output.video_path.display(),
                        e
                    ))
                    .await;
                ArtifactStatus::Failed {
                    path: output.video_path.clone(),
                    reason: e.to_string(),
                }
            }
        }
    }

    /// Write the re-based cues of one chapter; returns the status and the cue count
    async fn write_subtitles(
        &self,
        cues: &[SubtitleCue],
        chapter: &Chapter,
        output: &ChapterOutput,
        boundary: CueBoundary,
        is_last: bool,
    ) -> (ArtifactStatus, usize) {
        let local = CuePartitioner::select(cues, chapter, boundary, is_last);
        if local.is_empty() {
            self.log_port
                .debug(&format!(
                    "Chapter {} '{}' has no cues, writing an empty subtitle file",
                    output.ordinal, chapter.title
                ))
                .await;
        }

        let status = match self
            .fs_port
            .write_text(&output.subtitle_path, &render_srt(&local))
            .await
        {
            Ok(()) => ArtifactStatus::Written {
                path: output.subtitle_path.clone(),
            },
            Err(e) => {
                self.log_port
                    .error(&format!(
                        "Chapter {} '{}': could not write {}: {}",
                        output.ordinal,
                        chapter.title,
                        output.subtitle_path.display(),
                        e
                    ))
                    .await;
                ArtifactStatus::Failed {
                    path: output.subtitle_path.clone(),
                    reason: e.to_string(),
                }
            }
        };

        (status, local.len())
    }
}
