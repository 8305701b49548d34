//! Command implementations

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::app::inspect_interactor::InspectRequest;
use crate::app::AppContainer;
use crate::cli::args::{InspectArgs, SplitArgs};
use crate::config_initialization::SplitterConfig;
use crate::domain::model::*;
use crate::domain::rules::MediaLocator;

/// Execute the split command
pub async fn split(args: SplitArgs, config: &SplitterConfig, container: &dyn AppContainer) -> Result<()> {
    info!("Starting split operation");

    let request = resolve_split_request(&args, config, container).await?;
    info!("Video: {}", request.video_path.display());
    match &request.subtitle_path {
        Some(path) => info!("Subtitles: {}", path.display()),
        None => info!("Subtitles: none"),
    }
    info!("Output: {}", request.output_dir.display());

    let report = container
        .split_interactor()
        .execute(request)
        .await
        .context("Failed to split video into chapters")?;

    display_report(&report);

    if let Some(path) = &args.report {
        let json = serde_json::to_string_pretty(&report).context("Failed to serialize run report")?;
        container
            .fs_port()
            .write_text(path, &json)
            .await
            .with_context(|| format!("Failed to write run report to {}", path.display()))?;
        info!("Report written to {}", path.display());
    }

    let failures = report.failed_chapters().count();
    if report.aborted {
        return Err(anyhow::anyhow!(
            "Run aborted after {} of {} chapters ({} failed)",
            report.chapters.len(),
            report.chapter_count,
            failures
        ));
    }
    if failures > 0 {
        return Err(anyhow::anyhow!(
            "{} of {} chapters failed",
            failures,
            report.chapter_count
        ));
    }

    info!("Split operation completed successfully");
    Ok(())
}

/// Execute the inspect command
pub async fn inspect(args: InspectArgs, config: &SplitterConfig, container: &dyn AppContainer) -> Result<()> {
    info!("Starting inspect operation");

    let request = InspectRequest {
        video_extension: config.video_extension.clone(),
        ..InspectRequest::with_format(args.info.clone(), args.format)
    };

    let response = container
        .inspect_interactor()
        .execute(request)
        .await
        .with_context(|| format!("Failed to inspect {}", args.info.display()))?;

    print!("{}", response.summary);
    if !response.summary.ends_with('\n') {
        println!();
    }

    info!("Inspect operation completed successfully");
    Ok(())
}

/// Fill in everything the user left out from the metadata document and the media directory
async fn resolve_split_request(
    args: &SplitArgs,
    config: &SplitterConfig,
    container: &dyn AppContainer,
) -> Result<SegmentRequest> {
    let metadata = match &args.info {
        Some(path) => {
            let metadata = container
                .metadata_port()
                .load_metadata(path)
                .await
                .with_context(|| format!("Failed to load metadata from {}", path.display()))?;
            match metadata {
                MediaMetadata::Video(video) => Some(video),
                MediaMetadata::Playlist(playlist) => {
                    return Err(anyhow::anyhow!(
                        "{} describes the playlist '{}' ({} videos); pass the info document of a single video",
                        path.display(),
                        playlist.title,
                        playlist.entries.len()
                    ))
                }
            }
        }
        None => None,
    };

    let media_dir = match (&args.info, &args.video) {
        (Some(info), _) => parent_dir(info),
        (None, Some(video)) => parent_dir(video),
        (None, None) => {
            return Err(anyhow::anyhow!(
                "Nothing to split: pass --info, --video, or both"
            ))
        }
    };

    let title = match (&metadata, &args.video) {
        (Some(video), _) if !video.title.is_empty() => video.title.clone(),
        (_, Some(path)) => path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default(),
        _ => String::new(),
    };
    if title.is_empty() {
        return Err(anyhow::anyhow!(
            "Cannot derive a title; the metadata document has none"
        ));
    }

    let video_path = args
        .video
        .clone()
        .unwrap_or_else(|| MediaLocator::video_path(&media_dir, &title, &config.video_extension));

    let chapters = if !args.chapter.is_empty() {
        args.chapter.clone()
    } else {
        match &metadata {
            Some(video) if video.has_chapters() => video.chapters.clone(),
            _ => {
                return Err(anyhow::anyhow!(
                    "No chapters for '{}': the metadata has none and no --chapter was given",
                    title
                ))
            }
        }
    };

    let subtitle_path = match &args.subtitles {
        Some(path) => Some(path.clone()),
        None => locate_subtitles(&video_path, &title, args.language.as_deref(), container).await?,
    };

    let output_dir = args
        .output
        .clone()
        .unwrap_or_else(|| MediaLocator::default_output_dir(&media_dir, &title));

    let request = SegmentRequest::new(video_path, subtitle_path, chapters, output_dir)?
        .with_video_duration(metadata.as_ref().and_then(|video| video.duration))
        .with_options(config.segment_options());
    Ok(request)
}

/// First existing subtitle candidate next to the source video
async fn locate_subtitles(
    video_path: &Path,
    title: &str,
    language: Option<&str>,
    container: &dyn AppContainer,
) -> Result<Option<PathBuf>> {
    let media_dir = parent_dir(video_path);
    let fs_port = container.fs_port();

    for candidate in MediaLocator::subtitle_candidates(&media_dir, title, language) {
        if fs_port.file_exists(&candidate).await? {
            return Ok(Some(candidate));
        }
    }

    match language {
        Some(language) => warn!(
            "No '{}' subtitles found for '{}' in {}",
            language,
            title,
            media_dir.display()
        ),
        None => info!("No subtitles found for '{}' in {}", title, media_dir.display()),
    }
    Ok(None)
}

fn parent_dir(path: &Path) -> PathBuf {
    path.parent().map(Path::to_path_buf).unwrap_or_default()
}

fn display_report(report: &SegmentReport) {
    println!("Output directory: {}", report.output_dir.display());
    for chapter in &report.chapters {
        println!(
            "  [{}] {}",
            if chapter.is_failed() { "FAIL" } else { " OK " },
            chapter.video.path().display()
        );
        if let ArtifactStatus::Failed { reason, .. } = &chapter.video {
            println!("         video: {}", reason);
        }
        match (&chapter.subtitles, chapter.cue_count) {
            (Some(ArtifactStatus::Failed { reason, .. }), _) => {
                println!("         subtitles: {}", reason);
            }
            (Some(ArtifactStatus::Written { path }), Some(count)) => {
                println!("         {} ({} cues)", path.display(), count);
            }
            _ => {}
        }
    }

    let failures = report.failed_chapters().count();
    println!(
        "{} of {} chapters written{}",
        report.chapters.len() - failures,
        report.chapter_count,
        if report.aborted { " (aborted)" } else { "" }
    );
}
