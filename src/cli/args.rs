//! Command-line argument definitions

use std::path::PathBuf;

use clap::Args;

use crate::app::inspect_interactor::OutputFormat;
use crate::domain::model::{Chapter, CueBoundary, FailurePolicy};

/// Arguments for the split command
#[derive(Args, Debug)]
pub struct SplitArgs {
    /// Metadata document (`<title>.info.json`) supplying title, chapters and duration
    #[arg(short, long)]
    pub info: Option<PathBuf>,

    /// Source video (default: `<title>.<ext>` next to the metadata document)
    #[arg(short, long)]
    pub video: Option<PathBuf>,

    /// Full-length SubRip track (default: located next to the source video)
    #[arg(short, long)]
    pub subtitles: Option<PathBuf>,

    /// Subtitle language to look for when locating the track
    #[arg(short, long)]
    pub language: Option<String>,

    /// Chapter as `START-END=TITLE`, times in seconds; repeat in order
    #[arg(short, long = "chapter", value_parser = parse_chapter)]
    pub chapter: Vec<Chapter>,

    /// Output directory (default: `<media dir>/<title>`)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write the run report as JSON to this file
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// ffmpeg executable
    #[arg(long)]
    pub ffmpeg: Option<String>,

    /// Extension of the source and chapter video files
    #[arg(long)]
    pub video_extension: Option<String>,

    /// What to do after a chapter fails (continue, abort)
    #[arg(long, value_parser = parse_failure_policy)]
    pub failure_policy: Option<FailurePolicy>,

    /// Chapter membership rule for cues (inclusive, half-open)
    #[arg(long, value_parser = parse_cue_boundary)]
    pub cue_boundary: Option<CueBoundary>,

    /// Fail a chapter instead of replacing an existing clip
    #[arg(long)]
    pub no_overwrite: bool,
}

/// Arguments for the inspect command
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Metadata document to inspect
    #[arg(short, long)]
    pub info: PathBuf,

    /// Output format (text, json, yaml)
    #[arg(short, long, default_value = "text", value_parser = parse_output_format)]
    pub format: OutputFormat,
}

fn parse_chapter(value: &str) -> Result<Chapter, String> {
    Chapter::parse_spec(value).map_err(|e| e.to_string())
}

fn parse_failure_policy(value: &str) -> Result<FailurePolicy, String> {
    FailurePolicy::parse(value).map_err(|e| e.to_string())
}

fn parse_cue_boundary(value: &str) -> Result<CueBoundary, String> {
    CueBoundary::parse(value).map_err(|e| e.to_string())
}

fn parse_output_format(value: &str) -> Result<OutputFormat, String> {
    OutputFormat::parse(value).map_err(|e| e.to_string())
}
