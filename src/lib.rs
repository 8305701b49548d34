//! chapsplit library
//!
//! Splits a video and its SubRip subtitle track into per-chapter files.
//! Video cuts are delegated to ffmpeg in stream-copy mode; subtitle cues are
//! partitioned by start time and re-based to each chapter's origin.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config_initialization;
pub mod domain;
pub mod error;
pub mod ports;
pub mod subtitle;
pub mod utils;

// Re-export commonly used types
pub use app::{AppContainer, DefaultAppContainer, InspectInteractor, SplitInteractor};
pub use domain::errors::DomainError;
pub use domain::model::{
    Chapter, CueBoundary, CueTime, FailurePolicy, MediaMetadata, SegmentReport, SegmentRequest,
    SubtitleCue, VideoMetadata,
};
pub use error::{SplitterError, SplitterResult};
