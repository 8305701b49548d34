//! Subtitle track handling
//!
//! Only SubRip is supported: a source track is parsed into
//! [`SubtitleCue`](crate::domain::model::SubtitleCue) values and per-chapter
//! tracks are rendered back to SubRip text.

pub mod srt;

pub use srt::{parse_srt, parse_timestamp, render_srt};
