//! CLI module for chapsplit
//!
//! This module handles command-line argument parsing and command execution.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

pub mod args;
pub mod commands;

pub use args::{InspectArgs, SplitArgs};

/// chapsplit - cut a downloaded video and its subtitles into chapters
///
/// Each chapter becomes a stream-copied clip plus a subtitle file whose cue
/// times start at zero, named `<ordinal>. <title>` in list order.
#[derive(Parser, Debug)]
#[command(name = "chapsplit")]
#[command(about = "Split a video and its subtitle track into per-chapter files")]
#[command(version)]
#[command(long_about = None)]
pub struct Cli {
    /// Logging level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log line format
    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    pub log_format: LogFormat,

    /// Configuration file (default: ./chapsplit.toml when present)
    #[arg(long, env = "CHAPSPLIT_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// The command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Cut a video and its subtitles into one file pair per chapter
    Split(SplitArgs),
    /// Show what a metadata document describes
    Inspect(InspectArgs),
}

/// Format of diagnostic log lines on stderr
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}
