//! Configuration initialization and hierarchy management

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::adapters::TomlConfigAdapter;
use crate::cli::{Cli, Commands};
use crate::domain::errors::DomainError;
use crate::domain::model::{CueBoundary, FailurePolicy, SegmentOptions};

/// File looked up in the working directory when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "chapsplit.toml";

/// Effective configuration after all layers are merged
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitterConfig {
    /// ffmpeg executable name or path
    pub ffmpeg_path: String,
    /// Extension of source and per-chapter video files
    pub video_extension: String,
    pub failure_policy: FailurePolicy,
    pub cue_boundary: CueBoundary,
    /// Replace existing chapter clips instead of failing the chapter
    pub overwrite: bool,
    pub log_level: String,
}

impl Default for SplitterConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: "ffmpeg".to_string(),
            video_extension: "mp4".to_string(),
            failure_policy: FailurePolicy::Continue,
            cue_boundary: CueBoundary::Inclusive,
            overwrite: true,
            log_level: "info".to_string(),
        }
    }
}

/// One configuration layer; unset fields defer to the layer below
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigOverrides {
    pub ffmpeg_path: Option<String>,
    pub video_extension: Option<String>,
    pub failure_policy: Option<FailurePolicy>,
    pub cue_boundary: Option<CueBoundary>,
    pub overwrite: Option<bool>,
    pub log_level: Option<String>,
}

impl SplitterConfig {
    /// Apply a higher-precedence layer on top of this one
    pub fn apply(&mut self, overrides: ConfigOverrides) {
        if let Some(v) = overrides.ffmpeg_path {
            self.ffmpeg_path = v;
        }
        if let Some(v) = overrides.video_extension {
            self.video_extension = v.trim_start_matches('.').to_string();
        }
        if let Some(v) = overrides.failure_policy {
            self.failure_policy = v;
        }
        if let Some(v) = overrides.cue_boundary {
            self.cue_boundary = v;
        }
        if let Some(v) = overrides.overwrite {
            self.overwrite = v;
        }
        if let Some(v) = overrides.log_level {
            self.log_level = v;
        }
    }

    /// Validate merged configuration
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.ffmpeg_path.trim().is_empty() {
            return Err(DomainError::BadArgs("ffmpeg_path cannot be empty".to_string()));
        }
        if self.video_extension.is_empty()
            || !self.video_extension.chars().all(|c| c.is_ascii_alphanumeric())
        {
            return Err(DomainError::BadArgs(format!(
                "Invalid video extension: '{}'",
                self.video_extension
            )));
        }
        if self.video_extension.eq_ignore_ascii_case("srt") {
            return Err(DomainError::BadArgs(
                "video_extension cannot be 'srt'; chapter subtitles use that extension".to_string(),
            ));
        }
        match self.log_level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
            other => Err(DomainError::BadArgs(format!(
                "Invalid log level: {}. Valid levels: trace, debug, info, warn, error",
                other
            ))),
        }
    }

    /// Segmenter options carried by this configuration
    pub fn segment_options(&self) -> SegmentOptions {
        SegmentOptions {
            failure_policy: self.failure_policy,
            cue_boundary: self.cue_boundary,
            video_extension: self.video_extension.clone(),
        }
    }
}

/// Initialize configuration hierarchy following precedence: CLI > Env > File > Defaults
pub fn initialize_configuration_hierarchy(cli: &Cli) -> Result<SplitterConfig> {
    let mut config = SplitterConfig::default();

    if let Some(path) = config_file_path(cli.config.as_deref())? {
        let file_layer = TomlConfigAdapter::new()
            .load_file(&path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
        config.apply(file_layer);
    }

    config.apply(load_environment_variables(|key| std::env::var(key).ok())?);
    config.apply(cli_configuration_overrides(cli));

    config.validate().context("Invalid configuration")?;
    Ok(config)
}

/// Explicit `--config` must exist; the default file is optional
fn config_file_path(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
    match explicit {
        Some(path) if path.is_file() => Ok(Some(path.to_path_buf())),
        Some(path) => Err(anyhow::anyhow!(
            "Configuration file does not exist: {}",
            path.display()
        )),
        None => {
            let default = PathBuf::from(DEFAULT_CONFIG_FILE);
            Ok(default.is_file().then_some(default))
        }
    }
}

/// Read `CHAPSPLIT_*` variables through `lookup`
pub fn load_environment_variables(
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<ConfigOverrides, DomainError> {
    let failure_policy = lookup("CHAPSPLIT_FAILURE_POLICY")
        .map(|v| FailurePolicy::parse(&v))
        .transpose()?;
    let cue_boundary = lookup("CHAPSPLIT_CUE_BOUNDARY")
        .map(|v| CueBoundary::parse(&v))
        .transpose()?;
    let overwrite = lookup("CHAPSPLIT_OVERWRITE")
        .map(|v| parse_bool("CHAPSPLIT_OVERWRITE", &v))
        .transpose()?;

    Ok(ConfigOverrides {
        ffmpeg_path: lookup("CHAPSPLIT_FFMPEG"),
        video_extension: lookup("CHAPSPLIT_VIDEO_EXTENSION"),
        failure_policy,
        cue_boundary,
        overwrite,
        log_level: lookup("CHAPSPLIT_LOG_LEVEL"),
    })
}

fn parse_bool(key: &str, value: &str) -> Result<bool, DomainError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(DomainError::BadArgs(format!(
            "Invalid boolean value for {}: {}",
            key, value
        ))),
    }
}

/// CLI argument overrides
fn cli_configuration_overrides(cli: &Cli) -> ConfigOverrides {
    let mut overrides = ConfigOverrides {
        log_level: cli.log_level.clone(),
        ..Default::default()
    };

    if let Commands::Split(args) = &cli.command {
        overrides.ffmpeg_path = args.ffmpeg.clone();
        overrides.video_extension = args.video_extension.clone();
        overrides.failure_policy = args.failure_policy;
        overrides.cue_boundary = args.cue_boundary;
        if args.no_overwrite {
            overrides.overwrite = Some(false);
        }
    }

    overrides
}
