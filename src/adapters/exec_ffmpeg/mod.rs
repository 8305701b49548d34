//! FFmpeg execution adapter
//!
//! Cuts chapter clips by running the external `ffmpeg` binary in stream-copy mode.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;

/// Lines of ffmpeg stderr kept in a failure message
const STDERR_TAIL_LINES: usize = 5;

/// FFmpeg-based trim adapter
pub struct FFmpegAdapter {
    binary: String,
    overwrite: bool,
}

impl FFmpegAdapter {
    /// Create new FFmpeg adapter
    pub fn new(binary: impl Into<String>, overwrite: bool) -> Result<Self, DomainError> {
        let binary = binary.into();
        if binary.trim().is_empty() {
            return Err(DomainError::BadArgs("ffmpeg path cannot be empty".to_string()));
        }
        Ok(Self { binary, overwrite })
    }

    /// Arguments for a stream-copy cut of `[start, end]`
    pub fn build_args(&self, input: &Path, start: TimeSpec, end: TimeSpec, output: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec!["-hide_banner".into(), "-loglevel".into(), "error".into()];
        args.push(if self.overwrite { "-y" } else { "-n" }.into());
        args.extend([
            "-ss".into(),
            start.to_arg().into(),
            "-to".into(),
            end.to_arg().into(),
            "-i".into(),
            input.as_os_str().to_os_string(),
            "-map".into(),
            "0".into(),
            "-c".into(),
            "copy".into(),
            output.as_os_str().to_os_string(),
        ]);
        args
    }

    fn stderr_tail(stderr: &[u8]) -> String {
        let text = String::from_utf8_lossy(stderr);
        let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
        lines[lines.len().saturating_sub(STDERR_TAIL_LINES)..].join(" | ")
    }
}

#[async_trait]
impl TrimPort for FFmpegAdapter {
    async fn trim(
        &self,
        input: &Path,
        start: TimeSpec,
        end: TimeSpec,
        output: &Path,
    ) -> Result<PathBuf, DomainError> {
        let args = self.build_args(input, start, end, output);
        debug!("Running {} {:?}", self.binary, args);

        let result = Command::new(&self.binary)
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| {
                DomainError::TrimFailed(format!("failed to launch '{}': {}", self.binary, e))
            })?;

        if !result.status.success() {
            let code = result
                .status
                .code()
                .map(|c| c.to_string())
                .unwrap_or_else(|| "signal".to_string());
            return Err(DomainError::TrimFailed(format!(
                "{} exited with status {}: {}",
                self.binary,
                code,
                Self::stderr_tail(&result.stderr)
            )));
        }

        Ok(output.to_path_buf())
    }
}
