// Tracing log adapter - Structured logging using tracing crate

use async_trait::async_trait;
use tracing::{debug, error, info, warn};

use crate::ports::*;

/// Tracing log adapter
///
/// The subscriber itself is installed once by the binary; this adapter only
/// forwards interactor messages to it under the `chapsplit` target.
pub struct TracingLogAdapter;

impl TracingLogAdapter {
    /// Create new tracing log adapter
    pub fn new() -> Self {
        Self
    }
}

impl Default for TracingLogAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LogPort for TracingLogAdapter {
    async fn info(&self, message: &str) {
        info!(target: "chapsplit", "{}", message);
    }

    async fn warn(&self, message: &str) {
        warn!(target: "chapsplit", "{}", message);
    }

    async fn error(&self, message: &str) {
        error!(target: "chapsplit", "{}", message);
    }

    async fn debug(&self, message: &str) {
        debug!(target: "chapsplit", "{}", message);
    }
}
