//! Common utilities and helpers

/// Utility functions for chapsplit
pub struct Utils;

impl Utils {
    /// Human-readable video length, e.g. `1 hour, 2 minutes and 5 seconds`
    pub fn format_video_length(seconds: f64) -> String {
        let total = seconds.max(0.0).round() as u64;
        let hours = total / 3600;
        let minutes = (total % 3600) / 60;
        let secs = total % 60;

        let parts: Vec<String> = [(hours, "hour"), (minutes, "minute"), (secs, "second")]
            .into_iter()
            .filter(|(value, _)| *value > 0)
            .map(|(value, unit)| Self::plural(value, unit))
            .collect();

        match parts.as_slice() {
            [] => Self::plural(0, "second"),
            [only] => only.clone(),
            [init @ .., last] => format!("{} and {}", init.join(", "), last),
        }
    }

    fn plural(value: u64, unit: &str) -> String {
        if value == 1 {
            format!("{} {}", value, unit)
        } else {
            format!("{} {}s", value, unit)
        }
    }
}
