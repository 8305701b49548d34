// Adapters - External system implementations

pub mod exec_ffmpeg;
pub mod fs_local;
pub mod info_json;
pub mod toml_config;
pub mod tracing_log;

// Re-export adapters
pub use exec_ffmpeg::FFmpegAdapter;
pub use fs_local::FsLocalAdapter;
pub use info_json::InfoJsonAdapter;
pub use toml_config::TomlConfigAdapter;
pub use tracing_log::TracingLogAdapter;
