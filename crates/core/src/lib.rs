pub mod config;
pub mod progress;

pub use config::{AppConfig, ConfigError, ConfigOverrides, LoadOptions, LogFormat};
pub use progress::{Achievement, ProgressError, ReportStatus};
