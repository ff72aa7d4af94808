// RUNTIME PREFERENCES (User Experience)

use serde::{Deserialize, Serialize};
use std::env;

pub use crate::logging::LogLevel;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelinePreferences {
    /// Whether dimension tokens are normalized before emission
    pub normalize_dimensions: bool,

    /// Whether each stage logs its metrics on completion
    pub log_stage_details: bool,

    /// Whether override counts are included in stage metrics
    pub count_overrides: bool,
}

impl Default for PipelinePreferences {
    fn default() -> Self {
        Self {
            normalize_dimensions: env_flag(env_vars::PIPELINE_NORMALIZE_DIMENSIONS, true),
            log_stage_details: env_flag(env_vars::PIPELINE_LOG_STAGE_DETAILS, false),
            count_overrides: env_flag(env_vars::PIPELINE_COUNT_OVERRIDES, true),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingPreferences {
    /// Whether to use structured JSON logging
    pub use_structured_logging: bool,

    /// Whether to enable console output
    pub enable_console_logging: bool,

    /// Minimum level emitted by the global logging service
    pub min_log_level: LogLevel,

    /// Whether to include timing metrics in logs
    pub log_performance_events: bool,

    /// Whether to enable cargo-style error reporting
    pub enable_cargo_style_output: bool,

    /// Whether to include file context in log messages
    pub include_file_context: bool,
}

impl Default for LoggingPreferences {
    fn default() -> Self {
        Self {
            use_structured_logging: env_flag(env_vars::LOGGING_USE_STRUCTURED, false),
            enable_console_logging: env_flag(env_vars::LOGGING_ENABLE_CONSOLE, false),
            min_log_level: env::var(env_vars::LOGGING_MIN_LEVEL)
                .ok()
                .and_then(|v| parse_log_level(&v))
                .unwrap_or(LogLevel::Info),
            log_performance_events: env_flag(env_vars::LOGGING_LOG_PERFORMANCE, true),
            enable_cargo_style_output: env_flag(env_vars::LOGGING_CARGO_STYLE, true),
            include_file_context: env_flag(env_vars::LOGGING_INCLUDE_FILE_CONTEXT, true),
        }
    }
}

/// Parse log level from string (used for environment variables)
pub fn parse_log_level(level: &str) -> Option<LogLevel> {
    match level.to_lowercase().as_str() {
        "error" | "0" => Some(LogLevel::Error),
        "warning" | "warn" | "1" => Some(LogLevel::Warning),
        "info" | "2" => Some(LogLevel::Info),
        "debug" | "3" => Some(LogLevel::Debug),
        _ => None,
    }
}

fn env_flag(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuntimeConfig {
    pub pipeline: PipelinePreferences,
    pub logging: LoggingPreferences,
}

/// Environment variable names for configuration
pub mod env_vars {
    // Pipeline
    pub const PIPELINE_NORMALIZE_DIMENSIONS: &str = "SHIFT_NORMALIZE_DIMENSIONS";
    pub const PIPELINE_LOG_STAGE_DETAILS: &str = "SHIFT_LOG_STAGE_DETAILS";
    pub const PIPELINE_COUNT_OVERRIDES: &str = "SHIFT_COUNT_OVERRIDES";

    // Logging
    pub const LOGGING_USE_STRUCTURED: &str = "SHIFT_LOGGING_USE_STRUCTURED";
    pub const LOGGING_ENABLE_CONSOLE: &str = "SHIFT_LOGGING_ENABLE_CONSOLE";
    pub const LOGGING_MIN_LEVEL: &str = "SHIFT_LOGGING_MIN_LEVEL";
    pub const LOGGING_LOG_PERFORMANCE: &str = "SHIFT_LOGGING_LOG_PERFORMANCE";
    pub const LOGGING_CARGO_STYLE: &str = "SHIFT_LOGGING_CARGO_STYLE";
    pub const LOGGING_INCLUDE_FILE_CONTEXT: &str = "SHIFT_LOGGING_INCLUDE_FILE_CONTEXT";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(parse_log_level("error"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("ERROR"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("0"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("warn"), Some(LogLevel::Warning));
        assert_eq!(parse_log_level("warning"), Some(LogLevel::Warning));
        assert_eq!(parse_log_level("info"), Some(LogLevel::Info));
        assert_eq!(parse_log_level("debug"), Some(LogLevel::Debug));
        assert_eq!(parse_log_level("3"), Some(LogLevel::Debug));
        assert_eq!(parse_log_level("invalid"), None);
    }

    #[test]
    fn test_env_flag_falls_back_to_default() {
        assert!(env_flag("SHIFT_TEST_UNSET_FLAG_FOR_DEFAULTS", true));
        assert!(!env_flag("SHIFT_TEST_UNSET_FLAG_FOR_DEFAULTS", false));
    }

    #[test]
    fn test_env_var_names_are_prefixed() {
        for name in [
            env_vars::PIPELINE_NORMALIZE_DIMENSIONS,
            env_vars::PIPELINE_LOG_STAGE_DETAILS,
            env_vars::LOGGING_MIN_LEVEL,
            env_vars::LOGGING_CARGO_STYLE,
        ] {
            assert!(name.starts_with("SHIFT_"));
        }
    }
}
