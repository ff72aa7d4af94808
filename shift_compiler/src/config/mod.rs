//! Configuration module for the Shift compiler
//!
//! Three layers:
//! - compile-time limits generated by build.rs from `config/<profile>.toml`
//! - runtime preferences read from `SHIFT_*` environment variables
//! - project configuration (`shift.toml`) supplied by the caller

// Include generated constants from build.rs
include!(concat!(env!("OUT_DIR"), "/constants.rs"));

pub mod project;
pub mod runtime;

pub use project::{ConfigError, OutputConfig, ProjectConfig};
pub use runtime::{LogLevel, LoggingPreferences, PipelinePreferences, RuntimeConfig};

/// Build information and configuration metadata
pub mod build_info {
    /// Returns the configuration profile used during build
    pub fn profile() -> &'static str {
        option_env!("SHIFT_BUILD_PROFILE").unwrap_or("development")
    }

    /// Returns the configuration directory used during build
    pub fn config_dir() -> &'static str {
        option_env!("SHIFT_CONFIG_DIR").unwrap_or("config")
    }

    /// Returns configuration source information
    pub fn source_info() -> String {
        format!("Generated from {}/{}.toml", config_dir(), profile())
    }
}
