//! # Shift CLI
//!
//! `shift build`, `shift check` and `shift batch` on top of `shift_compiler`.
//! Library events are forwarded into the `log` facade and printed by
//! `env_logger`; errors and warnings are also summarized cargo style.

pub mod cli;
pub mod commands;
pub mod report;

use shift_compiler::config::LoggingPreferences;
use shift_compiler::logging::{self, LogLevel};
use shift_compiler::pipeline;
use std::sync::Arc;

/// `log` filter and compiler level for a `-v` count
pub fn verbosity_levels(verbose: u8) -> (&'static str, Option<LogLevel>) {
    match verbose {
        0 => ("warn", None),
        1 => ("info", Some(LogLevel::Info)),
        _ => ("debug", Some(LogLevel::Debug)),
    }
}

/// Install env_logger, the compiler's global logging service and run the
/// pipeline self-check
pub fn init_logging(verbose: u8) -> Result<(), String> {
    let (filter, level) = verbosity_levels(verbose);

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter))
        .format_target(false)
        .try_init()
        .map_err(|e| e.to_string())?;

    let mut preferences = LoggingPreferences::default();
    if let Some(level) = level {
        preferences.min_log_level = level;
    }
    logging::config::init_runtime_preferences(preferences)?;

    logging::init_global_logging_with_service(Arc::new(
        logging::service::create_facade_service(),
    ))?;

    pipeline::validate_pipeline()
}
