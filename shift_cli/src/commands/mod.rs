//! Subcommands and the error type they share

pub mod batch;
pub mod build;
pub mod check;

pub use batch::BatchArgs;
pub use build::BuildArgs;
pub use check::CheckArgs;

use clap::Subcommand;
use shift_compiler::config::project::{self, DEFAULT_CONFIG_FILE};
use shift_compiler::config::{ConfigError, ProjectConfig};
use shift_compiler::logging::Code;
use shift_compiler::{BatchError, OutputFormat, PipelineError};
use std::path::Path;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compile one token document into the configured outputs
    Build(BuildArgs),
    /// Validate and resolve a token document without writing anything
    Check(CheckArgs),
    /// Build every token document under a directory
    Batch(BatchArgs),
    /// Print pipeline capabilities and compile-time limits
    Info,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Build(_) => "build",
            Command::Check(_) => "check",
            Command::Batch(_) => "batch",
            Command::Info => "info",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error(transparent)]
    Batch(#[from] BatchError),

    #[error("{failed} of {processed} token documents failed")]
    DocumentsFailed { failed: usize, processed: usize },

    #[error("failed to write to stdout: {0}")]
    Stdout(#[from] std::io::Error),
}

impl CliError {
    pub fn error_code(&self) -> Option<Code> {
        match self {
            CliError::Config(e) => Some(e.error_code()),
            CliError::Pipeline(e) => Some(e.error_code()),
            CliError::Batch(e) => Some(e.error_code()),
            CliError::DocumentsFailed { .. } | CliError::Stdout(_) => None,
        }
    }
}

pub fn execute(command: &Command) -> Result<(), CliError> {
    match command {
        Command::Build(args) => build::execute(args),
        Command::Check(args) => check::execute(args),
        Command::Batch(args) => batch::execute(args),
        Command::Info => {
            crate::report::print_info();
            Ok(())
        }
    }
}

/// `--config` when given, else `shift.toml` in the working directory if present
pub fn load_project(config: Option<&Path>) -> Result<ProjectConfig, ConfigError> {
    match config {
        Some(path) => project::load(path),
        None => project::load_or_default(Path::new(DEFAULT_CONFIG_FILE)),
    }
}

/// Command-line formats in first-seen order, or `None` to keep the project's
fn format_override(formats: &[OutputFormat]) -> Option<Vec<OutputFormat>> {
    let mut unique: Vec<OutputFormat> = Vec::with_capacity(formats.len());
    for format in formats {
        if !unique.contains(format) {
            unique.push(*format);
        }
    }
    (!unique.is_empty()).then_some(unique)
}
