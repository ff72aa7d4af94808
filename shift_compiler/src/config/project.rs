//! Project configuration (`shift.toml`)
//!
//! Themes and breakpoints are build inputs supplied by the caller; they are
//! never read from the token document itself.

use crate::emitters::{EmitterContext, OutputFormat};
use crate::logging::codes;
use crate::model::{BreakpointConfig, ThemeConfig};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Default project configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "shift.toml";

/// Project configuration errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {message}")]
    Read { path: String, message: String },

    #[error("failed to parse config {path}: {message}")]
    Parse { path: String, message: String },

    #[error("invalid config {path}: {message}")]
    Invalid { path: String, message: String },
}

impl ConfigError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            ConfigError::Read { .. } => codes::config::CONFIG_READ_ERROR,
            ConfigError::Parse { .. } => codes::config::CONFIG_PARSE_ERROR,
            ConfigError::Invalid { .. } => codes::config::CONFIG_INVALID,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
pub struct ProjectConfig {
    #[serde(default)]
    pub themes: ThemeConfig,
    #[serde(default)]
    pub breakpoints: BreakpointConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
    #[serde(default = "default_basename")]
    pub basename: String,
    #[serde(default = "default_formats")]
    pub formats: Vec<OutputFormat>,
}

impl ProjectConfig {
    /// Emitter context carrying this project's themes and breakpoints
    pub fn emitter_context(&self) -> EmitterContext {
        EmitterContext::new()
            .with_themes(self.themes.clone())
            .with_breakpoints(self.breakpoints.clone())
    }

    fn validate(&self, path: &Path) -> Result<(), ConfigError> {
        let invalid = |message: String| ConfigError::Invalid {
            path: path.display().to_string(),
            message,
        };

        if self.output.basename.trim().is_empty() {
            return Err(invalid("output.basename must not be empty".to_string()));
        }
        if self.output.formats.is_empty() {
            return Err(invalid("output.formats must list at least one format".to_string()));
        }
        for (name, selector) in self.themes.iter() {
            if selector.trim().is_empty() {
                return Err(invalid(format!("theme '{}' has an empty selector", name)));
            }
        }
        for (name, condition) in self.breakpoints.iter() {
            if condition.trim().is_empty() {
                return Err(invalid(format!(
                    "breakpoint '{}' has an empty media condition",
                    name
                )));
            }
        }
        Ok(())
    }
}

impl OutputConfig {
    /// Output file path for a format
    pub fn path_for(&self, format: OutputFormat) -> PathBuf {
        self.dir
            .join(format!("{}.{}", self.basename, format.file_suffix()))
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            basename: default_basename(),
            formats: default_formats(),
        }
    }
}

/// Load and validate a project configuration file
pub fn load(path: &Path) -> Result<ProjectConfig, ConfigError> {
    let text = fs::read_to_string(path).map_err(|err| ConfigError::Read {
        path: path.display().to_string(),
        message: err.to_string(),
    })?;
    let config = parse(&text, path)?;

    crate::log_debug!("Project configuration loaded",
        "path" => path.display(),
        "themes" => config.themes.len(),
        "breakpoints" => config.breakpoints.len(),
        "formats" => config.output.formats.len()
    );

    Ok(config)
}

/// Load `path` when it exists, otherwise fall back to defaults
pub fn load_or_default(path: &Path) -> Result<ProjectConfig, ConfigError> {
    if path.exists() {
        load(path)
    } else {
        Ok(ProjectConfig::default())
    }
}

/// Parse configuration text; `path` is used for error reporting only
pub fn parse(text: &str, path: &Path) -> Result<ProjectConfig, ConfigError> {
    let config: ProjectConfig = toml::from_str(text).map_err(|err| ConfigError::Parse {
        path: path.display().to_string(),
        message: err.to_string(),
    })?;
    config.validate(path)?;
    Ok(config)
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("dist")
}

fn default_basename() -> String {
    "tokens".to_string()
}

fn default_formats() -> Vec<OutputFormat> {
    OutputFormat::all().to_vec()
}
