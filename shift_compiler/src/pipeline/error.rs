use crate::config::ConfigError;
use crate::emitters::FormatError;
use crate::file_processor::FileProcessorError;
use crate::logging::codes;
use crate::resolution::ResolutionError;
use crate::units::DimensionTransformError;
use crate::validation::TokenNameValidationError;

/// Pipeline processing errors, tagged by the stage that failed
#[derive(Debug, Clone, thiserror::Error)]
pub enum PipelineError {
    #[error("File processing failed: {0}")]
    FileProcessing(#[from] FileProcessorError),

    #[error("Name validation failed: {0}")]
    NameValidation(#[from] TokenNameValidationError),

    #[error("Alias resolution failed: {0}")]
    Resolution(#[from] ResolutionError),

    #[error("Dimension normalization failed: {0}")]
    DimensionTransform(#[from] DimensionTransformError),

    #[error("Emission failed: {0}")]
    Format(#[from] FormatError),

    #[error("Configuration failed: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to write {path}: {message}")]
    Output { path: String, message: String },

    #[error("Pipeline error: {message}")]
    Pipeline { message: String },
}

impl PipelineError {
    pub fn pipeline_error(message: &str) -> Self {
        Self::Pipeline {
            message: message.to_string(),
        }
    }

    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            PipelineError::FileProcessing(e) => e.error_code(),
            PipelineError::NameValidation(e) => e.error_code(),
            PipelineError::Resolution(e) => e.error_code(),
            PipelineError::DimensionTransform(e) => e.error_code(),
            PipelineError::Format(e) => e.error_code(),
            PipelineError::Config(e) => e.error_code(),
            PipelineError::Output { .. } => codes::emit::OUTPUT_WRITE_ERROR,
            PipelineError::Pipeline { .. } => codes::system::PIPELINE_FAILURE,
        }
    }

    /// Name of the failing stage
    pub fn stage(&self) -> &'static str {
        match self {
            PipelineError::FileProcessing(_) => "file_processing",
            PipelineError::NameValidation(_) => "validation",
            PipelineError::Resolution(_) => "resolution",
            PipelineError::DimensionTransform(_) => "units",
            PipelineError::Format(_) | PipelineError::Output { .. } => "emit",
            PipelineError::Config(_) => "config",
            PipelineError::Pipeline { .. } => "pipeline",
        }
    }

    /// Token dot-path the error points at, when there is one
    pub fn token_path(&self) -> Option<&str> {
        match self {
            PipelineError::NameValidation(e) => Some(e.path()),
            PipelineError::Resolution(e) => e.path(),
            PipelineError::DimensionTransform(e) => Some(&e.path),
            _ => None,
        }
    }
}
