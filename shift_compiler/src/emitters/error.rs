use super::OutputFormat;
use crate::logging::codes;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatErrorKind {
    /// A leaf and a group claim the same nested path
    PathCollision,
    Serialization,
    Unsupported,
}

/// Emission failure for one output format
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{format} output failed: {cause}")]
pub struct FormatError {
    pub format: OutputFormat,
    pub kind: FormatErrorKind,
    pub cause: String,
}

impl FormatError {
    pub fn path_collision(format: OutputFormat, cause: impl Into<String>) -> Self {
        Self {
            format,
            kind: FormatErrorKind::PathCollision,
            cause: cause.into(),
        }
    }

    pub fn serialization(format: OutputFormat, cause: impl Into<String>) -> Self {
        Self {
            format,
            kind: FormatErrorKind::Serialization,
            cause: cause.into(),
        }
    }

    pub fn unsupported(format: OutputFormat) -> Self {
        Self {
            format,
            kind: FormatErrorKind::Unsupported,
            cause: format!("no emitter registered for '{}'", format),
        }
    }

    pub fn error_code(&self) -> crate::logging::Code {
        match self.kind {
            FormatErrorKind::PathCollision => codes::emit::PATH_COLLISION,
            FormatErrorKind::Serialization => codes::emit::SERIALIZATION_ERROR,
            FormatErrorKind::Unsupported => codes::emit::UNSUPPORTED_FORMAT,
        }
    }
}

pub type FormatResult<T> = Result<T, FormatError>;
