use crate::logging::codes;

/// A dimension token whose value is not a valid CSS length
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{cause} (at \"{path}\")")]
pub struct DimensionTransformError {
    /// Dot-path of the token, `<path>[<name>]` for overrides
    pub path: String,
    pub cause: String,
}

impl DimensionTransformError {
    pub fn invalid_value(path: &str, value: impl std::fmt::Display) -> Self {
        Self {
            path: path.to_string(),
            cause: format!("Invalid dimension value: {}", value),
        }
    }

    pub fn error_code(&self) -> crate::logging::Code {
        codes::units::INVALID_DIMENSION
    }
}

pub type UnitsResult<T> = Result<T, DimensionTransformError>;
