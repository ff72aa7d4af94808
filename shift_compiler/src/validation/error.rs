//! Token name validation errors

use crate::logging::codes;
use thiserror::Error;

pub type ValidationResult<T> = Result<T, TokenNameValidationError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenNameValidationError {
    /// A key outside `[A-Z0-9_]+`; `path` includes the key itself
    #[error("{message}")]
    InvalidName {
        path: String,
        key: String,
        message: String,
    },

    #[error("Token group at \"{path}\" is nested {depth} levels deep, maximum allowed is {max}")]
    DepthExceeded {
        path: String,
        depth: usize,
        max: usize,
    },
}

impl TokenNameValidationError {
    pub fn invalid_name(path: &str, key: &str) -> Self {
        Self::InvalidName {
            path: path.to_string(),
            key: key.to_string(),
            message: format!(
                "Invalid token name at \"{}\": keys must contain uppercase letters, digits and underscores only",
                path
            ),
        }
    }

    pub fn depth_exceeded(path: &str, depth: usize, max: usize) -> Self {
        Self::DepthExceeded {
            path: path.to_string(),
            depth,
            max,
        }
    }

    /// Dot-path of the offending key or group
    pub fn path(&self) -> &str {
        match self {
            Self::InvalidName { path, .. } | Self::DepthExceeded { path, .. } => path,
        }
    }

    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            Self::InvalidName { .. } => codes::validation::INVALID_TOKEN_NAME,
            Self::DepthExceeded { .. } => codes::validation::GROUP_DEPTH_EXCEEDED,
        }
    }
}
