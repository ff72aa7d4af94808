//! Resolution errors

use crate::logging::codes;
use thiserror::Error;

pub type ResolutionResult<T> = Result<T, ResolutionError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionError {
    /// Alias target does not exist; override paths read `TOKEN.PATH[name]`
    #[error("Alias at \"{path}\" refers to unknown token \"{target}\"")]
    AliasResolution { path: String, target: String },

    #[error("Alias cycle at \"{path}\": {}", .chain.join(" -> "))]
    AliasCycle { path: String, chain: Vec<String> },

    #[error("Alias chain starting at \"{path}\" exceeds maximum depth of {max}")]
    AliasDepthExceeded { path: String, max: usize },

    #[error("Document contains {count} tokens, maximum allowed is {max}")]
    TooManyTokens { count: usize, max: usize },
}

impl ResolutionError {
    pub fn alias_resolution(path: &str, target: &str) -> Self {
        Self::AliasResolution {
            path: path.to_string(),
            target: target.to_string(),
        }
    }

    pub fn path(&self) -> Option<&str> {
        match self {
            Self::AliasResolution { path, .. }
            | Self::AliasCycle { path, .. }
            | Self::AliasDepthExceeded { path, .. } => Some(path),
            Self::TooManyTokens { .. } => None,
        }
    }

    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            Self::AliasResolution { .. } => codes::resolution::UNRESOLVED_ALIAS,
            Self::AliasCycle { .. } => codes::resolution::ALIAS_CYCLE,
            Self::AliasDepthExceeded { .. } => codes::resolution::ALIAS_DEPTH_EXCEEDED,
            Self::TooManyTokens { .. } => codes::resolution::TOO_MANY_TOKENS,
        }
    }
}
