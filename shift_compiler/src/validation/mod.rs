//! Token name validation
//!
//! Every key at every depth must match `[A-Z0-9_]+`. The walk is depth-first
//! in document order and stops at the first violation. Keys inside a token's
//! `themes` and `breakpoints` maps are caller-chosen names and are not checked.

pub mod error;

pub use error::{TokenNameValidationError, ValidationResult};

use crate::config::compile_time::tokens::MAX_GROUP_DEPTH;
use crate::model::{is_valid_token_name, TokenGroup, TokenNode};
use crate::utils::path::child_path;
use crate::logging::codes;
use crate::{log_debug, log_error, log_success};

/// Validate every key of `group` against the build's group depth limit
pub fn validate(group: &TokenGroup) -> ValidationResult<()> {
    validate_with_max_depth(group, MAX_GROUP_DEPTH)
}

/// Validate with an explicit nesting limit
pub fn validate_with_max_depth(group: &TokenGroup, max_depth: usize) -> ValidationResult<()> {
    log_debug!("Validating token names",
        "top_level_keys" => group.len(),
        "max_depth" => max_depth
    );

    visit(group, "", 1, max_depth).map_err(|err| {
        log_error!(err.error_code(), &err.to_string(),
            path = err.path(),
            "stage" => "validation"
        );
        err
    })?;

    log_success!(codes::success::NAME_VALIDATION_PASSED, "Token names validated",
        "tokens" => group.leaf_count(),
        "depth" => group.depth()
    );
    Ok(())
}

fn visit(group: &TokenGroup, prefix: &str, depth: usize, max_depth: usize) -> ValidationResult<()> {
    if depth > max_depth {
        return Err(TokenNameValidationError::depth_exceeded(
            prefix, depth, max_depth,
        ));
    }

    for (key, node) in group.iter() {
        let path = child_path(prefix, key);
        if !is_valid_token_name(key) {
            return Err(TokenNameValidationError::invalid_name(&path, key));
        }
        if let TokenNode::Group(child) = node {
            visit(child, &path, depth + 1, max_depth)?;
        }
    }

    Ok(())
}
