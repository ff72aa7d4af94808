//! Error and success codes with their classification metadata
//!
//! Every code constant has exactly one registry row. Stage error types map
//! themselves onto these codes through their `error_code()` methods.

use std::collections::HashMap;
use std::sync::OnceLock;

/// Code wrapper shared by error, warning and success events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical = 0,
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Critical" => Some(Severity::Critical),
            "High" => Some(Severity::High),
            "Medium" => Some(Severity::Medium),
            "Low" => Some(Severity::Low),
            _ => None,
        }
    }
}

/// Complete metadata for a code
#[derive(Debug, Clone)]
pub struct ErrorMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub recoverable: bool,
    pub requires_halt: bool,
    pub description: &'static str,
    pub recommended_action: &'static str,
}

impl ErrorMetadata {
    pub const fn new(
        code: &'static str,
        category: &'static str,
        severity: Severity,
        recoverable: bool,
        requires_halt: bool,
        description: &'static str,
        recommended_action: &'static str,
    ) -> Self {
        Self {
            code,
            category,
            severity,
            recoverable,
            requires_halt,
            description,
            recommended_action,
        }
    }
}

// ============================================================================
// ERROR CODE CONSTANTS
// ============================================================================

pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
    pub const PIPELINE_FAILURE: Code = Code::new("ERR003");
}

pub mod file_processing {
    use super::Code;

    pub const FILE_NOT_FOUND: Code = Code::new("E005");
    pub const UNSUPPORTED_EXTENSION: Code = Code::new("E006");
    pub const FILE_TOO_LARGE: Code = Code::new("E007");
    pub const EMPTY_FILE: Code = Code::new("E008");
    pub const PERMISSION_DENIED: Code = Code::new("E009");
    pub const INVALID_ENCODING: Code = Code::new("E010");
    pub const IO_ERROR: Code = Code::new("E011");
    pub const INVALID_PATH: Code = Code::new("E012");
}

/// Document parsing and structure
pub mod document {
    use super::Code;

    pub const PARSE_ERROR: Code = Code::new("E020");
    pub const MALFORMED_DOCUMENT: Code = Code::new("E021");
    pub const NOT_A_GROUP: Code = Code::new("E022");
}

/// Token name validation
pub mod validation {
    use super::Code;

    pub const INVALID_TOKEN_NAME: Code = Code::new("E030");
    pub const GROUP_DEPTH_EXCEEDED: Code = Code::new("E031");
}

/// Alias and override resolution
pub mod resolution {
    use super::Code;

    pub const UNRESOLVED_ALIAS: Code = Code::new("E040");
    pub const ALIAS_CYCLE: Code = Code::new("E041");
    pub const ALIAS_DEPTH_EXCEEDED: Code = Code::new("E042");
    pub const TOO_MANY_TOKENS: Code = Code::new("E043");
}

/// Dimension normalization
pub mod units {
    use super::Code;

    pub const INVALID_DIMENSION: Code = Code::new("E050");
}

/// Output emission
pub mod emit {
    use super::Code;

    pub const PATH_COLLISION: Code = Code::new("E060");
    pub const SERIALIZATION_ERROR: Code = Code::new("E061");
    pub const UNSUPPORTED_FORMAT: Code = Code::new("E062");
    pub const OUTPUT_WRITE_ERROR: Code = Code::new("E063");
}

/// Project configuration
pub mod config {
    use super::Code;

    pub const CONFIG_READ_ERROR: Code = Code::new("E070");
    pub const CONFIG_PARSE_ERROR: Code = Code::new("E071");
    pub const CONFIG_INVALID: Code = Code::new("E072");
}

/// Directory builds
pub mod batch {
    use super::Code;

    pub const DIRECTORY_NOT_FOUND: Code = Code::new("E080");
    pub const NOT_A_DIRECTORY: Code = Code::new("E081");
    pub const DISCOVERY_FAILED: Code = Code::new("E082");
    pub const WORKER_FAILURE: Code = Code::new("E083");
}

// ============================================================================
// SUCCESS CODE CONSTANTS
// ============================================================================

pub mod success {
    use super::Code;

    pub const OPERATION_COMPLETED_SUCCESSFULLY: Code = Code::new("I001");
    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I004");
    pub const FILE_PROCESSING_SUCCESS: Code = Code::new("I006");
    pub const DOCUMENT_PARSED: Code = Code::new("I020");
    pub const NAME_VALIDATION_PASSED: Code = Code::new("I030");
    pub const RESOLUTION_COMPLETE: Code = Code::new("I040");
    pub const DIMENSIONS_NORMALIZED: Code = Code::new("I050");
    pub const EMIT_COMPLETE: Code = Code::new("I060");
    pub const OUTPUT_WRITTEN: Code = Code::new("I061");
    pub const CONFIG_LOADED: Code = Code::new("I070");
    pub const BATCH_COMPLETE: Code = Code::new("I080");
}

// ============================================================================
// METADATA REGISTRY
// ============================================================================

use self::Severity::{Critical, High, Low, Medium};

#[rustfmt::skip]
const REGISTRY_ROWS: &[ErrorMetadata] = &[
    // System
    ErrorMetadata::new("ERR001", "System", Critical, false, true,
        "Critical internal system error",
        "File a bug report with the failing document"),
    ErrorMetadata::new("ERR002", "System", Critical, false, true,
        "System initialization failure",
        "Check build profile configuration and environment"),
    ErrorMetadata::new("ERR003", "System", High, false, true,
        "Pipeline orchestration failure",
        "Re-run with SHIFT_LOGGING_MIN_LEVEL=debug and inspect stage output"),
    // File processing
    ErrorMetadata::new("E005", "FileProcessing", Medium, false, true,
        "File not found at specified path",
        "Check file path and ensure file exists"),
    ErrorMetadata::new("E006", "FileProcessing", Low, true, false,
        "File does not have a supported token document extension",
        "Use a .json or .toml token document"),
    ErrorMetadata::new("E007", "FileProcessing", Medium, false, true,
        "File exceeds maximum size limit",
        "Split the document or raise max_file_size in the build profile"),
    ErrorMetadata::new("E008", "FileProcessing", Medium, false, true,
        "File is empty when content expected",
        "Provide a token document with at least one group"),
    ErrorMetadata::new("E009", "FileProcessing", Medium, false, true,
        "Permission denied accessing file",
        "Check file permissions and user access rights"),
    ErrorMetadata::new("E010", "FileProcessing", Medium, false, true,
        "File is not valid UTF-8",
        "Re-save the document as UTF-8"),
    ErrorMetadata::new("E011", "FileProcessing", Medium, false, true,
        "I/O error while reading file",
        "Check disk health and retry"),
    ErrorMetadata::new("E012", "FileProcessing", Medium, false, true,
        "Invalid file path provided",
        "Provide a valid file path"),
    // Document
    ErrorMetadata::new("E020", "Document", High, false, true,
        "Token document could not be parsed",
        "Fix the JSON or TOML syntax at the reported location"),
    ErrorMetadata::new("E021", "Document", High, false, true,
        "Token document has a malformed token or group",
        "Give every token an object with a string, number, object or array 'value'"),
    ErrorMetadata::new("E022", "Document", High, false, true,
        "Token document root is not a group",
        "Wrap tokens in a top-level object"),
    // Validation
    ErrorMetadata::new("E030", "Validation", High, false, true,
        "Token key contains characters outside A-Z, 0-9 and _",
        "Rename the key using uppercase letters, digits and underscores"),
    ErrorMetadata::new("E031", "Validation", High, false, true,
        "Token groups are nested deeper than the configured limit",
        "Flatten the group hierarchy or raise max_group_depth"),
    // Resolution
    ErrorMetadata::new("E040", "Resolution", High, false, true,
        "Alias refers to a token that does not exist",
        "Point the alias at an existing token dot-path"),
    ErrorMetadata::new("E041", "Resolution", High, false, true,
        "Aliases form a cycle",
        "Break the cycle by giving one token a literal value"),
    ErrorMetadata::new("E042", "Resolution", High, false, true,
        "Alias chain exceeds the configured depth",
        "Shorten the alias chain or raise max_alias_depth"),
    ErrorMetadata::new("E043", "Resolution", High, false, true,
        "Document contains more tokens than the configured limit",
        "Split the document or raise max_tokens"),
    // Units
    ErrorMetadata::new("E050", "Units", Medium, false, true,
        "Dimension value is not a number or a supported CSS length",
        "Use a number, a numeric string or a value with px, rem, em, %, vh, vw, vmin, vmax, ch or ex"),
    // Emit
    ErrorMetadata::new("E060", "Emit", High, false, true,
        "Token path collides with an existing group or leaf",
        "Rename the token so no leaf shares a path with a group"),
    ErrorMetadata::new("E061", "Emit", High, false, true,
        "Output serialization failed",
        "File a bug report with the failing document"),
    ErrorMetadata::new("E062", "Emit", Low, true, false,
        "No emitter registered for the requested format",
        "Use one of css, ts or ts-vars"),
    ErrorMetadata::new("E063", "Emit", Medium, false, true,
        "Writing an output file failed",
        "Check that the output directory is writable"),
    // Config
    ErrorMetadata::new("E070", "Config", Medium, false, true,
        "Project configuration could not be read",
        "Check the configuration file path and permissions"),
    ErrorMetadata::new("E071", "Config", Medium, false, true,
        "Project configuration is not valid TOML",
        "Fix the TOML syntax or unknown output format"),
    ErrorMetadata::new("E072", "Config", Medium, false, true,
        "Project configuration has invalid values",
        "Provide non-empty selectors, media conditions and output settings"),
    // Batch
    ErrorMetadata::new("E080", "Batch", Medium, false, true,
        "Batch directory not found",
        "Check the directory path"),
    ErrorMetadata::new("E081", "Batch", Medium, false, true,
        "Batch path is not a directory",
        "Pass a directory containing token documents"),
    ErrorMetadata::new("E082", "Batch", Medium, false, true,
        "Token document discovery failed",
        "Check directory permissions"),
    ErrorMetadata::new("E083", "Batch", High, false, false,
        "A batch worker thread failed",
        "Re-run with --threads 1 to isolate the failing document"),
    // Success
    ErrorMetadata::new("I001", "Success", Low, true, false,
        "Operation completed successfully", "None"),
    ErrorMetadata::new("I004", "Success", Low, true, false,
        "System initialization completed", "None"),
    ErrorMetadata::new("I006", "Success", Low, true, false,
        "File processed successfully", "Continue to validation"),
    ErrorMetadata::new("I020", "Success", Low, true, false,
        "Token document parsed", "Continue to name validation"),
    ErrorMetadata::new("I030", "Success", Low, true, false,
        "Token names validated", "Continue to resolution"),
    ErrorMetadata::new("I040", "Success", Low, true, false,
        "Aliases and overrides resolved", "Continue to dimension normalization"),
    ErrorMetadata::new("I050", "Success", Low, true, false,
        "Dimension tokens normalized", "Continue to emission"),
    ErrorMetadata::new("I060", "Success", Low, true, false,
        "Output emitted", "None"),
    ErrorMetadata::new("I061", "Success", Low, true, false,
        "Output file written", "None"),
    ErrorMetadata::new("I070", "Success", Low, true, false,
        "Project configuration loaded", "None"),
    ErrorMetadata::new("I080", "Success", Low, true, false,
        "Batch build completed", "None"),
];

static ERROR_REGISTRY: OnceLock<HashMap<&'static str, ErrorMetadata>> = OnceLock::new();

fn get_error_registry() -> &'static HashMap<&'static str, ErrorMetadata> {
    ERROR_REGISTRY.get_or_init(|| {
        REGISTRY_ROWS
            .iter()
            .map(|metadata| (metadata.code, metadata.clone()))
            .collect()
    })
}

// ============================================================================
// CLASSIFICATION FUNCTIONS
// ============================================================================

pub fn get_error_metadata(code: &str) -> Option<&'static ErrorMetadata> {
    get_error_registry().get(code)
}

pub fn get_severity(code: &str) -> Severity {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.severity)
        .unwrap_or(Severity::Medium)
}

pub fn is_recoverable(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recoverable)
        .unwrap_or(true)
}

pub fn requires_halt(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.requires_halt)
        .unwrap_or(false)
}

pub fn get_description(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.description)
        .unwrap_or("Unknown error")
}

pub fn get_action(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recommended_action)
        .unwrap_or("No specific action available")
}

pub fn get_category(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.category)
        .unwrap_or("Unknown")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_registry_rows_are_unique() {
        let mut seen = HashSet::new();
        for row in REGISTRY_ROWS {
            assert!(seen.insert(row.code), "duplicate registry row {}", row.code);
        }
    }

    #[test]
    fn test_every_stage_code_has_metadata() {
        let codes = [
            system::INTERNAL_ERROR,
            system::PIPELINE_FAILURE,
            file_processing::FILE_NOT_FOUND,
            file_processing::INVALID_PATH,
            document::PARSE_ERROR,
            document::NOT_A_GROUP,
            validation::INVALID_TOKEN_NAME,
            validation::GROUP_DEPTH_EXCEEDED,
            resolution::UNRESOLVED_ALIAS,
            resolution::ALIAS_CYCLE,
            resolution::TOO_MANY_TOKENS,
            units::INVALID_DIMENSION,
            emit::PATH_COLLISION,
            emit::OUTPUT_WRITE_ERROR,
            config::CONFIG_INVALID,
            batch::WORKER_FAILURE,
            success::EMIT_COMPLETE,
            success::BATCH_COMPLETE,
        ];
        for code in codes {
            assert!(
                get_error_metadata(code.as_str()).is_some(),
                "missing metadata for {}",
                code
            );
        }
    }

    #[test]
    fn test_classification_lookups() {
        assert_eq!(get_category("E030"), "Validation");
        assert_eq!(get_severity("ERR001"), Severity::Critical);
        assert!(requires_halt("E041"));
        assert!(is_recoverable("E062"));
        assert_eq!(get_description("nope"), "Unknown error");
        assert_eq!(Severity::from_str("High"), Some(Severity::High));
    }
}
