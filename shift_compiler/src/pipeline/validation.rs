use crate::emitters::{EmitterRegistry, OutputFormat};
use crate::logging::codes;

/// Startup self-check: registry metadata and built-in emitters are in place
pub fn validate_pipeline() -> Result<(), String> {
    crate::log_debug!("Validating pipeline configuration");

    crate::file_processor::init_file_processor_logging()?;

    let stage_codes = [
        codes::validation::INVALID_TOKEN_NAME,
        codes::validation::GROUP_DEPTH_EXCEEDED,
        codes::resolution::UNRESOLVED_ALIAS,
        codes::resolution::ALIAS_CYCLE,
        codes::resolution::ALIAS_DEPTH_EXCEEDED,
        codes::resolution::TOO_MANY_TOKENS,
        codes::units::INVALID_DIMENSION,
        codes::emit::PATH_COLLISION,
        codes::emit::SERIALIZATION_ERROR,
        codes::emit::UNSUPPORTED_FORMAT,
        codes::emit::OUTPUT_WRITE_ERROR,
    ];
    for code in &stage_codes {
        if codes::get_error_metadata(code.as_str()).is_none() {
            return Err(format!("Pipeline error code {} has no metadata", code));
        }
    }

    let registry = EmitterRegistry::new();
    for format in OutputFormat::all() {
        if registry.get(*format).is_none() {
            return Err(format!("No built-in emitter for format '{}'", format));
        }
    }

    crate::log_success!(
        codes::success::SYSTEM_INITIALIZATION_COMPLETED,
        "Pipeline validation succeeded",
        "codes_checked" => stage_codes.len(),
        "emitters" => registry.formats().len()
    );

    Ok(())
}
