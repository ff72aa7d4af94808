//! Token document loading: file reading with compile-time limits, then parsing

mod document;
mod processor;

use crate::config::compile_time::file_processing::{LARGE_FILE_THRESHOLD, MAX_FILE_SIZE};
use crate::log_debug;
use crate::logging::codes;
use crate::model::TokenGroup;
use std::path::Path;

pub use document::parse_document;
pub use processor::{
    DocumentFormat, FileMetadata, FileProcessingResult, FileProcessor, FileProcessorError,
};

/// Read a document with default settings
pub fn process_file(file_path: &Path) -> Result<FileProcessingResult, FileProcessorError> {
    FileProcessor::new().process_file(file_path)
}

/// Read and parse a document in one step
pub fn load_document(file_path: &Path) -> Result<(FileProcessingResult, TokenGroup), FileProcessorError> {
    let file_result = process_file(file_path)?;
    let group = parse_document(&file_result.source, file_result.format())?;
    Ok((file_result, group))
}

pub fn create_processor() -> FileProcessor {
    FileProcessor::new()
}

pub fn get_max_file_size() -> u64 {
    MAX_FILE_SIZE
}

pub fn get_large_file_threshold() -> u64 {
    LARGE_FILE_THRESHOLD
}

/// Check that every file processing code has registry metadata
pub fn init_file_processor_logging() -> Result<(), String> {
    let file_codes = [
        codes::file_processing::FILE_NOT_FOUND,
        codes::file_processing::UNSUPPORTED_EXTENSION,
        codes::file_processing::FILE_TOO_LARGE,
        codes::file_processing::EMPTY_FILE,
        codes::file_processing::PERMISSION_DENIED,
        codes::file_processing::INVALID_ENCODING,
        codes::file_processing::IO_ERROR,
        codes::file_processing::INVALID_PATH,
        codes::document::PARSE_ERROR,
        codes::document::NOT_A_GROUP,
        codes::document::MALFORMED_DOCUMENT,
    ];

    for code in &file_codes {
        if codes::get_error_metadata(code.as_str()).is_none() {
            return Err(format!(
                "File processor error code {} not found in metadata registry",
                code.as_str()
            ));
        }
    }

    log_debug!("File processor compile-time configuration loaded",
        "max_file_size" => MAX_FILE_SIZE,
        "large_file_threshold" => LARGE_FILE_THRESHOLD
    );

    Ok(())
}
