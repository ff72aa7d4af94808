//! Token document reading with compile-time size limits and global logging

use crate::config::compile_time::file_processing::{LARGE_FILE_THRESHOLD, MAX_FILE_SIZE};
use crate::logging::codes;
use crate::{log_debug, log_error, log_success};
use serde::Serialize;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant, SystemTime};

/// File processor specific errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FileProcessorError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Unsupported document extension {extension:?}: expected .json or .toml")]
    UnsupportedExtension { extension: Option<String> },

    #[error("File too large: {size} bytes (max: {max_size})")]
    FileTooLarge { size: u64, max_size: u64 },

    #[error("File is empty")]
    EmptyFile,

    #[error("Permission denied: {path}")]
    PermissionDenied { path: String },

    #[error("Invalid UTF-8 encoding in file: {path}")]
    InvalidEncoding { path: String },

    #[error("I/O error reading file: {message}")]
    Io { message: String },

    #[error("Invalid file path: {path}")]
    InvalidPath { path: String },

    #[error("Failed to parse {format} document: {message}")]
    Parse {
        format: DocumentFormat,
        message: String,
    },

    #[error("Document root must be a group object, found {found}")]
    NotAGroup { found: String },

    #[error("Malformed token document at \"{path}\": {message}")]
    Malformed { path: String, message: String },
}

impl FileProcessorError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            FileProcessorError::FileNotFound { .. } => codes::file_processing::FILE_NOT_FOUND,
            FileProcessorError::UnsupportedExtension { .. } => {
                codes::file_processing::UNSUPPORTED_EXTENSION
            }
            FileProcessorError::FileTooLarge { .. } => codes::file_processing::FILE_TOO_LARGE,
            FileProcessorError::EmptyFile => codes::file_processing::EMPTY_FILE,
            FileProcessorError::PermissionDenied { .. } => {
                codes::file_processing::PERMISSION_DENIED
            }
            FileProcessorError::InvalidEncoding { .. } => codes::file_processing::INVALID_ENCODING,
            FileProcessorError::Io { .. } => codes::file_processing::IO_ERROR,
            FileProcessorError::InvalidPath { .. } => codes::file_processing::INVALID_PATH,
            FileProcessorError::Parse { .. } => codes::document::PARSE_ERROR,
            FileProcessorError::NotAGroup { .. } => codes::document::NOT_A_GROUP,
            FileProcessorError::Malformed { .. } => codes::document::MALFORMED_DOCUMENT,
        }
    }

    pub fn requires_halt(&self) -> bool {
        codes::requires_halt(self.error_code().as_str())
    }

    pub fn severity(&self) -> &'static str {
        codes::get_severity(self.error_code().as_str()).as_str()
    }

    pub fn category(&self) -> &'static str {
        codes::get_category(self.error_code().as_str())
    }

    pub fn is_recoverable(&self) -> bool {
        codes::is_recoverable(self.error_code().as_str())
    }

    fn from_io(err: &io::Error, path: &Path, action: &str) -> Self {
        match err.kind() {
            io::ErrorKind::PermissionDenied => FileProcessorError::PermissionDenied {
                path: path.display().to_string(),
            },
            io::ErrorKind::InvalidData => FileProcessorError::InvalidEncoding {
                path: path.display().to_string(),
            },
            _ => FileProcessorError::Io {
                message: format!("Failed to {} '{}': {}", action, path.display(), err),
            },
        }
    }
}

/// Serialization format of a token document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Json,
    Toml,
}

impl DocumentFormat {
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "json" => Some(DocumentFormat::Json),
            "toml" => Some(DocumentFormat::Toml),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentFormat::Json => "json",
            DocumentFormat::Toml => "toml",
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct FileMetadata {
    /// Canonical file path
    pub path: PathBuf,
    pub size: u64,
    pub format: DocumentFormat,
    pub line_count: usize,
    pub modified: Option<SystemTime>,
}

impl FileMetadata {
    pub fn human_readable_size(&self) -> String {
        human_readable(self.size)
    }

    pub fn is_large_file(&self) -> bool {
        self.size > LARGE_FILE_THRESHOLD
    }
}

/// Document source plus what was learned while reading it
#[derive(Debug, Clone)]
pub struct FileProcessingResult {
    pub source: String,
    pub metadata: FileMetadata,
    pub processing_duration: Duration,
}

impl FileProcessingResult {
    pub fn format(&self) -> DocumentFormat {
        self.metadata.format
    }

    pub fn char_count(&self) -> usize {
        self.source.chars().count()
    }
}

pub struct FileProcessor {
    pub enable_performance_logging: bool,
}

impl FileProcessor {
    pub fn new() -> Self {
        Self {
            enable_performance_logging: true,
        }
    }

    pub fn with_performance_logging(mut self, enabled: bool) -> Self {
        self.enable_performance_logging = enabled;
        self
    }

    pub fn max_file_size() -> u64 {
        MAX_FILE_SIZE
    }

    pub fn large_file_threshold() -> u64 {
        LARGE_FILE_THRESHOLD
    }

    /// Read a `.json` or `.toml` token document
    pub fn process_file(&self, file_path: &Path) -> Result<FileProcessingResult, FileProcessorError> {
        let start_time = Instant::now();

        log_debug!("Starting file processing", "file" => file_path.display());

        let result = self.read_document(file_path, start_time);
        match &result {
            Ok(result) => self.log_processing_success(result),
            Err(err) => log_error!(err.error_code(), &err.to_string(),
                "file" => file_path.display(),
                "stage" => "file_processing"
            ),
        }
        result
    }

    fn read_document(
        &self,
        file_path: &Path,
        start_time: Instant,
    ) -> Result<FileProcessingResult, FileProcessorError> {
        let path = validate_path(file_path)?;

        let format = DocumentFormat::from_path(&path).ok_or_else(|| {
            FileProcessorError::UnsupportedExtension {
                extension: path
                    .extension()
                    .map(|ext| ext.to_string_lossy().to_lowercase()),
            }
        })?;

        let fs_metadata =
            fs::metadata(&path).map_err(|e| FileProcessorError::from_io(&e, &path, "read metadata for"))?;

        let size = fs_metadata.len();
        if size > MAX_FILE_SIZE {
            return Err(FileProcessorError::FileTooLarge {
                size,
                max_size: MAX_FILE_SIZE,
            });
        }
        if size == 0 {
            return Err(FileProcessorError::EmptyFile);
        }

        let source =
            fs::read_to_string(&path).map_err(|e| FileProcessorError::from_io(&e, &path, "read"))?;
        if source.trim().is_empty() {
            return Err(FileProcessorError::EmptyFile);
        }

        let metadata = FileMetadata {
            line_count: source.lines().count(),
            path,
            size,
            format,
            modified: fs_metadata.modified().ok(),
        };

        Ok(FileProcessingResult {
            source,
            metadata,
            processing_duration: start_time.elapsed(),
        })
    }

    fn log_processing_success(&self, result: &FileProcessingResult) {
        let duration_ms = format!("{:.2}", result.processing_duration.as_secs_f64() * 1000.0);

        if self.enable_performance_logging {
            log_success!(codes::success::FILE_PROCESSING_SUCCESS,
                "File processed successfully with performance metrics",
                "file" => result.metadata.path.display(),
                "format" => result.metadata.format,
                "size_bytes" => result.metadata.size,
                "size_human" => result.metadata.human_readable_size(),
                "lines" => result.metadata.line_count,
                "duration_ms" => duration_ms,
                "is_large_file" => result.metadata.is_large_file()
            );
        } else {
            log_success!(codes::success::FILE_PROCESSING_SUCCESS, "File processed successfully",
                "file" => result.metadata.path.display(),
                "format" => result.metadata.format
            );
        }
    }
}

impl Default for FileProcessor {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_path(file_path: &Path) -> Result<PathBuf, FileProcessorError> {
    if file_path.as_os_str().is_empty() {
        return Err(FileProcessorError::InvalidPath {
            path: String::new(),
        });
    }
    if !file_path.exists() {
        return Err(FileProcessorError::FileNotFound {
            path: file_path.display().to_string(),
        });
    }
    if !file_path.is_file() {
        return Err(FileProcessorError::InvalidPath {
            path: file_path.display().to_string(),
        });
    }

    file_path
        .canonicalize()
        .map_err(|e| FileProcessorError::from_io(&e, file_path, "resolve path"))
}

fn human_readable(size: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
    let mut scaled = size as f64;
    let mut unit_index = 0;

    while scaled >= 1024.0 && unit_index < UNITS.len() - 1 {
        scaled /= 1024.0;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", size, UNITS[0])
    } else {
        format!("{:.2} {}", scaled, UNITS[unit_index])
    }
}
