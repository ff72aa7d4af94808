//! Directory builds
//!
//! Discovers token documents under a directory and builds each one through the
//! pipeline, sequentially or on scoped worker threads. Every document gets its
//! own logging file context, so failures show up per file in the cargo-style
//! summary.

use crate::config::compile_time::batch_processing::{MAX_FILES_PER_BATCH, MAX_WORKER_THREADS};
use crate::file_processor::DocumentFormat;
use crate::logging::codes;
use crate::pipeline::{self, PipelineError, PipelineOptions, PipelineResult};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};
use std::thread;
use std::time::{Duration, Instant};
use walkdir::WalkDir;

/// Suffixes that mark a file as a token document
pub const TOKEN_DOCUMENT_SUFFIXES: &[&str] = &[".tokens.json", ".tokens.toml"];

#[derive(Debug, Clone)]
pub struct BatchConfig {
    pub max_threads: usize,
    pub recursive: bool,
    pub max_files: Option<usize>,
    pub fail_fast: bool,
    /// Build every `.json` / `.toml` file, not only `*.tokens.*`
    pub all_documents: bool,
    pub pipeline: PipelineOptions,
    /// When set, outputs are written here mirroring the source layout
    pub out_dir: Option<PathBuf>,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            max_threads: thread::available_parallelism()
                .map(|n| n.get().min(MAX_WORKER_THREADS))
                .unwrap_or(1),
            recursive: true,
            max_files: None,
            fail_fast: false,
            all_documents: false,
            pipeline: PipelineOptions::default(),
            out_dir: None,
        }
    }
}

impl BatchConfig {
    fn worker_count(&self, file_count: usize) -> usize {
        self.max_threads.clamp(1, MAX_WORKER_THREADS).min(file_count.max(1))
    }
}

#[derive(Debug, Default)]
pub struct BatchResults {
    pub successful_files: Vec<(PathBuf, PipelineResult)>,
    pub failed_files: Vec<(PathBuf, PipelineError)>,
    pub written_files: Vec<PathBuf>,
    pub processing_duration: Duration,
    pub files_processed: usize,
    pub files_discovered: usize,
}

impl BatchResults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn success_count(&self) -> usize {
        self.successful_files.len()
    }

    pub fn failure_count(&self) -> usize {
        self.failed_files.len()
    }

    /// Documents discovered but never built because of fail-fast
    pub fn skipped_count(&self) -> usize {
        self.files_discovered.saturating_sub(self.files_processed)
    }

    pub fn success_rate(&self) -> f64 {
        if self.files_processed == 0 {
            0.0
        } else {
            self.success_count() as f64 / self.files_processed as f64
        }
    }

    pub fn add_success(&mut self, file_path: PathBuf, result: PipelineResult, written: Vec<PathBuf>) {
        self.successful_files.push((file_path, result));
        self.written_files.extend(written);
        self.files_processed += 1;
    }

    pub fn add_failure(&mut self, file_path: PathBuf, error: PipelineError) {
        self.failed_files.push((file_path, error));
        self.files_processed += 1;
    }

    fn sort(&mut self) {
        self.successful_files.sort_by(|a, b| a.0.cmp(&b.0));
        self.failed_files.sort_by(|a, b| a.0.cmp(&b.0));
        self.written_files.sort();
    }

    pub fn summary(&self) -> String {
        format!(
            "Batch build completed: {} documents processed, {} successful ({:.1}%), {} failed, {} skipped, {:.2}s total",
            self.files_processed,
            self.success_count(),
            self.success_rate() * 100.0,
            self.failure_count(),
            self.skipped_count(),
            self.processing_duration.as_secs_f64()
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BatchError {
    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: String },

    #[error("Not a directory: {path}")]
    NotADirectory { path: String },

    #[error("No token documents found in directory: {path}")]
    NoFilesFound { path: String },

    #[error("Too many token documents found: {count} (max: {max})")]
    TooManyFiles { count: usize, max: usize },

    #[error("Directory traversal failed: {message}")]
    Discovery { message: String },

    #[error("Worker thread failed: {message}")]
    Worker { message: String },
}

impl BatchError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            BatchError::DirectoryNotFound { .. } => codes::batch::DIRECTORY_NOT_FOUND,
            BatchError::NotADirectory { .. } => codes::batch::NOT_A_DIRECTORY,
            BatchError::NoFilesFound { .. }
            | BatchError::TooManyFiles { .. }
            | BatchError::Discovery { .. } => codes::batch::DISCOVERY_FAILED,
            BatchError::Worker { .. } => codes::batch::WORKER_FAILURE,
        }
    }
}

// ============================================================================
// DISCOVERY
// ============================================================================

/// True for `*.tokens.json` / `*.tokens.toml`, or any `.json` / `.toml` with
/// `all_documents`
pub fn is_token_document(path: &Path, all_documents: bool) -> bool {
    if all_documents {
        return DocumentFormat::from_path(path).is_some();
    }
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    TOKEN_DOCUMENT_SUFFIXES
        .iter()
        .any(|suffix| name.len() > suffix.len() && name.ends_with(suffix))
}

/// Sorted token documents under `dir_path`
pub fn discover_documents(dir_path: &Path, config: &BatchConfig) -> Result<Vec<PathBuf>, BatchError> {
    crate::log_info!("Starting document discovery",
        "directory" => dir_path.display(),
        "recursive" => config.recursive
    );

    if !dir_path.exists() {
        return Err(BatchError::DirectoryNotFound {
            path: dir_path.display().to_string(),
        });
    }
    if !dir_path.is_dir() {
        return Err(BatchError::NotADirectory {
            path: dir_path.display().to_string(),
        });
    }

    let walker = WalkDir::new(dir_path)
        .min_depth(1)
        .max_depth(if config.recursive { usize::MAX } else { 1 })
        .sort_by_file_name();

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|e| BatchError::Discovery {
            message: e.to_string(),
        })?;
        if entry.file_type().is_file() && is_token_document(entry.path(), config.all_documents) {
            files.push(entry.into_path());
        }
    }

    if files.is_empty() {
        return Err(BatchError::NoFilesFound {
            path: dir_path.display().to_string(),
        });
    }

    files.sort();

    let limit = config.max_files.unwrap_or(MAX_FILES_PER_BATCH).min(MAX_FILES_PER_BATCH);
    if files.len() > limit {
        if config.max_files.is_none() {
            return Err(BatchError::TooManyFiles {
                count: files.len(),
                max: MAX_FILES_PER_BATCH,
            });
        }
        crate::log_warning!("Reached maximum file limit",
            "files_found" => files.len(),
            "limit" => limit
        );
        files.truncate(limit);
    }

    crate::log_debug!("Document discovery completed",
        "files_found" => files.len(),
        "directory" => dir_path.display()
    );

    Ok(files)
}

// ============================================================================
// BUILDING
// ============================================================================

fn build_document(
    root: &Path,
    file_path: &Path,
    file_id: usize,
    config: &BatchConfig,
) -> Result<(PipelineResult, Vec<PathBuf>), PipelineError> {
    let result = pipeline::process_file_with_id(file_path, file_id, &config.pipeline)?;

    let written = match &config.out_dir {
        Some(out_dir) => {
            let relative_dir = file_path
                .parent()
                .and_then(|parent| parent.strip_prefix(root).ok())
                .unwrap_or_else(|| Path::new(""));
            pipeline::write_outputs(
                &result.outputs,
                &out_dir.join(relative_dir),
                &pipeline::document_basename(file_path),
            )?
        }
        None => Vec::new(),
    };

    Ok((result, written))
}

fn record(results: &mut BatchResults, file_path: &Path, outcome: Result<(PipelineResult, Vec<PathBuf>), PipelineError>) -> bool {
    match outcome {
        Ok((result, written)) => {
            results.add_success(file_path.to_path_buf(), result, written);
            true
        }
        Err(err) => {
            results.add_failure(file_path.to_path_buf(), err);
            false
        }
    }
}

pub fn process_directory_sequential(
    dir_path: &Path,
    config: &BatchConfig,
) -> Result<BatchResults, BatchError> {
    let start_time = Instant::now();
    let files = discover_documents(dir_path, config)?;

    let mut results = BatchResults::new();
    results.files_discovered = files.len();

    for (file_id, file_path) in files.iter().enumerate() {
        let outcome = build_document(dir_path, file_path, file_id, config);
        if !record(&mut results, file_path, outcome) && config.fail_fast {
            crate::log_warning!("Fail-fast mode enabled, stopping batch build",
                "file" => file_path.display()
            );
            break;
        }
    }

    Ok(finish(results, start_time, 1))
}

pub fn process_directory_parallel(
    dir_path: &Path,
    config: &BatchConfig,
) -> Result<BatchResults, BatchError> {
    let start_time = Instant::now();
    let files = discover_documents(dir_path, config)?;
    let workers = config.worker_count(files.len());

    crate::log_debug!("Parallel build configuration",
        "total_files" => files.len(),
        "threads" => workers
    );

    let mut initial = BatchResults::new();
    initial.files_discovered = files.len();
    let results = Mutex::new(initial);
    let next = AtomicUsize::new(0);
    let stop = AtomicBool::new(false);

    let (results_ref, next, stop_ref, files_ref) = (&results, &next, &stop, &files);
    let panicked = thread::scope(|scope| {
        let handles: Vec<_> = (0..workers)
            .map(|_| {
                scope.spawn(move || loop {
                    if stop_ref.load(Ordering::Relaxed) {
                        break;
                    }
                    let file_id = next.fetch_add(1, Ordering::Relaxed);
                    let Some(file_path) = files_ref.get(file_id) else {
                        break;
                    };

                    let outcome = build_document(dir_path, file_path, file_id, config);
                    let mut guard = results_ref.lock().unwrap_or_else(PoisonError::into_inner);
                    if !record(&mut guard, file_path, outcome) && config.fail_fast {
                        stop_ref.store(true, Ordering::Relaxed);
                    }
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| handle.join())
            .filter(Result::is_err)
            .count()
    });

    if panicked > 0 {
        return Err(BatchError::Worker {
            message: format!("{} worker thread(s) panicked during build", panicked),
        });
    }

    if stop.load(Ordering::Relaxed) {
        crate::log_warning!("Fail-fast mode enabled, stopping batch build");
    }

    let results = results.into_inner().unwrap_or_else(PoisonError::into_inner);
    Ok(finish(results, start_time, workers))
}

fn finish(mut results: BatchResults, start_time: Instant, threads: usize) -> BatchResults {
    results.sort();
    results.processing_duration = start_time.elapsed();

    crate::log_success!(codes::success::BATCH_COMPLETE, "Batch build completed",
        "files_processed" => results.files_processed,
        "successful" => results.success_count(),
        "failed" => results.failure_count(),
        "skipped" => results.skipped_count(),
        "threads" => threads,
        "duration_ms" => format!("{:.2}", results.processing_duration.as_secs_f64() * 1000.0)
    );

    results
}

// ============================================================================
// PUBLIC API
// ============================================================================

pub fn process_directory(dir_path: &Path) -> Result<BatchResults, BatchError> {
    process_directory_with_config(dir_path, &BatchConfig::default())
}

pub fn process_directory_with_config(
    dir_path: &Path,
    config: &BatchConfig,
) -> Result<BatchResults, BatchError> {
    let result = if config.max_threads <= 1 {
        process_directory_sequential(dir_path, config)
    } else {
        process_directory_parallel(dir_path, config)
    };

    if let Err(err) = &result {
        crate::log_error!(err.error_code(), &err.to_string(),
            "directory" => dir_path.display()
        );
    }
    result
}

/// Batch capabilities of this build
#[derive(Debug, Clone)]
pub struct BatchInfo {
    pub max_recommended_threads: usize,
    pub max_files_per_batch: usize,
    pub supports_recursive_discovery: bool,
    pub supports_parallel_processing: bool,
    pub supports_fail_fast: bool,
    pub document_suffixes: Vec<&'static str>,
}

pub fn get_batch_info() -> BatchInfo {
    BatchInfo {
        max_recommended_threads: BatchConfig::default().max_threads,
        max_files_per_batch: MAX_FILES_PER_BATCH,
        supports_recursive_discovery: true,
        supports_parallel_processing: MAX_WORKER_THREADS > 1,
        supports_fail_fast: true,
        document_suffixes: TOKEN_DOCUMENT_SUFFIXES.to_vec(),
    }
}
