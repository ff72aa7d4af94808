//! Human-readable command output

use crate::commands::build::BuildOutcome;
use crate::commands::CliError;
use shift_compiler::batch::{self, BatchResults};
use shift_compiler::pipeline::{self, PipelineResult};
use shift_compiler::PipelineError;

pub fn print_build(outcome: &BuildOutcome) {
    let metrics = &outcome.result.compiled.metrics;
    println!(
        "Built {} ({} tokens, {} aliases, {} overrides) in {:.2}ms",
        outcome.result.file_metadata.path.display(),
        metrics.token_count,
        metrics.alias_count,
        metrics.override_count(),
        outcome.result.processing_duration.as_secs_f64() * 1000.0
    );
    for path in &outcome.written {
        println!("  wrote {}", path.display());
    }
}

pub fn print_check(result: &PipelineResult) {
    let metrics = &result.compiled.metrics;
    println!(
        "OK: {} ({} tokens, {} aliases, {} theme overrides, {} breakpoint overrides)",
        result.file_metadata.path.display(),
        metrics.token_count,
        metrics.alias_count,
        metrics.theme_override_count,
        metrics.breakpoint_override_count
    );
}

pub fn print_batch_results(results: &BatchResults) {
    println!("Batch Build Summary:");
    println!("  Documents discovered: {}", results.files_discovered);
    println!("  Documents processed: {}", results.files_processed);
    println!(
        "  Successful: {} ({:.1}%)",
        results.success_count(),
        results.success_rate() * 100.0
    );
    println!("  Failed: {}", results.failure_count());
    if results.skipped_count() > 0 {
        println!("  Skipped (fail-fast): {}", results.skipped_count());
    }
    println!("  Files written: {}", results.written_files.len());
    println!(
        "  Total time: {:.2}s",
        results.processing_duration.as_secs_f64()
    );

    let total_tokens: usize = results
        .successful_files
        .iter()
        .map(|(_, result)| result.token_count())
        .sum();
    let seconds = results.processing_duration.as_secs_f64();
    if seconds > 0.0 && total_tokens > 0 {
        println!("  Processing rate: {:.0} tokens/sec", total_tokens as f64 / seconds);
    }

    if results.failure_count() > 0 {
        println!("\nFailed Documents:");
        for (file_path, error) in &results.failed_files {
            println!("  {}: {}", file_path.display(), error_summary(error));
        }
    }

    if results.success_count() > 0 && results.success_count() <= 10 {
        println!("\nBuilt Documents:");
        for (file_path, result) in &results.successful_files {
            println!("  {}: {} tokens", file_path.display(), result.token_count());
        }
    } else if results.success_count() > 10 {
        println!(
            "\n{} documents built successfully (showing first 5):",
            results.success_count()
        );
        for (file_path, result) in results.successful_files.iter().take(5) {
            println!("  {}: {} tokens", file_path.display(), result.token_count());
        }
        println!("  ... and {} more", results.success_count() - 5);
    }
}

/// One line per failed document: stage, code and token path
pub fn error_summary(error: &PipelineError) -> String {
    match error.token_path() {
        Some(path) => format!("{} error [{}] at {}", error.stage(), error.error_code(), path),
        None => format!("{} error [{}]", error.stage(), error.error_code()),
    }
}

pub fn print_error(error: &CliError) {
    match error.error_code() {
        Some(code) => eprintln!("error[{}]: {}", code, error),
        None => eprintln!("error: {}", error),
    }
    if let CliError::Pipeline(pipeline_error) = error {
        eprintln!("  = stage: {}", pipeline_error.stage());
        if let Some(path) = pipeline_error.token_path() {
            eprintln!("  --> {}", path);
        }
    }
}

pub fn print_info() {
    println!("Shift v{}", env!("CARGO_PKG_VERSION"));
    println!();

    let pipeline_info = pipeline::get_pipeline_info();
    println!("PIPELINE CAPABILITIES:");
    for line in pipeline_info.report().lines() {
        println!("    {}", line);
    }
    println!();

    let batch_info = batch::get_batch_info();
    println!("BATCH PROCESSING CAPABILITIES:");
    println!(
        "    Max recommended threads: {}",
        batch_info.max_recommended_threads
    );
    println!("    Max documents per batch: {}", batch_info.max_files_per_batch);
    println!(
        "    Recursive discovery: {}",
        batch_info.supports_recursive_discovery
    );
    println!(
        "    Parallel processing: {}",
        batch_info.supports_parallel_processing
    );
    println!("    Fail-fast mode: {}", batch_info.supports_fail_fast);
    println!(
        "    Document suffixes: {}",
        batch_info.document_suffixes.join(", ")
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use shift_compiler::resolution::ResolutionError;

    #[test]
    fn error_summary_names_stage_and_path() {
        let error = PipelineError::from(ResolutionError::AliasResolution {
            path: "COLORS.LINK".to_string(),
            target: "COLORS.MISSING".to_string(),
        });
        let summary = error_summary(&error);
        assert!(summary.starts_with("resolution error ["));
        assert!(summary.ends_with("at COLORS.LINK"));

        let error = PipelineError::pipeline_error("boom");
        assert_eq!(error_summary(&error), format!("pipeline error [{}]", error.error_code()));
    }
}
