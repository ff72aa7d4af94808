//! Build orchestration: document → validation → resolution → units → emit

mod error;
mod info;
mod metrics;
pub mod output;
mod result;
mod validation;

pub use error::PipelineError;
pub use info::{get_pipeline_info, PipelineInfo};
pub use metrics::StageMetrics;
pub use output::{document_basename, write_outputs, RenderedOutput};
pub use result::{CompiledTokens, PipelineResult};
pub use validation::validate_pipeline;

use crate::config::runtime::PipelinePreferences;
use crate::config::ProjectConfig;
use crate::emitters::{EmitterContext, EmitterRegistry, OutputFormat};
use crate::logging::{self, codes};
use crate::model::TokenGroup;
use std::path::Path;
use std::time::Instant;

/// What to build and how
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Run the unit transformer before emission
    pub normalize_dimensions: bool,
    pub log_stage_details: bool,
    pub count_overrides: bool,
    /// Formats rendered by [`process_file`]; empty means check only
    pub formats: Vec<OutputFormat>,
    pub context: EmitterContext,
}

impl PipelineOptions {
    pub fn from_preferences(preferences: &PipelinePreferences) -> Self {
        Self {
            normalize_dimensions: preferences.normalize_dimensions,
            log_stage_details: preferences.log_stage_details,
            count_overrides: preferences.count_overrides,
            formats: OutputFormat::all().to_vec(),
            context: EmitterContext::new(),
        }
    }

    /// Runtime preferences plus the project's formats, themes and breakpoints
    pub fn for_project(project: &ProjectConfig) -> Self {
        Self {
            formats: project.output.formats.clone(),
            context: project.emitter_context(),
            ..Self::default()
        }
    }

    pub fn with_formats(mut self, formats: Vec<OutputFormat>) -> Self {
        self.formats = formats;
        self
    }

    pub fn with_context(mut self, context: EmitterContext) -> Self {
        self.context = context;
        self
    }

    /// Validate and compile without rendering anything
    pub fn check_only(mut self) -> Self {
        self.formats.clear();
        self
    }
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self::from_preferences(&PipelinePreferences::default())
    }
}

/// Validate, resolve and normalize a parsed document
pub fn compile_document(
    group: &TokenGroup,
    options: &PipelineOptions,
) -> Result<CompiledTokens, PipelineError> {
    let mut metrics = StageMetrics::default();

    let stage_start = Instant::now();
    crate::validation::validate(group)?;
    metrics.validation_duration = stage_start.elapsed();

    let stage_start = Instant::now();
    let resolved = crate::resolution::resolve(group)?;
    metrics.resolution_duration = stage_start.elapsed();

    let tokens = if options.normalize_dimensions {
        let stage_start = Instant::now();
        let transformed = crate::units::transform_dimensions(&resolved)?;
        metrics.transform_duration = stage_start.elapsed();
        transformed
    } else {
        crate::log_debug!("Dimension normalization disabled by preference");
        resolved
    };

    metrics.record_tokens(&tokens, options.count_overrides);

    if options.log_stage_details {
        crate::log_performance!(codes::success::NAME_VALIDATION_PASSED, "Validation stage",
            duration = metrics.validation_duration);
        crate::log_performance!(codes::success::RESOLUTION_COMPLETE, "Resolution stage",
            duration = metrics.resolution_duration,
            "aliases" => metrics.alias_count,
            "overrides" => metrics.override_count());
        crate::log_performance!(codes::success::DIMENSIONS_NORMALIZED, "Units stage",
            duration = metrics.transform_duration);
    }

    Ok(CompiledTokens { tokens, metrics })
}

/// Render `formats` with the built-in emitters
pub fn render(
    compiled: &CompiledTokens,
    formats: &[OutputFormat],
    ctx: &EmitterContext,
) -> Result<Vec<RenderedOutput>, PipelineError> {
    render_with_registry(&EmitterRegistry::new(), compiled, formats, ctx)
}

pub fn render_with_registry(
    registry: &EmitterRegistry,
    compiled: &CompiledTokens,
    formats: &[OutputFormat],
    ctx: &EmitterContext,
) -> Result<Vec<RenderedOutput>, PipelineError> {
    formats
        .iter()
        .map(|&format| {
            let contents = registry.emit(format, &compiled.tokens, ctx)?;
            Ok(RenderedOutput::new(format, contents))
        })
        .collect()
}

/// Read, compile and render one document file
pub fn process_file(file_path: &Path, options: &PipelineOptions) -> Result<PipelineResult, PipelineError> {
    process_file_with_id(file_path, 0, options)
}

/// As [`process_file`]; `file_id` tags the logging file context
pub fn process_file_with_id(
    file_path: &Path,
    file_id: usize,
    options: &PipelineOptions,
) -> Result<PipelineResult, PipelineError> {
    let start_time = Instant::now();

    logging::with_file_context(file_path.to_path_buf(), file_id, || {
        crate::log_info!("Starting token build pipeline",
            "file" => file_path.display(),
            "formats" => options.formats.len()
        );

        let (file_result, group) = crate::file_processor::load_document(file_path)?;
        let compiled = compile_document(&group, options)?;
        let outputs = render(&compiled, &options.formats, &options.context)?;

        let result = PipelineResult {
            file_metadata: file_result.metadata,
            compiled,
            outputs,
            processing_duration: start_time.elapsed(),
        };
        result.log_success();

        Ok(result)
    })
}
