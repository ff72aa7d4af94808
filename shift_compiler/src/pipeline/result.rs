use super::metrics::StageMetrics;
use super::output::RenderedOutput;
use crate::emitters::OutputFormat;
use crate::file_processor::FileMetadata;
use crate::model::FlatTokenMap;
use std::time::Duration;

/// Final token map of one document plus its stage metrics
#[derive(Debug, Clone)]
pub struct CompiledTokens {
    pub tokens: FlatTokenMap,
    pub metrics: StageMetrics,
}

/// Everything a file-to-text run produced
#[derive(Debug, Clone)]
pub struct PipelineResult {
    pub file_metadata: FileMetadata,
    pub compiled: CompiledTokens,
    pub outputs: Vec<RenderedOutput>,
    pub processing_duration: Duration,
}

impl PipelineResult {
    pub fn output(&self, format: OutputFormat) -> Option<&RenderedOutput> {
        self.outputs.iter().find(|output| output.format == format)
    }

    pub fn token_count(&self) -> usize {
        self.compiled.metrics.token_count
    }

    pub fn log_success(&self) {
        let seconds = self.processing_duration.as_secs_f64();
        crate::log_success!(
            crate::logging::codes::success::OPERATION_COMPLETED_SUCCESSFULLY,
            "Token document built",
            "file" => self.file_metadata.path.display(),
            "tokens" => self.compiled.metrics.token_count,
            "aliases" => self.compiled.metrics.alias_count,
            "outputs" => self.outputs.len(),
            "duration_ms" => format!("{:.2}", seconds * 1000.0),
            "tokens_per_sec" => format!("{:.0}", if seconds > 0.0 {
                self.compiled.metrics.token_count as f64 / seconds
            } else {
                0.0
            })
        );
    }
}
