use crate::config::compile_time::{file_processing, tokens};
use crate::emitters::EmitterRegistry;
use crate::file_processor::DocumentFormat;

/// Capabilities and limits of this build
#[derive(Debug, Clone)]
pub struct PipelineInfo {
    pub pipeline_stages: Vec<&'static str>,
    pub output_formats: Vec<String>,
    pub document_formats: Vec<String>,
    pub max_file_size: u64,
    pub max_group_depth: usize,
    pub max_tokens: usize,
    pub max_alias_depth: usize,
    pub build_profile: &'static str,
    pub global_logging_enabled: bool,
}

impl PipelineInfo {
    pub fn report(&self) -> String {
        format!(
            "Shift Token Pipeline:\n\
             - Stages: {}\n\
             - Document Formats: {}\n\
             - Output Formats: {}\n\
             - Max File Size: {} KB\n\
             - Max Group Depth: {}\n\
             - Max Tokens: {}\n\
             - Max Alias Depth: {}\n\
             - Build Profile: {}\n\
             - Global Logging: {}",
            self.pipeline_stages.join(" -> "),
            self.document_formats.join(", "),
            self.output_formats.join(", "),
            self.max_file_size / 1024,
            self.max_group_depth,
            self.max_tokens,
            self.max_alias_depth,
            self.build_profile,
            self.global_logging_enabled,
        )
    }

    pub fn summary(&self) -> String {
        format!(
            "{}-stage token compiler reading {} and emitting {}",
            self.pipeline_stages.len(),
            self.document_formats.join("/"),
            self.output_formats.join(", ")
        )
    }
}

pub fn get_pipeline_info() -> PipelineInfo {
    PipelineInfo {
        pipeline_stages: vec!["document", "validation", "resolution", "units", "emit"],
        output_formats: EmitterRegistry::new()
            .formats()
            .iter()
            .map(|format| format.name().to_string())
            .collect(),
        document_formats: [DocumentFormat::Json, DocumentFormat::Toml]
            .iter()
            .map(|format| format.as_str().to_string())
            .collect(),
        max_file_size: file_processing::MAX_FILE_SIZE,
        max_group_depth: tokens::MAX_GROUP_DEPTH,
        max_tokens: tokens::MAX_TOKENS,
        max_alias_depth: tokens::MAX_ALIAS_DEPTH,
        build_profile: crate::config::build_info::profile(),
        global_logging_enabled: crate::logging::is_initialized(),
    }
}
