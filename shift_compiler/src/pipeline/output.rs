use super::error::PipelineError;
use crate::emitters::OutputFormat;
use crate::logging::codes;
use crate::{log_error, log_success};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Rendered text for one output format
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedOutput {
    pub format: OutputFormat,
    pub contents: String,
}

impl RenderedOutput {
    pub fn new(format: OutputFormat, contents: String) -> Self {
        Self { format, contents }
    }

    /// `<dir>/<basename>.<suffix>`
    pub fn file_path(&self, dir: &Path, basename: &str) -> PathBuf {
        dir.join(format!("{}.{}", basename, self.format.file_suffix()))
    }
}

/// Basename for a document's outputs: `brand.tokens.json` → `brand`
pub fn document_basename(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let stem = [".tokens.json", ".tokens.toml", ".json", ".toml"]
        .iter()
        .find_map(|suffix| {
            name.len()
                .checked_sub(suffix.len())
                .filter(|&cut| {
                    name.get(cut..)
                        .is_some_and(|tail| tail.eq_ignore_ascii_case(suffix))
                })
                .map(|cut| name[..cut].to_string())
        })
        .unwrap_or(name);

    if stem.is_empty() {
        "tokens".to_string()
    } else {
        stem
    }
}

/// Write every output under `dir`, creating it if needed
pub fn write_outputs(
    outputs: &[RenderedOutput],
    dir: &Path,
    basename: &str,
) -> Result<Vec<PathBuf>, PipelineError> {
    let write_error = |path: &Path, err: std::io::Error| {
        let error = PipelineError::Output {
            path: path.display().to_string(),
            message: err.to_string(),
        };
        log_error!(error.error_code(), &error.to_string(), "stage" => "emit");
        error
    };

    fs::create_dir_all(dir).map_err(|e| write_error(dir, e))?;

    let mut written = Vec::with_capacity(outputs.len());
    for output in outputs {
        let path = output.file_path(dir, basename);
        fs::write(&path, &output.contents).map_err(|e| write_error(&path, e))?;
        log_success!(codes::success::OUTPUT_WRITTEN, "Output written",
            "path" => path.display(),
            "format" => output.format,
            "bytes" => output.contents.len()
        );
        written.push(path);
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use tempfile::tempdir;

    #[test]
    fn basenames_strip_document_suffixes() {
        assert_eq!(document_basename(Path::new("a/brand.tokens.json")), "brand");
        assert_eq!(document_basename(Path::new("theme.TOKENS.TOML")), "theme");
        assert_eq!(document_basename(Path::new("plain.json")), "plain");
        assert_eq!(document_basename(Path::new(".tokens.json")), "tokens");
        assert_eq!(document_basename(Path::new("notes.txt")), "notes.txt");
    }

    #[test]
    fn writes_each_format_under_dir() {
        let dir = tempdir().unwrap();
        let out_dir = dir.path().join("dist/tokens");
        let outputs = vec![
            RenderedOutput::new(OutputFormat::Css, ":root {\n}\n".to_string()),
            RenderedOutput::new(OutputFormat::TypeScriptVars, "export const tokens = {} as const\n".to_string()),
        ];

        let written = write_outputs(&outputs, &out_dir, "design").unwrap();
        assert_eq!(
            written,
            vec![out_dir.join("design.css"), out_dir.join("design.vars.ts")]
        );
        assert_eq!(fs::read_to_string(&written[0]).unwrap(), ":root {\n}\n");
    }

    #[test]
    fn unwritable_dir_is_output_error() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, "x").unwrap();

        let outputs = vec![RenderedOutput::new(OutputFormat::Css, String::new())];
        let result = write_outputs(&outputs, &blocker.join("sub"), "tokens");
        assert_matches!(result, Err(PipelineError::Output { .. }));
    }
}
