use super::{format_override, load_project, CliError};
use clap::Args;
use shift_compiler::pipeline::{self, PipelineOptions, PipelineResult};
use shift_compiler::OutputFormat;
use std::io::Write;
use std::path::PathBuf;

#[derive(Args, Debug, Clone)]
pub struct BuildArgs {
    /// Token document (.json or .toml)
    pub document: PathBuf,

    /// Project configuration file [default: ./shift.toml when present]
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output directory, overriding `output.dir`
    #[arg(long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Output format (css, ts, ts-vars); repeat for several
    #[arg(long = "format", value_name = "FORMAT")]
    pub formats: Vec<OutputFormat>,

    /// Print outputs to stdout instead of writing files
    #[arg(long)]
    pub stdout: bool,
}

#[derive(Debug)]
pub struct BuildOutcome {
    pub result: PipelineResult,
    /// Empty with `--stdout`
    pub written: Vec<PathBuf>,
}

pub fn run(args: &BuildArgs) -> Result<BuildOutcome, CliError> {
    let project = load_project(args.config.as_deref())?;

    let mut options = PipelineOptions::for_project(&project);
    if let Some(formats) = format_override(&args.formats) {
        options = options.with_formats(formats);
    }

    let result = pipeline::process_file(&args.document, &options)?;

    let written = if args.stdout {
        Vec::new()
    } else {
        let dir = args
            .out_dir
            .clone()
            .unwrap_or_else(|| project.output.dir.clone());
        pipeline::write_outputs(&result.outputs, &dir, &project.output.basename)?
    };

    Ok(BuildOutcome { result, written })
}

pub fn execute(args: &BuildArgs) -> Result<(), CliError> {
    let outcome = run(args)?;

    if args.stdout {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        let multiple = outcome.result.outputs.len() > 1;
        for output in &outcome.result.outputs {
            if multiple {
                writeln!(out, "==> {} <==", output.format)?;
            }
            out.write_all(output.contents.as_bytes())?;
        }
        out.flush()?;
    } else {
        crate::report::print_build(&outcome);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::fs;
    use tempfile::tempdir;

    const DOCUMENT: &str = r##"{
        "COLORS": {
            "PRIMARY": {"value": "#0000ff", "type": "color", "themes": {"dark": "#000088"}},
            "LINK": {"value": "{COLORS.PRIMARY}"}
        },
        "SPACING": {"SPACING_2": {"value": 16, "type": "dimension"}}
    }"##;

    fn args(dir: &std::path::Path) -> BuildArgs {
        let document = dir.join("brand.tokens.json");
        fs::write(&document, DOCUMENT).unwrap();
        let config = dir.join("shift.toml");
        fs::write(
            &config,
            "[themes]\ndark = \":root .dark\"\n\n[output]\nbasename = \"brand\"\n",
        )
        .unwrap();

        BuildArgs {
            document,
            config: Some(config),
            out_dir: Some(dir.join("dist")),
            formats: Vec::new(),
            stdout: false,
        }
    }

    #[test]
    fn writes_every_configured_format() {
        let dir = tempdir().unwrap();
        let outcome = run(&args(dir.path())).unwrap();

        let dist = dir.path().join("dist");
        assert_eq!(
            outcome.written,
            vec![dist.join("brand.css"), dist.join("brand.ts"), dist.join("brand.vars.ts")]
        );

        let css = fs::read_to_string(dist.join("brand.css")).unwrap();
        assert!(css.contains("  --colors-link: var(--colors-primary);\n"));
        assert!(css.contains("  --spacing-spacing_2: 16px;\n"));
        assert!(css.contains(":root .dark {\n  --colors-primary: #000088;\n"));
    }

    #[test]
    fn format_flag_and_stdout_mode() {
        let dir = tempdir().unwrap();
        let args = BuildArgs {
            formats: vec![OutputFormat::TypeScriptVars],
            stdout: true,
            ..args(dir.path())
        };

        let outcome = run(&args).unwrap();
        assert!(outcome.written.is_empty());
        assert_eq!(outcome.result.outputs.len(), 1);
        assert!(outcome.result.outputs[0]
            .contents
            .contains("\"PRIMARY\": \"var(--colors-primary)\""));
        assert!(!dir.path().join("dist").exists());
    }

    #[test]
    fn invalid_document_fails_without_outputs() {
        let dir = tempdir().unwrap();
        let args = args(dir.path());
        fs::write(&args.document, r##"{"COLORS": {"bg": {"value": "#fff"}}}"##).unwrap();

        assert_matches!(run(&args), Err(CliError::Pipeline(_)));
        assert!(!dir.path().join("dist").exists());
    }
}
