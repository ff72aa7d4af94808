use super::{load_project, CliError};
use clap::Args;
use shift_compiler::pipeline::{self, PipelineOptions, PipelineResult};
use std::path::PathBuf;

#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    /// Token document (.json or .toml)
    pub document: PathBuf,

    /// Project configuration file supplying themes and breakpoints
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Full compile with rendering switched off
pub fn run(args: &CheckArgs) -> Result<PipelineResult, CliError> {
    let project = load_project(args.config.as_deref())?;
    let options = PipelineOptions::for_project(&project).check_only();
    Ok(pipeline::process_file(&args.document, &options)?)
}

pub fn execute(args: &CheckArgs) -> Result<(), CliError> {
    let result = run(args)?;
    crate::report::print_check(&result);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use shift_compiler::PipelineError;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn check_renders_nothing() {
        let dir = tempdir().unwrap();
        let document = dir.path().join("spacing.tokens.toml");
        fs::write(
            &document,
            "[SPACING.SMALL]\nvalue = 4\ntype = \"dimension\"\n\n[SPACING.GAP]\nvalue = \"{SPACING.SMALL}\"\n",
        )
        .unwrap();

        let result = run(&CheckArgs { document, config: None }).unwrap();
        assert!(result.outputs.is_empty());
        assert_eq!(result.token_count(), 2);
        assert_eq!(result.compiled.metrics.alias_count, 1);
    }

    #[test]
    fn check_reports_alias_cycle() {
        let dir = tempdir().unwrap();
        let document = dir.path().join("loop.tokens.json");
        fs::write(
            &document,
            r#"{"A": {"value": "{B}"}, "B": {"value": "{A}"}}"#,
        )
        .unwrap();

        let err = run(&CheckArgs { document, config: None }).unwrap_err();
        assert_matches!(err, CliError::Pipeline(PipelineError::Resolution(_)));
    }
}
