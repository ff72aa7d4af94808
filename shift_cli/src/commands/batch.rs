use super::{format_override, load_project, CliError};
use clap::Args;
use shift_compiler::batch::{self, BatchConfig, BatchResults};
use shift_compiler::config::compile_time::batch_processing::MAX_WORKER_THREADS;
use shift_compiler::config::ProjectConfig;
use shift_compiler::{OutputFormat, PipelineOptions};
use std::path::PathBuf;

#[derive(Args, Debug, Clone)]
pub struct BatchArgs {
    /// Directory to search for `*.tokens.json` / `*.tokens.toml`
    pub directory: PathBuf,

    /// Project configuration file [default: ./shift.toml when present]
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output root, overriding `output.dir`; the source layout is mirrored
    #[arg(long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Output format (css, ts, ts-vars); repeat for several
    #[arg(long = "format", value_name = "FORMAT")]
    pub formats: Vec<OutputFormat>,

    /// Maximum worker threads [default: number of CPUs]
    #[arg(long, value_name = "N")]
    pub threads: Option<usize>,

    /// Build documents one at a time
    #[arg(long, conflicts_with = "threads")]
    pub sequential: bool,

    /// Stop at the first failing document
    #[arg(long)]
    pub fail_fast: bool,

    /// Don't search subdirectories
    #[arg(long)]
    pub no_recursive: bool,

    /// Limit the number of documents built
    #[arg(long, value_name = "N")]
    pub max_files: Option<usize>,

    /// Build every .json / .toml file, not only `*.tokens.*`
    #[arg(long)]
    pub all_documents: bool,

    /// Validate only; write nothing
    #[arg(long)]
    pub check: bool,
}

impl BatchArgs {
    pub fn batch_config(&self, project: &ProjectConfig) -> BatchConfig {
        let mut pipeline = PipelineOptions::for_project(project);
        if let Some(formats) = format_override(&self.formats) {
            pipeline = pipeline.with_formats(formats);
        }

        let out_dir = if self.check {
            pipeline = pipeline.check_only();
            None
        } else {
            Some(
                self.out_dir
                    .clone()
                    .unwrap_or_else(|| project.output.dir.clone()),
            )
        };

        let max_threads = if self.sequential {
            1
        } else {
            self.threads
                .unwrap_or_else(num_cpus::get)
                .clamp(1, MAX_WORKER_THREADS)
        };

        BatchConfig {
            max_threads,
            recursive: !self.no_recursive,
            max_files: self.max_files,
            fail_fast: self.fail_fast,
            all_documents: self.all_documents,
            pipeline,
            out_dir,
        }
    }
}

pub fn run(args: &BatchArgs) -> Result<BatchResults, CliError> {
    let project = load_project(args.config.as_deref())?;
    let config = args.batch_config(&project);

    log::debug!(
        "batch configuration: {} threads, recursive={}, fail_fast={}",
        config.max_threads,
        config.recursive,
        config.fail_fast
    );

    Ok(batch::process_directory_with_config(&args.directory, &config)?)
}

pub fn execute(args: &BatchArgs) -> Result<(), CliError> {
    let results = run(args)?;
    crate::report::print_batch_results(&results);

    if results.failure_count() > 0 {
        return Err(CliError::DocumentsFailed {
            failed: results.failure_count(),
            processed: results.files_processed,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use crate::commands::Command;
    use clap::Parser;
    use std::fs;
    use tempfile::tempdir;

    fn parse(args: &[&str]) -> BatchArgs {
        let argv = ["shift", "batch"].iter().chain(args.iter()).copied();
        match Cli::try_parse_from(argv).unwrap().command {
            Command::Batch(args) => args,
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn maps_flags_onto_batch_config() {
        let project = ProjectConfig::default();

        let config = parse(&["tokens", "--sequential", "--no-recursive", "--check"])
            .batch_config(&project);
        assert_eq!(config.max_threads, 1);
        assert!(!config.recursive);
        assert!(config.out_dir.is_none());
        assert!(config.pipeline.formats.is_empty());

        let config = parse(&["tokens", "--threads", "100000", "--out-dir", "build"])
            .batch_config(&project);
        assert_eq!(config.max_threads, MAX_WORKER_THREADS);
        assert_eq!(config.out_dir, Some(PathBuf::from("build")));
        assert_eq!(config.pipeline.formats, OutputFormat::all().to_vec());

        let config = parse(&["tokens", "--threads", "0"]).batch_config(&project);
        assert_eq!(config.max_threads, 1);
    }

    #[test]
    fn sequential_conflicts_with_threads() {
        assert!(Cli::try_parse_from(["shift", "batch", "d", "--sequential", "--threads", "2"]).is_err());
    }

    #[test]
    fn failing_documents_fail_the_command() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("good.tokens.json"),
            r#"{"RADIUS": {"value": "4", "type": "dimension"}}"#,
        )
        .unwrap();
        fs::write(
            dir.path().join("bad.tokens.json"),
            r#"{"RADIUS": {"value": "4pt", "type": "dimension"}}"#,
        )
        .unwrap();

        let out = dir.path().join("out");
        let args = BatchArgs {
            out_dir: Some(out.clone()),
            config: Some(dir.path().join("none.toml")),
            ..parse(&["unused"])
        };
        // explicit config that doesn't exist is an error
        assert!(matches!(run(&args), Err(CliError::Config(_))));

        let args = BatchArgs {
            directory: dir.path().to_path_buf(),
            config: None,
            ..args
        };
        let results = run(&args).unwrap();
        assert_eq!(results.success_count(), 1);
        assert_eq!(results.failure_count(), 1);
        assert_eq!(
            fs::read_to_string(out.join("good.css")).unwrap(),
            ":root {\n  --radius: 4px;\n}\n"
        );
        assert!(matches!(execute(&args), Err(CliError::DocumentsFailed { failed: 1, processed: 2 })));
    }
}
