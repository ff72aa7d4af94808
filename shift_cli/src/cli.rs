use crate::commands::Command;
use clap::{ArgAction, Parser};

#[derive(Parser, Debug)]
#[command(name = "shift")]
#[command(version, about = "Compile design tokens into CSS custom properties and TypeScript")]
pub struct Cli {
    /// Raise log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{BatchArgs, BuildArgs};
    use clap::CommandFactory;
    use shift_compiler::OutputFormat;
    use std::path::PathBuf;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_build_with_repeated_formats() {
        let cli = Cli::try_parse_from([
            "shift", "build", "tokens.json", "--config", "shift.toml", "--out-dir", "dist",
            "--format", "css", "--format", "ts-vars", "-vv",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        match cli.command {
            Command::Build(BuildArgs { document, config, out_dir, formats, stdout }) => {
                assert_eq!(document, PathBuf::from("tokens.json"));
                assert_eq!(config, Some(PathBuf::from("shift.toml")));
                assert_eq!(out_dir, Some(PathBuf::from("dist")));
                assert_eq!(formats, vec![OutputFormat::Css, OutputFormat::TypeScriptVars]);
                assert!(!stdout);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn rejects_unknown_format() {
        let err = Cli::try_parse_from(["shift", "build", "tokens.json", "--format", "scss"])
            .unwrap_err();
        assert!(err.to_string().contains("scss"));
    }

    #[test]
    fn parses_batch_options() {
        let cli = Cli::try_parse_from([
            "shift", "batch", "tokens/", "--threads", "4", "--fail-fast", "--no-recursive",
            "--max-files", "10",
        ])
        .unwrap();

        match cli.command {
            Command::Batch(BatchArgs {
                directory,
                threads,
                fail_fast,
                no_recursive,
                max_files,
                sequential,
                ..
            }) => {
                assert_eq!(directory, PathBuf::from("tokens/"));
                assert_eq!(threads, Some(4));
                assert!(fail_fast);
                assert!(no_recursive);
                assert_eq!(max_files, Some(10));
                assert!(!sequential);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn check_requires_document() {
        assert!(Cli::try_parse_from(["shift", "check"]).is_err());
        let cli = Cli::try_parse_from(["shift", "check", "a.tokens.toml"]).unwrap();
        assert_eq!(cli.command.name(), "check");
    }
}
