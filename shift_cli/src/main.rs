use clap::Parser;
use shift_cli::cli::Cli;
use shift_cli::{commands, report};
use shift_compiler::{log_info, logging};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(message) = shift_cli::init_logging(cli.verbose) {
        eprintln!("error: failed to initialize logging: {}", message);
        return ExitCode::FAILURE;
    }
    log_info!("Shift starting",
        "command" => cli.command.name(),
        "version" => env!("CARGO_PKG_VERSION")
    );

    match commands::execute(&cli.command) {
        Ok(()) => {
            logging::print_cargo_style_summary();
            ExitCode::SUCCESS
        }
        Err(error) => {
            report::print_error(&error);
            logging::print_cargo_style_summary();
            ExitCode::FAILURE
        }
    }
}
