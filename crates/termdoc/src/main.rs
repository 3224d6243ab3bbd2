//! `termdoc`: palette configuration and contrast checks for the termdoc theme.

mod cli;
mod commands;
mod logging;
mod output;
mod site;

use std::process::ExitCode;

use clap::Parser;

use crate::cli::{Cli, Command};
use crate::output::render;

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Runs the selected command and prints its report. Returns whether the
/// command succeeded.
fn run(cli: &Cli) -> anyhow::Result<bool> {
    match &cli.command {
        Command::Resolve(args) => {
            let report = commands::resolve::run(args)?;
            println!("{}", render(&report, cli.output)?);
            if args.strict && report.has_warnings() {
                if !cli.output.is_structured() {
                    eprintln!(
                        "Error: {} palette warning(s) with --strict",
                        report.warnings.len()
                    );
                }
                return Ok(false);
            }
            Ok(true)
        }
        Command::Audit(args) => {
            let report = commands::audit::run(args)?;
            println!("{}", render(&report, cli.output)?);
            Ok(report.passed())
        }
    }
}
