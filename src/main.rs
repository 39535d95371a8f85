//! `ignition-unpack` binary entry point.
use std::process::ExitCode;

use clap::Parser;
use ignition_unpack::{cli, commands, logging};

fn main() -> ExitCode {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = cli::Cli::parse();
    logging::init_subscriber(args.verbosity());
    let log = logging::Logger::new();

    match commands::materialize::run(&args.into_options(), &log) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log.error(&format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}
