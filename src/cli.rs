//! Command-line surface.
use std::path::PathBuf;

use clap::Parser;

use crate::commands::materialize::RunOptions;
use crate::logging::Verbosity;
use crate::output::OutputRoot;

/// Materialize an Ignition config into a local `files/` and `systemd/` tree.
#[derive(Parser, Debug)]
#[command(name = "ignition-unpack", version = crate::VERSION)]
pub struct Cli {
    /// Path to the Ignition config
    #[arg(long, value_name = "PATH")]
    pub ignition: PathBuf,

    /// Directory to write output files to
    #[arg(long, value_name = "DIR", default_value = "./")]
    pub out: PathBuf,

    /// Don't report changes, just write the output
    #[arg(long, conflicts_with = "verbose")]
    pub silent: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Console verbosity selected by `--silent` / `--verbose`.
    #[must_use]
    pub const fn verbosity(&self) -> Verbosity {
        if self.silent {
            Verbosity::Quiet
        } else if self.verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Normal
        }
    }

    /// Convert parsed flags into run options, normalizing the output root.
    #[must_use]
    pub fn into_options(self) -> RunOptions {
        RunOptions {
            ignition: self.ignition,
            output: OutputRoot::new(self.out),
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_defaults() {
        let cli = Cli::parse_from(["ignition-unpack", "--ignition", "config.ign"]);
        assert_eq!(cli.ignition, PathBuf::from("config.ign"));
        assert_eq!(cli.out, PathBuf::from("./"));
        assert!(!cli.silent);
        assert_eq!(cli.verbosity(), Verbosity::Normal);
    }

    #[test]
    fn ignition_is_required() {
        let err = Cli::try_parse_from(["ignition-unpack"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn silent_is_quiet() {
        let cli = Cli::parse_from(["ignition-unpack", "--ignition", "c", "--silent"]);
        assert_eq!(cli.verbosity(), Verbosity::Quiet);
    }

    #[test]
    fn parse_verbose() {
        let cli = Cli::parse_from(["ignition-unpack", "--ignition", "c", "-v"]);
        assert_eq!(cli.verbosity(), Verbosity::Verbose);
    }

    #[test]
    fn silent_conflicts_with_verbose() {
        let err =
            Cli::try_parse_from(["ignition-unpack", "--ignition", "c", "--silent", "-v"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn out_is_normalized() {
        let opts = Cli::parse_from(["ignition-unpack", "--ignition", "c", "--out", "/tmp/x"])
            .into_options();
        assert_eq!(opts.output, OutputRoot::new("/tmp/x/"));
        assert_eq!(opts.output.as_path(), std::path::Path::new("/tmp/x/"));
    }

    #[test]
    fn help_is_a_display_error() {
        let err = Cli::try_parse_from(["ignition-unpack", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }
}
