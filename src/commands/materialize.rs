//! Decode an Ignition config and write it out under the output root.
use std::path::PathBuf;

use anyhow::{Context as _, Result};

use crate::config::Config;
use crate::error::ProvisionError;
use crate::logging::Logger;
use crate::output::OutputRoot;
use crate::tasks::{self, Context};

/// Resolved options for a single run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    /// Path to the Ignition config.
    pub ignition: PathBuf,
    /// Normalized output root.
    pub output: OutputRoot,
}

/// Run the materializer.
///
/// Files are written before units; the first failure stops the run and
/// leaves whatever was already written in place.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded or any output cannot be
/// written.
pub fn run(opts: &RunOptions, log: &Logger) -> Result<()> {
    log.info(&format!("Ignition config: {}", opts.ignition.display()));

    let config = Config::load(&opts.ignition).map_err(ProvisionError::from)?;
    log.debug(&format!(
        "{} files, {} units",
        config.storage.files.len(),
        config.systemd.units.len()
    ));

    let ctx = Context::new(&config, &opts.output, log);
    let result = tasks::all_tasks()
        .iter()
        .try_for_each(|task| tasks::execute(task.as_ref(), &ctx).map(drop));

    log.print_summary();
    result.with_context(|| format!("failed to materialize into {}", opts.output.as_path().display()))
}
