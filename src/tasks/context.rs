//! Shared state handed to every task.
use crate::config::Config;
use crate::logging::Log;
use crate::output::OutputRoot;

/// Shared context for task execution.
pub struct Context<'a> {
    /// The decoded Ignition config.
    pub config: &'a Config,
    /// Normalized output root.
    pub output: &'a OutputRoot,
    /// Logger for output and task recording.
    pub log: &'a dyn Log,
}

impl std::fmt::Debug for Context<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("config", &"<Config>")
            .field("output", &self.output)
            .field("log", &"<dyn Log>")
            .finish()
    }
}

impl<'a> Context<'a> {
    /// Creates a new context for task execution.
    #[must_use]
    pub const fn new(config: &'a Config, output: &'a OutputRoot, log: &'a dyn Log) -> Self {
        Self {
            config,
            output,
            log,
        }
    }
}
