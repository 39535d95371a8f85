//! Named tasks that orchestrate resource changes.
pub mod context;
pub mod files;
pub mod units;

pub use context::Context;

use anyhow::Result;

use crate::logging::TaskStatus;
use crate::resources::ResourceChange;

/// A named, executable task.
pub trait Task {
    /// Human-readable task name.
    fn name(&self) -> &'static str;

    /// Execute the task.
    ///
    /// # Errors
    ///
    /// Returns an error on the first resource that cannot be decoded or
    /// written; nothing after it is attempted.
    fn run(&self, ctx: &Context<'_>) -> Result<TaskStats>;
}

/// Counters for resource changes within a task.
///
/// # Examples
///
/// ```
/// use ignition_unpack::resources::ResourceChange;
/// use ignition_unpack::tasks::TaskStats;
///
/// let mut stats = TaskStats::new();
/// stats.record(ResourceChange::Created);
/// stats.record(ResourceChange::Created);
/// stats.record(ResourceChange::Unchanged);
///
/// assert_eq!(stats.summary(), "2 created, 0 updated, 1 unchanged");
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TaskStats {
    /// Number of items written where nothing existed.
    pub created: u32,
    /// Number of items whose contents were replaced.
    pub updated: u32,
    /// Number of items rewritten with identical contents.
    pub unchanged: u32,
}

impl TaskStats {
    /// Create a new empty stats counter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one applied resource.
    pub const fn record(&mut self, change: ResourceChange) {
        match change {
            ResourceChange::Created => self.created += 1,
            ResourceChange::Updated => self.updated += 1,
            ResourceChange::Unchanged => self.unchanged += 1,
        }
    }

    /// Total number of items applied.
    #[must_use]
    pub const fn total(&self) -> u32 {
        self.created + self.updated + self.unchanged
    }

    /// Format the summary string (e.g. "3 created, 1 updated, 0 unchanged").
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "{} created, {} updated, {} unchanged",
            self.created, self.updated, self.unchanged
        )
    }
}

/// The complete set of tasks, in execution order.
#[must_use]
pub fn all_tasks() -> Vec<Box<dyn Task>> {
    vec![Box::new(files::WriteFiles), Box::new(units::WriteUnits)]
}

/// Execute a task, recording the result in the logger.
///
/// # Errors
///
/// Returns the task's error after recording it as failed.
pub fn execute(task: &dyn Task, ctx: &Context<'_>) -> Result<TaskStats> {
    ctx.log.stage(task.name());

    match task.run(ctx) {
        Ok(stats) => {
            let summary = stats.summary();
            ctx.log.debug(&summary);
            ctx.log
                .record_task(task.name(), TaskStatus::Ok, Some(&summary));
            Ok(stats)
        }
        Err(e) => {
            ctx.log
                .record_task(task.name(), TaskStatus::Failed, Some(&format!("{e:#}")));
            Err(e)
        }
    }
}

/// Log one applied resource as "created", "updated" or "unchanged".
fn report(ctx: &Context<'_>, change: ResourceChange, what: &str) {
    ctx.log.info(&format!("{change} {what}"));
}

/// Shared helpers for task unit tests.
#[cfg(test)]
pub mod test_helpers {
    use std::sync::Mutex;

    use crate::logging::{Log, TaskStatus};

    /// A [`Log`] that keeps every message in memory.
    #[derive(Debug, Default)]
    pub struct RecordingLog {
        /// `(level, message)` pairs in emission order.
        pub messages: Mutex<Vec<(&'static str, String)>>,
        /// Recorded task results.
        pub tasks: Mutex<Vec<(String, TaskStatus, Option<String>)>>,
    }

    impl RecordingLog {
        fn push(&self, level: &'static str, msg: &str) {
            self.messages
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner)
                .push((level, msg.to_string()));
        }

        /// Messages logged at `level`.
        #[must_use]
        pub fn at(&self, level: &str) -> Vec<String> {
            self.messages
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner)
                .iter()
                .filter(|(l, _)| *l == level)
                .map(|(_, m)| m.clone())
                .collect()
        }
    }

    impl Log for RecordingLog {
        fn stage(&self, msg: &str) {
            self.push("stage", msg);
        }
        fn info(&self, msg: &str) {
            self.push("info", msg);
        }
        fn debug(&self, msg: &str) {
            self.push("debug", msg);
        }
        fn warn(&self, msg: &str) {
            self.push("warn", msg);
        }
        fn error(&self, msg: &str) {
            self.push("error", msg);
        }
        fn record_task(&self, name: &str, status: TaskStatus, message: Option<&str>) {
            self.tasks
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner)
                .push((name.to_string(), status, message.map(String::from)));
        }
    }
}
