//! Task: materialize `storage.files` under `<out>files/`.
use anyhow::Result;

use super::{Context, Task, TaskStats, report};
use crate::error::ProvisionError;
use crate::resources::Applicable as _;
use crate::resources::file::FileResource;
use crate::resources::fs;

/// Write every storage file spec, in config order.
///
/// `<out>files` is created even when there are no files. Later specs for
/// the same path overwrite earlier ones.
#[derive(Debug)]
pub struct WriteFiles;

impl Task for WriteFiles {
    fn name(&self) -> &'static str {
        "Write files"
    }

    fn run(&self, ctx: &Context<'_>) -> Result<TaskStats> {
        fs::ensure_dir(&ctx.output.files_dir())?;

        let mut stats = TaskStats::new();
        for spec in &ctx.config.storage.files {
            let dir = ctx
                .output
                .file_dir(&spec.path)
                .map_err(ProvisionError::from)?;
            fs::ensure_dir(&dir)?;
            let resource = FileResource::from_spec(ctx.output, spec)?;
            let change = resource.apply()?;
            report(ctx, change, &spec.path);
            stats.record(change);
        }
        Ok(stats)
    }
}
