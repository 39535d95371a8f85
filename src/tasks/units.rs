//! Task: materialize `systemd.units` and the `units.json` manifest.
use anyhow::Result;

use super::{Context, Task, TaskStats, report};
use crate::resources::Applicable as _;
use crate::resources::fs;
use crate::resources::manifest::Manifest;
use crate::resources::systemd_unit::SystemdUnitResource;

/// Write unit files and drop-ins, then the enablement manifest.
///
/// Only units with non-empty contents get a manifest entry. The manifest is
/// written even when it is empty, and only after every unit succeeded.
#[derive(Debug)]
pub struct WriteUnits;

impl Task for WriteUnits {
    fn name(&self) -> &'static str {
        "Write systemd units"
    }

    fn run(&self, ctx: &Context<'_>) -> Result<TaskStats> {
        fs::ensure_dir(&ctx.output.units_dir())?;

        let mut stats = TaskStats::new();
        let mut manifest = Manifest::new();
        for unit in &ctx.config.systemd.units {
            if unit.enable_overridden() {
                ctx.log.warn(&format!(
                    "{}: enabled=false overrides deprecated enable=true",
                    unit.name
                ));
            }
            let resource = SystemdUnitResource::from_unit(ctx.output, unit)?;
            if resource.is_empty() {
                ctx.log
                    .debug(&format!("{}: no contents or drop-ins", unit.name));
                continue;
            }

            let change = resource.apply()?;
            report(ctx, change, &unit.name);
            stats.record(change);
            if let Some(status) = resource.status() {
                manifest.push(status);
            }
        }

        let path = ctx.output.manifest_path();
        manifest.write(&path)?;
        ctx.log.debug(&format!(
            "wrote {} ({} units)",
            path.display(),
            manifest.len()
        ));
        Ok(stats)
    }
}
