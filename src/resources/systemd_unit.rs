//! Systemd unit files and their drop-ins.
use std::path::PathBuf;

use super::file::FileResource;
use super::manifest::UnitStatus;
use super::{Applicable, ResourceChange, fs};
use crate::config::Unit;
use crate::error::Result;
use crate::output::OutputRoot;

/// A unit's file and drop-in directory under `systemd/system`.
///
/// The unit file only exists when the config gives non-empty contents;
/// drop-ins are written regardless.
#[derive(Debug, Clone)]
pub struct SystemdUnitResource {
    /// Unit name (e.g. `"docker.service"`).
    pub name: String,
    /// Whether the unit is meant to be enabled.
    pub enable: bool,
    /// The unit file, if the unit has contents.
    pub unit_file: Option<FileResource>,
    /// `<name>.d` directory holding the drop-ins.
    pub dropin_dir: PathBuf,
    /// Drop-in files, in config order.
    pub dropins: Vec<FileResource>,
}

impl SystemdUnitResource {
    /// Build from a config entry.
    ///
    /// # Errors
    ///
    /// Returns [`ProvisionError::Path`](crate::error::ProvisionError::Path)
    /// if the unit or a drop-in name is not a plain file name.
    pub fn from_unit(output: &OutputRoot, unit: &Unit) -> Result<Self> {
        let unit_file = if unit.contents.is_empty() {
            None
        } else {
            Some(FileResource::new(
                output.unit_path(&unit.name)?,
                unit.contents.as_bytes(),
            ))
        };

        let dropins = unit
            .dropins
            .iter()
            .map(|d| {
                Ok(FileResource::new(
                    output.dropin_path(&unit.name, &d.name)?,
                    d.contents.as_bytes(),
                ))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            name: unit.name.clone(),
            enable: unit.is_enabled(),
            unit_file,
            dropin_dir: output.dropin_dir(&unit.name)?,
            dropins,
        })
    }

    /// `true` when there is neither a unit file nor any drop-in to write.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.unit_file.is_none() && self.dropins.is_empty()
    }

    /// Manifest entry for this unit; `None` unless it has a unit file.
    #[must_use]
    pub fn status(&self) -> Option<UnitStatus> {
        self.unit_file
            .as_ref()
            .map(|_| UnitStatus::new(&self.name, self.enable))
    }
}

impl Applicable for SystemdUnitResource {
    fn description(&self) -> String {
        self.name.clone()
    }

    fn apply(&self) -> Result<ResourceChange> {
        let mut change = ResourceChange::default();
        if let Some(file) = &self.unit_file {
            change = change.max(file.apply()?);
        }
        if !self.dropins.is_empty() {
            fs::ensure_dir(&self.dropin_dir)?;
            for dropin in &self.dropins {
                change = change.max(dropin.apply()?);
            }
        }
        Ok(change)
    }
}
