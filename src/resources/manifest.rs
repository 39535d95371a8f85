//! The `units.json` enablement manifest.
//!
//! The manifest lists every unit that got a unit file, in config order, as
//! a compact JSON array:
//!
//! ```text
//! [{"unitname":"foo.service","enable":true}]
//! ```
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::fs;
use crate::error::Result;

/// One manifest entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitStatus {
    /// Unit name.
    #[serde(rename = "unitname")]
    pub unit_name: String,
    /// Whether the unit should be enabled.
    pub enable: bool,
}

impl UnitStatus {
    /// Create a new entry.
    #[must_use]
    pub fn new(unit_name: impl Into<String>, enable: bool) -> Self {
        Self {
            unit_name: unit_name.into(),
            enable,
        }
    }
}

/// Ordered list of unit statuses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    entries: Vec<UnitStatus>,
}

impl Manifest {
    /// Create an empty manifest.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append an entry. Duplicates are kept.
    pub fn push(&mut self, status: UnitStatus) {
        self.entries.push(status);
    }

    /// Entries in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[UnitStatus] {
        &self.entries
    }

    /// Number of entries.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` if no unit was recorded.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serialize to compact JSON with no trailing newline.
    ///
    /// # Errors
    ///
    /// Returns [`ProvisionError::Manifest`](crate::error::ProvisionError::Manifest)
    /// if serialization fails.
    pub fn to_json(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(&self.entries)?)
    }

    /// Write the manifest to `path`, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn write(&self, path: &Path) -> Result<()> {
        fs::write_file(path, &self.to_json()?)
    }
}

impl FromIterator<UnitStatus> for Manifest {
    fn from_iter<I: IntoIterator<Item = UnitStatus>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
