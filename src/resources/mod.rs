//! Materialization primitives (check + apply pattern).
//!
//! Every resource is always written: apply never skips a write because the
//! on-disk state already matches. The state check only decides how the
//! change is *reported*.
pub mod data_url;
pub mod file;
pub mod fs;
pub mod manifest;
pub mod systemd_unit;

use std::fmt;

use crate::error::Result;

/// Minimal interface for resources that can be described and applied.
///
/// Composite resources whose state is the sum of their parts (e.g. a unit
/// with its drop-ins) implement only this trait. Resources that can report
/// their own state implement the richer [`Resource`] super-trait.
pub trait Applicable {
    /// Human-readable description of this resource.
    fn description(&self) -> String;

    /// Write the resource to disk, overwriting whatever is there.
    ///
    /// # Errors
    ///
    /// Returns an error if a directory cannot be created or a file cannot be
    /// written.
    fn apply(&self) -> Result<ResourceChange>;
}

/// On-disk state of a resource before it is applied.
///
/// # Examples
///
/// ```
/// use ignition_unpack::resources::ResourceState;
///
/// assert_ne!(ResourceState::Missing, ResourceState::Correct);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceState {
    /// Nothing exists at the target path.
    Missing,
    /// The target already holds exactly the desired bytes.
    Correct,
    /// The target exists with different contents.
    Incorrect,
}

/// What applying a resource did.
///
/// Variants are ordered by significance so a composite resource can report
/// the [`max`](Ord::max) of its parts.
///
/// # Examples
///
/// ```
/// use ignition_unpack::resources::ResourceChange;
///
/// let merged = [ResourceChange::Unchanged, ResourceChange::Created]
///     .into_iter()
///     .max()
///     .unwrap_or_default();
/// assert_eq!(merged, ResourceChange::Created);
/// assert_eq!(ResourceChange::Updated.to_string(), "updated");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum ResourceChange {
    /// Rewritten with identical contents.
    #[default]
    Unchanged,
    /// Existing contents were replaced.
    Updated,
    /// Written where nothing existed before.
    Created,
}

impl From<ResourceState> for ResourceChange {
    fn from(state: ResourceState) -> Self {
        match state {
            ResourceState::Missing => Self::Created,
            ResourceState::Correct => Self::Unchanged,
            ResourceState::Incorrect => Self::Updated,
        }
    }
}

impl fmt::Display for ResourceChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Unchanged => "unchanged",
            Self::Updated => "updated",
            Self::Created => "created",
        })
    }
}

/// Interface for resources that can be checked and applied.
pub trait Resource: Applicable {
    /// Check the current on-disk state of the resource.
    ///
    /// A target that exists but cannot be read is
    /// [`ResourceState::Incorrect`].
    fn current_state(&self) -> ResourceState;
}
