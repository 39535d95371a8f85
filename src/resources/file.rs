//! A single file materialized from decoded bytes.
use std::path::{Path, PathBuf};

use super::{Applicable, Resource, ResourceChange, ResourceState, data_url, fs};
use crate::config;
use crate::error::{ProvisionError, Result};
use crate::output::OutputRoot;

/// A file whose contents are fully known in memory.
///
/// Used for storage files as well as unit files and drop-ins; the parent
/// directory must already exist when [`apply`](Applicable::apply) runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileResource {
    /// Local path to write.
    pub path: PathBuf,
    /// Bytes to write.
    pub contents: Vec<u8>,
}

impl FileResource {
    /// Create a new file resource.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, contents: impl Into<Vec<u8>>) -> Self {
        Self {
            path: path.into(),
            contents: contents.into(),
        }
    }

    /// Build from a storage file spec, decoding its content source.
    ///
    /// # Errors
    ///
    /// Returns [`ProvisionError::Path`] if the target path is unusable and
    /// [`ProvisionError::Content`] if the content source fails to decode.
    pub fn from_spec(output: &OutputRoot, spec: &config::File) -> Result<Self> {
        let path = output.file_path(&spec.path)?;
        let contents =
            data_url::decode(&spec.contents.source).map_err(|source| ProvisionError::Content {
                path: spec.path.clone(),
                source,
            })?;
        Ok(Self::new(path, contents))
    }

    /// Local path this resource writes to.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Applicable for FileResource {
    fn description(&self) -> String {
        self.path.display().to_string()
    }

    fn apply(&self) -> Result<ResourceChange> {
        let state = self.current_state();
        fs::write_file(&self.path, &self.contents)?;
        Ok(state.into())
    }
}

impl Resource for FileResource {
    fn current_state(&self) -> ResourceState {
        match fs::matches_contents(&self.path, &self.contents) {
            None => ResourceState::Missing,
            Some(true) => ResourceState::Correct,
            Some(false) => ResourceState::Incorrect,
        }
    }
}
