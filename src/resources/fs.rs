//! File-system helpers shared by resource `apply()` methods.
use std::fs::{DirBuilder, OpenOptions};
use std::io::{self, Write as _};
use std::path::Path;

use crate::error::{ProvisionError, Result};

/// Permission bits for created directories (`rwxr-xr-x`, before umask).
pub const DIR_MODE: u32 = 0o755;

/// Permission bits for written files (`rw-r--r--`, before umask).
pub const FILE_MODE: u32 = 0o644;

/// Create `path` and any missing ancestors.
///
/// Succeeds if the directory already exists.
///
/// # Errors
///
/// Returns [`ProvisionError::Io`] if the directory cannot be created.
pub fn ensure_dir(path: &Path) -> Result<()> {
    let mut builder = DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt as _;
        builder.mode(DIR_MODE);
    }
    builder
        .create(path)
        .map_err(|source| ProvisionError::io(path, source))
}

/// Write `contents` to `path`, truncating any existing file.
///
/// The mode only applies when the file is created; an existing file keeps
/// its permissions.
///
/// # Errors
///
/// Returns [`ProvisionError::Io`] if the file cannot be opened or written.
pub fn write_file(path: &Path, contents: &[u8]) -> Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt as _;
        options.mode(FILE_MODE);
    }
    let mut file = options
        .open(path)
        .map_err(|source| ProvisionError::io(path, source))?;
    file.write_all(contents)
        .map_err(|source| ProvisionError::io(path, source))
}

/// Compare the file at `path` against `contents`.
///
/// Returns `None` if nothing exists at `path`. Lengths are compared before
/// any bytes are read. A target that cannot be inspected (e.g. a write-only
/// file) compares as different; it never fails.
pub fn matches_contents(path: &Path, contents: &[u8]) -> Option<bool> {
    let meta = match std::fs::metadata(path) {
        Ok(meta) => meta,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return None,
        Err(_) => return Some(false),
    };
    if u64::try_from(contents.len()).ok() != Some(meta.len()) {
        return Some(false);
    }
    Some(std::fs::read(path).is_ok_and(|existing| existing == contents))
}
