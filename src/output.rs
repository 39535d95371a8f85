//! Output root and the fixed layout beneath it.
//!
//! ```text
//! <root>files/<targetPath>
//! <root>systemd/system/<unitName>
//! <root>systemd/system/<unitName>.d/<dropinName>
//! <root>units.json
//! ```
//!
//! Target paths from the config are absolute and are *concatenated* onto
//! `<root>files`, never joined (joining an absolute path would replace the
//! root). Any `..` component is rejected so a target cannot climb out of the
//! output tree.

use std::ffi::OsString;
use std::path::{Component, MAIN_SEPARATOR_STR, Path, PathBuf, is_separator};

use crate::error::PathError;

/// Directory below the root that receives materialized files.
const FILES_DIR: &str = "files";

/// Directory below the root that receives unit files and drop-ins.
const UNITS_DIR: &str = "systemd/system";

/// Name of the unit enablement manifest.
const MANIFEST_FILE: &str = "units.json";

/// Output root, normalized to always end with a path separator.
///
/// # Examples
///
/// ```
/// use ignition_unpack::output::OutputRoot;
///
/// let with = OutputRoot::new("/tmp/x/");
/// let without = OutputRoot::new("/tmp/x");
/// assert_eq!(with, without);
/// assert_eq!(with.manifest_path(), std::path::PathBuf::from("/tmp/x/units.json"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRoot(OsString);

impl OutputRoot {
    /// Create an output root, appending a trailing separator if missing.
    ///
    /// An empty path is treated as the current directory.
    pub fn new(path: impl Into<OsString>) -> Self {
        let mut root = path.into();
        if root.is_empty() {
            root.push(".");
        }
        let ends_with_separator = root
            .as_encoded_bytes()
            .last()
            .is_some_and(|&b| is_separator(char::from(b)));
        if !ends_with_separator {
            root.push(MAIN_SEPARATOR_STR);
        }
        Self(root)
    }

    /// The normalized root, including its trailing separator.
    #[must_use]
    pub fn as_path(&self) -> &Path {
        Path::new(&self.0)
    }

    /// `<root>files`
    #[must_use]
    pub fn files_dir(&self) -> PathBuf {
        self.concat(FILES_DIR)
    }

    /// Local path for a file spec: `<root>files<target>`.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::NotAbsolute`] if `target` does not start at the
    /// filesystem root, or [`PathError::Escapes`] if it contains `..`.
    pub fn file_path(&self, target: &str) -> Result<PathBuf, PathError> {
        check_target(target)?;
        let mut path = self.files_dir().into_os_string();
        path.push(target);
        Ok(PathBuf::from(path))
    }

    /// Directory holding a file spec: `<root>files` plus the directory part
    /// of `target`.
    ///
    /// # Errors
    ///
    /// Same as [`file_path`](Self::file_path).
    pub fn file_dir(&self, target: &str) -> Result<PathBuf, PathError> {
        check_target(target)?;
        let parent = Path::new(target).parent().unwrap_or_else(|| Path::new(target));
        let mut path = self.files_dir().into_os_string();
        path.push(parent.as_os_str());
        Ok(PathBuf::from(path))
    }

    /// `<root>systemd/system`
    #[must_use]
    pub fn units_dir(&self) -> PathBuf {
        self.concat(UNITS_DIR)
    }

    /// `<root>systemd/system/<name>`
    ///
    /// # Errors
    ///
    /// Returns [`PathError::InvalidComponent`] if `name` is not a single
    /// normal path component.
    pub fn unit_path(&self, name: &str) -> Result<PathBuf, PathError> {
        check_component(name)?;
        Ok(self.units_dir().join(name))
    }

    /// `<root>systemd/system/<name>.d`
    ///
    /// # Errors
    ///
    /// Same as [`unit_path`](Self::unit_path).
    pub fn dropin_dir(&self, unit: &str) -> Result<PathBuf, PathError> {
        check_component(unit)?;
        Ok(self.units_dir().join(format!("{unit}.d")))
    }

    /// `<root>systemd/system/<unit>.d/<dropin>`
    ///
    /// # Errors
    ///
    /// Returns [`PathError::InvalidComponent`] if either name is not a single
    /// normal path component.
    pub fn dropin_path(&self, unit: &str, dropin: &str) -> Result<PathBuf, PathError> {
        check_component(dropin)?;
        Ok(self.dropin_dir(unit)?.join(dropin))
    }

    /// `<root>units.json`
    #[must_use]
    pub fn manifest_path(&self) -> PathBuf {
        self.concat(MANIFEST_FILE)
    }

    fn concat(&self, suffix: &str) -> PathBuf {
        let mut path = self.0.clone();
        path.push(suffix);
        PathBuf::from(path)
    }
}

impl Default for OutputRoot {
    fn default() -> Self {
        Self::new("./")
    }
}

fn check_target(target: &str) -> Result<(), PathError> {
    let path = Path::new(target);
    if !path.has_root() {
        return Err(PathError::NotAbsolute(target.to_string()));
    }
    if path.components().any(|c| c == Component::ParentDir) {
        return Err(PathError::Escapes(target.to_string()));
    }
    Ok(())
}

fn check_component(name: &str) -> Result<(), PathError> {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(c)), None) if c == name => Ok(()),
        _ => Err(PathError::InvalidComponent(name.to_string())),
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn trailing_separator_is_added() {
        let root = OutputRoot::new("/tmp/x");
        assert_eq!(root.as_path(), Path::new("/tmp/x/"));
    }

    #[test]
    fn trailing_separator_is_not_doubled() {
        let root = OutputRoot::new("/tmp/x/");
        assert_eq!(root.as_path().as_os_str(), "/tmp/x/");
    }

    #[test]
    fn empty_root_is_current_directory() {
        assert_eq!(OutputRoot::new("").as_path().as_os_str(), "./");
        assert_eq!(OutputRoot::default().as_path().as_os_str(), "./");
    }

    #[test]
    fn file_path_concatenates_target() {
        let root = OutputRoot::new("/tmp/x");
        assert_eq!(
            root.file_path("/etc/foo/bar.conf").unwrap(),
            PathBuf::from("/tmp/x/files/etc/foo/bar.conf")
        );
        assert_eq!(
            root.file_dir("/etc/foo/bar.conf").unwrap(),
            PathBuf::from("/tmp/x/files/etc/foo")
        );
    }

    #[test]
    fn file_dir_of_top_level_file_is_files_root() {
        let root = OutputRoot::new("/tmp/x/");
        assert_eq!(
            root.file_dir("/motd").unwrap().as_os_str(),
            "/tmp/x/files/"
        );
    }

    #[test]
    fn relative_root_is_kept_relative() {
        let root = OutputRoot::default();
        assert_eq!(
            root.file_path("/a/b.txt").unwrap(),
            PathBuf::from("./files/a/b.txt")
        );
    }

    #[test]
    fn parent_components_are_rejected() {
        let root = OutputRoot::new("/tmp/x");
        assert_eq!(
            root.file_path("/etc/../../escape"),
            Err(PathError::Escapes("/etc/../../escape".to_string()))
        );
        assert!(root.file_dir("/../x").is_err());
    }

    #[test]
    fn relative_targets_are_rejected() {
        let root = OutputRoot::new("/tmp/x");
        assert_eq!(
            root.file_path("etc/hosts"),
            Err(PathError::NotAbsolute("etc/hosts".to_string()))
        );
    }

    #[test]
    fn unit_paths() {
        let root = OutputRoot::new("/tmp/x");
        assert_eq!(
            root.unit_path("foo.service").unwrap(),
            PathBuf::from("/tmp/x/systemd/system/foo.service")
        );
        assert_eq!(
            root.dropin_path("foo.service", "10-env.conf").unwrap(),
            PathBuf::from("/tmp/x/systemd/system/foo.service.d/10-env.conf")
        );
        assert_eq!(root.manifest_path(), PathBuf::from("/tmp/x/units.json"));
    }

    #[test]
    fn unit_names_must_be_single_components() {
        let root = OutputRoot::new("/tmp/x");
        assert!(root.unit_path("../evil.service").is_err());
        assert!(root.unit_path("a/b.service").is_err());
        assert!(root.unit_path("..").is_err());
        assert!(root.unit_path("").is_err());
        assert!(root.dropin_path("foo.service", "../x.conf").is_err());
    }
}
