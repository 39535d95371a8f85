//! Ignition config decoding.
//!
//! Only the subset of the Ignition 2.x schema that the materializer consumes
//! is modelled: `storage.files[].path`, `storage.files[].contents.source` and
//! `systemd.units[]`. Every other key is accepted and ignored, so real-world
//! configs carrying `filesystem`, `mode`, `user`, `passwd`, `networkd` and
//! friends still decode.
//!
//! # Example
//!
//! ```
//! use ignition_unpack::config::Config;
//!
//! let config: Config = r#"{
//!     "ignition": { "version": "2.2.0" },
//!     "systemd": { "units": [{ "name": "foo.service", "enabled": true, "contents": "[Unit]" }] }
//! }"#
//! .parse()
//! .unwrap();
//!
//! assert_eq!(config.systemd.units.len(), 1);
//! assert!(config.systemd.units[0].is_enabled());
//! ```

pub mod validation;

use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};

use crate::error::ConfigError;

/// A decoded Ignition config.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// Metadata about the config itself.
    #[serde(default, deserialize_with = "null_as_default")]
    pub ignition: Ignition,

    /// Files to materialize.
    #[serde(default, deserialize_with = "null_as_default")]
    pub storage: Storage,

    /// Systemd units to materialize.
    #[serde(default, deserialize_with = "null_as_default")]
    pub systemd: Systemd,
}

/// The `ignition` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Ignition {
    /// Config schema version, e.g. `"2.2.0"`.
    pub version: Option<String>,
}

/// The `storage` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Storage {
    /// File specs, in config order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub files: Vec<File>,
}

/// A file to write.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct File {
    /// Absolute target path on the provisioned host.
    pub path: String,

    /// Where the file's bytes come from.
    #[serde(default, deserialize_with = "null_as_default")]
    pub contents: FileContents,
}

/// The `contents` of a file spec.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FileContents {
    /// Encoded content source, e.g. `"data:,hello%20world"`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub source: String,
}

/// The `systemd` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Systemd {
    /// Unit specs, in config order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub units: Vec<Unit>,
}

/// A systemd unit with optional inline contents and drop-ins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Unit {
    /// Unit name including its type suffix (e.g. `"docker.service"`).
    pub name: String,

    /// Deprecated enable flag from early 2.x schemas.
    #[serde(default, deserialize_with = "null_as_default")]
    pub enable: bool,

    /// Enable flag; takes precedence over [`enable`](Self::enable) when set.
    #[serde(default)]
    pub enabled: Option<bool>,

    /// Inline unit file contents; empty means "no unit file".
    #[serde(default, deserialize_with = "null_as_default")]
    pub contents: String,

    /// Drop-in fragments, in config order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub dropins: Vec<Dropin>,
}

impl Unit {
    /// Whether the unit should be recorded as enabled.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled.unwrap_or(self.enable)
    }

    /// Whether `enabled: false` overrides an explicit `enable: true`.
    #[must_use]
    pub const fn enable_overridden(&self) -> bool {
        self.enable && matches!(self.enabled, Some(false))
    }
}

/// A drop-in override for a unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Dropin {
    /// Drop-in file name (e.g. `"10-env.conf"`).
    pub name: String,

    /// Drop-in contents.
    #[serde(default, deserialize_with = "null_as_default")]
    pub contents: String,
}

/// Deserialize an optional field, treating an explicit `null` like an
/// absent key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Config {
    /// Read and decode the config at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or any error
    /// from [`Config::parse`].
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let data = std::fs::read(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&data)
    }

    /// Decode raw config bytes.
    ///
    /// Empty input, cloud-configs and scripts are recognised up front so
    /// they get a clearer message than a JSON syntax error.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the input is not a valid, supported
    /// Ignition config.
    pub fn parse(data: &[u8]) -> Result<Self, ConfigError> {
        let trimmed = data.trim_ascii();
        if trimmed.is_empty() {
            return Err(ConfigError::Empty);
        }
        if trimmed.starts_with(b"#cloud-config") {
            return Err(ConfigError::CloudConfig);
        }
        if trimmed.starts_with(b"#!") {
            return Err(ConfigError::Script);
        }

        let config: Self = serde_json::from_slice(trimmed)?;
        validation::validate(&config)?;
        Ok(config)
    }
}

impl FromStr for Config {
    type Err = ConfigError;

    fn from_str(data: &str) -> Result<Self, Self::Err> {
        Self::parse(data.as_bytes())
    }
}
