//! Schema checks applied after a config has been deserialized.
//!
//! Name checks mirror Ignition's 2.x rules: only the extension of a unit or
//! drop-in name is inspected, so bare names such as `.service` and `.conf`
//! pass. Anything not covered here is passed through untouched.
//!
//! Unlike Ignition, only 2.x configs are accepted. Version 1 configs (which
//! carry `ignitionVersion` instead of `ignition.version`) are not translated
//! and fail with [`ConfigError::MissingVersion`].
use std::path::Path;

use super::Config;
use crate::error::ConfigError;

/// Major version of the supported config schema.
const SUPPORTED_MAJOR: &str = "2";

/// Unit type suffixes systemd recognises.
const UNIT_TYPES: &[&str] = &[
    "service",
    "socket",
    "device",
    "mount",
    "automount",
    "swap",
    "target",
    "path",
    "timer",
    "snapshot",
    "slice",
    "scope",
];

/// Validate a freshly decoded config.
///
/// # Errors
///
/// Returns the first [`ConfigError`] found, checking the version first,
/// then files, then units in config order.
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    let version = config
        .ignition
        .version
        .as_deref()
        .ok_or(ConfigError::MissingVersion)?;
    check_version(version)?;

    for file in &config.storage.files {
        if !Path::new(&file.path).has_root() {
            return Err(ConfigError::RelativePath(file.path.clone()));
        }
    }

    for unit in &config.systemd.units {
        if !is_valid_unit_name(&unit.name) {
            return Err(ConfigError::InvalidUnitName(unit.name.clone()));
        }
        for dropin in &unit.dropins {
            if !is_valid_dropin_name(&dropin.name) {
                return Err(ConfigError::InvalidDropinName {
                    unit: unit.name.clone(),
                    name: dropin.name.clone(),
                });
            }
        }
    }

    Ok(())
}

/// Accept `2.x` and `2.x.y` with numeric components.
fn check_version(version: &str) -> Result<(), ConfigError> {
    let mut parts = version.split('.');
    let major = parts.next();
    let rest: Vec<&str> = parts.collect();
    let numeric = |s: &&str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());

    if major == Some(SUPPORTED_MAJOR) && (1..=2).contains(&rest.len()) && rest.iter().all(numeric)
    {
        Ok(())
    } else {
        Err(ConfigError::UnsupportedVersion(version.to_string()))
    }
}

fn is_valid_unit_name(name: &str) -> bool {
    name.rsplit_once('.')
        .is_some_and(|(_, kind)| UNIT_TYPES.contains(&kind))
}

fn is_valid_dropin_name(name: &str) -> bool {
    name.ends_with(".conf")
}
