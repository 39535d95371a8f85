//! Ignition config materializer.
//!
//! Reads an Ignition 2.x config and writes the files and systemd units it
//! describes into a local directory tree instead of onto a live host, plus
//! a `units.json` manifest recording which units should be enabled.
//!
//! The public API is organised into four layers:
//!
//! - **[`config`]**: decode and validate the Ignition JSON document
//! - **[`resources`]**: `check + apply` primitives (files, units, manifest)
//! - **[`tasks`]**: named units of work wired to resources
//! - **[`commands`]**: top-level orchestration of a run
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;
pub mod resources;
pub mod tasks;

/// Version string reported by `--version`.
///
/// Taken from `IGNITION_UNPACK_VERSION` at build time (see `build.rs`),
/// falling back to the package version.
pub const VERSION: &str = match option_env!("IGNITION_UNPACK_VERSION") {
    Some(version) => version,
    None => env!("CARGO_PKG_VERSION"),
};
