//! Domain-specific error types for the materializer.
//!
//! This module provides a structured error hierarchy using [`thiserror`].
//! Library modules return typed errors (e.g., [`ConfigError`],
//! [`ContentError`]) while the command handler at the CLI boundary converts
//! them to [`anyhow::Error`] via the standard `?` operator.
//!
//! # Error hierarchy
//!
//! ```text
//! ProvisionError
//! ├── Config(ConfigError)     unreadable, malformed or invalid config
//! ├── Content(ContentError)   file content source fails to decode
//! ├── Path(PathError)         target path or name escapes the output root
//! ├── Io                      directory creation or file write failure
//! └── Manifest                units.json serialization failure
//! ```

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Top-level error type for a materialization run.
///
/// Every variant aborts the run; files written before the failure stay on
/// disk.
#[derive(Error, Debug)]
pub enum ProvisionError {
    /// The configuration could not be loaded or decoded.
    #[error("unable to load config")]
    Config(#[from] ConfigError),

    /// A file's content source could not be decoded.
    #[error("invalid contents for {path}")]
    Content {
        /// Target path of the file spec whose contents failed.
        path: String,
        /// Underlying decode failure.
        source: ContentError,
    },

    /// A target path or unit name cannot be placed under the output root.
    #[error(transparent)]
    Path(#[from] PathError),

    /// A directory could not be created or a file could not be written.
    #[error("I/O error at {}", .path.display())]
    Io {
        /// Local path that was being created or written.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The unit manifest could not be serialized.
    #[error("failed to serialize unit manifest")]
    Manifest(#[from] serde_json::Error),
}

impl ProvisionError {
    /// Wrap an I/O error with the local path it happened at.
    pub fn io(path: impl AsRef<Path>, source: io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

/// Errors that arise while reading and decoding an Ignition config.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config file {path}")]
    Io {
        /// Path to the config file.
        path: String,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The config is empty or whitespace only.
    #[error("config is empty")]
    Empty,

    /// The config is a cloud-config document.
    #[error("config is a cloud-config document, not an Ignition config")]
    CloudConfig,

    /// The config is a script.
    #[error("config is a script, not an Ignition config")]
    Script,

    /// The config is not valid JSON or does not match the expected layout.
    #[error("invalid config")]
    Syntax(#[from] serde_json::Error),

    /// `ignition.version` is absent.
    #[error("config has no ignition.version")]
    MissingVersion,

    /// `ignition.version` names a version this tool does not understand.
    #[error("unsupported config version '{0}': expected 2.x")]
    UnsupportedVersion(String),

    /// A file path is not absolute.
    #[error("file path '{0}' is not absolute")]
    RelativePath(String),

    /// A unit name lacks a known systemd unit type suffix.
    #[error("invalid unit name '{0}': unknown systemd unit type")]
    InvalidUnitName(String),

    /// A drop-in name does not end in `.conf`.
    #[error("invalid drop-in name '{name}' for unit '{unit}': must end in .conf")]
    InvalidDropinName {
        /// Unit the drop-in belongs to.
        unit: String,
        /// Offending drop-in name.
        name: String,
    },
}

/// Errors that arise while decoding a file content source.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContentError {
    /// The source has no `<scheme>:` prefix.
    #[error("content source has no URL scheme")]
    MissingScheme,

    /// The source uses a scheme other than `data`.
    #[error("unsupported content source scheme '{0}': only inline data URLs are supported")]
    UnsupportedScheme(String),

    /// The data URL has no `,` separating header and payload.
    #[error("data URL has no ',' before its payload")]
    MissingPayload,

    /// A `%` is not followed by two hex digits.
    #[error("invalid percent escape at byte {offset}")]
    InvalidEscape {
        /// Byte offset of the `%` within the payload.
        offset: usize,
    },

    /// A `;base64` payload is not valid base64.
    #[error("invalid base64 payload")]
    Base64(#[from] base64::DecodeError),
}

/// Errors that arise when composing output paths.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    /// A target path is not absolute.
    #[error("target path '{0}' is not absolute")]
    NotAbsolute(String),

    /// A target path contains a `..` component.
    #[error("target path '{0}' escapes the output root")]
    Escapes(String),

    /// A unit or drop-in name is not a single path component.
    #[error("name '{0}' must be a single path component")]
    InvalidComponent(String),
}

/// Result alias used throughout the library.
pub type Result<T, E = ProvisionError> = std::result::Result<T, E>;
