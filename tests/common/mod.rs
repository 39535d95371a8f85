// Shared helpers for integration tests.
//
// Provides a temporary-directory-backed Ignition config and a fluent builder
// so each integration test can set up an isolated input and output tree
// without repeating JSON boilerplate.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::path::{Path, PathBuf};

use ignition_unpack::commands::materialize::{self, RunOptions};
use ignition_unpack::logging::Logger;
use ignition_unpack::output::OutputRoot;
use serde_json::{Value, json};

/// An isolated config file and output directory backed by a
/// [`tempfile::TempDir`].
///
/// The directory is automatically deleted when dropped.
pub struct IntegrationTestContext {
    /// Temporary directory holding `config.ign` and `out/`.
    pub root: tempfile::TempDir,
}

impl IntegrationTestContext {
    /// Path to the written Ignition config.
    pub fn ignition_path(&self) -> PathBuf {
        self.root.path().join("config.ign")
    }

    /// Output directory, without a trailing separator.
    pub fn out_dir(&self) -> PathBuf {
        self.root.path().join("out")
    }

    /// Run options pointing at this context's config and output directory.
    pub fn options(&self) -> RunOptions {
        RunOptions {
            ignition: self.ignition_path(),
            output: OutputRoot::new(self.out_dir()),
        }
    }

    /// Run the materializer in-process.
    pub fn run(&self) -> anyhow::Result<()> {
        materialize::run(&self.options(), &Logger::new())
    }

    /// Read an output file relative to the output directory.
    pub fn read(&self, rel: &str) -> String {
        std::fs::read_to_string(self.out_dir().join(rel))
            .unwrap_or_else(|e| panic!("read {rel}: {e}"))
    }

    /// Whether `rel` exists below the output directory.
    pub fn exists(&self, rel: &str) -> bool {
        self.out_dir().join(rel).exists()
    }

    /// Every regular file below the output directory with its contents,
    /// sorted by relative path.
    pub fn snapshot_tree(&self) -> Vec<(String, Vec<u8>)> {
        let mut files = Vec::new();
        collect(&self.out_dir(), &self.out_dir(), &mut files);
        files.sort();
        files
    }
}

fn collect(base: &Path, dir: &Path, files: &mut Vec<(String, Vec<u8>)>) {
    for entry in std::fs::read_dir(dir).expect("read output dir") {
        let path = entry.expect("dir entry").path();
        if path.is_dir() {
            collect(base, &path, files);
        } else {
            let rel = path
                .strip_prefix(base)
                .expect("path below base")
                .to_string_lossy()
                .into_owned();
            files.push((rel, std::fs::read(&path).expect("read output file")));
        }
    }
}

/// Fluent builder for [`IntegrationTestContext`].
pub struct TestContextBuilder {
    config: Value,
    raw: Option<String>,
}

impl TestContextBuilder {
    /// Begin with an empty 2.2.0 config.
    pub fn new() -> Self {
        Self {
            config: json!({
                "ignition": { "version": "2.2.0" },
                "storage": { "files": [] },
                "systemd": { "units": [] }
            }),
            raw: None,
        }
    }

    /// Add a storage file with the given content source.
    pub fn with_file(mut self, path: &str, source: &str) -> Self {
        self.files()
            .push(json!({ "path": path, "contents": { "source": source } }));
        self
    }

    /// Add a systemd unit. Empty `contents` leaves the key out.
    pub fn with_unit(mut self, name: &str, enable: bool, contents: &str) -> Self {
        let mut unit = json!({ "name": name, "enable": enable, "dropins": [] });
        if !contents.is_empty() {
            unit["contents"] = json!(contents);
        }
        self.units().push(unit);
        self
    }

    /// Add a drop-in to the most recently added unit.
    pub fn with_dropin(mut self, name: &str, contents: &str) -> Self {
        let unit = self.units().last_mut().expect("with_unit before with_dropin");
        unit["dropins"]
            .as_array_mut()
            .expect("dropins array")
            .push(json!({ "name": name, "contents": contents }));
        self
    }

    /// Replace the generated JSON with raw config text.
    pub fn with_raw(mut self, raw: &str) -> Self {
        self.raw = Some(raw.to_string());
        self
    }

    /// Write `config.ign` and return the context.
    pub fn build(self) -> IntegrationTestContext {
        let root = tempfile::tempdir().expect("create temp dir");
        let text = self
            .raw
            .unwrap_or_else(|| serde_json::to_string_pretty(&self.config).expect("encode config"));
        std::fs::write(root.path().join("config.ign"), text).expect("write config.ign");
        IntegrationTestContext { root }
    }

    fn files(&mut self) -> &mut Vec<Value> {
        self.config["storage"]["files"]
            .as_array_mut()
            .expect("files array")
    }

    fn units(&mut self) -> &mut Vec<Value> {
        self.config["systemd"]["units"]
            .as_array_mut()
            .expect("units array")
    }
}
