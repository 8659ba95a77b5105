// Shared helpers for integration tests.
//
// Provides a temporary-directory-backed project and a fluent builder so each
// integration test can set up an isolated manifest and version table without
// repeating filesystem boilerplate.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::fmt::Write as _;
use std::path::Path;

use convention_engine::config::Config;
use convention_engine::config::versions::VersionTable;
use convention_engine::error::ResolveError;
use convention_engine::logging::Logger;
use convention_engine::registry::Registry;
use convention_engine::resolver::{self, Resolution, ResolutionRequest};

/// The version table used unless a test supplies its own.
pub const FULL_VERSIONS: &str = "\
# toolchain
compile-sdk = 35
min-sdk = 24
target-sdk = 34
jvm-target = 17
jacoco = 0.8.11
detekt = 1.23.6
";

/// Resolve `modules` for one target against the built-in registry.
pub fn resolve_with(
    versions: &VersionTable,
    modules: &[&str],
) -> Result<Resolution, ResolveError> {
    let registry = Registry::builtin().expect("builtin registry");
    let log = Logger::new("test");
    resolver::resolve(
        &registry,
        versions,
        &ResolutionRequest::new(":core:data", modules.iter().copied()),
        &log,
    )
}

/// [`resolve_with`] against [`FULL_VERSIONS`].
pub fn resolve_full(modules: &[&str]) -> Result<Resolution, ResolveError> {
    let versions = VersionTable::parse_properties(FULL_VERSIONS, "versions.properties")
        .expect("parse full versions");
    resolve_with(&versions, modules)
}

/// An isolated project backed by a [`tempfile::TempDir`].
///
/// The directory is automatically deleted when dropped.
pub struct TestProject {
    /// Temporary directory containing `conf/`.
    pub root: tempfile::TempDir,
}

impl TestProject {
    /// Path to the project root.
    pub fn root_path(&self) -> &Path {
        self.root.path()
    }

    /// Load the manifest and version table from the default locations.
    pub fn load_config(&self) -> Config {
        Config::load(self.root.path(), None, None).expect("load config")
    }
}

/// Fluent builder for [`TestProject`].
pub struct TestProjectBuilder {
    manifest: String,
    versions: String,
}

impl TestProjectBuilder {
    /// Begin with no targets and [`FULL_VERSIONS`].
    pub fn new() -> Self {
        Self {
            manifest: String::new(),
            versions: FULL_VERSIONS.to_string(),
        }
    }

    /// Add a `[targets."<name>"]` table requesting `modules`.
    pub fn with_target(mut self, name: &str, modules: &[&str]) -> Self {
        let list: Vec<String> = modules.iter().map(|m| format!("\"{m}\"")).collect();
        writeln!(
            self.manifest,
            "[targets.\"{name}\"]\nmodules = [{}]\n",
            list.join(", ")
        )
        .expect("write target");
        self
    }

    /// Add an overrides table for `name`; `body` holds `key = value` lines.
    pub fn with_overrides(mut self, name: &str, body: &str) -> Self {
        writeln!(self.manifest, "[targets.\"{name}\".overrides]\n{body}\n")
            .expect("write overrides");
        self
    }

    /// Replace the version table contents.
    pub fn with_versions(mut self, content: &str) -> Self {
        self.versions = content.to_string();
        self
    }

    /// Write `conf/` and return the project.
    pub fn build(self) -> TestProject {
        let root = tempfile::tempdir().expect("create temp dir");
        let conf = root.path().join("conf");
        std::fs::create_dir_all(&conf).expect("create conf dir");
        std::fs::write(conf.join("targets.toml"), self.manifest).expect("write targets.toml");
        std::fs::write(conf.join("versions.properties"), self.versions)
            .expect("write versions.properties");
        TestProject { root }
    }
}
