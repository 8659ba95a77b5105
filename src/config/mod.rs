//! Project configuration: the target manifest and the version table.
pub mod manifest;
pub mod toml_loader;
pub mod validation;
pub mod versions;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::registry::Registry;

/// Default manifest location, relative to the project root.
pub const DEFAULT_MANIFEST: &str = "conf/targets.toml";
/// Default version table location, relative to the project root.
pub const DEFAULT_VERSIONS: &str = "conf/versions.properties";

/// All loaded configuration for one project root.
#[derive(Debug)]
pub struct Config {
    /// Project root the paths were resolved against.
    pub root: PathBuf,
    /// Targets and the modules they request.
    pub manifest: manifest::Manifest,
    /// Shared version table.
    pub versions: versions::VersionTable,
}

impl Config {
    /// Load the manifest and version table.
    ///
    /// Relative `manifest` / `versions` paths are taken relative to `root`;
    /// `None` selects the defaults under `conf/`. Missing files load as empty.
    ///
    /// # Errors
    ///
    /// Returns an error if either file exists but cannot be read or parsed.
    pub fn load(root: &Path, manifest: Option<&Path>, versions: Option<&Path>) -> Result<Self> {
        let manifest_path = root.join(manifest.unwrap_or_else(|| Path::new(DEFAULT_MANIFEST)));
        let versions_path = root.join(versions.unwrap_or_else(|| Path::new(DEFAULT_VERSIONS)));

        let manifest = manifest::Manifest::load(&manifest_path)
            .with_context(|| format!("loading {}", manifest_path.display()))?;

        let versions = versions::VersionTable::load(&versions_path)
            .with_context(|| format!("loading {}", versions_path.display()))?;

        Ok(Self {
            root: root.to_path_buf(),
            manifest,
            versions,
        })
    }

    /// Run every validator against this configuration.
    #[must_use]
    pub fn validate(&self, registry: &Registry) -> Vec<validation::ValidationWarning> {
        validation::validate_all(self, registry)
    }
}
