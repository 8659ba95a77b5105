//! The project manifest: which modules each target requests.
//!
//! ```toml
//! [targets.":app"]
//! modules = ["app.application", "app.compose", "app.flavors"]
//!
//! [targets.":core:data"]
//! modules = ["app.library", "app.unit-test", "app.coverage"]
//!
//! [targets.":core:data".overrides]
//! min-sdk = 26
//! ```
use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use super::toml_loader;
use crate::error::ConfigError;
use crate::resolver::{Overrides, ResolutionRequest};

/// One target's entry in the manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TargetDef {
    /// Requested module identifiers in declared order.
    #[serde(default)]
    pub modules: Vec<String>,
    /// Explicit overrides.
    #[serde(default)]
    pub overrides: Overrides,
}

/// All targets of a project, keyed by target name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Targets in name order.
    #[serde(default)]
    pub targets: BTreeMap<String, TargetDef>,
}

impl Manifest {
    /// Load the manifest from `path`. A missing file yields no targets.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        toml_loader::load_config(path)
    }

    /// One resolution request per target, in target name order.
    #[must_use]
    pub fn requests(&self) -> Vec<ResolutionRequest> {
        self.targets
            .iter()
            .map(|(name, def)| {
                ResolutionRequest::new(name.as_str(), def.modules.iter().map(String::as_str))
                    .with_overrides(def.overrides.clone())
            })
            .collect()
    }

    /// Number of targets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// Whether the manifest declares no target.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}
