//! Static checks over the manifest, version table and registry.
use std::collections::BTreeSet;
use std::fmt;

use super::manifest::Manifest;
use super::versions::{VersionTable, keys};
use crate::registry::Registry;
use crate::resolver;

/// Version keys whose values must be integer SDK levels.
const SDK_KEYS: &[&str] = &[keys::COMPILE_SDK, keys::MIN_SDK, keys::TARGET_SDK];

/// A validation warning detected during configuration loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// The configuration source (e.g., "targets.toml", "registry").
    pub source: String,
    /// The specific item or section that triggered the warning.
    pub item: String,
    /// Human-readable warning message.
    pub message: String,
}

impl ValidationWarning {
    /// Create a warning for `item` in `source`.
    #[must_use]
    pub fn new(
        source: impl Into<String>,
        item: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            item: item.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]: {}", self.source, self.item, self.message)
    }
}

/// Trait for configuration validators.
///
/// Validators flag input that would fail or surprise at resolution time
/// without running a resolution:
/// - Identifiers absent from the registry
/// - Requests that can never resolve (two shapes)
/// - Version values modules cannot interpret
pub trait ConfigValidator {
    /// Validate the configuration and return any warnings found.
    fn validate(&self, registry: &Registry) -> Vec<ValidationWarning>;

    /// Return a human-readable name for this validator (e.g., "manifest").
    fn name(&self) -> &'static str;
}

/// Validator for the target manifest.
#[derive(Debug)]
pub struct ManifestValidator<'a> {
    manifest: &'a Manifest,
}

impl<'a> ManifestValidator<'a> {
    /// Create a validator over `manifest`.
    #[must_use]
    pub const fn new(manifest: &'a Manifest) -> Self {
        Self { manifest }
    }
}

impl ConfigValidator for ManifestValidator<'_> {
    fn validate(&self, registry: &Registry) -> Vec<ValidationWarning> {
        let mut warnings = Vec::new();

        for (target, def) in &self.manifest.targets {
            if def.modules.is_empty() {
                warnings.push(ValidationWarning::new(
                    "targets.toml",
                    target,
                    "target requests no modules",
                ));
            }

            let mut seen = BTreeSet::new();
            for id in &def.modules {
                if !seen.insert(id.as_str()) {
                    warnings.push(ValidationWarning::new(
                        "targets.toml",
                        target,
                        format!("module '{id}' is requested more than once"),
                    ));
                }
            }

            for id in &seen {
                if registry.lookup(id).is_err() {
                    warnings.push(ValidationWarning::new(
                        "targets.toml",
                        target,
                        format!("module '{id}' is not registered"),
                    ));
                }
            }

            // Prerequisites can bring in a shape of their own.
            if let Ok(order) = resolver::plan(registry, &def.modules)
                && resolver::ensure_single_shape(registry, &order).is_err()
            {
                let shape_modules: Vec<&str> = order
                    .iter()
                    .copied()
                    .filter(|id| registry.lookup(id).is_ok_and(|m| m.shape().is_some()))
                    .collect();
                warnings.push(ValidationWarning::new(
                    "targets.toml",
                    target,
                    format!(
                        "more than one shape-defining module: {}",
                        shape_modules.join(", ")
                    ),
                ));
            }
        }

        warnings
    }

    fn name(&self) -> &'static str {
        "manifest"
    }
}

/// Validator for the version table.
#[derive(Debug)]
pub struct VersionTableValidator<'a> {
    versions: &'a VersionTable,
}

impl<'a> VersionTableValidator<'a> {
    /// Create a validator over `versions`.
    #[must_use]
    pub const fn new(versions: &'a VersionTable) -> Self {
        Self { versions }
    }
}

impl ConfigValidator for VersionTableValidator<'_> {
    fn validate(&self, _registry: &Registry) -> Vec<ValidationWarning> {
        let mut warnings = Vec::new();

        if self.versions.get(keys::JVM_TARGET).is_none() {
            warnings.push(ValidationWarning::new(
                "versions",
                keys::JVM_TARGET,
                "missing; every shape-defining module requires it",
            ));
        }

        for key in SDK_KEYS {
            if let Some(value) = self.versions.get(key)
                && value.parse::<u32>().is_err()
            {
                warnings.push(ValidationWarning::new(
                    "versions",
                    *key,
                    format!("'{value}' is not an SDK level"),
                ));
            }
        }

        for (key, value) in self.versions.iter() {
            if value.is_empty() {
                warnings.push(ValidationWarning::new("versions", key, "value is empty"));
            }
        }

        warnings
    }

    fn name(&self) -> &'static str {
        "versions"
    }
}

/// Validator for the registry's prerequisite graph.
#[derive(Debug)]
pub struct RegistryValidator;

impl ConfigValidator for RegistryValidator {
    fn validate(&self, registry: &Registry) -> Vec<ValidationWarning> {
        registry.validate()
    }

    fn name(&self) -> &'static str {
        "registry"
    }
}

/// Validate all configuration and return collected warnings.
#[must_use]
pub fn validate_all(config: &super::Config, registry: &Registry) -> Vec<ValidationWarning> {
    let validators: Vec<Box<dyn ConfigValidator>> = vec![
        Box::new(RegistryValidator),
        Box::new(ManifestValidator::new(&config.manifest)),
        Box::new(VersionTableValidator::new(&config.versions)),
    ];

    let mut all_warnings = Vec::new();
    for validator in validators {
        let warnings = validator.validate(registry);
        tracing::debug!("{} validator: {} warning(s)", validator.name(), warnings.len());
        all_warnings.extend(warnings);
    }

    all_warnings
}
