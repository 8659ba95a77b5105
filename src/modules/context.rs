//! Everything a convention module sees while it is applied.
use crate::capability::{CapabilitySet, Requirement, Shape};
use crate::config::versions::VersionTable;
use crate::error::ResolveError;
use crate::extensions::{Extension, ExtensionStore};
use crate::logging::Log;

/// Per-module view of one resolution run.
///
/// The capability set is a read-only snapshot: capabilities the module
/// itself provides are merged by the resolver after `apply` returns.
pub struct ApplyContext<'a> {
    module: &'static str,
    target: &'a str,
    capabilities: &'a CapabilitySet,
    store: &'a mut ExtensionStore,
    versions: &'a VersionTable,
    log: &'a dyn Log,
}

impl std::fmt::Debug for ApplyContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApplyContext")
            .field("module", &self.module)
            .field("target", &self.target)
            .field("capabilities", &self.capabilities)
            .finish_non_exhaustive()
    }
}

impl<'a> ApplyContext<'a> {
    /// Create a context for applying `module` to `target`.
    #[must_use]
    pub fn new(
        module: &'static str,
        target: &'a str,
        capabilities: &'a CapabilitySet,
        store: &'a mut ExtensionStore,
        versions: &'a VersionTable,
        log: &'a dyn Log,
    ) -> Self {
        Self {
            module,
            target,
            capabilities,
            store,
            versions,
            log,
        }
    }

    /// Identifier of the module being applied.
    #[must_use]
    pub const fn module_id(&self) -> &'static str {
        self.module
    }

    /// Name of the target being configured.
    #[must_use]
    pub const fn target(&self) -> &str {
        self.target
    }

    /// Whether the target already has `tag`.
    #[must_use]
    pub fn has(&self, tag: &str) -> bool {
        self.capabilities.has(tag)
    }

    /// The target's shape.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::MissingPrerequisite`] if no shape-defining
    /// module has been applied yet.
    pub fn shape(&self) -> Result<Shape, ResolveError> {
        self.capabilities
            .shape()
            .ok_or_else(|| ResolveError::MissingPrerequisite {
                module: self.module.to_string(),
                tag: Requirement::ANY_SHAPE.describe(),
            })
    }

    /// Error for a shape the module has no configuration for.
    #[must_use]
    pub fn unsupported(&self, shape: Shape, supported: Requirement) -> ResolveError {
        ResolveError::Conflict {
            module: self.module.to_string(),
            required: supported.describe(),
            present: shape.tag().to_string(),
        }
    }

    /// Get-or-create the extension `T`.
    ///
    /// # Errors
    ///
    /// Propagates [`StoreError`](crate::error::StoreError) as
    /// [`ResolveError::Store`].
    pub fn extension<T: Extension>(&mut self) -> Result<&mut T, ResolveError> {
        Ok(self.store.get_or_create::<T>()?)
    }

    /// A mandatory version.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::MissingVersionKey`] if `key` is absent.
    pub fn version(&self, key: &str) -> Result<&'a str, ResolveError> {
        self.versions
            .get(key)
            .ok_or_else(|| ResolveError::MissingVersionKey {
                module: self.module.to_string(),
                key: key.to_string(),
            })
    }

    /// A version with a module-supplied fallback.
    #[must_use]
    pub fn version_or(&self, key: &str, default: &str) -> String {
        self.versions.get(key).unwrap_or(default).to_string()
    }

    /// An SDK level, falling back to `default` when the key is absent.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::InvalidVersionValue`] if the value present in
    /// the table is not a non-negative integer.
    pub fn sdk_level(&self, key: &str, default: u32) -> Result<u32, ResolveError> {
        let Some(raw) = self.versions.get(key) else {
            self.log
                .debug(&format!("{}: '{key}' not in version table, using {default}", self.module));
            return Ok(default);
        };
        raw.parse::<u32>()
            .map_err(|_| ResolveError::InvalidVersionValue {
                module: self.module.to_string(),
                key: key.to_string(),
                value: raw.to_string(),
            })
    }
}
