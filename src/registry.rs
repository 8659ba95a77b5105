//! Identifier → convention module lookup.
use std::collections::BTreeMap;
use std::fmt;

use crate::config::validation::ValidationWarning;
use crate::error::RegistryError;
use crate::modules::{self, ConventionModule, graph};

/// The authoritative set of convention modules.
///
/// Built once at process entry and passed by reference; read-only while
/// targets are resolved, so it can be shared across threads without locks.
///
/// # Examples
///
/// ```
/// use convention_engine::registry::Registry;
///
/// let registry = Registry::builtin().unwrap();
/// assert!(registry.lookup("app.library").is_ok());
/// assert!(registry.lookup("android.library").is_err());
/// ```
#[derive(Default)]
pub struct Registry {
    modules: BTreeMap<&'static str, Box<dyn ConventionModule>>,
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.modules.keys()).finish()
    }
}

impl Registry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every built-in module.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateIdentifier`] if two built-in
    /// modules share an identifier.
    pub fn builtin() -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        for module in modules::all_modules() {
            registry.register(module)?;
        }
        Ok(registry)
    }

    /// Register `module` under its identifier.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateIdentifier`] if the identifier is
    /// taken. The registry is left unchanged.
    pub fn register(&mut self, module: Box<dyn ConventionModule>) -> Result<(), RegistryError> {
        let id = module.id();
        if self.modules.contains_key(id) {
            return Err(RegistryError::DuplicateIdentifier(id.to_string()));
        }
        self.modules.insert(id, module);
        Ok(())
    }

    /// The module registered under `id`. Identifiers are case-sensitive.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownIdentifier`] if nothing is registered
    /// under `id`.
    pub fn lookup(&self, id: &str) -> Result<&dyn ConventionModule, RegistryError> {
        self.modules
            .get(id)
            .map(|m| &**m)
            .ok_or_else(|| RegistryError::UnknownIdentifier(id.to_string()))
    }

    /// Registered identifiers in lexical order.
    pub fn ids(&self) -> impl Iterator<Item = &'static str> {
        self.modules.keys().copied()
    }

    /// Registered modules in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn ConventionModule> {
        self.modules.values().map(|m| &**m)
    }

    /// Number of registered modules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Whether nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Check the prerequisite graph without resolving anything.
    ///
    /// Reports prerequisites naming unregistered modules and prerequisite
    /// cycles.
    #[must_use]
    pub fn validate(&self) -> Vec<ValidationWarning> {
        let modules: Vec<&dyn ConventionModule> = self.iter().collect();
        let mut warnings: Vec<ValidationWarning> = graph::dangling_prerequisites(&modules)
            .into_iter()
            .map(|(module, missing)| {
                ValidationWarning::new(
                    "registry",
                    module,
                    format!("prerequisite '{missing}' is not registered"),
                )
            })
            .collect();
        if graph::has_cycle(&modules) {
            warnings.push(ValidationWarning::new(
                "registry",
                "prerequisites",
                "prerequisite graph contains a cycle",
            ));
        }
        warnings
    }
}
