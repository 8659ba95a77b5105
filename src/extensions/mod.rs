//! Per-target typed configuration objects with get-or-create access.
//!
//! The [`ExtensionStore`] lives for exactly one resolution run. Convention
//! modules reach into it through [`ExtensionStore::get_or_create`]; the
//! resolver seals it with [`ExtensionStore::mark_resolved`] and hands the
//! contents off once through [`ExtensionStore::snapshot`].
mod concerns;
mod setting;

use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::error::StoreError;

pub use concerns::{
    CompileOptions, CoverageOptions, Dependencies, Dependency, Flavor, FlavorOptions, LintOptions,
    LintTool, TestFramework, TestOptions,
};
pub use setting::{Setting, Source, Write};

/// A configuration object the store can hold.
///
/// `KEY` names the concern; [`Default`] supplies the documented defaults the
/// first module to touch the concern starts from.
pub trait Extension: Any + Default + Clone + Send + Sync {
    /// Unique key of this concern inside the store.
    const KEY: &'static str;
}

/// Lifecycle of an [`ExtensionStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StoreState {
    Open,
    Resolved,
    Finalized,
}

/// Keyed collection of extension objects for one target.
pub struct ExtensionStore {
    objects: BTreeMap<&'static str, Box<dyn Any + Send + Sync>>,
    state: StoreState,
}

impl Default for ExtensionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ExtensionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtensionStore")
            .field("keys", &self.objects.keys().collect::<Vec<_>>())
            .field("state", &self.state)
            .finish()
    }
}

impl ExtensionStore {
    /// Create an empty, open store.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            objects: BTreeMap::new(),
            state: StoreState::Open,
        }
    }

    /// Return the object stored under `T::KEY`, creating it with defaults
    /// on first access.
    ///
    /// Every call for the same `T` within one run yields the same instance,
    /// so later modules observe earlier mutations.
    ///
    /// # Errors
    ///
    /// - [`StoreError::AlreadyFinalized`] once the store has been sealed.
    /// - [`StoreError::TypeMismatch`] if the key holds a different type.
    pub fn get_or_create<T: Extension>(&mut self) -> Result<&mut T, StoreError> {
        if self.state != StoreState::Open {
            return Err(StoreError::AlreadyFinalized);
        }
        self.objects
            .entry(T::KEY)
            .or_insert_with(|| Box::new(T::default()))
            .downcast_mut::<T>()
            .ok_or(StoreError::TypeMismatch { key: T::KEY })
    }

    /// Read-only access to an object, if some module created it.
    #[must_use]
    pub fn get<T: Extension>(&self) -> Option<&T> {
        self.objects.get(T::KEY)?.downcast_ref::<T>()
    }

    /// Number of concerns touched so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether no concern has been touched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Seal the store at the end of the applying phase.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::AlreadyFinalized`] if the store is not open.
    pub fn mark_resolved(&mut self) -> Result<(), StoreError> {
        if self.state != StoreState::Open {
            return Err(StoreError::AlreadyFinalized);
        }
        self.state = StoreState::Resolved;
        Ok(())
    }

    /// Hand off the final configuration. Callable exactly once.
    ///
    /// # Errors
    ///
    /// - [`StoreError::NotYetResolved`] while the store is still open.
    /// - [`StoreError::AlreadyFinalized`] on a second call.
    pub fn snapshot(&mut self) -> Result<FinalConfiguration, StoreError> {
        match self.state {
            StoreState::Open => return Err(StoreError::NotYetResolved),
            StoreState::Finalized => return Err(StoreError::AlreadyFinalized),
            StoreState::Resolved => {}
        }
        self.state = StoreState::Finalized;
        Ok(FinalConfiguration {
            compile: self.take(),
            test: self.take(),
            lint: self.take(),
            coverage: self.take(),
            flavors: self.take(),
            dependencies: self.take(),
        })
    }

    fn take<T: Extension>(&mut self) -> Option<T> {
        self.objects
            .remove(T::KEY)
            .and_then(|boxed| boxed.downcast::<T>().ok())
            .map(|boxed| *boxed)
    }
}

/// The typed aggregate handed to the downstream build executor.
///
/// A concern no module touched is `None` and omitted from the JSON output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FinalConfiguration {
    /// Compiler and SDK settings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compile: Option<CompileOptions>,
    /// Test wiring.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test: Option<TestOptions>,
    /// Static analysis.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lint: Option<LintOptions>,
    /// Coverage instrumentation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coverage: Option<CoverageOptions>,
    /// Product flavors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flavors: Option<FlavorOptions>,
    /// Plugins and dependency declarations.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<Dependencies>,
}
