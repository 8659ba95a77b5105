//! What a target asks the resolver for.
use serde::Deserialize;

use crate::error::StoreError;
use crate::extensions::{CompileOptions, ExtensionStore, LintOptions, TestFramework, TestOptions};

/// Explicit settings a target pins before any module runs.
///
/// Pinned values are never overwritten by module writes. Keys use the same
/// kebab-case spelling as the manifest's `[targets.<name>.overrides]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Overrides {
    /// Compile SDK level.
    pub compile_sdk: Option<u32>,
    /// Minimum SDK level.
    pub min_sdk: Option<u32>,
    /// Target SDK level.
    pub target_sdk: Option<u32>,
    /// JVM bytecode target.
    pub jvm_target: Option<String>,
    /// Unit test framework.
    pub test_framework: Option<TestFramework>,
    /// Instrumentation runner class.
    pub instrumentation_runner: Option<String>,
    /// Treat lint warnings as errors.
    pub warnings_as_errors: Option<bool>,
}

impl Overrides {
    /// Whether no override is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Pin every set override into `store`.
    ///
    /// A concern object is only created when at least one of its fields is
    /// overridden, so an empty override set leaves the store untouched.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the store is no longer open.
    pub fn seed(&self, store: &mut ExtensionStore) -> Result<(), StoreError> {
        if self.compile_sdk.is_some()
            || self.min_sdk.is_some()
            || self.target_sdk.is_some()
            || self.jvm_target.is_some()
        {
            let compile = store.get_or_create::<CompileOptions>()?;
            if let Some(level) = self.compile_sdk {
                compile.compile_sdk.pin(level);
            }
            if let Some(level) = self.min_sdk {
                compile.min_sdk.pin(level);
            }
            if let Some(level) = self.target_sdk {
                compile.target_sdk.pin(level);
            }
            if let Some(ref jvm) = self.jvm_target {
                compile.jvm_target.pin(jvm.clone());
            }
        }

        if self.test_framework.is_some() || self.instrumentation_runner.is_some() {
            let test = store.get_or_create::<TestOptions>()?;
            if let Some(framework) = self.test_framework {
                test.framework.pin(framework);
            }
            if let Some(ref runner) = self.instrumentation_runner {
                test.instrumentation_runner.pin(runner.clone());
            }
        }

        if let Some(strict) = self.warnings_as_errors {
            store
                .get_or_create::<LintOptions>()?
                .warnings_as_errors
                .pin(strict);
        }

        Ok(())
    }
}

/// One target's resolution request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionRequest {
    /// Target name, e.g. `:feature:settings`.
    pub target: String,
    /// Requested module identifiers in declared order.
    pub modules: Vec<String>,
    /// Explicit overrides seeded before resolution.
    pub overrides: Overrides,
}

impl ResolutionRequest {
    /// Create a request without overrides.
    pub fn new<I, S>(target: impl Into<String>, modules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            target: target.into(),
            modules: modules.into_iter().map(Into::into).collect(),
            overrides: Overrides::default(),
        }
    }

    /// Attach explicit overrides.
    #[must_use]
    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        self.overrides = overrides;
        self
    }

}
