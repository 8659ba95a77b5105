//! Turns a resolution request into a finalized configuration.
//!
//! ```text
//! Pending ──► Expanding ──► Applying ──► Finalized
//!                 │             │
//!                 └─────────────┴──────► Failed
//! ```
//!
//! Expansion orders the requested modules and their prerequisites and
//! rejects orders naming two shapes, before any mutation happens. Applying runs each module once, checking capabilities
//! first. Any error aborts the run without rollback: a failed target simply
//! produces no configuration.
mod expand;
mod request;

use std::fmt::Write as _;

use serde::Serialize;
use sha2::{Digest, Sha256};

pub use expand::{ensure_single_shape, plan};
pub use request::{Overrides, ResolutionRequest};

use crate::capability::{CapabilitySet, Shape, detector};
use crate::config::versions::VersionTable;
use crate::error::ResolveError;
use crate::extensions::{ExtensionStore, FinalConfiguration};
use crate::logging::Log;
use crate::modules::{ApplyContext, ConventionModule};
use crate::registry::Registry;

/// Where a [`Resolver`] is in its current run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionState {
    /// No run started.
    Pending,
    /// Ordering modules and prerequisites.
    Expanding,
    /// Applying modules to the store.
    Applying,
    /// The last run produced a configuration.
    Finalized,
    /// The last run aborted.
    Failed,
}

/// The outcome of resolving one target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    /// Target name.
    pub target: String,
    /// The target's shape, if a shape-defining module was applied.
    pub shape: Option<Shape>,
    /// Frozen capability set.
    pub capabilities: CapabilitySet,
    /// Modules in the order they were applied.
    pub applied: Vec<&'static str>,
    /// Configuration for the build executor.
    pub configuration: FinalConfiguration,
}

impl Resolution {
    /// Hex SHA-256 of the serialized configuration.
    ///
    /// Equal requests against the same registry and version table always
    /// produce the same fingerprint.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized.
    pub fn fingerprint(&self) -> serde_json::Result<String> {
        let bytes = serde_json::to_vec(&self.configuration)?;
        let digest = Sha256::digest(&bytes);
        Ok(digest.iter().fold(String::with_capacity(64), |mut hex, b| {
            write!(hex, "{b:02x}").unwrap_or(());
            hex
        }))
    }
}

/// Resolves requests against a shared registry and version table.
///
/// Each call to [`resolve`](Self::resolve) is an independent run with its
/// own capability set and extension store.
#[derive(Debug)]
pub struct Resolver<'r> {
    registry: &'r Registry,
    versions: &'r VersionTable,
    state: ResolutionState,
}

impl<'r> Resolver<'r> {
    /// Create a resolver in the `Pending` state.
    #[must_use]
    pub const fn new(registry: &'r Registry, versions: &'r VersionTable) -> Self {
        Self {
            registry,
            versions,
            state: ResolutionState::Pending,
        }
    }

    /// State reached by the latest run.
    #[must_use]
    pub const fn state(&self) -> ResolutionState {
        self.state
    }

    /// Resolve `request` into a finalized configuration.
    ///
    /// # Errors
    ///
    /// Returns the first [`ResolveError`] raised while expanding or
    /// applying; the resolver is then in the `Failed` state.
    pub fn resolve(
        &mut self,
        request: &ResolutionRequest,
        log: &dyn Log,
    ) -> Result<Resolution, ResolveError> {
        self.state = ResolutionState::Pending;
        let result = self.run(request, log);
        if let Err(ref e) = result {
            self.state = ResolutionState::Failed;
            log.debug(&format!("{}: resolution failed: {e}", request.target));
        }
        result
    }

    fn run(&mut self, request: &ResolutionRequest, log: &dyn Log) -> Result<Resolution, ResolveError> {
        self.state = ResolutionState::Expanding;
        let order = plan(self.registry, &request.modules)?;
        log.debug(&format!("{}: apply order [{}]", request.target, order.join(", ")));
        if let Some(shape) = ensure_single_shape(self.registry, &order)? {
            log.debug(&format!("{}: shape {shape}", request.target));
        }

        self.state = ResolutionState::Applying;
        let mut store = ExtensionStore::new();
        request.overrides.seed(&mut store)?;
        let mut capabilities = CapabilitySet::new();
        let mut applied: Vec<&'static str> = Vec::with_capacity(order.len());

        for id in order {
            if applied.contains(&id) {
                continue;
            }
            let module = self.lookup(id)?;
            detector::require_before_apply(&capabilities, module)?;
            {
                let mut cx = ApplyContext::new(
                    id,
                    &request.target,
                    &capabilities,
                    &mut store,
                    self.versions,
                    log,
                );
                module.apply(&mut cx)?;
            }
            merge_capabilities(&mut capabilities, module)?;
            log.debug(&format!("{}: applied {id}", request.target));
            applied.push(id);
        }

        store.mark_resolved()?;
        let configuration = store.snapshot()?;
        self.state = ResolutionState::Finalized;
        Ok(Resolution {
            target: request.target.clone(),
            shape: capabilities.shape(),
            capabilities,
            applied,
            configuration,
        })
    }

    fn lookup(&self, id: &str) -> Result<&'r dyn ConventionModule, ResolveError> {
        self.registry
            .lookup(id)
            .map_err(|_| ResolveError::UnknownIdentifier {
                id: id.to_string(),
                required_by: None,
            })
    }
}

/// Add the module's declared shape and tags to the target's capabilities.
fn merge_capabilities(
    capabilities: &mut CapabilitySet,
    module: &dyn ConventionModule,
) -> Result<(), ResolveError> {
    let conflict = |present: Shape, required: &str| ResolveError::Conflict {
        module: module.id().to_string(),
        required: required.to_string(),
        present: present.tag().to_string(),
    };
    if let Some(shape) = module.shape() {
        capabilities
            .set_shape(shape)
            .map_err(|present| conflict(present, shape.tag()))?;
    }
    for tag in module.provides() {
        capabilities
            .insert(tag)
            .map_err(|present| conflict(present, tag))?;
    }
    Ok(())
}

/// Resolve a single request with a throwaway [`Resolver`].
///
/// # Errors
///
/// See [`Resolver::resolve`].
pub fn resolve(
    registry: &Registry,
    versions: &VersionTable,
    request: &ResolutionRequest,
    log: &dyn Log,
) -> Result<Resolution, ResolveError> {
    Resolver::new(registry, versions).resolve(request, log)
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::capability::Requirement;
    use crate::config::versions::keys;
    use crate::extensions::{CompileOptions, Source, TestFramework};
    use crate::logging::Logger;
    use crate::modules::test_helpers::{StubModule, full_versions, registry_of};

    fn builtin() -> Registry {
        Registry::builtin().unwrap()
    }

    fn run(registry: &Registry, versions: &VersionTable, modules: &[&str]) -> Result<Resolution, ResolveError> {
        let log = Logger::new("test");
        resolve(registry, versions, &ResolutionRequest::new(":core:data", modules.iter().copied()), &log)
    }

    // -----------------------------------------------------------------------
    // State machine
    // -----------------------------------------------------------------------

    #[test]
    fn new_resolver_is_pending() {
        let registry = builtin();
        let versions = full_versions();
        assert_eq!(Resolver::new(&registry, &versions).state(), ResolutionState::Pending);
    }

    #[test]
    fn success_finalizes_and_failure_fails() {
        let registry = builtin();
        let versions = full_versions();
        let log = Logger::new("test");
        let mut resolver = Resolver::new(&registry, &versions);

        resolver
            .resolve(&ResolutionRequest::new(":a", ["app.library"]), &log)
            .unwrap();
        assert_eq!(resolver.state(), ResolutionState::Finalized);

        resolver
            .resolve(&ResolutionRequest::new(":b", ["app.nope"]), &log)
            .unwrap_err();
        assert_eq!(resolver.state(), ResolutionState::Failed);

        resolver
            .resolve(&ResolutionRequest::new(":c", ["jvm.library"]), &log)
            .unwrap();
        assert_eq!(resolver.state(), ResolutionState::Finalized);
    }

    // -----------------------------------------------------------------------
    // Expansion and application
    // -----------------------------------------------------------------------

    #[test]
    fn feature_expands_prerequisites() {
        let r = run(&builtin(), &full_versions(), &["app.feature"]).unwrap();
        assert_eq!(r.applied, ["app.library", "app.dependency-injection", "app.feature"]);
        assert_eq!(r.capabilities.tags(), ["dependency-injection", "feature", "library"]);
        assert_eq!(r.shape, Some(Shape::Library));
    }

    #[test]
    fn two_shapes_conflict() {
        let err = run(&builtin(), &full_versions(), &["app.application", "app.library"]).unwrap_err();
        assert_eq!(
            err,
            ResolveError::Conflict {
                module: "app.library".to_string(),
                required: "library".to_string(),
                present: "application".to_string(),
            }
        );
    }

    #[test]
    fn two_shapes_conflict_even_after_a_capability_module() {
        let registry = builtin();
        let versions = full_versions();
        let log = Logger::new("test");
        let mut resolver = Resolver::new(&registry, &versions);
        let err = resolver
            .resolve(
                &ResolutionRequest::new(":app", ["app.lint", "app.application", "app.library"]),
                &log,
            )
            .unwrap_err();
        assert_eq!(
            err,
            ResolveError::Conflict {
                module: "app.library".to_string(),
                required: "library".to_string(),
                present: "application".to_string(),
            }
        );
        assert_eq!(resolver.state(), ResolutionState::Failed);
    }

    #[test]
    fn shape_pulled_in_by_prerequisite_conflicts() {
        let err = run(&builtin(), &full_versions(), &["app.application", "app.feature"]).unwrap_err();
        assert_eq!(
            err,
            ResolveError::Conflict {
                module: "app.library".to_string(),
                required: "library".to_string(),
                present: "application".to_string(),
            }
        );
    }

    #[test]
    fn capability_module_before_shape_is_missing_prerequisite() {
        let err = run(&builtin(), &full_versions(), &["app.lint", "app.library"]).unwrap_err();
        assert!(matches!(err, ResolveError::MissingPrerequisite { ref module, .. } if module == "app.lint"));
    }

    #[test]
    fn unknown_identifier_aborts_before_mutation() {
        let registry = registry_of(vec![StubModule::new("a")]);
        let err = run(&registry, &full_versions(), &["a", "b"]).unwrap_err();
        assert!(matches!(err, ResolveError::UnknownIdentifier { ref id, .. } if id == "b"));
    }

    #[test]
    fn missing_jvm_target_fails_run() {
        let versions = VersionTable::from_pairs([(keys::COMPILE_SDK, "35")]);
        let err = run(&builtin(), &versions, &["app.library"]).unwrap_err();
        assert!(matches!(err, ResolveError::MissingVersionKey { ref key, .. } if key == "jvm-target"));
    }

    #[test]
    fn provided_tags_satisfy_later_requirements() {
        let registry = registry_of(vec![
            StubModule::new("base").with_shape(Shape::JvmOnly).providing(&["x"]),
            StubModule::new("needs-x").requiring(&[Requirement::Tag("x")]),
        ]);
        let r = run(&registry, &full_versions(), &["base", "needs-x"]).unwrap();
        assert_eq!(r.applied, ["base", "needs-x"]);

        let err = run(&registry, &full_versions(), &["needs-x"]).unwrap_err();
        assert!(matches!(err, ResolveError::MissingPrerequisite { ref tag, .. } if tag == "x"));
    }

    #[test]
    fn provided_shape_tag_conflicts_with_shape() {
        let registry = registry_of(vec![
            StubModule::new("app").with_shape(Shape::Application),
            StubModule::new("sneaky").providing(&["library"]),
        ]);
        let err = run(&registry, &full_versions(), &["app", "sneaky"]).unwrap_err();
        assert!(matches!(err, ResolveError::Conflict { ref module, .. } if module == "sneaky"));
    }

    // -----------------------------------------------------------------------
    // Overrides
    // -----------------------------------------------------------------------

    #[test]
    fn explicit_overrides_beat_module_defaults() {
        let log = Logger::new("test");
        let request = ResolutionRequest::new(":app", ["app.application", "app.unit-test"])
            .with_overrides(Overrides {
                target_sdk: Some(33),
                test_framework: Some(TestFramework::Junit4),
                ..Overrides::default()
            });
        let r = resolve(&builtin(), &full_versions(), &request, &log).unwrap();
        let compile = r.configuration.compile.as_ref().unwrap();
        assert_eq!(compile.target_sdk.get(), Some(&33));
        assert_eq!(compile.target_sdk.source(), Source::Explicit);
        assert_eq!(compile.compile_sdk.source(), Source::Convention("app.application"));
        assert_eq!(
            r.configuration.test.as_ref().unwrap().framework.get(),
            Some(&TestFramework::Junit4)
        );
    }

    // -----------------------------------------------------------------------
    // Fingerprint
    // -----------------------------------------------------------------------

    #[test]
    fn fingerprint_is_stable_hex() {
        let a = run(&builtin(), &full_versions(), &["app.library", "app.lint"]).unwrap();
        let b = run(&builtin(), &full_versions(), &["app.library", "app.lint"]).unwrap();
        let fa = a.fingerprint().unwrap();
        assert_eq!(fa.len(), 64);
        assert!(fa.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(fa, b.fingerprint().unwrap());
    }

    #[test]
    fn fingerprint_differs_with_configuration() {
        let a = run(&builtin(), &full_versions(), &["app.library"]).unwrap();
        let b = run(&builtin(), &full_versions(), &["app.library", "app.compose"]).unwrap();
        assert_ne!(a.fingerprint().unwrap(), b.fingerprint().unwrap());
        assert!(
            b.configuration
                .compile
                .as_ref()
                .is_some_and(|c: &CompileOptions| c.build_features.contains("compose"))
        );
    }
}
