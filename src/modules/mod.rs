//! Named convention modules that co-configure a target's build extensions.
pub mod application;
pub mod compose;
mod context;
pub mod coverage;
pub mod dependency_injection;
pub mod feature;
pub mod flavors;
pub mod graph;
pub mod jvm_library;
mod kotlin;
pub mod library;
pub mod lint;
pub mod room;
pub mod test_harness;

/// Implement [`ConventionModule::prerequisites`] by expanding to the
/// required `fn prerequisites(&self) -> &'static [&'static str]` body.
///
/// # Examples
///
/// ```ignore
/// prerequisites![library::ID, dependency_injection::ID]
/// // expands to:
/// //   fn prerequisites(&self) -> &'static [&'static str] {
/// //       const IDS: &[&str] = &[library::ID, dependency_injection::ID];
/// //       IDS
/// //   }
/// ```
macro_rules! prerequisites {
    [$($id:expr),+ $(,)?] => {
        fn prerequisites(&self) -> &'static [&'static str] {
            const IDS: &[&str] = &[$($id),+];
            IDS
        }
    };
}

pub(crate) use prerequisites;

pub use context::ApplyContext;

use std::fmt;

use crate::capability::{Requirement, Shape};
use crate::error::ResolveError;

/// A named, reusable unit of build configuration.
///
/// Modules are stateless: every effect goes through the
/// [`ExtensionStore`](crate::extensions::ExtensionStore) reached via the
/// [`ApplyContext`]. Everything the resolver needs to order and check a
/// module (prerequisites, shape, provided and required capabilities) is
/// declared statically, so the graph can be inspected without applying
/// anything.
pub trait ConventionModule: fmt::Debug + Send + Sync + 'static {
    /// Unique, namespaced identifier such as `app.library`.
    fn id(&self) -> &'static str;

    /// One-line description for `conventions list`.
    fn description(&self) -> &'static str;

    /// Modules that must be applied first. Applied automatically if the
    /// request does not name them.
    fn prerequisites(&self) -> &'static [&'static str] {
        &[]
    }

    /// The shape this module gives the target, if it is a base module.
    fn shape(&self) -> Option<Shape> {
        None
    }

    /// Non-shape capability tags the target has once this module is applied.
    fn provides(&self) -> &'static [&'static str] {
        &[]
    }

    /// Capabilities that must be present before this module is applied.
    fn requires(&self) -> &'static [Requirement] {
        &[]
    }

    /// Mutate the target's extensions.
    ///
    /// Must be idempotent: applying twice leaves the store as applying once.
    ///
    /// # Errors
    ///
    /// Returns a [`ResolveError`] when a version key is missing or invalid,
    /// or when the target's shape is one the module cannot configure.
    fn apply(&self, cx: &mut ApplyContext<'_>) -> Result<(), ResolveError>;
}

/// Every built-in convention module.
///
/// Order is irrelevant: the registry keys modules by identifier and the
/// resolver derives application order from the request and prerequisites.
#[must_use]
pub fn all_modules() -> Vec<Box<dyn ConventionModule>> {
    vec![
        Box::new(application::ApplicationConvention),
        Box::new(library::LibraryConvention),
        Box::new(test_harness::TestHarnessConvention),
        Box::new(jvm_library::JvmLibraryConvention),
        Box::new(dependency_injection::DependencyInjectionConvention),
        Box::new(feature::FeatureConvention),
        Box::new(unit_test::UnitTestConvention),
        Box::new(coverage::CoverageConvention),
        Box::new(lint::LintConvention),
        Box::new(compose::ComposeConvention),
        Box::new(flavors::FlavorsConvention),
        Box::new(room::RoomConvention),
    ]
}
