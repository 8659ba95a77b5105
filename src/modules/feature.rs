//! Feature libraries: a library with injection, shared UI and navigation.
use super::{ApplyContext, ConventionModule, dependency_injection, kotlin, library, prerequisites};
use crate::capability::{Requirement, Shape};
use crate::error::ResolveError;
use crate::extensions::Dependencies;

/// Module identifier.
pub const ID: &str = "app.feature";

/// Capability tag provided.
pub const TAG: &str = "feature";

/// Runner that boots the Hilt test application.
pub const HILT_TEST_RUNNER: &str = "com.example.core.testing.HiltTestRunner";

/// Feature module conventions.
///
/// Replaces the instrumentation runner set by [`library`], which is the
/// intended "more specific module wins" case.
#[derive(Debug)]
pub struct FeatureConvention;

impl ConventionModule for FeatureConvention {
    fn id(&self) -> &'static str {
        ID
    }

    fn description(&self) -> &'static str {
        "Feature library with injection, shared UI and navigation"
    }

    prerequisites![library::ID, dependency_injection::ID];

    fn provides(&self) -> &'static [&'static str] {
        &[TAG]
    }

    fn requires(&self) -> &'static [Requirement] {
        const REQUIRES: &[Requirement] = &[
            Requirement::Shape(&[Shape::Library]),
            Requirement::Tag(dependency_injection::TAG),
        ];
        REQUIRES
    }

    fn apply(&self, cx: &mut ApplyContext<'_>) -> Result<(), ResolveError> {
        cx.extension::<Dependencies>()?
            .add("implementation", ":core:ui")
            .add("implementation", ":core:designsystem")
            .add("implementation", "libs.androidx.hilt.navigation.compose")
            .add("implementation", "libs.androidx.lifecycle.runtime.compose")
            .add("implementation", "libs.androidx.lifecycle.viewmodel.compose")
            .add("testImplementation", ":core:testing")
            .add("androidTestImplementation", ":core:testing");
        kotlin::set_instrumentation_runner(cx, HILT_TEST_RUNNER)
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::extensions::{Source, TestOptions};
    use crate::modules::library::LibraryConvention;
    use crate::modules::test_helpers::Harness;

    #[test]
    fn prerequisites_are_library_and_injection() {
        assert_eq!(
            FeatureConvention.prerequisites(),
            ["app.library", "app.dependency-injection"]
        );
    }

    #[test]
    fn replaces_library_runner() {
        let mut h = Harness::new(Some(Shape::Library));
        h.apply(&LibraryConvention).unwrap();
        h.apply(&FeatureConvention).unwrap();
        let runner = &h.get::<TestOptions>().instrumentation_runner;
        assert_eq!(runner.get().map(String::as_str), Some(HILT_TEST_RUNNER));
        assert_eq!(runner.source(), Source::Convention(ID));
    }

    #[test]
    fn declares_shared_ui_projects() {
        let mut h = Harness::new(Some(Shape::Library));
        h.apply(&FeatureConvention).unwrap();
        let deps = h.get::<Dependencies>();
        assert!(deps.contains("implementation", ":core:ui"));
        assert!(deps.contains("testImplementation", ":core:testing"));
    }
}
