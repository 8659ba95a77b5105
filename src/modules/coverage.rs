//! Jacoco coverage over the unit test tasks.
use super::{ApplyContext, ConventionModule, prerequisites, unit_test};
use crate::capability::{Requirement, Shape};
use crate::config::versions::keys;
use crate::error::ResolveError;
use crate::extensions::{CoverageOptions, Dependencies};

/// Module identifier.
pub const ID: &str = "app.coverage";

/// Capability tag provided.
pub const TAG: &str = "coverage";

/// Jacoco version used when the version table has none.
pub const DEFAULT_JACOCO: &str = "0.8.12";

/// Generated classes never worth measuring.
const GENERATED_EXCLUDES: &[&str] = &[
    "**/*_Factory.class",
    "**/*_HiltModules*.class",
    "**/Hilt_*.class",
    "**/hilt_aggregated_deps/**",
];

/// Android resource and build config classes.
const ANDROID_EXCLUDES: &[&str] = &[
    "**/R.class",
    "**/R$*.class",
    "**/BuildConfig.*",
    "**/Manifest*.*",
];

/// Coverage instrumentation.
#[derive(Debug)]
pub struct CoverageConvention;

impl ConventionModule for CoverageConvention {
    fn id(&self) -> &'static str {
        ID
    }

    fn description(&self) -> &'static str {
        "Jacoco coverage for unit tests"
    }

    prerequisites![unit_test::ID];

    fn provides(&self) -> &'static [&'static str] {
        &[TAG]
    }

    fn requires(&self) -> &'static [Requirement] {
        const REQUIRES: &[Requirement] = &[Requirement::ANY_SHAPE, Requirement::Tag(unit_test::TAG)];
        REQUIRES
    }

    fn apply(&self, cx: &mut ApplyContext<'_>) -> Result<(), ResolveError> {
        let shape = cx.shape()?;
        let version = cx.version_or(keys::JACOCO, DEFAULT_JACOCO);
        cx.extension::<Dependencies>()?.plugin("jacoco");

        let coverage = cx.extension::<CoverageOptions>()?;
        coverage.tool_version.set(ID, version);
        coverage
            .excludes
            .extend(GENERATED_EXCLUDES.iter().map(|p| (*p).to_string()));
        let tasks: &[&str] = match shape {
            Shape::Application | Shape::Library => {
                coverage
                    .excludes
                    .extend(ANDROID_EXCLUDES.iter().map(|p| (*p).to_string()));
                &["testDebugUnitTest", "createDebugUnitTestCoverageReport"]
            }
            Shape::TestHarness => &["connectedDebugAndroidTest"],
            Shape::JvmOnly => &["test"],
        };
        coverage
            .instrumented
            .extend(tasks.iter().map(|t| (*t).to_string()));
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::config::versions::VersionTable;
    use crate::modules::test_helpers::Harness;

    #[test]
    fn version_comes_from_table() {
        let mut h = Harness::new(Some(Shape::Library));
        h.apply(&CoverageConvention).unwrap();
        let coverage = h.get::<CoverageOptions>();
        assert_eq!(coverage.tool_version.get().map(String::as_str), Some("0.8.11"));
        assert!(coverage.instrumented.contains("testDebugUnitTest"));
        assert!(coverage.excludes.contains("**/R.class"));
    }

    #[test]
    fn version_falls_back_to_default() {
        let mut h = Harness::new(Some(Shape::JvmOnly)).with_versions(VersionTable::default());
        h.apply(&CoverageConvention).unwrap();
        let coverage = h.get::<CoverageOptions>();
        assert_eq!(coverage.tool_version.get().map(String::as_str), Some(DEFAULT_JACOCO));
        assert_eq!(coverage.instrumented.iter().collect::<Vec<_>>(), ["test"]);
        assert!(!coverage.excludes.contains("**/R.class"));
    }

    #[test]
    fn requires_unit_test_capability() {
        assert!(CoverageConvention.requires().contains(&Requirement::Tag("unit-test")));
        assert_eq!(CoverageConvention.prerequisites(), ["app.unit-test"]);
    }
}
