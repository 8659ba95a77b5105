//! The typed configuration objects, one per build concern.
//!
//! Set-valued fields use ordered sets so that independent modules commute
//! and the serialized output is deterministic. Scalars that a later module
//! may deliberately override are [`Setting`]s.
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Extension, Setting};

/// Compiler and SDK settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct CompileOptions {
    /// SDK level the sources compile against.
    pub compile_sdk: Setting<u32>,
    /// Lowest supported SDK level.
    pub min_sdk: Setting<u32>,
    /// SDK level the artifact targets at runtime.
    pub target_sdk: Setting<u32>,
    /// Bytecode level for Kotlin and Java compilation.
    pub jvm_target: Setting<String>,
    /// Prefix enforced on Android resource names.
    pub resource_prefix: Setting<String>,
    /// Extra compiler arguments.
    pub compiler_args: BTreeSet<String>,
    /// Optional build features switched on (`compose`, `build-config`, ...).
    pub build_features: BTreeSet<String>,
    /// Annotation processor (KSP) arguments.
    pub processor_args: BTreeMap<String, String>,
}

impl Extension for CompileOptions {
    const KEY: &'static str = "compile";
}

/// Test framework wired into the unit test task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestFramework {
    /// JUnit 4 runner.
    Junit4,
    /// JUnit 5 platform.
    Jupiter,
}

impl fmt::Display for TestFramework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Junit4 => "junit4",
            Self::Jupiter => "jupiter",
        })
    }
}

/// Unit and instrumented test settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct TestOptions {
    /// Unit test framework.
    pub framework: Setting<TestFramework>,
    /// Instrumentation runner class.
    pub instrumentation_runner: Setting<String>,
    /// Stubbed platform calls return defaults instead of throwing.
    pub return_default_values: Setting<bool>,
    /// Merge Android resources into unit tests.
    pub include_android_resources: Setting<bool>,
    /// Disable animations on test devices.
    pub animations_disabled: Setting<bool>,
}

impl Extension for TestOptions {
    const KEY: &'static str = "test";
}

/// Static analysis tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LintTool {
    /// Android lint.
    AndroidLint,
    /// Detekt, for modules without Android tooling.
    Detekt,
}

/// Static analysis settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct LintOptions {
    /// Analysis tool.
    pub tool: Setting<LintTool>,
    /// Tool version, when the tool is not bundled with the build plugin.
    pub tool_version: Setting<String>,
    /// Fail the build on warnings.
    pub warnings_as_errors: Setting<bool>,
    /// Emit an XML report for CI.
    pub xml_report: Setting<bool>,
    /// Baseline file of accepted findings.
    pub baseline: Setting<String>,
    /// Checks disabled project-wide.
    pub disabled_checks: BTreeSet<String>,
    /// Also analyse dependencies of this module.
    pub check_dependencies: Setting<bool>,
}

impl Extension for LintOptions {
    const KEY: &'static str = "lint";
}

/// Coverage instrumentation settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct CoverageOptions {
    /// Jacoco version.
    pub tool_version: Setting<String>,
    /// Test tasks instrumented for coverage.
    pub instrumented: BTreeSet<String>,
    /// Class file patterns excluded from reports.
    pub excludes: BTreeSet<String>,
}

impl Extension for CoverageOptions {
    const KEY: &'static str = "coverage";
}

/// One product flavor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Flavor {
    /// Dimension the flavor belongs to.
    pub dimension: String,
    /// Suffix appended to the application id, applications only.
    pub application_id_suffix: Option<String>,
}

/// Product flavor settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct FlavorOptions {
    /// Flavor dimensions in declaration order.
    pub dimensions: Vec<String>,
    /// Flavors by name.
    pub flavors: BTreeMap<String, Flavor>,
}

impl FlavorOptions {
    /// Declare a dimension once, keeping first-declaration order.
    pub fn add_dimension(&mut self, dimension: &str) {
        if !self.dimensions.iter().any(|d| d == dimension) {
            self.dimensions.push(dimension.to_string());
        }
    }
}

impl Extension for FlavorOptions {
    const KEY: &'static str = "flavors";
}

/// A build-time library reference.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Dependency {
    /// Configuration the dependency is added to (`implementation`, `ksp`, ...).
    pub configuration: String,
    /// Catalog alias or project path.
    pub notation: String,
}

/// Build plugins and dependency declarations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Dependencies {
    /// Build plugin ids to apply.
    pub plugins: BTreeSet<String>,
    /// Declared dependencies.
    pub declared: BTreeSet<Dependency>,
}

impl Dependencies {
    /// Request a build plugin.
    pub fn plugin(&mut self, id: &str) -> &mut Self {
        self.plugins.insert(id.to_string());
        self
    }

    /// Declare a dependency.
    pub fn add(&mut self, configuration: &str, notation: &str) -> &mut Self {
        self.declared.insert(Dependency {
            configuration: configuration.to_string(),
            notation: notation.to_string(),
        });
        self
    }

    /// Whether `notation` is declared in `configuration`.
    #[must_use]
    pub fn contains(&self, configuration: &str, notation: &str) -> bool {
        self.declared
            .iter()
            .any(|d| d.configuration == configuration && d.notation == notation)
    }
}

impl Extension for Dependencies {
    const KEY: &'static str = "dependencies";
}
