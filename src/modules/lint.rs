//! Static analysis: Android lint, or detekt where Android tooling is absent.
use super::{ApplyContext, ConventionModule};
use crate::capability::{Requirement, Shape};
use crate::config::versions::keys;
use crate::error::ResolveError;
use crate::extensions::{Dependencies, LintOptions, LintTool};

/// Module identifier.
pub const ID: &str = "app.lint";

/// Capability tag provided.
pub const TAG: &str = "lint";

/// Detekt version used when the version table has none.
pub const DEFAULT_DETEKT: &str = "1.23.7";

/// Static analysis conventions.
#[derive(Debug)]
pub struct LintConvention;

impl ConventionModule for LintConvention {
    fn id(&self) -> &'static str {
        ID
    }

    fn description(&self) -> &'static str {
        "Static analysis with XML reports and a baseline"
    }

    fn provides(&self) -> &'static [&'static str] {
        &[TAG]
    }

    fn requires(&self) -> &'static [Requirement] {
        &[Requirement::ANY_SHAPE]
    }

    fn apply(&self, cx: &mut ApplyContext<'_>) -> Result<(), ResolveError> {
        let shape = cx.shape()?;
        let detekt = cx.version_or(keys::DETEKT, DEFAULT_DETEKT);

        if shape == Shape::JvmOnly {
            cx.extension::<Dependencies>()?
                .plugin("io.gitlab.arturbosch.detekt");
        }

        let lint = cx.extension::<LintOptions>()?;
        lint.warnings_as_errors.set(ID, true);
        lint.xml_report.set(ID, true);
        match shape {
            Shape::Application => {
                lint.tool.set(ID, LintTool::AndroidLint);
                lint.baseline.set(ID, "lint-baseline.xml".to_string());
                lint.check_dependencies.set(ID, true);
            }
            Shape::Library | Shape::TestHarness => {
                lint.tool.set(ID, LintTool::AndroidLint);
                lint.baseline.set(ID, "lint-baseline.xml".to_string());
            }
            Shape::JvmOnly => {
                lint.tool.set(ID, LintTool::Detekt);
                lint.tool_version.set(ID, detekt);
                lint.baseline.set(ID, "detekt-baseline.xml".to_string());
            }
        }
        lint.disabled_checks.insert("GradleDependency".to_string());
        Ok(())
    }
}
