//! Hilt dependency injection through KSP.
use super::{ApplyContext, ConventionModule};
use crate::capability::{Requirement, Shape};
use crate::error::ResolveError;
use crate::extensions::Dependencies;

/// Module identifier.
pub const ID: &str = "app.dependency-injection";

/// Capability tag provided.
pub const TAG: &str = "dependency-injection";

const KSP_PLUGIN: &str = "com.google.devtools.ksp";

/// Hilt on Android shapes; the annotation-only core artifact on plain JVM
/// libraries.
#[derive(Debug)]
pub struct DependencyInjectionConvention;

impl ConventionModule for DependencyInjectionConvention {
    fn id(&self) -> &'static str {
        ID
    }

    fn description(&self) -> &'static str {
        "Hilt dependency injection with KSP code generation"
    }

    fn provides(&self) -> &'static [&'static str] {
        &[TAG]
    }

    fn requires(&self) -> &'static [Requirement] {
        &[Requirement::ANY_SHAPE]
    }

    fn apply(&self, cx: &mut ApplyContext<'_>) -> Result<(), ResolveError> {
        let shape = cx.shape()?;
        let deps = cx.extension::<Dependencies>()?;
        deps.plugin(KSP_PLUGIN).add("ksp", "libs.hilt.compiler");
        match shape {
            Shape::Application | Shape::Library => {
                deps.plugin("com.google.dagger.hilt.android")
                    .add("implementation", "libs.hilt.android")
                    .add("kspTest", "libs.hilt.compiler")
                    .add("testImplementation", "libs.hilt.android.testing");
            }
            Shape::TestHarness => {
                deps.plugin("com.google.dagger.hilt.android")
                    .add("implementation", "libs.hilt.android")
                    .add("implementation", "libs.hilt.android.testing");
            }
            Shape::JvmOnly => {
                deps.add("implementation", "libs.hilt.core");
            }
        }
        Ok(())
    }
}
