//! Jetpack Compose UI toolkit.
use super::{ApplyContext, ConventionModule};
use crate::capability::{Requirement, Shape};
use crate::error::ResolveError;
use crate::extensions::{CompileOptions, Dependencies};

/// Module identifier.
pub const ID: &str = "app.compose";

/// Capability tag provided.
pub const TAG: &str = "compose";

const BOM: &str = "platform(libs.androidx.compose.bom)";

/// Compose build feature, compiler plugin and BOM-aligned dependencies.
#[derive(Debug)]
pub struct ComposeConvention;

impl ConventionModule for ComposeConvention {
    fn id(&self) -> &'static str {
        ID
    }

    fn description(&self) -> &'static str {
        "Jetpack Compose with BOM-aligned dependencies"
    }

    fn provides(&self) -> &'static [&'static str] {
        &[TAG]
    }

    fn requires(&self) -> &'static [Requirement] {
        &[Requirement::ANDROID_MODULE]
    }

    fn apply(&self, cx: &mut ApplyContext<'_>) -> Result<(), ResolveError> {
        let shape = cx.shape()?;
        match shape {
            Shape::Application | Shape::Library => {}
            Shape::TestHarness | Shape::JvmOnly => {
                return Err(cx.unsupported(shape, Requirement::ANDROID_MODULE));
            }
        }

        cx.extension::<CompileOptions>()?
            .build_features
            .insert("compose".to_string());

        let deps = cx.extension::<Dependencies>()?;
        deps.plugin("org.jetbrains.kotlin.plugin.compose")
            .add("implementation", BOM)
            .add("androidTestImplementation", BOM)
            .add("implementation", "libs.androidx.compose.ui.tooling.preview")
            .add("debugImplementation", "libs.androidx.compose.ui.tooling");
        if shape == Shape::Application {
            deps.add("implementation", "libs.androidx.activity.compose");
        }
        Ok(())
    }
}
