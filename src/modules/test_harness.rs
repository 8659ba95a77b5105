//! Base module for standalone instrumented test modules.
use super::{ApplyContext, ConventionModule, kotlin};
use crate::capability::Shape;
use crate::error::ResolveError;
use crate::extensions::Dependencies;

/// Module identifier.
pub const ID: &str = "app.test-harness";

/// Android test module.
#[derive(Debug)]
pub struct TestHarnessConvention;

impl ConventionModule for TestHarnessConvention {
    fn id(&self) -> &'static str {
        ID
    }

    fn description(&self) -> &'static str {
        "Standalone Android test module"
    }

    fn shape(&self) -> Option<Shape> {
        Some(Shape::TestHarness)
    }

    fn apply(&self, cx: &mut ApplyContext<'_>) -> Result<(), ResolveError> {
        cx.extension::<Dependencies>()?
            .plugin("com.android.test")
            .plugin("org.jetbrains.kotlin.android");
        kotlin::configure_android_sdk(cx, true)?;
        kotlin::configure_kotlin(cx)?;
        kotlin::set_instrumentation_runner(cx, kotlin::ANDROID_JUNIT_RUNNER)
    }
}
