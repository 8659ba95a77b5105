//! Base module for reusable Android libraries.
use super::{ApplyContext, ConventionModule, kotlin};
use crate::capability::Shape;
use crate::error::ResolveError;
use crate::extensions::{CompileOptions, Dependencies};

/// Module identifier.
pub const ID: &str = "app.library";

/// Android library: SDK levels without a target SDK, and a resource prefix
/// derived from the target path so resources of different libraries never
/// collide.
#[derive(Debug)]
pub struct LibraryConvention;

impl ConventionModule for LibraryConvention {
    fn id(&self) -> &'static str {
        ID
    }

    fn description(&self) -> &'static str {
        "Android library with Kotlin toolchain and resource prefix"
    }

    fn shape(&self) -> Option<Shape> {
        Some(Shape::Library)
    }

    fn apply(&self, cx: &mut ApplyContext<'_>) -> Result<(), ResolveError> {
        cx.extension::<Dependencies>()?
            .plugin("com.android.library")
            .plugin("org.jetbrains.kotlin.android")
            .add("androidTestImplementation", "libs.kotlin.test");
        kotlin::configure_android_sdk(cx, false)?;
        kotlin::configure_kotlin(cx)?;

        let prefix = kotlin::resource_prefix(cx.target());
        if !prefix.is_empty() {
            cx.extension::<CompileOptions>()?
                .resource_prefix
                .set(ID, prefix);
        }
        kotlin::set_instrumentation_runner(cx, kotlin::ANDROID_JUNIT_RUNNER)
    }
}
