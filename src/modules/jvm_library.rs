//! Base module for plain JVM libraries.
use super::{ApplyContext, ConventionModule, kotlin};
use crate::capability::Shape;
use crate::error::ResolveError;
use crate::extensions::{CompileOptions, Dependencies};

/// Module identifier.
pub const ID: &str = "jvm.library";

/// Kotlin/JVM library without Android tooling. No SDK levels are set.
#[derive(Debug)]
pub struct JvmLibraryConvention;

impl ConventionModule for JvmLibraryConvention {
    fn id(&self) -> &'static str {
        ID
    }

    fn description(&self) -> &'static str {
        "Kotlin JVM library without Android tooling"
    }

    fn shape(&self) -> Option<Shape> {
        Some(Shape::JvmOnly)
    }

    fn apply(&self, cx: &mut ApplyContext<'_>) -> Result<(), ResolveError> {
        cx.extension::<Dependencies>()?
            .plugin("org.jetbrains.kotlin.jvm");
        kotlin::configure_kotlin(cx)?;
        cx.extension::<CompileOptions>()?
            .compiler_args
            .insert("-Xjsr305=strict".to_string());
        Ok(())
    }
}
