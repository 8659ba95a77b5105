//! Room persistence with KSP code generation.
use super::{ApplyContext, ConventionModule};
use crate::capability::Requirement;
use crate::error::ResolveError;
use crate::extensions::{CompileOptions, Dependencies};

/// Module identifier.
pub const ID: &str = "app.room";

/// Capability tag provided.
pub const TAG: &str = "room";

/// Directory exported schemas are written to, relative to the target.
pub const SCHEMA_DIR: &str = "schemas";

/// Room database conventions.
#[derive(Debug)]
pub struct RoomConvention;

impl ConventionModule for RoomConvention {
    fn id(&self) -> &'static str {
        ID
    }

    fn description(&self) -> &'static str {
        "Room persistence with exported schemas"
    }

    fn provides(&self) -> &'static [&'static str] {
        &[TAG]
    }

    fn requires(&self) -> &'static [Requirement] {
        &[Requirement::ANDROID_MODULE]
    }

    fn apply(&self, cx: &mut ApplyContext<'_>) -> Result<(), ResolveError> {
        cx.extension::<Dependencies>()?
            .plugin("androidx.room")
            .plugin("com.google.devtools.ksp")
            .add("implementation", "libs.room.runtime")
            .add("implementation", "libs.room.ktx")
            .add("ksp", "libs.room.compiler");

        let compile = cx.extension::<CompileOptions>()?;
        compile
            .processor_args
            .insert("room.schemaLocation".to_string(), SCHEMA_DIR.to_string());
        compile
            .processor_args
            .insert("room.generateKotlin".to_string(), "true".to_string());
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::capability::Shape;
    use crate::modules::test_helpers::Harness;

    #[test]
    fn exports_schemas_through_ksp() {
        let mut h = Harness::new(Some(Shape::Library));
        h.apply(&RoomConvention).unwrap();
        let args = &h.get::<CompileOptions>().processor_args;
        assert_eq!(args["room.schemaLocation"], SCHEMA_DIR);
        assert_eq!(args["room.generateKotlin"], "true");
        assert!(h.get::<Dependencies>().contains("ksp", "libs.room.compiler"));
    }
}
