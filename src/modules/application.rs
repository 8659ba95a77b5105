//! Base module for installable Android applications.
use super::{ApplyContext, ConventionModule, kotlin};
use crate::capability::Shape;
use crate::error::ResolveError;
use crate::extensions::{CompileOptions, Dependencies};

/// Module identifier.
pub const ID: &str = "app.application";

/// Android application with Kotlin, full SDK levels and the default runner.
#[derive(Debug)]
pub struct ApplicationConvention;

impl ConventionModule for ApplicationConvention {
    fn id(&self) -> &'static str {
        ID
    }

    fn description(&self) -> &'static str {
        "Android application with Kotlin toolchain and SDK levels"
    }

    fn shape(&self) -> Option<Shape> {
        Some(Shape::Application)
    }

    fn apply(&self, cx: &mut ApplyContext<'_>) -> Result<(), ResolveError> {
        cx.extension::<Dependencies>()?
            .plugin("com.android.application")
            .plugin("org.jetbrains.kotlin.android");
        kotlin::configure_android_sdk(cx, true)?;
        kotlin::configure_kotlin(cx)?;
        cx.extension::<CompileOptions>()?
            .build_features
            .insert("build-config".to_string());
        kotlin::set_instrumentation_runner(cx, kotlin::ANDROID_JUNIT_RUNNER)
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::extensions::TestOptions;
    use crate::modules::test_helpers::Harness;

    #[test]
    fn configures_full_sdk_levels_from_table() {
        let mut h = Harness::new(None);
        h.apply(&ApplicationConvention).unwrap();
        let compile = h.get::<CompileOptions>();
        assert_eq!(compile.compile_sdk.get(), Some(&35));
        assert_eq!(compile.min_sdk.get(), Some(&24));
        assert_eq!(compile.target_sdk.get(), Some(&34));
        assert_eq!(compile.jvm_target.get().map(String::as_str), Some("17"));
        assert!(compile.build_features.contains("build-config"));
    }

    #[test]
    fn applies_application_plugins_and_runner() {
        let mut h = Harness::new(None);
        h.apply(&ApplicationConvention).unwrap();
        assert!(h.get::<Dependencies>().plugins.contains("com.android.application"));
        assert_eq!(
            h.get::<TestOptions>().instrumentation_runner.get().map(String::as_str),
            Some(kotlin::ANDROID_JUNIT_RUNNER)
        );
    }

    #[test]
    fn apply_is_idempotent() {
        let mut once = Harness::new(None);
        once.apply(&ApplicationConvention).unwrap();
        let mut twice = Harness::new(None);
        twice.apply(&ApplicationConvention).unwrap();
        twice.apply(&ApplicationConvention).unwrap();
        assert_eq!(once.get::<CompileOptions>(), twice.get::<CompileOptions>());
        assert_eq!(once.get::<Dependencies>(), twice.get::<Dependencies>());
    }
}
