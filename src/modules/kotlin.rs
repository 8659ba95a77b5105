//! Settings shared by the shape-defining modules.
use super::ApplyContext;
use crate::config::versions::keys;
use crate::error::ResolveError;
use crate::extensions::{CompileOptions, TestOptions};

/// Compile SDK used when the version table has none.
pub const DEFAULT_COMPILE_SDK: u32 = 35;
/// Minimum SDK used when the version table has none.
pub const DEFAULT_MIN_SDK: u32 = 21;
/// Target SDK used when the version table has none.
pub const DEFAULT_TARGET_SDK: u32 = 35;

/// Runner used by instrumented tests unless a module knows better.
pub const ANDROID_JUNIT_RUNNER: &str = "androidx.test.runner.AndroidJUnitRunner";

/// Kotlin compiler arguments every module compiles with.
const COMMON_COMPILER_ARGS: &[&str] = &["-opt-in=kotlin.RequiresOptIn", "-Xjvm-default=all"];

/// Configure the Kotlin toolchain: JVM target and common compiler flags.
///
/// # Errors
///
/// Returns [`ResolveError::MissingVersionKey`] if the version table has no
/// `jvm-target`.
pub fn configure_kotlin(cx: &mut ApplyContext<'_>) -> Result<(), ResolveError> {
    let module = cx.module_id();
    let jvm_target = cx.version(keys::JVM_TARGET)?.to_string();
    let compile = cx.extension::<CompileOptions>()?;
    compile.jvm_target.set(module, jvm_target);
    compile
        .compiler_args
        .extend(COMMON_COMPILER_ARGS.iter().map(|arg| (*arg).to_string()));
    Ok(())
}

/// Configure Android SDK levels. `with_target` also sets the target SDK,
/// which only installable artifacts carry.
///
/// # Errors
///
/// Returns [`ResolveError::InvalidVersionValue`] for a non-numeric level.
pub fn configure_android_sdk(cx: &mut ApplyContext<'_>, with_target: bool) -> Result<(), ResolveError> {
    let module = cx.module_id();
    let compile_sdk = cx.sdk_level(keys::COMPILE_SDK, DEFAULT_COMPILE_SDK)?;
    let min_sdk = cx.sdk_level(keys::MIN_SDK, DEFAULT_MIN_SDK)?;
    let target_sdk = if with_target {
        Some(cx.sdk_level(keys::TARGET_SDK, DEFAULT_TARGET_SDK)?)
    } else {
        None
    };

    let compile = cx.extension::<CompileOptions>()?;
    compile.compile_sdk.set(module, compile_sdk);
    compile.min_sdk.set(module, min_sdk);
    if let Some(level) = target_sdk {
        compile.target_sdk.set(module, level);
    }
    Ok(())
}

/// Set the instrumentation runner, reporting when a more specific module
/// replaces one set earlier.
///
/// # Errors
///
/// Propagates extension store errors.
pub fn set_instrumentation_runner(cx: &mut ApplyContext<'_>, runner: &str) -> Result<(), ResolveError> {
    let module = cx.module_id();
    cx.extension::<TestOptions>()?
        .instrumentation_runner
        .set(module, runner.to_string());
    Ok(())
}

/// Derive the Android resource prefix from a target path.
///
/// Path segments are lowercased and joined with `_`, and a trailing `_` is
/// appended: `:core:data` becomes `core_data_`. A target without any
/// alphanumeric character yields an empty prefix.
#[must_use]
pub fn resource_prefix(target: &str) -> String {
    let parts: Vec<String> = target
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_ascii_lowercase)
        .collect();
    if parts.is_empty() {
        return String::new();
    }
    format!("{}_", parts.join("_"))
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::config::versions::VersionTable;
    use crate::extensions::Source;
    use crate::modules::test_helpers::Harness;

    #[test]
    fn resource_prefix_from_nested_path() {
        assert_eq!(resource_prefix(":core:data"), "core_data_");
        assert_eq!(resource_prefix(":feature:for-you"), "feature_for_you_");
        assert_eq!(resource_prefix("Sync"), "sync_");
        assert_eq!(resource_prefix(":"), "");
    }

    #[derive(Debug)]
    struct KotlinOnly;

    impl crate::modules::ConventionModule for KotlinOnly {
        fn id(&self) -> &'static str {
            "kotlin-only"
        }
        fn description(&self) -> &'static str {
            "test"
        }
        fn apply(&self, cx: &mut ApplyContext<'_>) -> Result<(), ResolveError> {
            configure_kotlin(cx)?;
            configure_android_sdk(cx, false)
        }
    }

    #[test]
    fn kotlin_requires_jvm_target() {
        let mut h = Harness::new(None).with_versions(VersionTable::default());
        assert!(matches!(
            h.apply(&KotlinOnly),
            Err(ResolveError::MissingVersionKey { .. })
        ));
    }

    #[test]
    fn sdk_levels_fall_back_to_defaults() {
        let mut h = Harness::new(None)
            .with_versions(VersionTable::from_pairs([(keys::JVM_TARGET, "21")]));
        h.apply(&KotlinOnly).unwrap();
        let compile = h.get::<CompileOptions>();
        assert_eq!(compile.compile_sdk.get(), Some(&DEFAULT_COMPILE_SDK));
        assert_eq!(compile.min_sdk.get(), Some(&DEFAULT_MIN_SDK));
        assert!(compile.target_sdk.get().is_none());
        assert_eq!(compile.jvm_target.source(), Source::Convention("kotlin-only"));
        assert!(compile.compiler_args.contains("-opt-in=kotlin.RequiresOptIn"));
    }
}
