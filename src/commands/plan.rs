//! Command: print the apply order for a list of modules.
use std::fmt::Write as _;
use std::io::Write as _;

use anyhow::Result;

use crate::cli::PlanOpts;
use crate::error::ConventionError;
use crate::logging::Logger;
use crate::registry::Registry;
use crate::resolver;

/// Run the plan command.
///
/// Expands prerequisites only; no module is applied.
///
/// # Errors
///
/// Returns an error if an identifier is unknown or prerequisites form a cycle.
pub fn run(opts: &PlanOpts, log: &Logger) -> Result<()> {
    log.stage("Expanding prerequisites");
    let (registry, order) = expand(&opts.modules)?;
    log.debug(&format!(
        "{} requested, {} in plan",
        opts.modules.len(),
        order.len()
    ));
    write!(std::io::stdout().lock(), "{}", render(&registry, &order))?;
    Ok(())
}

/// Build the registry and expand `modules` against it.
///
/// # Errors
///
/// Returns [`ConventionError::Registry`] if the registry cannot be built,
/// or [`ConventionError::Resolve`] if expansion fails or the expanded
/// order names two shapes.
pub fn expand(modules: &[String]) -> Result<(Registry, Vec<&'static str>), ConventionError> {
    let registry = Registry::builtin()?;
    let order = resolver::plan(&registry, modules)?;
    resolver::ensure_single_shape(&registry, &order)?;
    Ok((registry, order))
}

/// One numbered line per module with its description.
#[must_use]
pub fn render(registry: &Registry, order: &[&str]) -> String {
    let width = order.iter().map(|id| id.len()).max().unwrap_or(0);
    let mut out = String::new();
    for (i, id) in order.iter().enumerate() {
        let description = registry.lookup(id).map_or("", |m| m.description());
        writeln!(out, "{}. {id:<width$}  {description}", i + 1).unwrap_or(());
    }
    out
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn render_feature_plan() {
        let registry = Registry::builtin().unwrap();
        let order = resolver::plan(&registry, &["app.feature"]).unwrap();
        insta::assert_snapshot!(render(&registry, &order), @r"
        1. app.library               Android library with Kotlin toolchain and resource prefix
        2. app.dependency-injection  Hilt dependency injection with KSP code generation
        3. app.feature               Feature library with injection, shared UI and navigation
        ");
    }

    #[test]
    fn expand_reports_resolution_errors() {
        let err = expand(&["app.application".to_string(), "app.feature".to_string()]).unwrap_err();
        assert!(matches!(
            err,
            ConventionError::Resolve(crate::error::ResolveError::Conflict { .. })
        ));
        assert!(err.to_string().starts_with("Resolution error: "));
    }

    #[test]
    fn unknown_module_fails() {
        let opts = PlanOpts {
            modules: vec!["app.nope".to_string()],
        };
        let err = run(&opts, &Logger::new("test")).unwrap_err();
        assert!(err.to_string().contains("'app.nope'"));
    }
}
