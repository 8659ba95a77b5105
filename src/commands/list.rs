//! Command: list registered convention modules.
use std::fmt::Write as _;
use std::io::Write as _;

use anyhow::Result;

use crate::modules::ConventionModule;
use crate::registry::Registry;

/// Print every registered module with its role and prerequisites.
///
/// # Errors
///
/// Returns an error if the built-in registry cannot be built or stdout
/// cannot be written.
pub fn run() -> Result<()> {
    let registry = Registry::builtin()?;
    write!(std::io::stdout().lock(), "{}", render(&registry))?;
    Ok(())
}

/// What a module contributes to the capability set.
fn role(module: &dyn ConventionModule) -> String {
    if let Some(shape) = module.shape() {
        return format!("shape:{shape}");
    }
    if module.provides().is_empty() {
        "-".to_string()
    } else {
        module.provides().join(",")
    }
}

/// Render the registry as aligned columns in identifier order.
#[must_use]
pub fn render(registry: &Registry) -> String {
    let width = registry.ids().map(str::len).max().unwrap_or(0);
    let roles: Vec<String> = registry.iter().map(role).collect();
    let role_width = roles.iter().map(String::len).max().unwrap_or(0);

    let mut out = String::new();
    for (module, role) in registry.iter().zip(&roles) {
        write!(
            out,
            "{:<width$}  {role:<role_width$}  {}",
            module.id(),
            module.description()
        )
        .unwrap_or(());
        if !module.prerequisites().is_empty() {
            write!(out, " (after {})", module.prerequisites().join(", ")).unwrap_or(());
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::capability::Shape;
    use crate::modules::test_helpers::{StubModule, registry_of};

    #[test]
    fn render_columns() {
        let registry = registry_of(vec![
            StubModule::new("lib").with_shape(Shape::Library),
            StubModule::new("cov")
                .with_prerequisites(&["unit"])
                .providing(&["coverage"]),
            StubModule::new("unit").providing(&["unit-test"]),
            StubModule::new("plain"),
        ]);
        insta::assert_snapshot!(render(&registry), @r"
        cov    coverage       stub (after unit)
        lib    shape:library  stub
        plain  -              stub
        unit   unit-test      stub
        ");
    }

    #[test]
    fn builtin_lists_every_module() {
        let registry = Registry::builtin().unwrap();
        assert_eq!(render(&registry).lines().count(), registry.len());
    }
}
