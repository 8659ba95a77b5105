//! Prerequisite expansion into an apply order.
use std::collections::HashSet;

use crate::capability::Shape;
use crate::error::ResolveError;
use crate::registry::Registry;

/// Expand `requested` into the order modules are applied in.
///
/// Depth-first, post-order: every module follows its prerequisites, modules
/// unrelated to each other keep the requested order, and a prerequisite
/// shared by several modules appears once, at its first encounter. Nothing
/// is applied, so this is safe to call for inspection.
///
/// # Errors
///
/// - [`ResolveError::UnknownIdentifier`] for an unregistered identifier,
///   naming the module whose prerequisite list referenced it.
/// - [`ResolveError::CyclicDependency`] when expansion re-enters a module it
///   is still expanding; the error carries the cycle path.
///
/// # Examples
///
/// ```
/// use convention_engine::registry::Registry;
/// use convention_engine::resolver::plan;
///
/// let registry = Registry::builtin().unwrap();
/// let order = plan(&registry, &["app.feature"]).unwrap();
/// assert_eq!(order, ["app.library", "app.dependency-injection", "app.feature"]);
/// ```
pub fn plan<S: AsRef<str>>(
    registry: &Registry,
    requested: &[S],
) -> Result<Vec<&'static str>, ResolveError> {
    let mut expansion = Expansion {
        registry,
        stack: Vec::new(),
        done: HashSet::new(),
        order: Vec::new(),
    };
    for id in requested {
        expansion.visit(id.as_ref(), None)?;
    }
    Ok(expansion.order)
}

/// The single shape an apply order gives its target.
///
/// Shapes are read from the registry's static declarations, so a request
/// naming two shapes is rejected before any module runs, wherever the
/// shape modules sit in the order.
///
/// # Errors
///
/// - [`ResolveError::Conflict`] naming the second shape-defining module,
///   its shape, and the shape set by the first.
/// - [`ResolveError::UnknownIdentifier`] if `order` holds an unregistered
///   identifier.
pub fn ensure_single_shape(
    registry: &Registry,
    order: &[&str],
) -> Result<Option<Shape>, ResolveError> {
    let mut first: Option<Shape> = None;
    for id in order {
        let module = registry
            .lookup(id)
            .map_err(|_| ResolveError::UnknownIdentifier {
                id: (*id).to_string(),
                required_by: None,
            })?;
        let Some(shape) = module.shape() else {
            continue;
        };
        match first {
            None => first = Some(shape),
            Some(present) if present != shape => {
                return Err(ResolveError::Conflict {
                    module: module.id().to_string(),
                    required: shape.tag().to_string(),
                    present: present.tag().to_string(),
                });
            }
            Some(_) => {}
        }
    }
    Ok(first)
}

struct Expansion<'r> {
    registry: &'r Registry,
    /// Modules currently being expanded, outermost first.
    stack: Vec<&'static str>,
    done: HashSet<&'static str>,
    order: Vec<&'static str>,
}

impl Expansion<'_> {
    fn visit(&mut self, id: &str, required_by: Option<&'static str>) -> Result<(), ResolveError> {
        let module = self
            .registry
            .lookup(id)
            .map_err(|_| ResolveError::UnknownIdentifier {
                id: id.to_string(),
                required_by: required_by.map(str::to_string),
            })?;
        let id = module.id();
        if self.done.contains(id) {
            return Ok(());
        }
        if let Some(start) = self.stack.iter().position(|open| *open == id) {
            let mut cycle: Vec<String> = self
                .stack
                .get(start..)
                .unwrap_or_default()
                .iter()
                .map(|s| (*s).to_string())
                .collect();
            cycle.push(id.to_string());
            return Err(ResolveError::CyclicDependency { cycle });
        }

        self.stack.push(id);
        for prerequisite in module.prerequisites() {
            self.visit(prerequisite, Some(id))?;
        }
        self.stack.pop();

        self.done.insert(id);
        self.order.push(id);
        Ok(())
    }
}
