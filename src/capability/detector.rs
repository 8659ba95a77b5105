//! Capability checks run before each module is applied.
//!
//! Both functions are pure: they inspect a snapshot of the target's
//! [`CapabilitySet`] and never mutate it.

use super::{CapabilitySet, Requirement};
use crate::error::ResolveError;
use crate::modules::ConventionModule;

/// Whether the capability set contains `tag`.
#[must_use]
pub fn has(capabilities: &CapabilitySet, tag: &str) -> bool {
    capabilities.has(tag)
}

/// Check that `module` may be applied to a target with `capabilities`.
///
/// # Errors
///
/// - [`ResolveError::Conflict`] when the module defines a shape different
///   from the one already present, or requires a shape the target does not
///   have while holding another one.
/// - [`ResolveError::MissingPrerequisite`] when a required shape or tag is
///   absent altogether.
pub fn require_before_apply(
    capabilities: &CapabilitySet,
    module: &dyn ConventionModule,
) -> Result<(), ResolveError> {
    if let (Some(defined), Some(present)) = (module.shape(), capabilities.shape())
        && defined != present
    {
        return Err(ResolveError::Conflict {
            module: module.id().to_string(),
            required: defined.tag().to_string(),
            present: present.tag().to_string(),
        });
    }

    for requirement in module.requires() {
        match *requirement {
            Requirement::Shape(allowed) => match capabilities.shape() {
                Some(present) if allowed.contains(&present) => {}
                Some(present) => {
                    return Err(ResolveError::Conflict {
                        module: module.id().to_string(),
                        required: requirement.describe(),
                        present: present.tag().to_string(),
                    });
                }
                None => {
                    return Err(ResolveError::MissingPrerequisite {
                        module: module.id().to_string(),
                        tag: requirement.describe(),
                    });
                }
            },
            Requirement::Tag(tag) => {
                if !has(capabilities, tag) {
                    return Err(ResolveError::MissingPrerequisite {
                        module: module.id().to_string(),
                        tag: tag.to_string(),
                    });
                }
            }
        }
    }

    Ok(())
}
