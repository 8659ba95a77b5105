//! Demo and production product flavors.
use super::{ApplyContext, ConventionModule};
use crate::capability::{Requirement, Shape};
use crate::error::ResolveError;
use crate::extensions::{Flavor, FlavorOptions};

/// Module identifier.
pub const ID: &str = "app.flavors";

/// Capability tag provided.
pub const TAG: &str = "flavors";

/// The single flavor dimension.
pub const DIMENSION: &str = "content-type";

/// Flavors declared, with the application id suffix an application uses.
const FLAVORS: &[(&str, Option<&str>)] = &[("demo", Some(".demo")), ("prod", None)];

/// Product flavors shared by applications and libraries.
///
/// Libraries must declare the same flavors as the application consuming
/// them, but only applications carry an id suffix.
#[derive(Debug)]
pub struct FlavorsConvention;

impl ConventionModule for FlavorsConvention {
    fn id(&self) -> &'static str {
        ID
    }

    fn description(&self) -> &'static str {
        "Demo and prod flavors on the content-type dimension"
    }

    fn provides(&self) -> &'static [&'static str] {
        &[TAG]
    }

    fn requires(&self) -> &'static [Requirement] {
        &[Requirement::ANDROID_MODULE]
    }

    fn apply(&self, cx: &mut ApplyContext<'_>) -> Result<(), ResolveError> {
        let shape = cx.shape()?;
        let with_suffix = match shape {
            Shape::Application => true,
            Shape::Library => false,
            Shape::TestHarness | Shape::JvmOnly => {
                return Err(cx.unsupported(shape, Requirement::ANDROID_MODULE));
            }
        };

        let options = cx.extension::<FlavorOptions>()?;
        options.add_dimension(DIMENSION);
        for (name, suffix) in FLAVORS {
            options.flavors.insert(
                (*name).to_string(),
                Flavor {
                    dimension: DIMENSION.to_string(),
                    application_id_suffix: suffix
                        .filter(|_| with_suffix)
                        .map(str::to_string),
                },
            );
        }
        Ok(())
    }
}
