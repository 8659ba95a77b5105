//! Command: resolve manifest targets and emit their configurations.
use std::collections::BTreeMap;
use std::io::Write as _;
use std::sync::Arc;

use anyhow::{Context as _, Result};
use serde::Serialize;

use crate::cli::{GlobalOpts, ResolveOpts};
use crate::logging::Logger;
use crate::resolver::Resolution;

use super::CommandSetup;

/// One target in the emitted document.
#[derive(Debug, Serialize)]
pub struct TargetOutput<'a> {
    /// Hex SHA-256 of `configuration`.
    pub fingerprint: String,
    /// The resolved target.
    #[serde(flatten)]
    pub resolution: &'a Resolution,
}

/// Run the resolve command.
///
/// Nothing is written unless every selected target resolves.
///
/// # Errors
///
/// Returns an error if setup fails, a selected target is not in the
/// manifest, any target fails to resolve, or the output cannot be written.
pub fn run(global: &GlobalOpts, opts: &ResolveOpts, log: &Arc<Logger>) -> Result<()> {
    let setup = CommandSetup::init(global, log)?;
    let requests = setup.requests(&opts.targets)?;
    if requests.is_empty() {
        log.warn("no targets to resolve");
    }

    let results = super::resolve_targets(&setup, &requests, global.parallel, log);
    super::ensure_no_failures(log)?;

    let resolutions: Vec<Resolution> = results.into_iter().flatten().collect();
    let document = render(&resolutions)?;

    match &opts.output {
        Some(path) => {
            std::fs::write(path, document)
                .with_context(|| format!("writing {}", path.display()))?;
            log.info(&format!("wrote {}", path.display()));
        }
        None => writeln!(std::io::stdout().lock(), "{document}").context("writing stdout")?,
    }
    Ok(())
}

/// Pretty JSON object keyed by target name.
///
/// # Errors
///
/// Returns an error if a configuration cannot be serialized.
pub fn render(resolutions: &[Resolution]) -> Result<String> {
    let mut targets = BTreeMap::new();
    for resolution in resolutions {
        targets.insert(
            resolution.target.as_str(),
            TargetOutput {
                fingerprint: resolution.fingerprint()?,
                resolution,
            },
        );
    }
    Ok(serde_json::to_string_pretty(&targets)?)
}
