//! Command: validate configuration and trial-resolve every target.
use std::sync::Arc;

use anyhow::Result;

use crate::cli::GlobalOpts;
use crate::logging::Logger;

use super::CommandSetup;

/// Run the check command.
///
/// Configuration warnings are reported by [`CommandSetup::init`]; every
/// manifest target is then resolved and discarded.
///
/// # Errors
///
/// Returns an error if setup fails, any warning was found, or any target
/// fails to resolve.
pub fn run(global: &GlobalOpts, log: &Arc<Logger>) -> Result<()> {
    let setup = CommandSetup::init(global, log)?;
    let warnings = setup.warnings.len();

    let requests = setup.requests(&[])?;
    super::resolve_targets(&setup, &requests, global.parallel, log);
    super::ensure_no_failures(log)?;

    if warnings > 0 {
        anyhow::bail!("{warnings} configuration warning(s)");
    }
    log.info("configuration is valid");
    Ok(())
}
