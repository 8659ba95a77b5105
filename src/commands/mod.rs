//! Subcommand implementations and the setup they share.
pub mod check;
pub mod list;
pub mod plan;
pub mod resolve;
pub mod version;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context as _, Result};
use rayon::prelude::*;

use crate::cli::GlobalOpts;
use crate::config::Config;
use crate::config::validation::ValidationWarning;
use crate::logging::{BufferedLog, Log, Logger, TargetStatus};
use crate::registry::Registry;
use crate::resolver::{self, Resolution, ResolutionRequest};

/// Shared state produced by the common command setup sequence.
///
/// Builds the registry and loads the manifest and version table so that each
/// command does not have to repeat the boilerplate.
#[derive(Debug)]
pub struct CommandSetup {
    /// Built-in convention modules.
    pub registry: Registry,
    /// Manifest and version table for the project root.
    pub config: Config,
    /// Warnings found while validating `config`.
    pub warnings: Vec<ValidationWarning>,
}

impl CommandSetup {
    /// Build the registry, load all configuration and report warnings.
    ///
    /// # Errors
    ///
    /// Returns an error if the root directory cannot be determined, the
    /// registry cannot be built, or a configuration file fails to parse.
    pub fn init(global: &GlobalOpts, log: &Logger) -> Result<Self> {
        let root = resolve_root(global)?;
        log.debug(&format!("root: {}", root.display()));

        log.stage("Building registry");
        let registry = Registry::builtin()?;
        log.debug(&format!("{} convention modules", registry.len()));

        log.stage("Loading configuration");
        let config = Config::load(&root, global.manifest.as_deref(), global.versions.as_deref())?;
        log.debug(&format!("{} version entries", config.versions.len()));
        log.info(&format!(
            "loaded {} targets, {} versions",
            config.manifest.len(),
            config.versions.len()
        ));

        // Validate configuration and display warnings
        let warnings = config.validate(&registry);
        if !warnings.is_empty() {
            log.warn(&format!(
                "found {} configuration warning(s):",
                warnings.len()
            ));
            for warning in &warnings {
                log.warn(&format!(
                    "  {} [{}]: {}",
                    warning.source, warning.item, warning.message
                ));
            }
        }

        Ok(Self {
            registry,
            config,
            warnings,
        })
    }

    /// Manifest requests, narrowed to `only` when it is non-empty.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first entry of `only` that is not a
    /// manifest target.
    pub fn requests(&self, only: &[String]) -> Result<Vec<ResolutionRequest>> {
        if let Some(missing) = only
            .iter()
            .find(|t| !self.config.manifest.targets.contains_key(*t))
        {
            anyhow::bail!("target '{missing}' is not in the manifest");
        }
        Ok(self
            .config
            .manifest
            .requests()
            .into_iter()
            .filter(|r| only.is_empty() || only.contains(&r.target))
            .collect())
    }
}

/// Determine the project root.
///
/// `--root` wins, then `CONVENTIONS_ROOT`, then the current directory.
///
/// # Errors
///
/// Returns an error if the current directory cannot be read.
pub fn resolve_root(global: &GlobalOpts) -> Result<PathBuf> {
    if let Some(ref root) = global.root {
        return Ok(root.clone());
    }

    if let Ok(root) = std::env::var("CONVENTIONS_ROOT") {
        return Ok(PathBuf::from(root));
    }

    std::env::current_dir().context("cannot determine project root")
}

/// Resolve every request, record each outcome and print the summary.
///
/// Targets are independent runs sharing the registry and version table, so
/// with `parallel` they resolve on the rayon pool with buffered output.
/// Results keep request order; a failed target yields `None`.
pub fn resolve_targets(
    setup: &CommandSetup,
    requests: &[ResolutionRequest],
    parallel: bool,
    log: &Arc<Logger>,
) -> Vec<Option<Resolution>> {
    let results = if parallel && requests.len() > 1 {
        requests
            .par_iter()
            .map(|request| {
                let buffered = BufferedLog::new(Arc::clone(log));
                let result = resolve_one(setup, request, &buffered);
                buffered.flush();
                result
            })
            .collect()
    } else {
        requests
            .iter()
            .map(|request| resolve_one(setup, request, log.as_ref()))
            .collect()
    };

    log.print_summary();
    results
}

fn resolve_one(
    setup: &CommandSetup,
    request: &ResolutionRequest,
    log: &dyn Log,
) -> Option<Resolution> {
    log.stage(&request.target);
    match resolver::resolve(&setup.registry, &setup.config.versions, request, log) {
        Ok(resolution) => {
            log.info(&format!("applied {}", resolution.applied.join(", ")));
            let fingerprint = resolution.fingerprint().ok();
            let short = fingerprint
                .as_deref()
                .map(|f| f.get(..12).unwrap_or(f));
            log.record_target(&request.target, TargetStatus::Resolved, short);
            Some(resolution)
        }
        Err(e) => {
            log.error(&format!("{}: {e}", request.target));
            log.record_target(
                &request.target,
                TargetStatus::Failed,
                Some(&e.to_string()),
            );
            None
        }
    }
}

/// Bail if any target recorded a failure.
///
/// # Errors
///
/// Returns an error carrying the number of failed targets.
pub fn ensure_no_failures(log: &Logger) -> Result<()> {
    let count = log.failure_count();
    if count > 0 {
        anyhow::bail!("{count} target(s) failed");
    }
    Ok(())
}
