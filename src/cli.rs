//! Command-line interface definitions.
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Top-level CLI entry point for the convention engine.
#[derive(Parser, Debug)]
#[command(
    name = "conventions",
    about = "Compose build conventions onto project targets",
    version
)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Options shared by every subcommand.
    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Parser, Debug, Clone)]
pub struct GlobalOpts {
    /// Override project root directory
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Target manifest (default: conf/targets.toml)
    #[arg(long, global = true)]
    pub manifest: Option<PathBuf>,

    /// Version table, properties or TOML catalog (default: conf/versions.properties)
    #[arg(long, global = true)]
    pub versions: Option<PathBuf>,

    /// Disable parallel resolution of targets (parallel is enabled by default)
    #[arg(long = "no-parallel", global = true, action = clap::ArgAction::SetFalse)]
    pub parallel: bool,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve manifest targets into build configurations
    Resolve(ResolveOpts),
    /// Print the apply order for a list of modules
    Plan(PlanOpts),
    /// List registered convention modules
    List,
    /// Validate the registry, manifest and version table
    Check,
    /// Print version information
    Version,
}

impl Command {
    /// Name used for the log file of this command.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Resolve(_) => "resolve",
            Self::Plan(_) => "plan",
            Self::List => "list",
            Self::Check => "check",
            Self::Version => "version",
        }
    }
}

/// Options for the `resolve` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct ResolveOpts {
    /// Resolve only these targets
    #[arg(long = "target", value_delimiter = ',')]
    pub targets: Vec<String>,

    /// Write the configurations to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Options for the `plan` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct PlanOpts {
    /// Module identifiers in request order
    #[arg(required = true)]
    pub modules: Vec<String>,
}
