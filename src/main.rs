//! `conventions` command-line entry point.
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use convention_engine::{cli, commands, logging};

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = cli::Cli::parse();
    let command = args.command.name();
    logging::init_subscriber(args.verbose, command);
    let log = Arc::new(logging::Logger::new(command));

    match args.command {
        cli::Command::Resolve(opts) => commands::resolve::run(&args.global, &opts, &log),
        cli::Command::Plan(opts) => commands::plan::run(&opts, &log),
        cli::Command::List => commands::list::run(),
        cli::Command::Check => commands::check::run(&args.global, &log),
        cli::Command::Version => Ok(commands::version::run()?),
    }
}
