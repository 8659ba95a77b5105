//! Command: print version information.
use std::io::Write as _;


/// The engine version, from `CONVENTIONS_VERSION` at build time.
#[must_use]
pub fn version() -> &'static str {
    option_env!("CONVENTIONS_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
}

/// Print the engine version to stdout.
///
/// # Errors
///
/// Returns an error if stdout cannot be written.
pub fn run() -> std::io::Result<()> {
    writeln!(std::io::stdout().lock(), "conventions {}", version())
}
