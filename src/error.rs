//! Domain-specific error types for the convention engine.
//!
//! This module provides a structured error hierarchy using [`thiserror`].
//! Library modules return typed errors (e.g., [`ResolveError`], [`StoreError`])
//! while command handlers at the CLI boundary convert them to [`anyhow::Error`]
//! via the standard `?` operator.
//!
//! # Error hierarchy
//!
//! ```text
//! ConventionError
//! ├── Registry(RegistryError): bootstrap conflicts, unknown identifiers
//! ├── Resolve(ResolveError)  : expansion, capability and version failures
//! ├── Store(StoreError)      : extension store lifecycle misuse
//! └── Config(ConfigError)    : manifest and version table loading
//! ```
//!
//! Every error is fatal to the resolution run it occurs in. Nothing is
//! retried and no partial configuration is ever produced.

use thiserror::Error;

/// Top-level error type for the convention engine.
///
/// Aggregates domain-specific sub-errors and is convertible to
/// [`anyhow::Error`] for use at CLI command boundaries.
#[derive(Error, Debug)]
pub enum ConventionError {
    /// Registry bootstrap or lookup error.
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    /// Resolution of a target failed.
    #[error("Resolution error: {0}")]
    Resolve(#[from] ResolveError),

    /// The extension store was used outside its lifecycle.
    #[error("Extension store error: {0}")]
    Store(#[from] StoreError),

    /// Configuration input could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors raised while building or querying the module registry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Two modules were registered under the same identifier.
    #[error("Convention module '{0}' is already registered")]
    DuplicateIdentifier(String),

    /// No module is registered under the identifier.
    #[error("Unknown convention module '{0}'")]
    UnknownIdentifier(String),
}

/// Errors that abort a single resolution run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// A requested or prerequisite identifier is not registered.
    #[error("Unknown convention module '{id}'{}", required_by_suffix(.required_by.as_deref()))]
    UnknownIdentifier {
        /// The identifier that could not be found.
        id: String,
        /// The module whose prerequisite list named it, if any.
        required_by: Option<String>,
    },

    /// Prerequisite expansion revisited an identifier still being expanded.
    #[error("Cyclic prerequisite chain: {}", .cycle.join(" -> "))]
    CyclicDependency {
        /// The cycle, starting and ending with the same identifier.
        cycle: Vec<String>,
    },

    /// A module's shape or required shape contradicts the target's shape.
    #[error("Module '{module}' needs '{required}' but the target is already '{present}'")]
    Conflict {
        /// Module being applied.
        module: String,
        /// Capability the module defines or requires.
        required: String,
        /// Shape already present on the target.
        present: String,
    },

    /// A capability required by a module is absent.
    #[error("Module '{module}' requires capability '{tag}' which the target does not have")]
    MissingPrerequisite {
        /// Module being applied.
        module: String,
        /// Missing capability tag (shape alternatives are joined with `|`).
        tag: String,
    },

    /// A module referenced a version key absent from the version table.
    #[error("Module '{module}' references version key '{key}' which is not in the version table")]
    MissingVersionKey {
        /// Module being applied.
        module: String,
        /// Missing key.
        key: String,
    },

    /// A version value could not be interpreted as the type the module needs.
    #[error("Module '{module}' cannot use '{value}' for version key '{key}'")]
    InvalidVersionValue {
        /// Module being applied.
        module: String,
        /// Offending key.
        key: String,
        /// Raw value from the version table.
        value: String,
    },

    /// The extension store rejected an operation.
    #[error(transparent)]
    Store(#[from] StoreError),
}

fn required_by_suffix(required_by: Option<&str>) -> String {
    required_by.map_or_else(String::new, |m| format!(" (prerequisite of '{m}')"))
}

/// Lifecycle misuse of the extension store.
///
/// These indicate a bug in a convention module or in the resolver, never a
/// problem with user input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The store was accessed after it was sealed or snapshotted.
    #[error("Extension store is already finalized")]
    AlreadyFinalized,

    /// A snapshot was requested before resolution completed.
    #[error("Extension store has not finished resolving")]
    NotYetResolved,

    /// A key is occupied by an object of a different concrete type.
    #[error("Extension '{key}' is held by a different type")]
    TypeMismatch {
        /// Extension key.
        key: &'static str,
    },
}

/// Errors that arise while loading configuration inputs.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file contains a syntax error that prevents parsing.
    #[error("Invalid syntax in {file}: {message}")]
    InvalidSyntax {
        /// File being parsed.
        file: String,
        /// Parser message.
        message: String,
    },

    /// An I/O error occurred while reading a config file.
    #[error("IO error reading config file {path}: {source}")]
    Io {
        /// Path to the file that could not be read.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}
