//! Build-convention composition engine.
//!
//! A target (one module of a larger project) requests a short list of
//! convention module identifiers. The engine expands their prerequisites,
//! applies each module once in a deterministic order, and hands the
//! resulting typed build settings to a downstream build executor.
//!
//! The public API is organised into these layers:
//!
//! - **[`capability`]**: shapes, capability tags and pre-apply checks
//! - **[`extensions`]**: the per-run store of typed configuration concerns
//! - **[`modules`]**: the built-in convention modules
//! - **[`registry`]**: identifier lookup over the modules
//! - **[`resolver`]**: expansion, application and finalization of one target
//! - **[`config`]**: the target manifest and version table
//! - **[`commands`]**: top-level subcommand orchestration (`resolve`, `plan`, `check`, ...)
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod capability;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod extensions;
pub mod logging;
pub mod modules;
pub mod registry;
pub mod resolver;
