//! Core logging types: target entries, status, and the [`Log`] trait.

/// Resolution result of one target, kept for the run summary.
#[derive(Debug, Clone)]
pub struct TargetEntry {
    /// Target (project module) name.
    pub name: String,
    /// Final status of the target.
    pub status: TargetStatus,
    /// Optional detail message (fingerprint or error description).
    pub message: Option<String>,
}

/// Status of a target after resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetStatus {
    /// Every requested module was applied and the configuration was finalized.
    Resolved,
    /// Resolution aborted; the target has no usable configuration.
    Failed,
}

/// Abstraction over logging backends.
///
/// Both [`Logger`](super::logger::Logger) (direct output) and
/// [`BufferedLog`](super::buffered::BufferedLog) (deferred output for
/// targets resolved in parallel) implement this trait, so the resolver and
/// convention modules log without knowing whether output is immediate or
/// buffered.
pub trait Log: Send + Sync {
    /// Log a stage header (major section).
    fn stage(&self, msg: &str);
    /// Log an informational message.
    fn info(&self, msg: &str);
    /// Log a debug message (may be suppressed on console).
    fn debug(&self, msg: &str);
    /// Log a warning message.
    fn warn(&self, msg: &str);
    /// Log an error message.
    fn error(&self, msg: &str);
    /// Record a target result for the summary.
    fn record_target(&self, name: &str, status: TargetStatus, message: Option<&str>);
}
