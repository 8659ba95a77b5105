//! Scalar "last write wins" values that remember who wrote them.
use std::fmt;

use serde::{Serialize, Serializer};

/// Who last wrote a [`Setting`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Source {
    /// Never written.
    #[default]
    Unset,
    /// Written by the convention module with this identifier.
    Convention(&'static str),
    /// Pinned by an explicit override in the resolution request.
    Explicit,
}

/// Outcome of [`Setting::set`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Write {
    /// The value was stored.
    Stored,
    /// The same value was already present; only the provenance moved.
    Unchanged,
    /// A different value written by another module was replaced.
    Replaced {
        /// Module whose value was replaced.
        previous: &'static str,
    },
    /// The setting is pinned by an explicit override; the write was ignored.
    Pinned,
}

/// A scalar build setting with provenance.
///
/// Module writes follow application order, so a more specific module listed
/// after a general one wins. Explicit overrides from the request are pinned
/// and ignore every later module write.
///
/// Serializes as the bare value (`null` when unset).
///
/// # Examples
///
/// ```
/// use convention_engine::extensions::{Setting, Source};
///
/// let mut sdk = Setting::<u32>::default();
/// sdk.set("app.library", 21);
/// sdk.set("app.feature", 26);
/// assert_eq!(sdk.get(), Some(&26));
/// assert_eq!(sdk.source(), Source::Convention("app.feature"));
///
/// sdk.pin(30);
/// sdk.set("app.compose", 21);
/// assert_eq!(sdk.get(), Some(&30));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Setting<T> {
    value: Option<T>,
    source: Source,
}

impl<T> Default for Setting<T> {
    fn default() -> Self {
        Self {
            value: None,
            source: Source::Unset,
        }
    }
}

impl<T: PartialEq + fmt::Debug> Setting<T> {
    /// The current value, if any.
    #[must_use]
    pub const fn get(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// Who wrote the current value.
    #[must_use]
    pub const fn source(&self) -> Source {
        self.source
    }

    /// Whether the value is pinned by an explicit override.
    #[must_use]
    pub const fn is_explicit(&self) -> bool {
        matches!(self.source, Source::Explicit)
    }

    /// Write `value` on behalf of the convention module `module`.
    ///
    /// Replacing another module's different value is allowed (last write
    /// wins) and traced at debug level so the precedence is visible in the
    /// log file.
    pub fn set(&mut self, module: &'static str, value: T) -> Write {
        let outcome = match (&self.value, self.source) {
            (_, Source::Explicit) => return Write::Pinned,
            (Some(current), _) if *current == value => Write::Unchanged,
            (Some(current), Source::Convention(previous)) if previous != module => {
                tracing::debug!("'{module}' replaces {current:?} set by '{previous}' with {value:?}");
                Write::Replaced { previous }
            }
            _ => Write::Stored,
        };
        self.value = Some(value);
        self.source = Source::Convention(module);
        outcome
    }

    /// Pin `value` as an explicit override.
    pub fn pin(&mut self, value: T) {
        self.value = Some(value);
        self.source = Source::Explicit;
    }
}

impl<T: Serialize> Serialize for Setting<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.value.serialize(serializer)
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn default_is_unset() {
        let s = Setting::<u32>::default();
        assert_eq!(s.get(), None);
        assert_eq!(s.source(), Source::Unset);
    }

    #[test]
    fn first_write_is_stored() {
        let mut s = Setting::default();
        assert_eq!(s.set("a", 1), Write::Stored);
        assert_eq!(s.get(), Some(&1));
        assert_eq!(s.source(), Source::Convention("a"));
    }

    #[test]
    fn same_value_is_unchanged() {
        let mut s = Setting::default();
        s.set("a", 1);
        assert_eq!(s.set("b", 1), Write::Unchanged);
        assert_eq!(s.source(), Source::Convention("b"));
    }

    #[test]
    fn different_module_replaces() {
        let mut s = Setting::default();
        s.set("a", 1);
        assert_eq!(s.set("b", 2), Write::Replaced { previous: "a" });
        assert_eq!(s.get(), Some(&2));
    }

    #[test]
    fn same_module_rewrite_is_stored() {
        let mut s = Setting::default();
        s.set("a", 1);
        assert_eq!(s.set("a", 2), Write::Stored);
    }

    #[test]
    fn pinned_value_survives_module_writes() {
        let mut s = Setting::default();
        s.pin("17".to_string());
        assert_eq!(s.set("app.library", "21".to_string()), Write::Pinned);
        assert_eq!(s.get().map(String::as_str), Some("17"));
        assert!(s.is_explicit());
    }

    #[test]
    fn serializes_as_bare_value() {
        let mut s = Setting::default();
        assert_eq!(serde_json::to_string(&s).unwrap(), "null");
        s.set("a", 35_u32);
        assert_eq!(serde_json::to_string(&s).unwrap(), "35");
    }
}
