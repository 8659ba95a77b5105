//! Capability tags describing what kind of artifact a target produces.
//!
//! A target accumulates capabilities as convention modules are applied. At
//! most one of them is a [`Shape`]; the remaining tags (`feature`,
//! `unit-test`, `coverage`, ...) are free-form markers that later modules may
//! [require](Requirement::Tag).
pub mod detector;

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// The mutually exclusive top-level kind of artifact a target produces.
///
/// Convention modules that behave differently per artifact kind `match` on
/// this enum exhaustively, so adding a shape forces every such module to
/// decide what to do with it.
///
/// # Examples
///
/// ```
/// use convention_engine::capability::Shape;
///
/// assert_eq!(Shape::TestHarness.tag(), "test-harness");
/// assert_eq!(Shape::from_tag("jvm-only"), Some(Shape::JvmOnly));
/// assert!(Shape::from_tag("feature").is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Shape {
    /// An installable application.
    Application,
    /// A reusable Android library.
    Library,
    /// A standalone instrumented test module.
    TestHarness,
    /// A plain JVM library without Android tooling.
    JvmOnly,
}

impl Shape {
    /// Every shape, in declaration order.
    pub const ALL: [Self; 4] = [
        Self::Application,
        Self::Library,
        Self::TestHarness,
        Self::JvmOnly,
    ];

    /// The capability tag naming this shape.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Application => "application",
            Self::Library => "library",
            Self::TestHarness => "test-harness",
            Self::JvmOnly => "jvm-only",
        }
    }

    /// Parse a capability tag into a shape, if it names one.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.tag() == tag)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A capability a module needs before it may be applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// The target's shape must be one of these.
    Shape(&'static [Shape]),
    /// The target must already carry this tag.
    Tag(&'static str),
}

impl Requirement {
    /// Any shape at all.
    pub const ANY_SHAPE: Self = Self::Shape(&Shape::ALL);
    /// Android application or library.
    pub const ANDROID_MODULE: Self = Self::Shape(&[Shape::Application, Shape::Library]);

    /// Human-readable form used in error messages (`application|library`).
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Shape(shapes) => shapes
                .iter()
                .map(|s| s.tag())
                .collect::<Vec<_>>()
                .join("|"),
            Self::Tag(tag) => (*tag).to_string(),
        }
    }
}

/// The accumulated capabilities of one target.
///
/// The shape is stored apart from the other tags, so a set can never hold
/// two shapes. Mutation is crate-private: once a resolution is returned its
/// capability set is frozen.
///
/// # Examples
///
/// ```
/// use convention_engine::capability::CapabilitySet;
///
/// let caps = CapabilitySet::new();
/// assert!(caps.is_empty());
/// assert!(!caps.has("library"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapabilitySet {
    shape: Option<Shape>,
    tags: BTreeSet<String>,
}

impl CapabilitySet {
    /// Create an empty capability set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The target's shape, if a shape-defining module has been applied.
    #[must_use]
    pub const fn shape(&self) -> Option<Shape> {
        self.shape
    }

    /// Whether `tag` (a shape tag or any other capability) is present.
    #[must_use]
    pub fn has(&self, tag: &str) -> bool {
        self.shape.is_some_and(|s| s.tag() == tag) || self.tags.contains(tag)
    }

    /// Number of tags, including the shape tag.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tags.len() + usize::from(self.shape.is_some())
    }

    /// Whether no capability has been acquired yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All tags in lexical order, the shape tag included.
    #[must_use]
    pub fn tags(&self) -> Vec<&str> {
        let mut tags: BTreeSet<&str> = self.tags.iter().map(String::as_str).collect();
        if let Some(shape) = self.shape {
            tags.insert(shape.tag());
        }
        tags.into_iter().collect()
    }

    /// Whether every tag of `other` is also present here.
    #[must_use]
    pub fn is_superset(&self, other: &Self) -> bool {
        other.tags().into_iter().all(|t| self.has(t))
    }

    /// Record the target's shape.
    ///
    /// Returns the shape already present when it differs from `shape`.
    pub(crate) fn set_shape(&mut self, shape: Shape) -> Result<(), Shape> {
        match self.shape {
            Some(existing) if existing != shape => Err(existing),
            _ => {
                self.shape = Some(shape);
                Ok(())
            }
        }
    }

    /// Add a non-shape tag. Shape tags are routed to [`set_shape`](Self::set_shape).
    pub(crate) fn insert(&mut self, tag: &str) -> Result<(), Shape> {
        if let Some(shape) = Shape::from_tag(tag) {
            return self.set_shape(shape);
        }
        self.tags.insert(tag.to_string());
        Ok(())
    }
}

impl fmt::Display for CapabilitySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.tags().join(", "))
    }
}

impl Serialize for CapabilitySet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.tags())
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    // -----------------------------------------------------------------------
    // Shape
    // -----------------------------------------------------------------------

    #[test]
    fn shape_tags_round_trip_through_from_tag() {
        for shape in Shape::ALL {
            assert_eq!(Shape::from_tag(shape.tag()), Some(shape));
        }
    }

    #[test]
    fn shape_serializes_as_kebab_case() {
        let json = serde_json::to_string(&Shape::TestHarness).unwrap();
        assert_eq!(json, "\"test-harness\"");
    }

    // -----------------------------------------------------------------------
    // CapabilitySet
    // -----------------------------------------------------------------------

    #[test]
    fn has_sees_shape_and_tags() {
        let mut caps = CapabilitySet::new();
        caps.set_shape(Shape::Library).unwrap();
        caps.insert("feature").unwrap();
        assert!(caps.has("library"));
        assert!(caps.has("feature"));
        assert!(!caps.has("application"));
        assert_eq!(caps.len(), 2);
    }

    #[test]
    fn second_distinct_shape_is_rejected() {
        let mut caps = CapabilitySet::new();
        caps.set_shape(Shape::Application).unwrap();
        assert_eq!(caps.set_shape(Shape::Library), Err(Shape::Application));
        assert_eq!(caps.shape(), Some(Shape::Application));
    }

    #[test]
    fn same_shape_twice_is_idempotent() {
        let mut caps = CapabilitySet::new();
        caps.set_shape(Shape::JvmOnly).unwrap();
        caps.set_shape(Shape::JvmOnly).unwrap();
        assert_eq!(caps.len(), 1);
    }

    #[test]
    fn insert_routes_shape_tags() {
        let mut caps = CapabilitySet::new();
        caps.insert("application").unwrap();
        assert_eq!(caps.shape(), Some(Shape::Application));
        assert_eq!(caps.insert("library"), Err(Shape::Application));
    }

    #[test]
    fn tags_are_sorted_and_include_shape() {
        let mut caps = CapabilitySet::new();
        caps.insert("lint").unwrap();
        caps.set_shape(Shape::Application).unwrap();
        caps.insert("compose").unwrap();
        assert_eq!(caps.tags(), ["application", "compose", "lint"]);
        assert_eq!(caps.to_string(), "{application, compose, lint}");
    }

    #[test]
    fn superset_comparison() {
        let mut small = CapabilitySet::new();
        small.set_shape(Shape::Application).unwrap();
        let mut large = small.clone();
        large.insert("lint").unwrap();
        assert!(large.is_superset(&small));
        assert!(!small.is_superset(&large));
    }

    #[test]
    fn serializes_as_sorted_tag_list() {
        let mut caps = CapabilitySet::new();
        caps.insert("unit-test").unwrap();
        caps.set_shape(Shape::Library).unwrap();
        let json = serde_json::to_string(&caps).unwrap();
        assert_eq!(json, r#"["library","unit-test"]"#);
    }

    #[test]
    fn requirement_describe_joins_shapes() {
        assert_eq!(Requirement::ANDROID_MODULE.describe(), "application|library");
        assert_eq!(Requirement::Tag("unit-test").describe(), "unit-test");
    }
}
