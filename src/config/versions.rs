//! The version table: toolchain and SDK versions keyed by semantic name.
//!
//! Two on-disk formats are accepted. A properties file:
//!
//! ```text
//! # toolchain
//! compile-sdk = 35
//! jvm-target: 21
//! ```
//!
//! or, when the path ends in `.toml`, the `[versions]` table of a version
//! catalog:
//!
//! ```toml
//! [versions]
//! compile-sdk = 35
//! jvm-target = "21"
//! ```
use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

/// Well-known version keys read by the built-in modules.
pub mod keys {
    /// SDK level to compile against.
    pub const COMPILE_SDK: &str = "compile-sdk";
    /// Lowest supported SDK level.
    pub const MIN_SDK: &str = "min-sdk";
    /// Runtime target SDK level.
    pub const TARGET_SDK: &str = "target-sdk";
    /// JVM bytecode target.
    pub const JVM_TARGET: &str = "jvm-target";
    /// Jacoco version.
    pub const JACOCO: &str = "jacoco";
    /// Detekt version.
    pub const DETEKT: &str = "detekt";
}

/// Immutable key → version mapping, loaded once per process.
///
/// # Examples
///
/// ```
/// use convention_engine::config::versions::VersionTable;
///
/// let table = VersionTable::parse_properties("jvm-target = 21\n# note\n", "inline").unwrap();
/// assert_eq!(table.get("jvm-target"), Some("21"));
/// assert_eq!(table.get("detekt"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionTable {
    entries: BTreeMap<String, String>,
}

#[derive(Debug, Default, Deserialize)]
struct Catalog {
    #[serde(default)]
    versions: BTreeMap<String, CatalogValue>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CatalogValue {
    Text(String),
    Number(i64),
}

impl VersionTable {
    /// Build a table from literal pairs.
    #[must_use]
    pub fn from_pairs<K: Into<String>, V: Into<String>>(
        pairs: impl IntoIterator<Item = (K, V)>,
    ) -> Self {
        Self {
            entries: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Load the table from `path`. A missing file yields an empty table.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file exists but cannot be read and
    /// [`ConfigError::InvalidSyntax`] if it cannot be parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!("version table {} not found, using empty table", path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let name = path.display().to_string();
        if path.extension().is_some_and(|ext| ext == "toml") {
            Self::parse_catalog(&content, &name)
        } else {
            Self::parse_properties(&content, &name)
        }
    }

    /// Parse properties content (`key = value` or `key: value` lines).
    ///
    /// Blank lines and lines starting with `#` or `!` are ignored. A later
    /// line for the same key replaces an earlier one.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidSyntax`] for a line without a separator
    /// or with an empty key.
    pub fn parse_properties(content: &str, file: &str) -> Result<Self, ConfigError> {
        let mut entries = BTreeMap::new();
        for (line_num, line) in content.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
                continue;
            }
            let Some(split) = trimmed.find(['=', ':']) else {
                return Err(ConfigError::InvalidSyntax {
                    file: file.to_string(),
                    message: format!("line {}: expected key = value: {trimmed}", line_num + 1),
                });
            };
            let (key, value) = trimmed.split_at(split);
            let key = key.trim();
            if key.is_empty() {
                return Err(ConfigError::InvalidSyntax {
                    file: file.to_string(),
                    message: format!("line {}: empty key", line_num + 1),
                });
            }
            let value = value.get(1..).unwrap_or_default().trim();
            entries.insert(key.to_string(), value.to_string());
        }
        Ok(Self { entries })
    }

    /// Parse the `[versions]` table of a TOML catalog.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidSyntax`] if the content is not valid
    /// TOML or a version is neither a string nor an integer.
    pub fn parse_catalog(content: &str, file: &str) -> Result<Self, ConfigError> {
        let catalog: Catalog = toml::from_str(content).map_err(|e| ConfigError::InvalidSyntax {
            file: file.to_string(),
            message: e.message().to_string(),
        })?;
        Ok(Self {
            entries: catalog
                .versions
                .into_iter()
                .map(|(k, v)| {
                    let value = match v {
                        CatalogValue::Text(s) => s,
                        CatalogValue::Number(n) => n.to_string(),
                    };
                    (k, value)
                })
                .collect(),
        })
    }

    /// Value for `key`, if present.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    // -----------------------------------------------------------------------
    // parse_properties
    // -----------------------------------------------------------------------

    #[test]
    fn properties_accept_both_separators() {
        let t = VersionTable::parse_properties("compile-sdk = 35\nmin-sdk:21\n", "v").unwrap();
        assert_eq!(t.get("compile-sdk"), Some("35"));
        assert_eq!(t.get("min-sdk"), Some("21"));
        assert_eq!(t.len(), 2);
    }

    #[test]
    fn properties_skip_comments_and_blanks() {
        let t = VersionTable::parse_properties("# a\n\n! b\njacoco=0.8.12\n", "v").unwrap();
        assert_eq!(t.iter().collect::<Vec<_>>(), [("jacoco", "0.8.12")]);
    }

    #[test]
    fn properties_value_may_contain_separator() {
        let t = VersionTable::parse_properties("runner = a:b=c\n", "v").unwrap();
        assert_eq!(t.get("runner"), Some("a:b=c"));
    }

    #[test]
    fn properties_later_line_wins() {
        let t = VersionTable::parse_properties("jvm-target=17\njvm-target=21\n", "v").unwrap();
        assert_eq!(t.get("jvm-target"), Some("21"));
    }

    #[test]
    fn properties_line_without_separator_is_error() {
        let err = VersionTable::parse_properties("ok=1\nbroken\n", "versions.properties")
            .unwrap_err();
        assert!(err.to_string().contains("line 2"), "{err}");
        assert!(err.to_string().contains("versions.properties"), "{err}");
    }

    #[test]
    fn properties_empty_key_is_error() {
        assert!(VersionTable::parse_properties("= 3\n", "v").is_err());
    }

    // -----------------------------------------------------------------------
    // parse_catalog
    // -----------------------------------------------------------------------

    #[test]
    fn catalog_reads_strings_and_integers() {
        let t = VersionTable::parse_catalog(
            "[versions]\ncompile-sdk = 35\njvm-target = \"21\"\n\n[libraries]\nx = \"y\"\n",
            "libs.versions.toml",
        )
        .unwrap();
        assert_eq!(t.get("compile-sdk"), Some("35"));
        assert_eq!(t.get("jvm-target"), Some("21"));
        assert_eq!(t.len(), 2);
    }

    #[test]
    fn catalog_without_versions_table_is_empty() {
        let t = VersionTable::parse_catalog("[libraries]\n", "c").unwrap();
        assert!(t.is_empty());
    }

    #[test]
    fn catalog_invalid_toml_is_error() {
        assert!(matches!(
            VersionTable::parse_catalog("[versions\n", "c"),
            Err(ConfigError::InvalidSyntax { .. })
        ));
    }

    // -----------------------------------------------------------------------
    // load
    // -----------------------------------------------------------------------

    #[test]
    fn load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let t = VersionTable::load(&dir.path().join("nope.properties")).unwrap();
        assert!(t.is_empty());
    }

    #[test]
    fn load_dispatches_on_extension() {
        let dir = tempfile::tempdir().unwrap();
        let toml_path = dir.path().join("libs.versions.toml");
        std::fs::write(&toml_path, "[versions]\ndetekt = \"1.23.7\"\n").unwrap();
        let props_path = dir.path().join("versions.properties");
        std::fs::write(&props_path, "detekt = 1.23.6\n").unwrap();

        assert_eq!(VersionTable::load(&toml_path).unwrap().get("detekt"), Some("1.23.7"));
        assert_eq!(VersionTable::load(&props_path).unwrap().get("detekt"), Some("1.23.6"));
    }

    #[test]
    fn from_pairs_builds_table() {
        let t = VersionTable::from_pairs([(keys::JVM_TARGET, "21")]);
        assert_eq!(t.get("jvm-target"), Some("21"));
    }
}
