// crates/preflight-core/src/snapshot.rs
// ============================================================================
// Module: Configuration Snapshot
// Description: Immutable section/key/value view of resolved configuration.
// Purpose: Provide strict, fail-closed snapshot loading with hard limits
// and canonical (lowercase) lookup.
// Dependencies: serde, thiserror, toml
// ============================================================================

//! ## Overview
//! A snapshot is a fully materialized section -> key -> value map assembled
//! before validation starts. Loading from TOML fails closed: size limits,
//! strict UTF-8, and string-or-string-array leaf values only. Section and
//! key identifiers are lowercased on insertion so lookups through
//! [`SettingPath`] never depend on source letter case.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::env;
use std::fmt;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::path::SettingPath;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default snapshot filename when no path is specified.
const DEFAULT_SNAPSHOT_NAME: &str = "preflight.toml";
/// Environment variable used to override the snapshot path.
pub const SNAPSHOT_ENV_VAR: &str = "PREFLIGHT_CONFIG";
/// Maximum snapshot file size in bytes.
pub(crate) const MAX_SNAPSHOT_FILE_SIZE: usize = 1024 * 1024;
/// Maximum total snapshot path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while loading or assembling a configuration snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnapshotError {
    /// I/O failure while reading the snapshot file.
    #[error("snapshot io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("snapshot parse error: {0}")]
    Parse(String),
    /// Structurally invalid snapshot data.
    #[error("invalid snapshot: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Setting Values
// ============================================================================

/// A leaf configuration value: a string or a list of strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    /// A single text value.
    Text(String),
    /// A list of text values.
    List(Vec<String>),
}

impl SettingValue {
    /// Returns the text form when this value is a single string.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            Self::List(_) => None,
        }
    }
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(value) => f.write_str(value),
            Self::List(values) => write!(f, "[{}]", values.join(", ")),
        }
    }
}

impl From<&str> for SettingValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for SettingValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<String>> for SettingValue {
    fn from(values: Vec<String>) -> Self {
        Self::List(values)
    }
}

impl From<&[&str]> for SettingValue {
    fn from(values: &[&str]) -> Self {
        Self::List(values.iter().map(|value| (*value).to_string()).collect())
    }
}

// ============================================================================
// SECTION: Snapshot
// ============================================================================

/// An immutable, case-normalized configuration snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ConfigSnapshot {
    /// Section name to key/value table, all identifiers lowercase.
    sections: BTreeMap<String, BTreeMap<String, SettingValue>>,
}

impl ConfigSnapshot {
    /// Looks up a setting by its canonical path.
    #[must_use]
    pub fn get(&self, path: &SettingPath) -> Option<&SettingValue> {
        self.sections.get(path.section().as_str()).and_then(|table| table.get(path.key()))
    }

    /// Looks up a setting by raw section and key identifiers.
    ///
    /// Identifiers are lowercased before lookup, matching the insertion
    /// normalization.
    #[must_use]
    pub fn get_raw(&self, section: &str, key: &str) -> Option<&SettingValue> {
        self.sections
            .get(&section.to_ascii_lowercase())
            .and_then(|table| table.get(&key.to_ascii_lowercase()))
    }

    /// Returns whether the snapshot carries any value for the path.
    #[must_use]
    pub fn contains(&self, path: &SettingPath) -> bool {
        self.get(path).is_some()
    }

    /// Loads a snapshot from disk using the default resolution rules.
    ///
    /// Resolution order: explicit `path`, then the [`SNAPSHOT_ENV_VAR`]
    /// environment variable, then `preflight.toml` in the working
    /// directory.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError`] when reading, parsing, or structural
    /// validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, SnapshotError> {
        let resolved = resolve_path(path)?;
        let bytes = fs::read(&resolved).map_err(|err| SnapshotError::Io(err.to_string()))?;
        if bytes.len() > MAX_SNAPSHOT_FILE_SIZE {
            return Err(SnapshotError::Invalid("snapshot file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| SnapshotError::Invalid("snapshot file must be utf-8".to_string()))?;
        Self::from_toml_str(content)
    }

    /// Parses a snapshot from TOML text.
    ///
    /// Every top-level entry must be a table; every leaf must be a string
    /// or an array of strings.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError`] when parsing or structural validation
    /// fails.
    pub fn from_toml_str(content: &str) -> Result<Self, SnapshotError> {
        let parsed: toml::Table =
            toml::from_str(content).map_err(|err| SnapshotError::Parse(err.to_string()))?;
        let mut sections: BTreeMap<String, BTreeMap<String, SettingValue>> = BTreeMap::new();
        for (section, entry) in parsed {
            let toml::Value::Table(table) = entry else {
                return Err(SnapshotError::Invalid(format!(
                    "top-level entry '{section}' must be a table"
                )));
            };
            let canonical_section = section.to_ascii_lowercase();
            let mut values: BTreeMap<String, SettingValue> = BTreeMap::new();
            for (key, leaf) in table {
                let canonical_key = key.to_ascii_lowercase();
                let value = leaf_value(&canonical_section, &canonical_key, leaf)?;
                if values.insert(canonical_key.clone(), value).is_some() {
                    return Err(SnapshotError::Invalid(format!(
                        "duplicate setting '{canonical_section}.{canonical_key}' after case \
                         normalization"
                    )));
                }
            }
            if sections.insert(canonical_section.clone(), values).is_some() {
                return Err(SnapshotError::Invalid(format!(
                    "duplicate section '{canonical_section}' after case normalization"
                )));
            }
        }
        Ok(Self {
            sections,
        })
    }
}

// ============================================================================
// SECTION: Builder
// ============================================================================

/// Programmatic snapshot assembly with case normalization on insertion.
#[derive(Debug, Clone, Default)]
pub struct SnapshotBuilder {
    /// Accumulated sections keyed by lowercase identifiers.
    sections: BTreeMap<String, BTreeMap<String, SettingValue>>,
}

impl SnapshotBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a value, lowercasing both identifiers. Later writes to the
    /// same path replace earlier ones.
    #[must_use]
    pub fn set(mut self, section: &str, key: &str, value: impl Into<SettingValue>) -> Self {
        self.sections
            .entry(section.to_ascii_lowercase())
            .or_default()
            .insert(key.to_ascii_lowercase(), value.into());
        self
    }

    /// Finalizes the snapshot.
    #[must_use]
    pub fn build(self) -> ConfigSnapshot {
        ConfigSnapshot {
            sections: self.sections,
        }
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the snapshot path from an explicit argument or the environment.
///
/// # Errors
///
/// Returns [`SnapshotError`] when an environment-supplied path exceeds the
/// length limit.
fn resolve_path(path: Option<&Path>) -> Result<PathBuf, SnapshotError> {
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }
    if let Ok(env_path) = env::var(SNAPSHOT_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(SnapshotError::Invalid("snapshot path exceeds max length".to_string()));
        }
        return Ok(PathBuf::from(env_path));
    }
    Ok(PathBuf::from(DEFAULT_SNAPSHOT_NAME))
}

/// Converts a TOML leaf into a [`SettingValue`], rejecting non-string data.
///
/// # Errors
///
/// Returns [`SnapshotError::Invalid`] for non-string leaf values.
fn leaf_value(
    section: &str,
    key: &str,
    leaf: toml::Value,
) -> Result<SettingValue, SnapshotError> {
    match leaf {
        toml::Value::String(value) => Ok(SettingValue::Text(value)),
        toml::Value::Array(items) => {
            let mut values = Vec::with_capacity(items.len());
            for item in items {
                let toml::Value::String(value) = item else {
                    return Err(SnapshotError::Invalid(format!(
                        "setting '{section}.{key}' must be a string or array of strings"
                    )));
                };
                values.push(value);
            }
            Ok(SettingValue::List(values))
        }
        _ => Err(SnapshotError::Invalid(format!(
            "setting '{section}.{key}' must be a string or array of strings"
        ))),
    }
}
