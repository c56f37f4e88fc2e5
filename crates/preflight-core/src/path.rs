// crates/preflight-core/src/path.rs
// ============================================================================
// Module: Setting Path Identifiers
// Description: Validated section and `section.key` setting addresses.
// Purpose: Canonicalize identifiers once at the boundary so rules and
// lookups never special-case letter case.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! Settings are addressed by a dotted `section.key` path. Some configuration
//! sources alias the same logical key under different letter cases, so both
//! components are normalized to ASCII lowercase when a [`SectionName`] or
//! [`SettingPath`] is constructed. Everything downstream compares canonical
//! identifiers only.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum length of a section or key identifier after normalization.
pub(crate) const MAX_IDENTIFIER_LENGTH: usize = 128;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while constructing a [`SectionName`] or [`SettingPath`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    /// The identifier was empty after normalization.
    #[error("identifier must not be empty")]
    Empty,
    /// A setting path did not contain the `.` separator.
    #[error("setting path '{0}' is missing the `.` separator")]
    MissingSeparator(String),
    /// The identifier contained a character outside `[a-z0-9_]`.
    #[error("identifier '{identifier}' contains invalid character '{character}'")]
    InvalidCharacter {
        /// The offending identifier as supplied.
        identifier: String,
        /// The first invalid character encountered.
        character: char,
    },
    /// The identifier exceeded the maximum length.
    #[error("identifier '{identifier}' exceeds {limit} characters")]
    TooLong {
        /// The offending identifier as supplied.
        identifier: String,
        /// The enforced length limit.
        limit: usize,
    },
}

// ============================================================================
// SECTION: Section Name
// ============================================================================

/// A validated, case-normalized configuration section identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SectionName(String);

impl SectionName {
    /// Creates a section name, normalizing to ASCII lowercase.
    ///
    /// # Errors
    ///
    /// Returns [`PathError`] when the identifier is empty, too long, or
    /// contains characters outside `[a-z0-9_]` after normalization.
    pub fn new(raw: &str) -> Result<Self, PathError> {
        normalize_identifier(raw).map(Self)
    }

    /// Returns the canonical (lowercase) section name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SectionName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for SectionName {
    type Err = PathError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::new(raw)
    }
}

impl TryFrom<String> for SectionName {
    type Error = PathError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::new(&raw)
    }
}

impl From<SectionName> for String {
    fn from(name: SectionName) -> Self {
        name.0
    }
}

// ============================================================================
// SECTION: Setting Path
// ============================================================================

/// A dotted `section.key` address into a configuration snapshot.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SettingPath {
    /// The canonical section component.
    section: SectionName,
    /// The canonical key component.
    key: String,
}

impl SettingPath {
    /// Parses a `section.key` path, normalizing both components.
    ///
    /// # Errors
    ///
    /// Returns [`PathError`] when the separator is missing or either
    /// component fails identifier validation.
    pub fn parse(raw: &str) -> Result<Self, PathError> {
        let (section, key) = raw
            .split_once('.')
            .ok_or_else(|| PathError::MissingSeparator(raw.to_string()))?;
        Ok(Self {
            section: SectionName::new(section)?,
            key: normalize_identifier(key)?,
        })
    }

    /// Builds a path from an already-validated section and a raw key.
    ///
    /// # Errors
    ///
    /// Returns [`PathError`] when the key fails identifier validation.
    pub fn new(section: SectionName, key: &str) -> Result<Self, PathError> {
        Ok(Self {
            section,
            key: normalize_identifier(key)?,
        })
    }

    /// Returns the section component.
    #[must_use]
    pub const fn section(&self) -> &SectionName {
        &self.section
    }

    /// Returns the canonical key component.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl fmt::Display for SettingPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.section, self.key)
    }
}

impl FromStr for SettingPath {
    type Err = PathError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::parse(raw)
    }
}

impl TryFrom<String> for SettingPath {
    type Error = PathError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::parse(&raw)
    }
}

impl From<SettingPath> for String {
    fn from(path: SettingPath) -> Self {
        path.to_string()
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Normalizes an identifier to ASCII lowercase and validates it.
///
/// # Errors
///
/// Returns [`PathError`] for empty, over-long, or malformed identifiers.
pub(crate) fn normalize_identifier(raw: &str) -> Result<String, PathError> {
    let normalized = raw.to_ascii_lowercase();
    if normalized.is_empty() {
        return Err(PathError::Empty);
    }
    if normalized.len() > MAX_IDENTIFIER_LENGTH {
        return Err(PathError::TooLong {
            identifier: raw.to_string(),
            limit: MAX_IDENTIFIER_LENGTH,
        });
    }
    if let Some(character) =
        normalized.chars().find(|ch| !(ch.is_ascii_lowercase() || ch.is_ascii_digit() || *ch == '_'))
    {
        return Err(PathError::InvalidCharacter {
            identifier: raw.to_string(),
            character,
        });
    }
    Ok(normalized)
}
