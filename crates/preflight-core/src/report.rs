// crates/preflight-core/src/report.rs
// ============================================================================
// Module: Validation Report
// Description: Structured failure taxonomy and aggregate run report.
// Purpose: Carry every violation found in one validation pass so operators
// fix a configuration in one round trip instead of one failure at a time.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Rule evaluation produces [`RuleFailure`] values; the engine tags each
//! with its originating section as a [`ValidationFailure`] and aggregates
//! them into a [`ValidationReport`]. An empty report means the required
//! sections passed. Reports are ordered and deterministic: the same
//! snapshot and required-section set always renders identically.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::path::SectionName;
use crate::path::SettingPath;

// ============================================================================
// SECTION: Failure Taxonomy
// ============================================================================

/// The kind of constraint a failure violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// A must-exist path resolved to absent.
    MissingRequiredSetting,
    /// A present value fell outside its allowed set.
    InvalidEnumValue,
    /// A present value failed its prefix check.
    InvalidPrefix,
    /// Both sides of an alternative failed.
    UnsatisfiedAlternative,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::MissingRequiredSetting => "missing required setting",
            Self::InvalidEnumValue => "invalid enum value",
            Self::InvalidPrefix => "invalid prefix",
            Self::UnsatisfiedAlternative => "unsatisfied alternative",
        };
        f.write_str(label)
    }
}

// ============================================================================
// SECTION: Failures
// ============================================================================

/// One rule violation: the constraint kind, the offending path(s), and a
/// human-readable explanation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleFailure {
    /// The violated constraint kind.
    pub kind: FailureKind,
    /// The setting path(s) the failure concerns.
    pub paths: Vec<SettingPath>,
    /// Human-readable explanation of the violation.
    pub message: String,
}

impl RuleFailure {
    /// Tags this failure with its originating section.
    #[must_use]
    pub fn in_section(self, section: SectionName) -> ValidationFailure {
        ValidationFailure {
            section,
            kind: self.kind,
            paths: self.paths,
            message: self.message,
        }
    }
}

/// A rule violation tagged with the section the engine evaluated it under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationFailure {
    /// The section the failing rule was registered under.
    pub section: SectionName,
    /// The violated constraint kind.
    pub kind: FailureKind,
    /// The setting path(s) the failure concerns.
    pub paths: Vec<SettingPath>,
    /// Human-readable explanation of the violation.
    pub message: String,
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.section, self.kind, self.message)
    }
}

// ============================================================================
// SECTION: Report
// ============================================================================

/// The ordered aggregate outcome of one validation call.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Every failure found, in section then declaration order.
    failures: Vec<ValidationFailure>,
}

impl ValidationReport {
    /// Builds a report from collected failures.
    #[must_use]
    pub fn from_failures(failures: Vec<ValidationFailure>) -> Self {
        Self {
            failures,
        }
    }

    /// Returns whether the validation run passed (no failures).
    #[must_use]
    pub fn passed(&self) -> bool {
        self.failures.is_empty()
    }

    /// Returns the number of failures in the report.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    /// Returns the ordered failures.
    #[must_use]
    pub fn failures(&self) -> &[ValidationFailure] {
        &self.failures
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.failures.is_empty() {
            return f.write_str("configuration valid");
        }
        for (index, failure) in self.failures.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            write!(f, "{failure}")?;
        }
        Ok(())
    }
}
