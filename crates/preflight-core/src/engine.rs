// crates/preflight-core/src/engine.rs
// ============================================================================
// Module: Validation Engine
// Description: Validate required sections against a snapshot.
// Purpose: Resolve required sections fail-fast, evaluate only that subset,
// and aggregate one batch-diagnostic report.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! A validation call names only the sections the current run requires, so
//! a large registry can be declared once while each run pays for its own
//! subset. Unknown-section requests are declaration errors: they fail the
//! call immediately, before any rule is evaluated, and are never mixed
//! into a data-level report. Data-level failures are always collected
//! across all required sections so operators get every violation in one
//! pass; [`enforce`] then applies the default fatality policy.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use thiserror::Error;

use crate::path::SectionName;
use crate::registry::Registry;
use crate::report::ValidationReport;
use crate::section::SectionSpec;
use crate::snapshot::ConfigSnapshot;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised by a validation call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidateError {
    /// A required section is absent from the registry. This is an error in
    /// the validation declaration, not in the configuration data.
    #[error("unknown section: {section}")]
    UnknownSection {
        /// The unregistered section name.
        section: SectionName,
    },
    /// Required sections produced a non-empty report under the default
    /// fail-before-run policy.
    #[error("configuration validation failed:\n{0}")]
    GateFailed(ValidationReport),
}

// ============================================================================
// SECTION: Validation
// ============================================================================

/// Validates the required sections against the snapshot.
///
/// Required sections evaluate in lexicographic name order, which together
/// with the immutable snapshot makes reports deterministic: the same
/// inputs always produce an identical report.
///
/// # Errors
///
/// Returns [`ValidateError::UnknownSection`] when any required section is
/// not registered. All names resolve before any rule runs, so an unknown
/// section means zero rules were evaluated in this call.
pub fn validate(
    registry: &Registry,
    snapshot: &ConfigSnapshot,
    required: &BTreeSet<SectionName>,
) -> Result<ValidationReport, ValidateError> {
    let mut resolved: Vec<(&SectionName, &SectionSpec)> = Vec::with_capacity(required.len());
    for name in required {
        let spec = registry.get(name).ok_or_else(|| ValidateError::UnknownSection {
            section: name.clone(),
        })?;
        resolved.push((name, spec));
    }
    let mut failures = Vec::new();
    for (name, spec) in resolved {
        failures.extend(spec.evaluate(name, snapshot));
    }
    Ok(ValidationReport::from_failures(failures))
}

/// Validates and applies the default fatality policy: any failure in a
/// required section halts the run before further work proceeds.
///
/// # Errors
///
/// Returns [`ValidateError::UnknownSection`] for unregistered sections and
/// [`ValidateError::GateFailed`] carrying the full report when validation
/// finds any violation.
pub fn enforce(
    registry: &Registry,
    snapshot: &ConfigSnapshot,
    required: &BTreeSet<SectionName>,
) -> Result<(), ValidateError> {
    let report = validate(registry, snapshot, required)?;
    if report.passed() { Ok(()) } else { Err(ValidateError::GateFailed(report)) }
}
