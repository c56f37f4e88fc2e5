// crates/preflight-core/src/section.rs
// ============================================================================
// Module: Section Specifications
// Description: Ordered rule lists scoped to one configuration section.
// Purpose: Evaluate every rule of a section and collect every violation in
// one pass.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! A [`SectionSpec`] owns the ordered rules for one section. Evaluation
//! never short-circuits across rules: an operator should see all
//! violations for a section in one pass rather than one at a time. An
//! empty spec is a first-class "known section, no static checks" marker
//! and always passes; it is deliberately distinct from an unregistered
//! section, which is a declaration error.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::path::SectionName;
use crate::report::ValidationFailure;
use crate::rule::Rule;
use crate::snapshot::ConfigSnapshot;

// ============================================================================
// SECTION: Section Spec
// ============================================================================

/// The ordered rules declared for one configuration section.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SectionSpec {
    /// Rules in declaration order.
    rules: Vec<Rule>,
}

impl SectionSpec {
    /// Creates a spec from rules in declaration order.
    #[must_use]
    pub fn new(rules: Vec<Rule>) -> Self {
        Self {
            rules,
        }
    }

    /// Creates an explicitly empty spec: known section, no static checks.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            rules: Vec::new(),
        }
    }

    /// Returns the rules in declaration order.
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Returns whether this spec declares no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Evaluates every rule against the snapshot, tagging each failure
    /// with the owning section. No short-circuiting across rules.
    #[must_use]
    pub fn evaluate(
        &self,
        section: &SectionName,
        snapshot: &ConfigSnapshot,
    ) -> Vec<ValidationFailure> {
        let mut failures = Vec::new();
        for rule in &self.rules {
            for failure in rule.evaluate(snapshot).into_failures() {
                failures.push(failure.in_section(section.clone()));
            }
        }
        failures
    }
}
