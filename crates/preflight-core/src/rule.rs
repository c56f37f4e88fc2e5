// crates/preflight-core/src/rule.rs
// ============================================================================
// Module: Rule Algebra
// Description: Declarative constraints over snapshot settings.
// Purpose: Define the rule variants and their pure, read-only evaluation
// against a configuration snapshot.
// Dependencies: serde, smallvec
// ============================================================================

//! ## Overview
//! A [`Rule`] is a single constraint over one or more setting paths:
//! existence, membership in an allowed set, string prefix, or an
//! alternative between two rules. Evaluation is a pure function of the
//! snapshot; rules within a section are independent, so evaluation order
//! only affects the order of reported failures, never the outcome.
//!
//! Membership and prefix rules pass when their path is absent: existence
//! is the job of a separate [`Rule::MustExist`] so a section can declare
//! "optional, but constrained when present".

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::ops::BitOr;

use serde::Deserialize;
use serde::Serialize;
use smallvec::SmallVec;

use crate::path::SettingPath;
use crate::report::FailureKind;
use crate::report::RuleFailure;
use crate::snapshot::ConfigSnapshot;
use crate::snapshot::SettingValue;

// ============================================================================
// SECTION: Rule Definition
// ============================================================================

/// A single declarative constraint over snapshot settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rule {
    /// Fails for every listed path that resolves to absent.
    MustExist(SmallVec<[SettingPath; 4]>),
    /// Fails when the path is present and its value is outside `allowed`.
    IsIn {
        /// The constrained setting path.
        path: SettingPath,
        /// The permitted values.
        allowed: Vec<String>,
    },
    /// Fails when the path is present and its text value does not begin
    /// with `prefix`.
    StartsWith {
        /// The constrained setting path.
        path: SettingPath,
        /// The required leading string.
        prefix: String,
    },
    /// Passes when either sub-rule passes; fails carrying both sub-reasons.
    AnyOf(Box<Rule>, Box<Rule>),
}

// ============================================================================
// SECTION: Outcome
// ============================================================================

/// The result of evaluating one rule against a snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleOutcome {
    /// The rule holds for this snapshot.
    Pass,
    /// The rule is violated; one entry per independent violation.
    Fail(Vec<RuleFailure>),
}

impl RuleOutcome {
    /// Returns whether the rule passed.
    #[must_use]
    pub const fn passed(&self) -> bool {
        matches!(self, Self::Pass)
    }

    /// Consumes the outcome, returning its failures (empty on pass).
    #[must_use]
    pub fn into_failures(self) -> Vec<RuleFailure> {
        match self {
            Self::Pass => Vec::new(),
            Self::Fail(failures) => failures,
        }
    }
}

// ============================================================================
// SECTION: Constructors
// ============================================================================

impl Rule {
    /// Creates an existence constraint over the given paths.
    #[must_use]
    pub fn must_exist(paths: impl IntoIterator<Item = SettingPath>) -> Self {
        Self::MustExist(paths.into_iter().collect())
    }

    /// Creates a membership constraint for a single path.
    #[must_use]
    pub fn is_in<I, S>(path: SettingPath, allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::IsIn {
            path,
            allowed: allowed.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates a prefix constraint for a single path.
    #[must_use]
    pub fn starts_with(path: SettingPath, prefix: impl Into<String>) -> Self {
        Self::StartsWith {
            path,
            prefix: prefix.into(),
        }
    }

    /// Creates an alternative between two rules.
    #[must_use]
    pub fn any_of(first: Self, second: Self) -> Self {
        Self::AnyOf(Box::new(first), Box::new(second))
    }
}

impl BitOr for Rule {
    type Output = Self;

    /// `a | b` declares an alternative, mirroring the rule table notation.
    fn bitor(self, rhs: Self) -> Self::Output {
        Self::any_of(self, rhs)
    }
}

// ============================================================================
// SECTION: Evaluation
// ============================================================================

impl Rule {
    /// Evaluates this rule against a snapshot.
    ///
    /// Pure and read-only: no I/O, no side effects, and no dependence on
    /// anything but the supplied snapshot.
    #[must_use]
    pub fn evaluate(&self, snapshot: &ConfigSnapshot) -> RuleOutcome {
        match self {
            Self::MustExist(paths) => evaluate_must_exist(paths, snapshot),
            Self::IsIn {
                path,
                allowed,
            } => evaluate_is_in(path, allowed, snapshot),
            Self::StartsWith {
                path,
                prefix,
            } => evaluate_starts_with(path, prefix, snapshot),
            Self::AnyOf(first, second) => evaluate_any_of(first, second, snapshot),
        }
    }
}

/// Evaluates an existence constraint, one failure per absent path.
fn evaluate_must_exist(paths: &[SettingPath], snapshot: &ConfigSnapshot) -> RuleOutcome {
    let mut failures = Vec::new();
    for path in paths {
        if !snapshot.contains(path) {
            failures.push(RuleFailure {
                kind: FailureKind::MissingRequiredSetting,
                paths: vec![path.clone()],
                message: format!("{path} must be set"),
            });
        }
    }
    if failures.is_empty() { RuleOutcome::Pass } else { RuleOutcome::Fail(failures) }
}

/// Evaluates a membership constraint. Absent values pass; list values must
/// be members element-wise.
fn evaluate_is_in(path: &SettingPath, allowed: &[String], snapshot: &ConfigSnapshot) -> RuleOutcome {
    let Some(value) = snapshot.get(path) else {
        return RuleOutcome::Pass;
    };
    match value {
        SettingValue::Text(text) => {
            if allowed.iter().any(|candidate| candidate == text) {
                RuleOutcome::Pass
            } else {
                RuleOutcome::Fail(vec![RuleFailure {
                    kind: FailureKind::InvalidEnumValue,
                    paths: vec![path.clone()],
                    message: format!(
                        "{path} is '{text}' but must be one of: {}",
                        allowed.join(", ")
                    ),
                }])
            }
        }
        SettingValue::List(items) => {
            let offenders: Vec<&str> = items
                .iter()
                .filter(|item| !allowed.iter().any(|candidate| candidate == *item))
                .map(String::as_str)
                .collect();
            if offenders.is_empty() {
                RuleOutcome::Pass
            } else {
                RuleOutcome::Fail(vec![RuleFailure {
                    kind: FailureKind::InvalidEnumValue,
                    paths: vec![path.clone()],
                    message: format!(
                        "{path} contains '{}' but every entry must be one of: {}",
                        offenders.join("', '"),
                        allowed.join(", ")
                    ),
                }])
            }
        }
    }
}

/// Evaluates a prefix constraint. Absent values pass; list values fail
/// because prefixes apply to text values only.
fn evaluate_starts_with(
    path: &SettingPath,
    prefix: &str,
    snapshot: &ConfigSnapshot,
) -> RuleOutcome {
    let Some(value) = snapshot.get(path) else {
        return RuleOutcome::Pass;
    };
    match value {
        SettingValue::Text(text) if text.starts_with(prefix) => RuleOutcome::Pass,
        SettingValue::Text(text) => RuleOutcome::Fail(vec![RuleFailure {
            kind: FailureKind::InvalidPrefix,
            paths: vec![path.clone()],
            message: format!("{path} is '{text}' but must start with '{prefix}'"),
        }]),
        SettingValue::List(_) => RuleOutcome::Fail(vec![RuleFailure {
            kind: FailureKind::InvalidPrefix,
            paths: vec![path.clone()],
            message: format!("{path} is a list but prefix checks apply to text values"),
        }]),
    }
}

/// Evaluates an alternative: short-circuits on the first passing side, and
/// reports both sub-reasons when neither holds so the operator can see why
/// each alternative failed.
fn evaluate_any_of(first: &Rule, second: &Rule, snapshot: &ConfigSnapshot) -> RuleOutcome {
    let first_failures = match first.evaluate(snapshot) {
        RuleOutcome::Pass => return RuleOutcome::Pass,
        RuleOutcome::Fail(failures) => failures,
    };
    let second_failures = match second.evaluate(snapshot) {
        RuleOutcome::Pass => return RuleOutcome::Pass,
        RuleOutcome::Fail(failures) => failures,
    };
    let mut paths = Vec::new();
    for failure in first_failures.iter().chain(&second_failures) {
        for path in &failure.paths {
            if !paths.contains(path) {
                paths.push(path.clone());
            }
        }
    }
    let first_reason = joined_messages(&first_failures);
    let second_reason = joined_messages(&second_failures);
    RuleOutcome::Fail(vec![RuleFailure {
        kind: FailureKind::UnsatisfiedAlternative,
        paths,
        message: format!("no alternative satisfied: ({first_reason}) or ({second_reason})"),
    }])
}

/// Joins the messages of several failures into one reason string.
fn joined_messages(failures: &[RuleFailure]) -> String {
    failures.iter().map(|failure| failure.message.as_str()).collect::<Vec<_>>().join("; ")
}
