// crates/preflight-core/src/lib.rs
// ============================================================================
// Module: Preflight Core Library
// Description: Sectioned configuration validation engine.
// Purpose: Wire together paths, snapshots, rules, the registry, and the
// validation engine behind one public surface.
// Dependencies: serde, smallvec, thiserror, toml
// ============================================================================

//! ## Overview
//! `preflight-core` validates a resolved configuration snapshot against a
//! registry of per-section rules before a run is allowed to proceed. The
//! registry is declared once at startup and immutable afterwards; each
//! validation call names only the sections the current run requires, so
//! validation cost and required operator input scale with what is actually
//! used. A non-empty report for a required section is intended to be fatal
//! before any dependent work starts.

// ============================================================================
// SECTION: Core Modules
// ============================================================================

pub mod engine;
pub mod path;
pub mod registry;
pub mod report;
pub mod rule;
pub mod section;
pub mod snapshot;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use engine::ValidateError;
pub use engine::enforce;
pub use engine::validate;
pub use path::PathError;
pub use path::SectionName;
pub use path::SettingPath;
pub use registry::Registry;
pub use registry::RegistryBuilder;
pub use registry::RegistryError;
pub use report::FailureKind;
pub use report::RuleFailure;
pub use report::ValidationFailure;
pub use report::ValidationReport;
pub use rule::Rule;
pub use rule::RuleOutcome;
pub use section::SectionSpec;
pub use snapshot::ConfigSnapshot;
pub use snapshot::SettingValue;
pub use snapshot::SnapshotBuilder;
pub use snapshot::SnapshotError;
