// crates/preflight-rules/src/lib.rs
// ============================================================================
// Module: Preflight Rules Library
// Description: Rule table for the provisioning acceptance suite.
// Purpose: Declare the per-section validation rules and the constant value
// tables they reference.
// Dependencies: preflight-core, thiserror
// ============================================================================

//! ## Overview
//! `preflight-rules` is the programmer-facing declaration surface: one
//! registry covering every feature area the provisioning acceptance suite
//! touches (cloud providers, directory services, certificates, discovery
//! media, subscription manifests, ...). The table is plain data built at
//! startup; a run enforces only the sections it names.

// ============================================================================
// SECTION: Core Modules
// ============================================================================

pub mod constants;
pub mod sections;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use constants::AZURE_VALID_REGIONS;
pub use constants::GCE_VALID_ZONES;
pub use sections::RulesError;
pub use sections::provisioning_registry;
