// crates/preflight-core/tests/common/mod.rs
// =============================================================================
// Module: Core Test Helpers
// Description: Shared helpers for preflight-core integration tests.
// Purpose: Reduce duplication across rule, registry, and engine suites.
// =============================================================================

#![allow(dead_code, reason = "Test helpers are selectively used across suites.")]

use std::collections::BTreeSet;

use preflight_core::ConfigSnapshot;
use preflight_core::SectionName;
use preflight_core::SettingPath;
use preflight_core::SnapshotBuilder;

/// Parses a dotted path, mapping errors to test-readable strings.
pub fn path(raw: &str) -> Result<SettingPath, String> {
    SettingPath::parse(raw).map_err(|err| err.to_string())
}

/// Parses a section name, mapping errors to test-readable strings.
pub fn section(raw: &str) -> Result<SectionName, String> {
    SectionName::new(raw).map_err(|err| err.to_string())
}

/// Builds a snapshot from `(section, key, value)` text triples.
pub fn snapshot(entries: &[(&str, &str, &str)]) -> ConfigSnapshot {
    let mut builder = SnapshotBuilder::new();
    for (section, key, value) in entries {
        builder = builder.set(section, key, *value);
    }
    builder.build()
}

/// Builds a required-section set from raw names.
pub fn required(names: &[&str]) -> Result<BTreeSet<SectionName>, String> {
    names.iter().map(|name| section(name)).collect()
}
