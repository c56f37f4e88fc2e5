//! Identifier and path parsing tests for preflight-core.
// crates/preflight-core/tests/path_validation.rs
// =============================================================================
// Module: Path Parsing Tests
// Description: Validate identifier normalization and rejection rules.
// Purpose: Ensure case aliasing is collapsed at the boundary and malformed
// identifiers fail closed.
// =============================================================================

use preflight_core::PathError;
use preflight_core::SectionName;
use preflight_core::SettingPath;

type TestResult = Result<(), String>;

#[test]
fn section_names_normalize_to_lowercase() -> TestResult {
    let upper = SectionName::new("SERVER").map_err(|err| err.to_string())?;
    let lower = SectionName::new("server").map_err(|err| err.to_string())?;
    if upper != lower || upper.as_str() != "server" {
        return Err("case variants must collapse to one canonical name".to_string());
    }
    Ok(())
}

#[test]
fn paths_normalize_both_components() -> TestResult {
    let aliased = SettingPath::parse("SERVER.Ssh_Key").map_err(|err| err.to_string())?;
    let canonical = SettingPath::parse("server.ssh_key").map_err(|err| err.to_string())?;
    if aliased != canonical || aliased.to_string() != "server.ssh_key" {
        return Err("path aliases must collapse to one canonical path".to_string());
    }
    Ok(())
}

#[test]
fn path_without_separator_is_rejected() -> TestResult {
    match SettingPath::parse("hostname") {
        Err(PathError::MissingSeparator(raw)) if raw == "hostname" => Ok(()),
        other => Err(format!("expected missing separator error, got: {other:?}")),
    }
}

#[test]
fn empty_components_are_rejected() -> TestResult {
    if SettingPath::parse(".key").is_ok() || SettingPath::parse("section.").is_ok() {
        return Err("empty components must be rejected".to_string());
    }
    match SectionName::new("") {
        Err(PathError::Empty) => Ok(()),
        other => Err(format!("expected empty identifier error, got: {other:?}")),
    }
}

#[test]
fn invalid_characters_are_named() -> TestResult {
    match SectionName::new("bad section") {
        Err(PathError::InvalidCharacter {
            character, ..
        }) if character == ' ' => Ok(()),
        other => Err(format!("expected invalid character error, got: {other:?}")),
    }
}

#[test]
fn overlong_identifiers_are_rejected() -> TestResult {
    let raw = "a".repeat(256);
    match SectionName::new(&raw) {
        Err(PathError::TooLong {
            ..
        }) => Ok(()),
        other => Err(format!("expected length error, got: {other:?}")),
    }
}

#[test]
fn paths_serialize_as_dotted_strings() -> TestResult {
    let path = SettingPath::parse("ec2.secret_key").map_err(|err| err.to_string())?;
    let encoded = serde_json::to_string(&path).map_err(|err| err.to_string())?;
    if encoded != "\"ec2.secret_key\"" {
        return Err(format!("unexpected encoding: {encoded}"));
    }
    let decoded: SettingPath = serde_json::from_str(&encoded).map_err(|err| err.to_string())?;
    if decoded != path {
        return Err("decoded path must match the original".to_string());
    }
    Ok(())
}
