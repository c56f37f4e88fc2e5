//! Registry construction tests for preflight-core.
// crates/preflight-core/tests/registry_validation.rs
// =============================================================================
// Module: Registry Construction Tests
// Description: Validate registration, duplicate rejection, and lookup.
// Purpose: Ensure declaration errors surface at startup, never at
// validation time.
// =============================================================================

use preflight_core::Registry;
use preflight_core::RegistryBuilder;
use preflight_core::RegistryError;
use preflight_core::Rule;
use preflight_core::SectionSpec;

mod common;

type TestResult = Result<(), String>;

/// Builds a registry with one section named `server`.
fn server_registry() -> Result<Registry, String> {
    let mut builder = RegistryBuilder::new();
    builder
        .register(
            common::section("server")?,
            SectionSpec::new(vec![Rule::must_exist(vec![common::path("server.hostname")?])]),
        )
        .map_err(|err| err.to_string())?;
    Ok(builder.build())
}

#[test]
fn duplicate_section_registration_rejected_at_build_time() -> TestResult {
    let mut builder = RegistryBuilder::new();
    builder
        .register(common::section("server")?, SectionSpec::empty())
        .map_err(|err| err.to_string())?;
    let err = match builder.register(common::section("server")?, SectionSpec::empty()) {
        Ok(()) => return Err("expected duplicate registration to fail".to_string()),
        Err(err) => err,
    };
    if err != RegistryError::DuplicateSection(common::section("server")?) {
        return Err(format!("unexpected error: {err}"));
    }
    Ok(())
}

#[test]
fn duplicate_detection_is_case_insensitive() -> TestResult {
    let mut builder = RegistryBuilder::new();
    builder
        .register(common::section("server")?, SectionSpec::empty())
        .map_err(|err| err.to_string())?;
    if builder.register(common::section("SERVER")?, SectionSpec::empty()).is_ok() {
        return Err("case-aliased duplicate must be rejected".to_string());
    }
    Ok(())
}

#[test]
fn empty_section_spec_is_registered_and_always_passes() -> TestResult {
    let mut builder = RegistryBuilder::new();
    builder
        .register(common::section("upgrade")?, SectionSpec::empty())
        .map_err(|err| err.to_string())?;
    let registry = builder.build();
    let name = common::section("upgrade")?;
    let spec = registry.get(&name).ok_or("empty section must stay registered")?;
    if !spec.is_empty() {
        return Err("spec must report no rules".to_string());
    }
    let failures = spec.evaluate(&name, &common::snapshot(&[]));
    if !failures.is_empty() {
        return Err("empty spec must always pass".to_string());
    }
    Ok(())
}

#[test]
fn lookup_misses_unregistered_sections() -> TestResult {
    let registry = server_registry()?;
    if registry.get(&common::section("nonexistent_section")?).is_some() {
        return Err("unregistered section must not resolve".to_string());
    }
    if !registry.contains(&common::section("server")?) {
        return Err("registered section must resolve".to_string());
    }
    Ok(())
}

#[test]
fn sections_iterate_in_name_order() -> TestResult {
    let mut builder = RegistryBuilder::new();
    for name in ["gce", "azurerm", "ec2"] {
        builder
            .register(common::section(name)?, SectionSpec::empty())
            .map_err(|err| err.to_string())?;
    }
    let registry = builder.build();
    let names: Vec<String> = registry.sections().map(|(name, _)| name.to_string()).collect();
    if names != ["azurerm", "ec2", "gce"] {
        return Err(format!("unexpected iteration order: {names:?}"));
    }
    if registry.len() != 3 || registry.is_empty() {
        return Err("registry size accessors disagree".to_string());
    }
    Ok(())
}
