//! Snapshot loading tests for preflight-core.
// crates/preflight-core/tests/snapshot_validation.rs
// =============================================================================
// Module: Snapshot Loading Tests
// Description: Validate TOML parsing limits and lookup normalization.
// Purpose: Ensure snapshot loading fails closed and lookups ignore source
// letter case.
// =============================================================================

use std::io::Write;

use preflight_core::ConfigSnapshot;
use preflight_core::SettingValue;
use preflight_core::SnapshotBuilder;
use preflight_core::SnapshotError;

mod common;

type TestResult = Result<(), String>;

#[test]
fn toml_sections_and_values_round_trip() -> TestResult {
    let snapshot = ConfigSnapshot::from_toml_str(
        r#"
        [server]
        hostname = "sat.example.com"

        [container_repo]
        repos_to_sync = ["rhel7", "rhel8"]
        "#,
    )
    .map_err(|err| err.to_string())?;
    match snapshot.get(&common::path("server.hostname")?) {
        Some(SettingValue::Text(value)) if value == "sat.example.com" => {}
        other => return Err(format!("unexpected hostname value: {other:?}")),
    }
    match snapshot.get(&common::path("container_repo.repos_to_sync")?) {
        Some(SettingValue::List(values)) if values == &["rhel7", "rhel8"] => Ok(()),
        other => Err(format!("unexpected list value: {other:?}")),
    }
}

#[test]
fn lookup_is_case_insensitive_end_to_end() -> TestResult {
    let snapshot = ConfigSnapshot::from_toml_str(
        r#"
        [SERVER]
        Hostname = "sat.example.com"
        "#,
    )
    .map_err(|err| err.to_string())?;
    if snapshot.get(&common::path("server.hostname")?).is_none() {
        return Err("canonical path must resolve mixed-case source keys".to_string());
    }
    if snapshot.get_raw("Server", "HOSTNAME").is_none() {
        return Err("raw lookup must normalize identifiers".to_string());
    }
    Ok(())
}

#[test]
fn non_string_leaf_values_are_rejected() -> TestResult {
    let result = ConfigSnapshot::from_toml_str(
        r"
        [fake_capsules]
        port_range = 9091
        ",
    );
    match result {
        Err(SnapshotError::Invalid(message)) if message.contains("fake_capsules.port_range") => {
            Ok(())
        }
        other => Err(format!("expected invalid snapshot error, got: {other:?}")),
    }
}

#[test]
fn top_level_scalars_are_rejected() -> TestResult {
    let result = ConfigSnapshot::from_toml_str("hostname = \"sat.example.com\"");
    match result {
        Err(SnapshotError::Invalid(message)) if message.contains("must be a table") => Ok(()),
        other => Err(format!("expected invalid snapshot error, got: {other:?}")),
    }
}

#[test]
fn case_colliding_keys_are_rejected() -> TestResult {
    let result = ConfigSnapshot::from_toml_str(
        r#"
        [server]
        hostname = "a"
        HOSTNAME = "b"
        "#,
    );
    match result {
        Err(SnapshotError::Invalid(message)) if message.contains("duplicate setting") => Ok(()),
        other => Err(format!("expected duplicate setting error, got: {other:?}")),
    }
}

#[test]
fn file_load_reads_explicit_paths() -> TestResult {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    let path = dir.path().join("preflight.toml");
    let mut file = std::fs::File::create(&path).map_err(|err| err.to_string())?;
    file.write_all(b"[server]\nhostname = \"sat.example.com\"\n")
        .map_err(|err| err.to_string())?;
    let snapshot = ConfigSnapshot::load(Some(&path)).map_err(|err| err.to_string())?;
    if snapshot.get(&common::path("server.hostname")?).is_none() {
        return Err("loaded snapshot must carry the hostname".to_string());
    }
    Ok(())
}

#[test]
fn oversized_files_are_rejected() -> TestResult {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    let path = dir.path().join("preflight.toml");
    let mut file = std::fs::File::create(&path).map_err(|err| err.to_string())?;
    let oversized = vec![b'#'; 1024 * 1024 + 1];
    file.write_all(&oversized).map_err(|err| err.to_string())?;
    match ConfigSnapshot::load(Some(&path)) {
        Err(SnapshotError::Invalid(message)) if message.contains("size limit") => Ok(()),
        other => Err(format!("expected size limit error, got: {other:?}")),
    }
}

#[test]
fn missing_files_surface_io_errors() -> TestResult {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    let path = dir.path().join("absent.toml");
    match ConfigSnapshot::load(Some(&path)) {
        Err(SnapshotError::Io(_)) => Ok(()),
        other => Err(format!("expected io error, got: {other:?}")),
    }
}

#[test]
fn builder_normalizes_and_replaces() -> TestResult {
    let snapshot = SnapshotBuilder::new()
        .set("EC2", "Access_Key", "first")
        .set("ec2", "access_key", "second")
        .build();
    match snapshot.get(&common::path("ec2.access_key")?) {
        Some(SettingValue::Text(value)) if value == "second" => Ok(()),
        other => Err(format!("unexpected value after replacement: {other:?}")),
    }
}
