// crates/preflight-rules/src/sections.rs
// ============================================================================
// Module: Provisioning Section Table
// Description: Per-section validation rules for the acceptance suite.
// Purpose: Declare, once at startup, which settings every feature area
// requires before a run touching that area may proceed.
// Dependencies: preflight-core, thiserror
// ============================================================================

//! ## Overview
//! One registry entry per feature area. Must-exist sets cover credentials
//! and endpoints, membership rules pin enumerated values (cloud regions
//! and zones, IP management modes), and prefix rules pin filesystem
//! layout. Sections whose validity depends on cross-field conditions the
//! static rule vocabulary cannot express are registered with explicitly
//! empty specs: known sections with no static checks.

// ============================================================================
// SECTION: Imports
// ============================================================================

use preflight_core::PathError;
use preflight_core::Registry;
use preflight_core::RegistryBuilder;
use preflight_core::RegistryError;
use preflight_core::Rule;
use preflight_core::SectionName;
use preflight_core::SectionSpec;
use preflight_core::SettingPath;
use thiserror::Error;

use crate::constants::AZURE_VALID_REGIONS;
use crate::constants::GCE_VALID_ZONES;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while building the provisioning registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RulesError {
    /// A declared setting path failed identifier validation.
    #[error(transparent)]
    Path(#[from] PathError),
    /// A section was declared twice.
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

// ============================================================================
// SECTION: Registry Construction
// ============================================================================

/// Builds the full section registry for the provisioning acceptance suite.
///
/// # Errors
///
/// Returns [`RulesError`] when a declared path is malformed or a section
/// name repeats; both indicate a broken table, not bad input.
pub fn provisioning_registry() -> Result<Registry, RulesError> {
    let mut builder = RegistryBuilder::new();

    section(&mut builder, "server", vec![
        require(&["server.hostname"])?,
        require(&["server.ssh_key"])? | require(&["server.ssh_password"])?,
    ])?;
    section(&mut builder, "azurerm", vec![
        require(&[
            "azurerm.client_id",
            "azurerm.client_secret",
            "azurerm.subscription_id",
            "azurerm.tenant_id",
            "azurerm.azure_region",
            "azurerm.ssh_pub_key",
            "azurerm.username",
            "azurerm.password",
            "azurerm.azure_subnet",
        ])?,
        Rule::is_in(path("azurerm.azure_region")?, AZURE_VALID_REGIONS.iter().copied()),
    ])?;
    section(&mut builder, "capsule", vec![require(&["capsule.instance_name"])?])?;
    section(&mut builder, "certs", vec![require(&[
        "certs.cert_file",
        "certs.key_file",
        "certs.req_file",
        "certs.ca_bundle_file",
    ])?])?;
    // Known section; its single key is optional so no static rule applies.
    section(&mut builder, "clients", Vec::new())?;
    section(&mut builder, "compute_resources", vec![require(&[
        "compute_resources.libvirt_image_dir",
    ])?])?;
    section(&mut builder, "container_repo", vec![require(&[
        "container_repo.label",
        "container_repo.registry_url",
        "container_repo.registry_username",
        "container_repo.registry_password",
        "container_repo.repos_to_sync",
    ])?])?;
    section(&mut builder, "discovery", vec![require(&["discovery.discovery_iso"])?])?;
    section(&mut builder, "distro", vec![require(&[
        "distro.image_el6",
        "distro.image_el7",
        "distro.image_el8",
        "distro.image_sles11",
        "distro.image_sles12",
    ])?])?;
    section(&mut builder, "docker", vec![require(&[
        "docker.docker_image",
        "docker.external_registry_1",
    ])?])?;
    section(&mut builder, "ec2", vec![
        require(&["ec2.access_key", "ec2.secret_key", "ec2.region"])?,
        Rule::is_in(path("ec2.manage_ip")?, ["Private", "Public"]),
    ])?;
    section(&mut builder, "fake_capsules", vec![require(&["fake_capsules.port_range"])?])?;
    section(&mut builder, "fake_manifest", vec![require(&[
        "fake_manifest.cert_url",
        "fake_manifest.key_url",
        "fake_manifest.url",
    ])?])?;
    section(&mut builder, "gce", vec![
        require(&[
            "gce.project_id",
            "gce.client_email",
            "gce.cert_path",
            "gce.zone",
            "gce.cert_url",
        ])?,
        Rule::starts_with(path("gce.cert_path")?, "/usr/share/foreman/"),
        Rule::is_in(path("gce.zone")?, GCE_VALID_ZONES.iter().copied()),
    ])?;
    section(&mut builder, "ipa", vec![require(&[
        "ipa.basedn_ipa",
        "ipa.grpbasedn_ipa",
        "ipa.hostname_ipa",
        "ipa.password_ipa",
        "ipa.username_ipa",
        "ipa.user_ipa",
        "ipa.otp_user",
        "ipa.time_based_secret",
        "ipa.disabled_user_ipa",
    ])?])?;
    section(&mut builder, "ldap", vec![require(&[
        "ldap.basedn",
        "ldap.grpbasedn",
        "ldap.hostname",
        "ldap.password",
        "ldap.username",
    ])?])?;
    section(&mut builder, "oscap", vec![require(&[
        "oscap.content_path",
        "oscap.tailoring_path",
    ])?])?;
    section(&mut builder, "osp", vec![require(&[
        "osp.hostname",
        "osp.username",
        "osp.password",
        "osp.tenant",
        "osp.project_domain_id",
        "osp.security_group",
        "osp.vm_name",
        "osp.image_os",
        "osp.image_arch",
        "osp.image_username",
        "osp.image_name",
    ])?])?;
    section(&mut builder, "ostree", vec![require(&["ostree.ostree_installer"])?])?;
    section(&mut builder, "performance", vec![require(&[
        "performance.cdn_address",
        "performance.virtual_machines",
        "performance.fresh_install_savepoint",
        "performance.enabled_repos_savepoint",
    ])?])?;
    section(&mut builder, "report_portal", vec![require(&[
        "report_portal.portal_url",
        "report_portal.project",
        "report_portal.api_key",
    ])?])?;
    section(&mut builder, "rhev", vec![require(&[
        "rhev.hostname",
        "rhev.username",
        "rhev.password",
        "rhev.datacenter",
        "rhev.vm_name",
        "rhev.storage_domain",
        "rhev.image_os",
        "rhev.image_arch",
        "rhev.image_username",
        "rhev.image_password",
        "rhev.image_name",
    ])?])?;
    section(&mut builder, "rhsso", vec![require(&[
        "rhsso.host_name",
        "rhsso.host_url",
        "rhsso.rhsso_user",
        "rhsso.user_password",
        "rhsso.realm",
    ])?])?;
    // Cross-field conditional validation; no static rules yet.
    section(&mut builder, "shared_function", Vec::new())?;
    section(&mut builder, "upgrade", Vec::new())?;
    section(&mut builder, "virtwho", Vec::new())?;
    section(&mut builder, "vlan_networking", Vec::new())?;
    section(&mut builder, "vmware", vec![require(&[
        "vmware.vcenter",
        "vmware.username",
        "vmware.password",
        "vmware.datacenter",
        "vmware.vm_name",
        "vmware.image_os",
        "vmware.image_arch",
        "vmware.image_username",
        "vmware.image_password",
        "vmware.image_name",
    ])?])?;

    Ok(builder.build())
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Registers one section under its validated name.
///
/// # Errors
///
/// Returns [`RulesError`] on a malformed name or duplicate registration.
fn section(
    builder: &mut RegistryBuilder,
    raw_name: &str,
    rules: Vec<Rule>,
) -> Result<(), RulesError> {
    builder.register(SectionName::new(raw_name)?, SectionSpec::new(rules))?;
    Ok(())
}

/// Builds a must-exist rule over several dotted paths.
///
/// # Errors
///
/// Returns [`PathError`] when any path is malformed.
fn require(raw_paths: &[&str]) -> Result<Rule, PathError> {
    let paths =
        raw_paths.iter().map(|raw| SettingPath::parse(raw)).collect::<Result<Vec<_>, _>>()?;
    Ok(Rule::must_exist(paths))
}

/// Parses one dotted path.
///
/// # Errors
///
/// Returns [`PathError`] when the path is malformed.
fn path(raw: &str) -> Result<SettingPath, PathError> {
    SettingPath::parse(raw)
}
