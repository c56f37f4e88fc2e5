// crates/preflight-core/src/registry.rs
// ============================================================================
// Module: Section Registry
// Description: Immutable table of section name to section spec.
// Purpose: Build the rule table once at startup, reject duplicate
// registrations fast, and serve concurrent read-only lookups.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! The registry is constructed once through [`RegistryBuilder`] and never
//! mutated afterwards, so concurrent validation calls can share it without
//! locking. Registering the same section twice is a startup error: silent
//! override of validation rules must never reach a validation call.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use thiserror::Error;

use crate::path::SectionName;
use crate::section::SectionSpec;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while constructing a [`Registry`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The same section name was registered twice.
    #[error("duplicate section registration: {0}")]
    DuplicateSection(SectionName),
}

// ============================================================================
// SECTION: Builder
// ============================================================================

/// Construction-time accumulator for the section registry.
#[derive(Debug, Clone, Default)]
pub struct RegistryBuilder {
    /// Registered sections in name order.
    sections: BTreeMap<SectionName, SectionSpec>,
}

impl RegistryBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a section spec under a unique name.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateSection`] when the name is
    /// already registered.
    pub fn register(
        &mut self,
        name: SectionName,
        spec: SectionSpec,
    ) -> Result<(), RegistryError> {
        if self.sections.contains_key(&name) {
            return Err(RegistryError::DuplicateSection(name));
        }
        self.sections.insert(name, spec);
        Ok(())
    }

    /// Finalizes the immutable registry.
    #[must_use]
    pub fn build(self) -> Registry {
        Registry {
            sections: self.sections,
        }
    }
}

// ============================================================================
// SECTION: Registry
// ============================================================================

/// The immutable table of section name to section spec.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    /// Registered sections in name order.
    sections: BTreeMap<SectionName, SectionSpec>,
}

impl Registry {
    /// Looks up the spec for a section, if registered.
    #[must_use]
    pub fn get(&self, name: &SectionName) -> Option<&SectionSpec> {
        self.sections.get(name)
    }

    /// Returns whether the section is registered.
    #[must_use]
    pub fn contains(&self, name: &SectionName) -> bool {
        self.sections.contains_key(name)
    }

    /// Returns the number of registered sections.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Returns whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Iterates registered sections in name order.
    pub fn sections(&self) -> impl Iterator<Item = (&SectionName, &SectionSpec)> {
        self.sections.iter()
    }
}
