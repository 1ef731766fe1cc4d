//! Entity alias resolution: declared device type → endpoint entity type.

use std::collections::HashMap;

use crate::config::AliasEntry;

/// Outcome of resolving a declared type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AliasResolution<'a> {
    /// The type maps to this endpoint entity type.
    Entity(&'a str),
    /// The type is known but no endpoint applies to it.
    NotApplicable,
    /// The type is absent from the table.
    Unresolved,
}

/// Lookup table built from [`AliasEntry`] rows. A later row for the same
/// declared type replaces an earlier one.
#[derive(Debug, Clone, Default)]
pub struct EntityAliases {
    table: HashMap<String, Option<String>>,
}

impl EntityAliases {
    /// Builds the table from configuration rows.
    #[must_use]
    pub fn new(entries: &[AliasEntry]) -> Self {
        Self {
            table: entries
                .iter()
                .map(|e| (e.declared_type.clone(), e.entity_type.clone()))
                .collect(),
        }
    }

    /// Resolves `declared_type`, case-sensitively.
    #[must_use]
    pub fn resolve(&self, declared_type: &str) -> AliasResolution<'_> {
        match self.table.get(declared_type) {
            Some(Some(entity)) => AliasResolution::Entity(entity),
            Some(None) => AliasResolution::NotApplicable,
            None => AliasResolution::Unresolved,
        }
    }
}
