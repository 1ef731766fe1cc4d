//! Device classification.
//!
//! Two table-driven strategies assign ontology classes to a declared device
//! type:
//!
//! - **exact**: every [`ExactEntry`] whose declared type equals the device's
//!   type contributes its class;
//! - **keyword**: the lower-cased type is scanned against the ordered
//!   [`KeywordEntry`] table and the first keyword it contains decides the
//!   class. Later rows are never consulted after a hit.
//!
//! Both strategies derive the same location identifier and resolve the
//! endpoint entity type through the same [`EntityAliases`] table.

use iotkg_ontology::Node;

use crate::alias::{AliasResolution, EntityAliases};
use crate::classes::OntologyClass;
use crate::config::{ExactEntry, KeywordEntry, MapperConfig, Strategy};
use crate::ident::Identifiers;
use crate::inventory::DeviceRecord;

/// Result of classifying one device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification<'a> {
    /// Assigned classes without duplicates, in table order. Empty means the
    /// device has no applicable class.
    pub classes: Vec<OntologyClass>,
    /// The device's location identifier.
    pub location: Node,
    /// Endpoint entity type lookup.
    pub endpoint: AliasResolution<'a>,
}

impl Classification<'_> {
    /// The resolved endpoint entity type, if any.
    #[must_use]
    pub fn endpoint_entity_type(&self) -> Option<&str> {
        match self.endpoint {
            AliasResolution::Entity(entity) => Some(entity),
            _ => None,
        }
    }

    /// True when every assigned class is a room.
    #[must_use]
    pub fn is_room_only(&self) -> bool {
        !self.classes.is_empty() && self.classes.iter().all(|c| *c == OntologyClass::Room)
    }
}

/// Classes for `declared_type` under the exact-type table.
#[must_use]
pub fn classify_exact(table: &[ExactEntry], declared_type: &str) -> Vec<OntologyClass> {
    let mut classes = Vec::new();
    for entry in table.iter().filter(|e| e.declared_type == declared_type) {
        if !classes.contains(&entry.class) {
            classes.push(entry.class);
        }
    }
    classes
}

/// The class of the first keyword contained in `declared_type`,
/// compared case-insensitively.
#[must_use]
pub fn classify_keyword(table: &[KeywordEntry], declared_type: &str) -> Option<OntologyClass> {
    let haystack = declared_type.to_lowercase();
    table
        .iter()
        .find(|e| haystack.contains(&e.keyword.to_lowercase()))
        .map(|e| e.class)
}

/// Configured classifier.
#[derive(Debug, Clone)]
pub struct Classifier {
    strategy: Strategy,
    exact: Vec<ExactEntry>,
    keywords: Vec<KeywordEntry>,
    aliases: EntityAliases,
    ids: Identifiers,
}

impl Classifier {
    /// Builds a classifier from configuration.
    #[must_use]
    pub fn from_config(config: &MapperConfig) -> Self {
        Self {
            strategy: config.strategy,
            exact: config.exact_types.clone(),
            keywords: config.keywords.clone(),
            aliases: EntityAliases::new(&config.aliases),
            ids: Identifiers::new(config.resource_namespace.clone()),
        }
    }

    /// Classes for a declared type under the configured strategy.
    #[must_use]
    pub fn classes_for(&self, declared_type: &str) -> Vec<OntologyClass> {
        match self.strategy {
            Strategy::Exact => classify_exact(&self.exact, declared_type),
            Strategy::Keyword => classify_keyword(&self.keywords, declared_type)
                .into_iter()
                .collect(),
        }
    }

    /// Classifies one device.
    #[must_use]
    pub fn classify(&self, device: &DeviceRecord) -> Classification<'_> {
        Classification {
            classes: self.classes_for(&device.declared_type),
            location: self.ids.location(device),
            endpoint: self.aliases.resolve(&device.declared_type),
        }
    }
}
