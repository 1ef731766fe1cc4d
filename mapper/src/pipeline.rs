//! Batch driver: one pass over the device inventory.

use std::fmt;

use iotkg_ontology::AssertionStore;

use crate::alias::AliasResolution;
use crate::classify::Classifier;
use crate::config::MapperConfig;
use crate::inventory::DeviceRecord;
use crate::openapi::{find_rule, EndpointRule};
use crate::synth::Synthesizer;

/// Why a device produced no endpoint assertions. None of these are errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The declared type is absent from the alias table.
    NoAlias,
    /// The alias table marks the declared type as having no endpoint.
    NotApplicable,
    /// The classifier assigned no class.
    NoClass,
    /// No endpoint rule targets the resolved entity type.
    NoMatchingRule,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SkipReason::NoAlias => "no entity alias",
            SkipReason::NotApplicable => "entity alias not applicable",
            SkipReason::NoClass => "no ontology class",
            SkipReason::NoMatchingRule => "no matching endpoint rule",
        })
    }
}

/// Outcome for one device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceOutcome {
    /// Assertions were synthesized; `added` counts the new ones.
    Mapped {
        /// Newly inserted assertions.
        added: usize,
    },
    /// The device was skipped. `added` is non-zero only for rooms under
    /// room-direct assertion.
    Skipped {
        /// Why.
        reason: SkipReason,
        /// Newly inserted assertions.
        added: usize,
    },
}

/// Summary of one run.
#[derive(Debug, Default)]
pub struct RunSummary {
    /// Per-device outcomes, in inventory order.
    pub outcomes: Vec<(String, DeviceOutcome)>,
}

impl RunSummary {
    /// Number of devices that were mapped.
    #[must_use]
    pub fn mapped(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|(_, o)| matches!(o, DeviceOutcome::Mapped { .. }))
            .count()
    }

    /// Number of devices that were skipped.
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.outcomes.len() - self.mapped()
    }

    /// Total newly inserted assertions.
    #[must_use]
    pub fn added(&self) -> usize {
        self.outcomes
            .iter()
            .map(|(_, o)| match o {
                DeviceOutcome::Mapped { added } | DeviceOutcome::Skipped { added, .. } => *added,
            })
            .sum()
    }
}

/// Classifier and synthesizer configured together.
#[derive(Debug, Clone)]
pub struct Mapper {
    classifier: Classifier,
    synthesizer: Synthesizer,
    room_direct_assertion: bool,
}

impl Mapper {
    /// Builds a mapper from configuration.
    #[must_use]
    pub fn new(config: &MapperConfig) -> Self {
        Self {
            classifier: Classifier::from_config(config),
            synthesizer: Synthesizer::from_config(config),
            room_direct_assertion: config.room_direct_assertion,
        }
    }

    /// Maps one device against `rules`, writing into `store`.
    pub fn map_device(
        &self,
        store: &mut AssertionStore,
        device: &DeviceRecord,
        rules: &[EndpointRule],
    ) -> DeviceOutcome {
        let classification = self.classifier.classify(device);

        let skip = |reason: SkipReason, store: &mut AssertionStore| {
            let added = if self.room_direct_assertion && classification.is_room_only() {
                self.synthesizer.room_assertion(store, device).len()
            } else {
                0
            };
            tracing::debug!(device = %device.id, declared_type = %device.declared_type, %reason, "device skipped");
            DeviceOutcome::Skipped { reason, added }
        };

        let entity_type = match classification.endpoint {
            AliasResolution::Entity(entity) => entity,
            AliasResolution::NotApplicable => return skip(SkipReason::NotApplicable, store),
            AliasResolution::Unresolved => return skip(SkipReason::NoAlias, store),
        };
        let Some(rule) = find_rule(rules, entity_type) else {
            return skip(SkipReason::NoMatchingRule, store);
        };
        if classification.classes.is_empty() {
            return skip(SkipReason::NoClass, store);
        }

        let added = self
            .synthesizer
            .synthesize(store, device, &classification, rule)
            .len();
        tracing::debug!(device = %device.id, method = %rule.method, added, "device mapped");
        DeviceOutcome::Mapped { added }
    }

    /// Maps every device in order.
    pub fn run(
        &self,
        store: &mut AssertionStore,
        devices: &[DeviceRecord],
        rules: &[EndpointRule],
    ) -> RunSummary {
        let mut summary = RunSummary::default();
        for device in devices {
            let outcome = self.map_device(store, device, rules);
            summary.outcomes.push((device.id.clone(), outcome));
        }
        tracing::info!(
            devices = devices.len(),
            mapped = summary.mapped(),
            skipped = summary.skipped(),
            added = summary.added(),
            "mapping complete"
        );
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::openapi::{HeaderDefault, HttpMethod};
    use iotkg_ontology::Section;

    fn rule(entity: &str, method: HttpMethod, attribute: &str) -> EndpointRule {
        EndpointRule {
            method,
            path_template: format!("/v2/entities/{{id}}/attrs/{attribute}/value"),
            target_entity_type: Some(entity.to_owned()),
            attribute_name: attribute.to_owned(),
            headers: vec![HeaderDefault {
                name: "Fiware-Service".to_owned(),
                default_value: "iot".to_owned(),
            }],
            parameters: Vec::new(),
        }
    }

    fn rules() -> Vec<EndpointRule> {
        vec![
            rule("Thermostat", HttpMethod::Patch, "targetTemperature"),
            rule("Thermostat", HttpMethod::Get, "targetTemperature"),
            rule("TemperatureSensor", HttpMethod::Get, "temperature"),
        ]
    }

    #[test]
    fn outcomes_per_device() {
        let mapper = Mapper::new(&MapperConfig::default());
        let devices = vec![
            DeviceRecord::new("Dev:42", "RadiatorThermostat"),
            DeviceRecord::new("Room:101", "HotelRoom"),
            DeviceRecord::new("Lamp:1", "Lamp"),
        ];
        let mut store = AssertionStore::new();
        let summary = mapper.run(&mut store, &devices, &rules());
        assert_eq!(summary.mapped(), 1);
        assert_eq!(
            summary.outcomes[1].1,
            DeviceOutcome::Skipped {
                reason: SkipReason::NotApplicable,
                added: 0
            }
        );
        assert_eq!(
            summary.outcomes[2].1,
            DeviceOutcome::Skipped {
                reason: SkipReason::NoAlias,
                added: 0
            }
        );
        assert_eq!(summary.added(), store.len());
    }

    #[test]
    fn first_matching_rule_is_used() {
        let mapper = Mapper::new(&MapperConfig::default());
        let mut store = AssertionStore::new();
        let device = DeviceRecord::new("Dev:42", "RadiatorThermostat");
        mapper.map_device(&mut store, &device, &rules());
        let requests: Vec<_> = store
            .section(Section::Api)
            .filter(|t| t.predicate.as_iri() == Some(iotkg_ontology::model::iris::HTTP_MTHD))
            .map(|t| t.object.clone())
            .collect();
        assert_eq!(requests, vec![iotkg_ontology::Node::literal("PATCH")]);
    }

    #[test]
    fn no_rule_for_entity_type() {
        let mapper = Mapper::new(&MapperConfig::default());
        let mut store = AssertionStore::new();
        let device = DeviceRecord::new("S:1", "TemperatureSensor");
        let outcome = mapper.map_device(&mut store, &device, &rules()[..2]);
        assert_eq!(
            outcome,
            DeviceOutcome::Skipped {
                reason: SkipReason::NoMatchingRule,
                added: 0
            }
        );
        assert!(store.is_empty());
    }

    #[test]
    fn room_direct_assertion_adds_only_the_class() {
        let config = MapperConfig {
            room_direct_assertion: true,
            ..MapperConfig::default()
        };
        let mapper = Mapper::new(&config);
        let mut store = AssertionStore::new();
        let outcome = mapper.map_device(&mut store, &DeviceRecord::new("Room:101", "HotelRoom"), &rules());
        assert_eq!(
            outcome,
            DeviceOutcome::Skipped {
                reason: SkipReason::NotApplicable,
                added: 1
            }
        );
        assert_eq!(store.len(), 1);
        assert_eq!(store.section(Section::Api).count(), 0);
    }

    #[test]
    fn aliased_type_without_class_is_skipped() {
        let config = MapperConfig {
            aliases: vec![crate::config::AliasEntry {
                declared_type: "Valve".to_owned(),
                entity_type: Some("Thermostat".to_owned()),
            }],
            ..MapperConfig::default()
        };
        let mapper = Mapper::new(&config);
        let mut store = AssertionStore::new();
        let outcome = mapper.map_device(&mut store, &DeviceRecord::new("V:1", "Valve"), &rules());
        assert_eq!(
            outcome,
            DeviceOutcome::Skipped {
                reason: SkipReason::NoClass,
                added: 0
            }
        );
        assert!(store.is_empty());
    }
}
