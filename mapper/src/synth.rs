//! Assertion synthesis for one classified device and its endpoint rule.
//!
//! Groups are written in this order, each through a guarded insert so that a
//! second run over the same inputs adds nothing:
//!
//! 1. class assertions with value and location linkage, plus the setpoint
//!    companion for thermostats (device section);
//! 2. the HTTP request (API section);
//! 3. header nodes (header section) and their links to the request;
//! 4. parameter nodes and their links, when enabled.
//!
//! Room-only devices stop after step 1.

use iotkg_ontology::model::iris;
use iotkg_ontology::{AssertionStore, Node, Pattern, Section, Triple};

use crate::classes::{ClassRole, OntologyClass};
use crate::classify::Classification;
use crate::config::MapperConfig;
use crate::ident::Identifiers;
use crate::inventory::DeviceRecord;
use crate::openapi::{EndpointRule, HeaderDefault, ParameterDefault};

fn iri(s: &str) -> Node {
    Node::iri(s)
}

/// Writes device, request, header and parameter assertions into a store.
#[derive(Debug, Clone)]
pub struct Synthesizer {
    ids: Identifiers,
    base_url: String,
    emit_parameters: bool,
}

impl Synthesizer {
    /// Builds a synthesizer from configuration.
    #[must_use]
    pub fn from_config(config: &MapperConfig) -> Self {
        Self {
            ids: Identifiers::new(config.resource_namespace.clone()),
            base_url: config.base_url.clone(),
            emit_parameters: config.emit_parameters,
        }
    }

    /// Synthesizes every assertion for `device` matched to `rule` and
    /// returns the ones that were newly inserted.
    pub fn synthesize(
        &self,
        store: &mut AssertionStore,
        device: &DeviceRecord,
        classification: &Classification<'_>,
        rule: &EndpointRule,
    ) -> Vec<Triple> {
        if classification.classes.is_empty() {
            return Vec::new();
        }
        let instance = self.ids.instance(device);
        let target = Node::iri(rule.request_target(&self.base_url, &device.id));

        let mut added = Vec::new();
        for &class in &classification.classes {
            added.extend(self.class_group(
                store,
                device,
                class,
                &instance,
                &classification.location,
                &target,
            ));
        }
        if classification.is_room_only() {
            return added;
        }

        let request = self.ids.request(rule.method, device);
        let request_type = iri(iris::HTTP_REQUEST);
        let rdf_type = iri(iris::RDF_TYPE);
        added.extend(store.upsert_if_absent(
            Section::Api,
            &Pattern::exact(&request, &rdf_type, &request_type),
            [
                Triple::new(request.clone(), rdf_type.clone(), request_type.clone()),
                Triple::new(
                    request.clone(),
                    iri(iris::HTTP_MTHD),
                    Node::literal(rule.method.as_str()),
                ),
                Triple::new(request.clone(), iri(iris::HTTP_REQUEST_URI), target),
            ],
        ));

        for header in &rule.headers {
            added.extend(self.header(store, device, &request, header));
        }
        if self.emit_parameters {
            for parameter in &rule.parameters {
                added.extend(self.parameter(store, device, &request, parameter));
            }
        }
        added
    }

    /// Asserts only the class of a room device. Used for rooms that have no
    /// endpoint when room-direct assertion is enabled.
    pub fn room_assertion(&self, store: &mut AssertionStore, device: &DeviceRecord) -> Vec<Triple> {
        let triple = Triple::new(
            self.ids.instance(device),
            iri(iris::RDF_TYPE),
            iri(&OntologyClass::Room.iri()),
        );
        store.extend(Section::Device, [triple])
    }

    fn class_group(
        &self,
        store: &mut AssertionStore,
        device: &DeviceRecord,
        class: OntologyClass,
        instance: &Node,
        location: &Node,
        target: &Node,
    ) -> Vec<Triple> {
        let rdf_type = iri(iris::RDF_TYPE);
        let class_node = iri(&class.iri());
        let mut group = vec![Triple::new(instance.clone(), rdf_type.clone(), class_node.clone())];
        match class.role() {
            ClassRole::Room => {}
            ClassRole::Point => {
                group.push(Triple::new(instance.clone(), iri(iris::RDF_VALUE), target.clone()));
                group.push(Triple::new(
                    instance.clone(),
                    iri(iris::BRICK_IS_POINT_OF),
                    location.clone(),
                ));
            }
            ClassRole::Thermostat => {
                group.push(Triple::new(instance.clone(), iri(iris::RDF_VALUE), target.clone()));
                group.push(Triple::new(
                    instance.clone(),
                    iri(iris::BRICK_HAS_LOCATION),
                    location.clone(),
                ));
            }
        }

        let mut added = store.upsert_if_absent(
            Section::Device,
            &Pattern::exact(instance, &rdf_type, &class_node),
            group,
        );
        if !added.is_empty() && class.role() == ClassRole::Thermostat {
            added.extend(self.setpoint(store, device, instance, target));
        }
        added
    }

    fn setpoint(
        &self,
        store: &mut AssertionStore,
        device: &DeviceRecord,
        thermostat: &Node,
        target: &Node,
    ) -> Vec<Triple> {
        let setpoint = self.ids.setpoint(device);
        let rdf_type = iri(iris::RDF_TYPE);
        let class = iri(iris::BRICK_TEMPERATURE_SETPOINT);
        store.upsert_if_absent(
            Section::Device,
            &Pattern::exact(&setpoint, &rdf_type, &class),
            [
                Triple::new(setpoint.clone(), rdf_type.clone(), class.clone()),
                Triple::new(setpoint.clone(), iri(iris::BRICK_IS_POINT_OF), thermostat.clone()),
                Triple::new(setpoint.clone(), iri(iris::RDF_VALUE), target.clone()),
            ],
        )
    }

    /// A header node is created once per (name, device); later headers with
    /// the same node id only gain the link to the request.
    fn header(
        &self,
        store: &mut AssertionStore,
        device: &DeviceRecord,
        request: &Node,
        header: &HeaderDefault,
    ) -> Vec<Triple> {
        let node = self.ids.header(&header.name, device);
        let mut added = store.upsert_if_absent(
            Section::Header,
            &Pattern::subject(&node),
            [
                Triple::new(node.clone(), iri(iris::RDF_TYPE), iri(iris::HTTP_MESSAGE_HEADER)),
                Triple::new(
                    node.clone(),
                    iri(iris::HTTP_FIELD_NAME),
                    Node::literal(header.name.as_str()),
                ),
                Triple::new(
                    node.clone(),
                    iri(iris::HTTP_FIELD_VALUE),
                    Node::literal(header.default_value.as_str()),
                ),
            ],
        );
        added.extend(store.extend(
            Section::Api,
            [Triple::new(request.clone(), iri(iris::HTTP_HEADERS), node)],
        ));
        added
    }

    /// Parameter nodes follow the header rule: the node's own assertions are
    /// written once, the link to the request always.
    fn parameter(
        &self,
        store: &mut AssertionStore,
        device: &DeviceRecord,
        request: &Node,
        parameter: &ParameterDefault,
    ) -> Vec<Triple> {
        let node = self.ids.parameter(&parameter.name, device);
        let mut added = store.upsert_if_absent(
            Section::Api,
            &Pattern::subject(&node),
            [
                Triple::new(node.clone(), iri(iris::RDF_TYPE), iri(iris::HTTP_PARAMETER)),
                Triple::new(
                    node.clone(),
                    iri(iris::HTTP_PARAM_NAME),
                    Node::literal(parameter.name.as_str()),
                ),
                Triple::new(
                    node.clone(),
                    iri(iris::HTTP_PARAM_VALUE),
                    Node::literal(parameter.default_value.as_str()),
                ),
            ],
        );
        added.extend(store.extend(
            Section::Api,
            [Triple::new(request.clone(), iri(iris::HTTP_PARAMS), node)],
        ));
        added
    }
}
