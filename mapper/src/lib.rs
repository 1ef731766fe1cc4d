//! Device inventory and OpenAPI → knowledge graph mapping.
//!
//! The mapper turns a device inventory and an OpenAPI description into Brick,
//! RealEstateCore and W3C HTTP-vocabulary assertions:
//!
//! 1. [`openapi`] extracts one [`EndpointRule`] per operation on an
//!    attribute path;
//! 2. [`classify`] assigns ontology classes and resolves the endpoint entity
//!    type through [`alias`];
//! 3. [`synth`] writes device, request, header and parameter assertions into
//!    an [`AssertionStore`](iotkg_ontology::AssertionStore);
//! 4. [`pipeline`] drives one pass over the inventory.
//!
//! # Entry Point
//!
//! ```
//! use iotkg_mapper::{extract_rules, DeviceRecord, Mapper, MapperConfig};
//! use iotkg_ontology::AssertionStore;
//!
//! let api = serde_json::json!({
//!     "paths": {
//!         "/v2/entities/{id}/attrs/targetTemperature/value": {
//!             "patch": {"parameters": [
//!                 {"name": "type", "in": "query", "schema": {"default": "Thermostat"}}
//!             ]}
//!         }
//!     }
//! });
//! let rules = extract_rules(&api).rules;
//! let devices = vec![DeviceRecord::new("Dev:42", "RadiatorThermostat")];
//!
//! let mut store = AssertionStore::new();
//! let summary = Mapper::new(&MapperConfig::default()).run(&mut store, &devices, &rules);
//! assert_eq!(summary.mapped(), 1);
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

pub mod alias;
pub mod classes;
pub mod classify;
pub mod config;
pub mod error;
pub mod ident;
pub mod inventory;
pub mod openapi;
pub mod pipeline;
pub mod synth;

pub use alias::{AliasResolution, EntityAliases};
pub use classes::{ClassRole, OntologyClass};
pub use classify::{Classification, Classifier};
pub use config::{MapperConfig, Strategy};
pub use error::MapperError;
pub use ident::Identifiers;
pub use inventory::{load_inventory, parse_inventory, sanitize_id, DeviceRecord};
pub use openapi::{
    extract_rules, extract_rules_from_file, extract_rules_from_str, EndpointRule, Extraction,
    HttpMethod,
};
pub use pipeline::{DeviceOutcome, Mapper, RunSummary, SkipReason};
pub use synth::Synthesizer;
