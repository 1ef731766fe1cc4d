//! RDF building blocks for IoT device knowledge graphs.
//!
//! The `iotkg-ontology` crate provides the term model, the vocabulary IRIs
//! (Brick, RealEstateCore, the W3C HTTP vocabulary), the deduplicating
//! [`AssertionStore`], section assembly, and Turtle / N-Triples serializers.
//!
//! # Entry Point
//!
//! ```
//! use iotkg_ontology::{AssertionStore, Assembly, Node, Section, Triple};
//! use iotkg_ontology::model::iris;
//!
//! let mut store = AssertionStore::new();
//! let req = Node::iri(format!("{}GET_Dev_1", iris::EX));
//! let t = Triple::new(req, Node::iri(iris::RDF_TYPE), Node::iri(iris::HTTP_REQUEST));
//! assert!(store.add(Section::Api, t.clone()));
//! assert!(!store.add(Section::Api, t));
//!
//! let turtle = iotkg_ontology::serializer::turtle::to_turtle(&Assembly::from_store(&store, true));
//! assert!(turtle.contains("ex:GET_Dev_1 a http:Request ."));
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

pub mod assemble;
pub mod loader;
pub mod model;
pub mod serializer;
pub mod store;

pub use assemble::{Assembly, Block};
pub use loader::{load_turtle_file, load_turtle_str, LoadError, LoadReport};
pub use model::{Literal, Node, Triple};
pub use store::{AssertionStore, Pattern, Section};
