//! Serializers for assembled assertion graphs.
//!
//! Two formats are supported:
//! - **Turtle** ([`turtle`]) — human-diffable, grouped by section and subject
//! - **N-Triples** ([`ntriples`]) — one assertion per line, for bulk loading

pub mod ntriples;
pub mod turtle;

/// File name of the Turtle artifact.
pub const TURTLE_FILE: &str = "final_output.ttl";

/// File name of the N-Triples artifact.
pub const NTRIPLES_FILE: &str = "final_output.nt";
