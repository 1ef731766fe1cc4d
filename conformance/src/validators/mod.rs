//! Validators, one module per artifact family.

pub mod artifacts;
pub mod graph;
