//! Conformance suite for synthesized device knowledge graphs.
//!
//! The mapper only promises structural well-formedness of what it emits.
//! This crate checks that promise, both on the in-memory store right after
//! synthesis and on the exported Turtle / N-Triples artifacts.
//!
//! | Target | Checks |
//! |--------|--------|
//! | Assertion store | request, header and link shapes; sanitized identifiers |
//! | Turtle artifact | presence, prefixes, parses as Turtle 1.1 |
//! | N-Triples artifact | line shape, parses as N-Triples, count matches Turtle |
//!
//! # Entry Point
//!
//! ```no_run
//! use std::path::Path;
//!
//! let report = iotkg_conformance::run_all(Path::new("output")).expect("artifacts readable");
//! assert!(report.all_passed());
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

use std::path::Path;

use iotkg_ontology::AssertionStore;

pub mod report;
pub mod validators;

pub use report::{ConformanceReport, Severity, TestResult};

/// Validates the exported artifacts in `artifacts`.
///
/// # Errors
///
/// Returns an error only if a file system operation fails.
pub fn run_all(artifacts: &Path) -> anyhow::Result<ConformanceReport> {
    let report = validators::artifacts::validate(artifacts)?;
    tracing::debug!(
        results = report.results.len(),
        failures = report.failure_count(),
        "artifact validation finished"
    );
    Ok(report)
}

/// Validates an in-memory store whose synthesized identifiers live under
/// `namespace`.
#[must_use]
pub fn check_store(store: &AssertionStore, namespace: &str) -> ConformanceReport {
    validators::graph::validate(store, namespace)
}
