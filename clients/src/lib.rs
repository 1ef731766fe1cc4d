//! Shared setup for the iotkg client binaries.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use iotkg_conformance::ConformanceReport;
use tracing_subscriber::EnvFilter;

/// Installs a stderr `tracing` subscriber filtered by `RUST_LOG`, defaulting
/// to `info`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Prints every result of `report` and returns the failure count.
pub fn print_report(report: &ConformanceReport) -> usize {
    for result in &report.results {
        println!("[{}] {} — {}", result.severity.tag(), result.validator, result.message);
        for detail in &result.details {
            println!("       {}", detail);
        }
    }
    report.failure_count()
}
