//! `iotkg-conformance` — Validates exported knowledge graph artifacts.
//!
//! Checks that the Turtle and N-Triples files exist, parse, and carry the
//! same number of triples.
//!
//! **Usage:**
//! ```text
//! iotkg-conformance [--artifacts <path>]
//! ```
//!
//! Exits non-zero if any check fails.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::Parser;
use iotkg_clients::{init_tracing, print_report};
use iotkg_conformance::{run_all, Severity};

/// Validate exported knowledge graph artifacts.
#[derive(Parser)]
#[command(
    name = "iotkg-conformance",
    about = "Validate exported knowledge graph artifacts"
)]
struct Args {
    /// Path to the artifacts directory (default: output/).
    #[arg(long, default_value = "output")]
    artifacts: PathBuf,
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let report = run_all(&args.artifacts)?;

    println!("iotkg Conformance Report");
    println!("========================");
    println!();

    let failed = print_report(&report);

    println!();
    println!(
        "Summary: {} passed, {} warnings, {} failed",
        report.count(Severity::Pass),
        report.count(Severity::Warning),
        failed
    );

    if failed > 0 {
        eprintln!("Conformance FAILED: {} check(s) did not pass.", failed);
        process::exit(1);
    }

    println!("Conformance PASSED.");
    Ok(())
}
