//! Turtle / N-Triples artifact validator.
//!
//! Validates that the exported artifacts are well-formed:
//! - the Turtle file exists, declares prefixes and parses
//! - every N-Triples line is a terminated triple and the file parses
//! - both files carry the same number of triples

use std::path::Path;

use anyhow::{Context, Result};
use iotkg_ontology::serializer::{NTRIPLES_FILE, TURTLE_FILE};
use sophia_api::source::TripleSource;
use sophia_turtle::parser::{nt, turtle};

use crate::report::{ConformanceReport, TestResult};

/// Validates the artifacts in `artifacts`.
///
/// # Errors
///
/// Returns an error if an artifact exists but cannot be read.
pub fn validate(artifacts: &Path) -> Result<ConformanceReport> {
    let mut report = ConformanceReport::new();

    let turtle_count = validate_turtle(artifacts, &mut report)?;
    let nt_count = validate_ntriples(artifacts, &mut report)?;

    if let (Some(ttl), Some(nt)) = (turtle_count, nt_count) {
        if ttl == nt {
            report.push(TestResult::pass(
                "artifacts/consistency",
                format!("Turtle and N-Triples both carry {ttl} triples"),
            ));
        } else {
            report.push(TestResult::fail(
                "artifacts/consistency",
                format!("Turtle carries {ttl} triples but N-Triples carries {nt}"),
            ));
        }
    }

    Ok(report)
}

/// Checks the Turtle artifact and returns its triple count if it parsed.
fn validate_turtle(artifacts: &Path, report: &mut ConformanceReport) -> Result<Option<usize>> {
    let path = artifacts.join(TURTLE_FILE);
    if !path.exists() {
        report.push(TestResult::fail(
            "artifacts/turtle",
            format!("{TURTLE_FILE} not found in artifacts directory"),
        ));
        return Ok(None);
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    if !content.contains("@prefix") {
        report.push(TestResult::warn(
            "artifacts/turtle",
            format!("{TURTLE_FILE} declares no prefixes"),
        ));
    }

    let mut count = 0usize;
    match turtle::parse_str(&content).for_each_triple(|_| count += 1) {
        Ok(()) => {
            report.push(TestResult::pass(
                "artifacts/turtle",
                format!("{TURTLE_FILE} parses as Turtle ({count} triples)"),
            ));
            Ok(Some(count))
        }
        Err(e) => {
            report.push(TestResult::fail_with_details(
                "artifacts/turtle",
                format!("{TURTLE_FILE} does not parse as Turtle"),
                vec![e.to_string()],
            ));
            Ok(None)
        }
    }
}

/// Checks the N-Triples artifact and returns its triple count if it parsed.
fn validate_ntriples(artifacts: &Path, report: &mut ConformanceReport) -> Result<Option<usize>> {
    let path = artifacts.join(NTRIPLES_FILE);
    if !path.exists() {
        report.push(TestResult::fail(
            "artifacts/ntriples",
            format!("{NTRIPLES_FILE} not found in artifacts directory"),
        ));
        return Ok(None);
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let malformed: Vec<String> = content
        .lines()
        .enumerate()
        .filter(|(_, l)| {
            let t = l.trim();
            !t.is_empty() && !t.starts_with('#') && !t.ends_with(" .")
        })
        .map(|(i, _)| format!("line {}: does not end with \" .\"", i + 1))
        .take(10)
        .collect();
    if !malformed.is_empty() {
        report.push(TestResult::fail_with_details(
            "artifacts/ntriples",
            format!("{NTRIPLES_FILE} has malformed lines"),
            malformed,
        ));
        return Ok(None);
    }

    let mut count = 0usize;
    match nt::parse_str(&content).for_each_triple(|_| count += 1) {
        Ok(()) => {
            report.push(TestResult::pass(
                "artifacts/ntriples",
                format!("{NTRIPLES_FILE} is valid N-Triples ({count} triples)"),
            ));
            Ok(Some(count))
        }
        Err(e) => {
            report.push(TestResult::fail_with_details(
                "artifacts/ntriples",
                format!("{NTRIPLES_FILE} does not parse as N-Triples"),
                vec![e.to_string()],
            ));
            Ok(None)
        }
    }
}
