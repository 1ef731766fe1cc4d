//! `iotkg-build` — Maps a device inventory and an OpenAPI description to a
//! knowledge graph and writes the artifacts to the output directory.
//!
//! **Outputs:**
//! - `<out>/final_output.ttl` — Turtle 1.1, sectioned unless `--no-partition`
//! - `<out>/final_output.nt` — N-Triples
//!
//! **Usage:**
//! ```text
//! iotkg-build [--devices <path>] [--openapi <path>] [--seed <ttl>]... [--config <toml>]
//!             [--strategy exact|keyword] [--no-partition] [--no-parameters] [--check] [--out <path>]
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use iotkg_clients::{init_tracing, print_report};
use iotkg_mapper::{extract_rules_from_file, load_inventory, Mapper, MapperConfig, Strategy};
use iotkg_ontology::serializer::{ntriples, turtle, NTRIPLES_FILE, TURTLE_FILE};
use iotkg_ontology::{load_turtle_file, Assembly, AssertionStore};

/// Build the device knowledge graph artifacts.
#[derive(Parser)]
#[command(name = "iotkg-build", about = "Map devices and API operations to a knowledge graph")]
struct Args {
    /// Device inventory (JSON array of {id, type} records).
    #[arg(long, default_value = "data/original_data.json")]
    devices: PathBuf,

    /// OpenAPI description (JSON).
    #[arg(long, default_value = "data/openAPI_spec.json")]
    openapi: PathBuf,

    /// Turtle documents merged into the graph before mapping. Repeatable.
    #[arg(long = "seed")]
    seeds: Vec<PathBuf>,

    /// Mapper configuration (TOML). Defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the configured classification strategy.
    #[arg(long)]
    strategy: Option<Strategy>,

    /// Write one undivided graph instead of device / API / header sections.
    #[arg(long)]
    no_partition: bool,

    /// Do not emit http:Parameter nodes.
    #[arg(long)]
    no_parameters: bool,

    /// Run the structural checks before writing and fail on any violation.
    #[arg(long)]
    check: bool,

    /// Output directory for generated artifacts.
    #[arg(long, default_value = "output")]
    out: PathBuf,
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => MapperConfig::from_file(path)?,
        None => MapperConfig::default(),
    };
    if let Some(strategy) = args.strategy {
        config.strategy = strategy;
    }
    if args.no_partition {
        config.partition = false;
    }
    if args.no_parameters {
        config.emit_parameters = false;
    }

    let mut store = AssertionStore::new();
    for seed in &args.seeds {
        let loaded = load_turtle_file(&mut store, seed)?;
        tracing::info!(seed = %seed.display(), parsed = loaded.parsed, inserted = loaded.inserted, "seed loaded");
    }

    let extraction = extract_rules_from_file(&args.openapi)?;
    let devices = load_inventory(&args.devices)?;
    let summary = Mapper::new(&config).run(&mut store, &devices, &extraction.rules);

    println!(
        "Mapped {} of {} devices using {} endpoint rules ({} paths excluded); {} assertions",
        summary.mapped(),
        devices.len(),
        extraction.rules.len(),
        extraction.rejected.len(),
        store.len()
    );

    if args.check {
        let report = iotkg_conformance::check_store(&store, &config.resource_namespace);
        let failed = print_report(&report);
        if failed > 0 {
            bail!("{failed} structural check(s) failed; no artifacts written");
        }
    }

    let out = &args.out;
    fs::create_dir_all(out)
        .with_context(|| format!("Failed to create output directory: {}", out.display()))?;

    let assembly = Assembly::from_store(&store, config.partition);

    let ttl_path = out.join(TURTLE_FILE);
    fs::write(&ttl_path, turtle::to_turtle(&assembly))
        .with_context(|| format!("Failed to write {}", ttl_path.display()))?;
    println!("  Written: {}", ttl_path.display());

    let nt_path = out.join(NTRIPLES_FILE);
    fs::write(&nt_path, ntriples::to_ntriples(&assembly))
        .with_context(|| format!("Failed to write {}", nt_path.display()))?;
    println!("  Written: {}", nt_path.display());

    println!("Done: RDF written to {}", ttl_path.display());
    Ok(())
}
