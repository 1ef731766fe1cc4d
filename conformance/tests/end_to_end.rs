//! Maps a small inventory, writes both artifacts and validates them.

use std::fs;
use std::path::Path;

use iotkg_conformance::{check_store, run_all, Severity};
use iotkg_mapper::{extract_rules_from_str, DeviceRecord, Mapper, MapperConfig};
use iotkg_ontology::model::iris;
use iotkg_ontology::serializer::{ntriples, turtle, NTRIPLES_FILE, TURTLE_FILE};
use iotkg_ontology::{Assembly, AssertionStore};

const OPENAPI: &str = r#"{
  "paths": {
    "/v2/entities/{entityId}/attrs/targetTemperature/value": {
      "patch": {
        "parameters": [
          {"name": "entityId", "in": "path", "schema": {"type": "string"}},
          {"name": "type", "in": "query", "schema": {"default": "Thermostat"}},
          {"name": "Fiware-Service", "in": "header", "schema": {"default": "iot"}}
        ]
      }
    },
    "/v2/entities/{entityId}/attrs/temperature/value": {
      "get": {
        "parameters": [
          {"name": "type", "in": "query", "schema": {"default": "TemperatureSensor"}},
          {"name": "Fiware-ServicePath", "in": "header", "schema": {"default": "/hotel \"A\""}}
        ]
      }
    }
  }
}"#;

fn mapped_store() -> AssertionStore {
    let rules = extract_rules_from_str(OPENAPI, "openapi").unwrap().rules;
    let devices = vec![
        DeviceRecord::new("urn:Dev:42", "RadiatorThermostat"),
        DeviceRecord::new("Sensor:7", "TemperatureSensor"),
        DeviceRecord::new("Room:101", "HotelRoom"),
    ];
    let mut store = AssertionStore::new();
    Mapper::new(&MapperConfig::default()).run(&mut store, &devices, &rules);
    store
}

fn write_artifacts(store: &AssertionStore, dir: &Path, partition: bool) {
    let assembly = Assembly::from_store(store, partition);
    fs::write(dir.join(TURTLE_FILE), turtle::to_turtle(&assembly)).unwrap();
    fs::write(dir.join(NTRIPLES_FILE), ntriples::to_ntriples(&assembly)).unwrap();
}

#[test]
fn synthesized_store_is_well_formed() {
    let report = check_store(&mapped_store(), iris::EX);
    assert!(report.all_passed(), "{:#?}", report.results);
}

#[test]
fn exported_artifacts_conform() {
    let store = mapped_store();
    for partition in [true, false] {
        let dir = tempfile::tempdir().unwrap();
        write_artifacts(&store, dir.path(), partition);
        let report = run_all(dir.path()).unwrap();
        assert!(report.all_passed(), "{:#?}", report.results);
        let consistency = report
            .results
            .iter()
            .find(|r| r.validator == "artifacts/consistency")
            .unwrap();
        assert_eq!(
            consistency.message,
            format!("Turtle and N-Triples both carry {} triples", store.len())
        );
    }
}

#[test]
fn truncated_ntriples_is_inconsistent() {
    let store = mapped_store();
    let dir = tempfile::tempdir().unwrap();
    write_artifacts(&store, dir.path(), true);
    let nt_path = dir.path().join(NTRIPLES_FILE);
    let nt = fs::read_to_string(&nt_path).unwrap();
    let first_line = nt.lines().next().unwrap();
    fs::write(&nt_path, format!("{first_line}\n")).unwrap();

    let report = run_all(dir.path()).unwrap();
    let failed: Vec<_> = report
        .results
        .iter()
        .filter(|r| r.severity == Severity::Failure)
        .map(|r| r.validator.as_str())
        .collect();
    assert_eq!(failed, vec!["artifacts/consistency"]);
}

#[test]
fn missing_artifacts_fail() {
    let dir = tempfile::tempdir().unwrap();
    let report = run_all(dir.path()).unwrap();
    assert_eq!(report.failure_count(), 2);
}

#[test]
fn device_id_with_space_exports_parseable_artifacts() {
    let rules = extract_rules_from_str(OPENAPI, "openapi").unwrap().rules;
    let devices = vec![DeviceRecord::new("Sensor 7", "TemperatureSensor")];
    let mut store = AssertionStore::new();
    Mapper::new(&MapperConfig::default()).run(&mut store, &devices, &rules);
    assert!(!store.is_empty());

    let dir = tempfile::tempdir().unwrap();
    write_artifacts(&store, dir.path(), true);
    let report = run_all(dir.path()).unwrap();
    assert!(report.all_passed(), "{:#?}", report.results);

    let nt = fs::read_to_string(dir.path().join(NTRIPLES_FILE)).unwrap();
    assert!(nt.contains("/Sensor%207/attrs/temperature/value>"));
    assert!(!nt.contains("Sensor 7>"));
}
