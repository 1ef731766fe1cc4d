//! Shared inputs for the integration tests.

#![allow(dead_code)]

/// A FIWARE-style API description with one thermostat path, one sensor path
/// and one path without an attribute segment.
pub const OPENAPI: &str = r#"{
  "openapi": "3.0.0",
  "info": {"title": "FIWARE NGSI v2", "version": "1.0"},
  "paths": {
    "/v2/entities": {
      "get": {"parameters": [{"name": "limit", "in": "query", "schema": {"default": 20}}]}
    },
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
          {"name": "Fiware-Service", "in": "header", "schema": {"default": "iot"}},
          {"name": "Fiware-ServicePath", "in": "header", "schema": {"default": "/hotel"}}
        ]
      }
    }
  }
}"#;

/// Inventory mixing mapped, unmapped and room devices.
pub const INVENTORY: &str = r#"[
  {"id": "Dev:42", "type": "RadiatorThermostat"},
  {"id": "Sensor:7", "type": "TemperatureSensor", "temperature": {"value": 21.0}},
  {"id": "Room:101", "type": "HotelRoom"},
  {"id": "Lamp:3", "type": "CeilingLamp"}
]"#;
