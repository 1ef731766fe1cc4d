//! Device inventory input.
//!
//! The inventory is a JSON array of entity records. Only `id` and `type` are
//! read; any other attributes an entity carries are ignored.

use std::path::Path;

use serde::Deserialize;

use crate::error::MapperError;

/// Separator used inside externally assigned ids, e.g. `Dev:42`.
pub const NAMESPACE_SEPARATOR: char = ':';

/// One device as declared by the inventory.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DeviceRecord {
    /// Externally assigned id; may contain [`NAMESPACE_SEPARATOR`].
    pub id: String,
    /// Declared device type, e.g. `RadiatorThermostat`.
    #[serde(rename = "type")]
    pub declared_type: String,
}

impl DeviceRecord {
    /// Builds a record.
    pub fn new(id: impl Into<String>, declared_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            declared_type: declared_type.into(),
        }
    }
}

/// Replaces every [`NAMESPACE_SEPARATOR`] in `id` with `_`.
#[must_use]
pub fn sanitize_id(id: &str) -> String {
    id.replace(NAMESPACE_SEPARATOR, "_")
}

/// Parses an inventory document.
///
/// # Errors
///
/// Returns [`MapperError::Json`] if `text` is not a JSON array of records
/// with string `id` and `type` fields.
pub fn parse_inventory(text: &str, origin: &str) -> Result<Vec<DeviceRecord>, MapperError> {
    serde_json::from_str(text).map_err(|source| MapperError::Json {
        path: origin.to_owned(),
        source,
    })
}

/// Reads and parses an inventory file.
///
/// # Errors
///
/// Returns [`MapperError::Io`] if the file cannot be read and
/// [`MapperError::Json`] if it does not parse.
pub fn load_inventory(path: &Path) -> Result<Vec<DeviceRecord>, MapperError> {
    let text = std::fs::read_to_string(path).map_err(|source| MapperError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_inventory(&text, &path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extra_attributes_are_ignored() {
        let text = r#"[
            {"id": "Dev:42", "type": "RadiatorThermostat",
             "targetTemperature": {"type": "Number", "value": 21.5}},
            {"id": "Room:101", "type": "HotelRoom"}
        ]"#;
        let devices = parse_inventory(text, "inline").unwrap();
        assert_eq!(devices.len(), 2);
        assert_eq!(devices[0], DeviceRecord::new("Dev:42", "RadiatorThermostat"));
    }

    #[test]
    fn missing_type_is_an_error() {
        let err = parse_inventory(r#"[{"id": "x"}]"#, "inline").unwrap_err();
        assert!(matches!(err, MapperError::Json { .. }));
    }

    #[test]
    fn sanitize_replaces_every_separator() {
        assert_eq!(sanitize_id("urn:ngsi:Dev:42"), "urn_ngsi_Dev_42");
        assert_eq!(sanitize_id("plain"), "plain");
    }
}
