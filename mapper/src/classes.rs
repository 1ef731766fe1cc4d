//! Ontology classes a device can be classified into.

use std::fmt;

use iotkg_ontology::model::iris;
use serde::{Deserialize, Serialize};

/// How a class links its instance to the rest of the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassRole {
    /// Sensor-like point: `hasValue` plus `isPointOf` the location.
    Point,
    /// Thermostat: `hasValue`, `hasLocation`, and a setpoint companion.
    Thermostat,
    /// Room: a class assertion only, never an HTTP request.
    Room,
}

/// Brick / RealEstateCore classes known to the classifier.
///
/// Serialized by their local names, e.g. `"Air_Temperature_Sensor"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OntologyClass {
    /// `brick:Air_Temperature_Sensor`.
    #[serde(rename = "Air_Temperature_Sensor")]
    AirTemperatureSensor,
    /// `brick:Temperature_Sensor`.
    #[serde(rename = "Temperature_Sensor")]
    TemperatureSensor,
    /// `brick:CO2_Sensor`.
    #[serde(rename = "CO2_Sensor")]
    Co2Sensor,
    /// `brick:Humidity_Sensor`.
    #[serde(rename = "Humidity_Sensor")]
    HumiditySensor,
    /// `brick:Occupancy_Sensor`.
    #[serde(rename = "Occupancy_Sensor")]
    OccupancySensor,
    /// `brick:Thermostat`.
    Thermostat,
    /// `rec:Room`.
    Room,
}

impl OntologyClass {
    /// Local name within the class's namespace.
    #[must_use]
    pub fn local_name(self) -> &'static str {
        match self {
            OntologyClass::AirTemperatureSensor => "Air_Temperature_Sensor",
            OntologyClass::TemperatureSensor => "Temperature_Sensor",
            OntologyClass::Co2Sensor => "CO2_Sensor",
            OntologyClass::HumiditySensor => "Humidity_Sensor",
            OntologyClass::OccupancySensor => "Occupancy_Sensor",
            OntologyClass::Thermostat => "Thermostat",
            OntologyClass::Room => "Room",
        }
    }

    /// Full class IRI.
    #[must_use]
    pub fn iri(self) -> String {
        let ns = match self {
            OntologyClass::Room => iris::REC,
            _ => iris::BRICK,
        };
        format!("{ns}{}", self.local_name())
    }

    /// Linkage role of the class.
    #[must_use]
    pub fn role(self) -> ClassRole {
        match self {
            OntologyClass::Thermostat => ClassRole::Thermostat,
            OntologyClass::Room => ClassRole::Room,
            _ => ClassRole::Point,
        }
    }
}

impl fmt::Display for OntologyClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.local_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn room_lives_in_rec() {
        assert_eq!(OntologyClass::Room.iri(), "https://w3id.org/rec#Room");
        assert_eq!(
            OntologyClass::Co2Sensor.iri(),
            "https://brickschema.org/schema/Brick#CO2_Sensor"
        );
    }

    #[test]
    fn sensors_are_points() {
        for class in [
            OntologyClass::AirTemperatureSensor,
            OntologyClass::TemperatureSensor,
            OntologyClass::Co2Sensor,
            OntologyClass::HumiditySensor,
            OntologyClass::OccupancySensor,
        ] {
            assert_eq!(class.role(), ClassRole::Point, "{class}");
        }
    }
}
