//! Mapper configuration.
//!
//! Every field has a documented default, so an empty TOML document yields
//! [`MapperConfig::default`]. Tables are ordered lists rather than maps:
//! the keyword table is evaluated first-match-wins, and the other tables keep
//! their declaration order for reproducible diagnostics.
//!
//! ```toml
//! strategy = "exact"
//! emit_parameters = false
//!
//! [[aliases]]
//! declared_type = "RadiatorThermostat"
//! entity_type = "Thermostat"
//!
//! [[aliases]]
//! declared_type = "HotelRoom"     # no entity_type: not applicable
//!
//! [[keywords]]
//! keyword = "thermostat"
//! class = "Thermostat"
//! ```

use std::path::Path;

use iotkg_ontology::model::iris;
use serde::{Deserialize, Serialize};

use crate::classes::OntologyClass;
use crate::error::MapperError;

/// Default base URL of the FIWARE NGSI v2 entities endpoint.
pub const DEFAULT_BASE_URL: &str = "http://fiware.rwth-aachen.de/v2/entities/";

/// Which classification strategy the classifier uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Match the declared type exactly against [`MapperConfig::exact_types`].
    Exact,
    /// Scan the lower-cased declared type for the first keyword in
    /// [`MapperConfig::keywords`] it contains.
    #[default]
    Keyword,
}

impl std::str::FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "exact" => Ok(Strategy::Exact),
            "keyword" => Ok(Strategy::Keyword),
            other => Err(format!("unknown strategy '{other}' (expected 'exact' or 'keyword')")),
        }
    }
}

/// One row of the entity alias table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AliasEntry {
    /// Device type as it appears in the inventory.
    pub declared_type: String,
    /// Entity type used by endpoint rules; absent means "not applicable".
    #[serde(default)]
    pub entity_type: Option<String>,
}

/// One row of the exact-type table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExactEntry {
    /// Device type, compared case-sensitively.
    pub declared_type: String,
    /// Class assigned to that type.
    pub class: OntologyClass,
}

/// One row of the keyword table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KeywordEntry {
    /// Lower-case substring searched for in the declared type.
    pub keyword: String,
    /// Class assigned on a hit.
    pub class: OntologyClass,
}

/// Complete mapper configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MapperConfig {
    /// Prefix of every request target URI. Default: [`DEFAULT_BASE_URL`].
    pub base_url: String,
    /// Namespace of synthesized identifiers. Default: `http://example.com/resource/`.
    pub resource_namespace: String,
    /// Classification strategy. Default: keyword.
    pub strategy: Strategy,
    /// Export in device / API / header sections. Default: true.
    pub partition: bool,
    /// Emit `http:Parameter` nodes for query and path parameters. Default: true.
    pub emit_parameters: bool,
    /// Assert the room class for room devices that are otherwise skipped.
    /// Default: false.
    pub room_direct_assertion: bool,
    /// Declared type → endpoint entity type. Default: [`default_aliases`].
    pub aliases: Vec<AliasEntry>,
    /// Exact-type classification table. Default: [`default_exact_types`].
    pub exact_types: Vec<ExactEntry>,
    /// Keyword classification table. Default: [`default_keywords`].
    pub keywords: Vec<KeywordEntry>,
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            resource_namespace: iris::EX.to_owned(),
            strategy: Strategy::default(),
            partition: true,
            emit_parameters: true,
            room_direct_assertion: false,
            aliases: default_aliases(),
            exact_types: default_exact_types(),
            keywords: default_keywords(),
        }
    }
}

impl MapperConfig {
    /// Parses a TOML document. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`MapperError::Config`] on malformed TOML or unknown fields.
    pub fn from_toml_str(text: &str, origin: &str) -> Result<Self, MapperError> {
        toml::from_str(text).map_err(|source| MapperError::Config {
            path: origin.to_owned(),
            source,
        })
    }

    /// Reads and parses a TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`MapperError::Io`] if the file cannot be read and
    /// [`MapperError::Config`] if it does not parse.
    pub fn from_file(path: &Path) -> Result<Self, MapperError> {
        let text = std::fs::read_to_string(path).map_err(|source| MapperError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text, &path.display().to_string())
    }
}

/// Default alias table: thermostats and temperature sensors have endpoints,
/// hotel rooms do not.
#[must_use]
pub fn default_aliases() -> Vec<AliasEntry> {
    vec![
        AliasEntry {
            declared_type: "RadiatorThermostat".to_owned(),
            entity_type: Some("Thermostat".to_owned()),
        },
        AliasEntry {
            declared_type: "TemperatureSensor".to_owned(),
            entity_type: Some("TemperatureSensor".to_owned()),
        },
        AliasEntry {
            declared_type: "HotelRoom".to_owned(),
            entity_type: None,
        },
    ]
}

/// Default exact-type table.
#[must_use]
pub fn default_exact_types() -> Vec<ExactEntry> {
    [
        ("TemperatureSensor", OntologyClass::AirTemperatureSensor),
        ("RadiatorThermostat", OntologyClass::Thermostat),
        ("HotelRoom", OntologyClass::Room),
    ]
    .into_iter()
    .map(|(declared_type, class)| ExactEntry {
        declared_type: declared_type.to_owned(),
        class,
    })
    .collect()
}

/// Default keyword table, in evaluation order.
#[must_use]
pub fn default_keywords() -> Vec<KeywordEntry> {
    [
        ("temperature", OntologyClass::AirTemperatureSensor),
        ("co2", OntologyClass::Co2Sensor),
        ("humidity", OntologyClass::HumiditySensor),
        ("occupancy", OntologyClass::OccupancySensor),
        ("thermostat", OntologyClass::Thermostat),
        ("room", OntologyClass::Room),
    ]
    .into_iter()
    .map(|(keyword, class)| KeywordEntry {
        keyword: keyword.to_owned(),
        class,
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_default() {
        let config = MapperConfig::from_toml_str("", "empty").unwrap();
        assert_eq!(config, MapperConfig::default());
    }

    #[test]
    fn overrides_and_not_applicable_alias() {
        let text = r#"
strategy = "exact"
emit_parameters = false

[[aliases]]
declared_type = "Radiator"
entity_type = "Thermostat"

[[aliases]]
declared_type = "Lobby"

[[keywords]]
keyword = "thermostat"
class = "Thermostat"

[[keywords]]
keyword = "sensor"
class = "Temperature_Sensor"
"#;
        let config = MapperConfig::from_toml_str(text, "inline").unwrap();
        assert_eq!(config.strategy, Strategy::Exact);
        assert!(!config.emit_parameters);
        assert!(config.partition);
        assert_eq!(config.aliases.len(), 2);
        assert_eq!(config.aliases[1].entity_type, None);
        assert_eq!(config.keywords[1].class, OntologyClass::TemperatureSensor);
        assert_eq!(config.exact_types, default_exact_types());
    }

    #[test]
    fn unknown_field_is_rejected() {
        let err = MapperConfig::from_toml_str("partitions = true", "typo").unwrap_err();
        assert!(matches!(err, MapperError::Config { .. }));
    }

    #[test]
    fn strategy_from_str() {
        assert_eq!("Exact".parse::<Strategy>(), Ok(Strategy::Exact));
        assert!("best".parse::<Strategy>().is_err());
    }
}
