//! Deterministic identifiers for synthesized resources.
//!
//! Every identifier is `namespace + local`, where `local` is built from a
//! role or type name and the device's sanitized id. The same inputs always
//! yield byte-identical identifiers, so repeated runs and repeated devices
//! converge on the same nodes.

use iotkg_ontology::Node;

use crate::inventory::{sanitize_id, DeviceRecord};
use crate::openapi::HttpMethod;

/// Role name used for location identifiers.
pub const LOCATION_ROLE: &str = "HotelRoom";

/// Role name used for setpoint companion identifiers.
pub const SETPOINT_ROLE: &str = "temperatureSetpoint";

/// Mints identifiers in one namespace.
#[derive(Debug, Clone)]
pub struct Identifiers {
    namespace: String,
}

impl Identifiers {
    /// Identifiers under `namespace`, e.g. `http://example.com/resource/`.
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
        }
    }

    /// `{role}_{sanitizedId}`. The namespace separator never survives into
    /// the local name, whichever component carried it.
    fn mint(&self, role: &str, device: &DeviceRecord) -> Node {
        let local = sanitize_id(&format!("{role}_{}", device.id));
        Node::Iri(format!("{}{local}", self.namespace))
    }

    /// The device instance: `{declaredType}_{id}`.
    #[must_use]
    pub fn instance(&self, device: &DeviceRecord) -> Node {
        self.mint(&device.declared_type, device)
    }

    /// The device's location: `HotelRoom_{id}`. Shared by every device with
    /// the same sanitized id.
    #[must_use]
    pub fn location(&self, device: &DeviceRecord) -> Node {
        self.mint(LOCATION_ROLE, device)
    }

    /// A thermostat's setpoint companion: `temperatureSetpoint_{id}`.
    #[must_use]
    pub fn setpoint(&self, device: &DeviceRecord) -> Node {
        self.mint(SETPOINT_ROLE, device)
    }

    /// The device's HTTP request: `{METHOD}_{id}`.
    #[must_use]
    pub fn request(&self, method: HttpMethod, device: &DeviceRecord) -> Node {
        self.mint(method.as_str(), device)
    }

    /// A header node: `Header_{name without '-'}_{id}`.
    #[must_use]
    pub fn header(&self, header_name: &str, device: &DeviceRecord) -> Node {
        self.mint(&format!("Header_{}", header_name.replace('-', "")), device)
    }

    /// A parameter node: `Param_{name}_{id}`.
    #[must_use]
    pub fn parameter(&self, parameter_name: &str, device: &DeviceRecord) -> Node {
        self.mint(&format!("Param_{parameter_name}"), device)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iotkg_ontology::model::iris::EX;

    fn ids() -> Identifiers {
        Identifiers::new(EX)
    }

    #[test]
    fn identifier_shapes() {
        let dev = DeviceRecord::new("Dev:42", "RadiatorThermostat");
        let ex = |local: &str| Node::iri(format!("{EX}{local}"));
        assert_eq!(ids().instance(&dev), ex("RadiatorThermostat_Dev_42"));
        assert_eq!(ids().location(&dev), ex("HotelRoom_Dev_42"));
        assert_eq!(ids().setpoint(&dev), ex("temperatureSetpoint_Dev_42"));
        assert_eq!(ids().request(HttpMethod::Patch, &dev), ex("PATCH_Dev_42"));
        assert_eq!(ids().header("Fiware-Service", &dev), ex("Header_FiwareService_Dev_42"));
        assert_eq!(ids().parameter("type", &dev), ex("Param_type_Dev_42"));
    }

    #[test]
    fn location_is_shared_across_types() {
        let sensor = DeviceRecord::new("Room:7", "TemperatureSensor");
        let thermostat = DeviceRecord::new("Room:7", "RadiatorThermostat");
        assert_eq!(ids().location(&sensor), ids().location(&thermostat));
        assert_ne!(ids().instance(&sensor), ids().instance(&thermostat));
    }
}
