use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::Ipv4Addr;

/// Placeholder used when no hardware address could be read for a device.
pub const UNKNOWN_MAC: &str = "unknown";

pub const ROUTER_ID: &str = "router";
pub const LOCAL_ID: &str = "local";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DeviceStatus {
    Online,
}

/// Heuristic device classification, serialized as its display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum DeviceType {
    Router,
    Computer,
    NetworkDevice,
    MobileDevice,
    Unknown,
    /// Label taken from the vendor prefix table, e.g. "Raspberry Pi".
    Vendor(String),
}

impl DeviceType {
    pub fn as_str(&self) -> &str {
        match self {
            DeviceType::Router => "Router",
            DeviceType::Computer => "Computer",
            DeviceType::NetworkDevice => "Network Device",
            DeviceType::MobileDevice => "Mobile Device",
            DeviceType::Unknown => "Unknown Device",
            DeviceType::Vendor(label) => label,
        }
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<DeviceType> for String {
    fn from(device_type: DeviceType) -> Self {
        device_type.as_str().to_string()
    }
}

impl From<String> for DeviceType {
    fn from(label: String) -> Self {
        match label.as_str() {
            "Router" => DeviceType::Router,
            "Computer" => DeviceType::Computer,
            "Network Device" => DeviceType::NetworkDevice,
            "Mobile Device" => DeviceType::MobileDevice,
            "Unknown Device" => DeviceType::Unknown,
            _ => DeviceType::Vendor(label),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NetworkDevice {
    pub id: String,
    pub ip: Ipv4Addr,
    pub mac: String,
    pub name: String,
    #[serde(rename = "type")]
    pub device_type: DeviceType,
    pub status: DeviceStatus,
}

impl NetworkDevice {
    /// True for the `router` and `local` entries, which are never filtered out.
    pub fn is_role_entry(&self) -> bool {
        self.id == ROUTER_ID || self.id == LOCAL_ID
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_device_serializes_with_wire_names() {
        let device = NetworkDevice {
            id: "dev-3".to_string(),
            ip: Ipv4Addr::new(192, 168, 1, 42),
            mac: UNKNOWN_MAC.to_string(),
            name: "Device 4".to_string(),
            device_type: DeviceType::MobileDevice,
            status: DeviceStatus::Online,
        };

        let value = serde_json::to_value(&device).unwrap();
        assert_eq!(value, json!({
            "id": "dev-3",
            "ip": "192.168.1.42",
            "mac": "unknown",
            "name": "Device 4",
            "type": "Mobile Device",
            "status": "Online"
        }));
    }

    #[test]
    fn test_vendor_label_survives_deserialization() {
        let device: NetworkDevice = serde_json::from_value(json!({
            "id": "dev-0",
            "ip": "10.0.0.7",
            "mac": "b8:27:eb:01:02:03",
            "name": "Device 1",
            "type": "Raspberry Pi",
            "status": "Online"
        })).unwrap();

        assert_eq!(device.device_type, DeviceType::Vendor("Raspberry Pi".to_string()));
        assert!(!device.is_role_entry());
    }
}
