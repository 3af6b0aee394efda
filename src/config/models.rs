//! Device data model
//!
//! This module defines the device record stored in the device file.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Default Wake-on-LAN UDP port
pub const DEFAULT_PORT: u16 = 9;

/// A network device that can be woken up
///
/// The type performs no validation; callers check input with
/// [`crate::validation`] before accepting a device into the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "DeviceRecord", into = "DeviceRecord")]
pub struct Device {
    /// Display name shown in listings
    pub name: String,
    /// MAC address, stored uppercase
    pub mac_address: String,
    /// Unicast target; empty means broadcast mode
    pub ip_address: String,
    /// Destination UDP port
    pub port: u16,
}

/// On-disk shape of a device
///
/// `ip_address` and `port` may be absent in older files.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct DeviceRecord {
    name: String,
    mac_address: String,
    #[serde(default)]
    ip_address: String,
    #[serde(default = "default_port")]
    port: u16,
}

const fn default_port() -> u16 {
    DEFAULT_PORT
}

impl Device {
    /// Create a device; the MAC address is uppercased, everything else is kept verbatim
    pub fn new(
        name: impl Into<String>,
        mac_address: &str,
        ip_address: impl Into<String>,
        port: u16,
    ) -> Self {
        Self {
            name: name.into(),
            mac_address: mac_address.to_uppercase(),
            ip_address: ip_address.into(),
            port,
        }
    }

    /// Whether the magic packet goes to the broadcast address rather than a host
    pub fn is_broadcast(&self) -> bool {
        self.ip_address.is_empty()
    }

    /// Destination column for listings: the IP, or `Broadcast`
    pub fn target_label(&self) -> &str {
        if self.is_broadcast() {
            "Broadcast"
        } else {
            &self.ip_address
        }
    }
}

impl From<DeviceRecord> for Device {
    fn from(record: DeviceRecord) -> Self {
        Self::new(
            record.name,
            &record.mac_address,
            record.ip_address,
            record.port,
        )
    }
}

impl From<Device> for DeviceRecord {
    fn from(device: Device) -> Self {
        Self {
            name: device.name,
            mac_address: device.mac_address,
            ip_address: device.ip_address,
            port: device.port,
        }
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Device(name='{}', mac='{}', ip='{}', port={})",
            self.name, self.mac_address, self.ip_address, self.port
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_uppercases_mac() {
        let device = Device::new("Office PC", "aa-bb-cc-dd-ee-ff", "", 9);
        assert_eq!(device.mac_address, "AA-BB-CC-DD-EE-FF");
        assert_eq!(device.name, "Office PC");
    }

    #[test]
    fn test_broadcast_label() {
        let device = Device::new("NAS", "AA:BB:CC:DD:EE:FF", "", 9);
        assert!(device.is_broadcast());
        assert_eq!(device.target_label(), "Broadcast");

        let device = Device::new("NAS", "AA:BB:CC:DD:EE:FF", "192.168.1.20", 7);
        assert!(!device.is_broadcast());
        assert_eq!(device.target_label(), "192.168.1.20");
    }

    #[test]
    fn test_serialization_field_names() {
        let device = Device::new("Office PC", "AA:BB:CC:DD:EE:FF", "", 9);
        let value = serde_json::to_value(&device).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "name": "Office PC",
                "mac_address": "AA:BB:CC:DD:EE:FF",
                "ip_address": "",
                "port": 9
            })
        );
    }

    #[test]
    fn test_missing_optional_fields_use_defaults() {
        let json = r#"{"name": "Desk", "mac_address": "aa:bb:cc:dd:ee:ff"}"#;
        let device: Device = serde_json::from_str(json).unwrap();
        assert_eq!(device.ip_address, "");
        assert_eq!(device.port, DEFAULT_PORT);
        assert_eq!(device.mac_address, "AA:BB:CC:DD:EE:FF");
    }

    #[test]
    fn test_missing_required_field_fails() {
        let json = r#"{"name": "Desk", "ip_address": "10.0.0.2"}"#;
        assert!(serde_json::from_str::<Device>(json).is_err());
    }

    #[test]
    fn test_out_of_range_port_fails() {
        let json = r#"{"name": "Desk", "mac_address": "AA:BB:CC:DD:EE:FF", "port": 70000}"#;
        assert!(serde_json::from_str::<Device>(json).is_err());
    }

    #[test]
    fn test_display() {
        let device = Device::new("Desk", "AA:BB:CC:DD:EE:FF", "10.0.0.2", 7);
        assert_eq!(
            device.to_string(),
            "Device(name='Desk', mac='AA:BB:CC:DD:EE:FF', ip='10.0.0.2', port=7)"
        );
    }
}
