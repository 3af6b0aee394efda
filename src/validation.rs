//! Input validation for device fields
//!
//! These checks run at the edit boundary, before a [`Device`] is accepted into the
//! registry. IP validation is advisory: [`DeviceInput::into_device`] lets the caller
//! keep an address that fails it.

use crate::config::Device;
use crate::error::{Result, WolError};
use crate::network::MacAddress;
use std::net::Ipv4Addr;

/// Whether `mac` is six hex pairs separated by `:` or `-`
pub fn validate_mac(mac: &str) -> bool {
    MacAddress::parse(mac).is_some()
}

/// Whether `ip` is a strict dotted-quad IPv4 address
///
/// Leading zeros, shorthand forms (`10.1`) and surrounding whitespace are rejected.
pub fn validate_ip(ip: &str) -> bool {
    ip.parse::<Ipv4Addr>().is_ok()
}

/// Parse a port number, accepting 0 through 65535 inclusive
pub fn parse_port(port: &str) -> Result<u16> {
    let value: i64 = port
        .trim()
        .parse()
        .map_err(|_| WolError::InvalidPort(port.to_string()))?;
    u16::try_from(value).map_err(|_| WolError::InvalidPort(port.to_string()))
}

/// Raw device fields as typed by a user
#[derive(Debug, Clone, Default)]
pub struct DeviceInput {
    /// Display name
    pub name: String,
    /// MAC address in either accepted notation
    pub mac_address: String,
    /// Optional IPv4 address; empty means broadcast
    pub ip_address: String,
    /// Port as text
    pub port: String,
}

impl DeviceInput {
    /// Validate the fields and build a device
    ///
    /// Fields are trimmed first. An IP address that fails [`validate_ip`] is rejected
    /// unless `allow_invalid_ip` is set.
    pub fn into_device(self, allow_invalid_ip: bool) -> Result<Device> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(WolError::InvalidName);
        }

        let mac = self.mac_address.trim();
        if !validate_mac(mac) {
            return Err(WolError::InvalidMacAddress(mac.to_string()));
        }

        let port = parse_port(&self.port)?;

        let ip = self.ip_address.trim();
        if !ip.is_empty() && !validate_ip(ip) && !allow_invalid_ip {
            return Err(WolError::InvalidIpAddress(ip.to_string()));
        }

        Ok(Device::new(name, mac, ip, port))
    }
}
