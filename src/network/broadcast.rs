//! Broadcast destination selection
//!
//! Broadcast-mode devices are woken through either the limited broadcast address
//! (`255.255.255.255`) or a directed subnet broadcast such as `192.168.1.255`.

use crate::error::{Result, WolError};
use ipnetwork::Ipv4Network;
use std::net::Ipv4Addr;

/// The limited broadcast address, never forwarded by routers
pub const LIMITED_BROADCAST: Ipv4Addr = Ipv4Addr::BROADCAST;

/// Broadcast address of the network `addr/prefix_len`
pub fn subnet_broadcast(addr: Ipv4Addr, prefix_len: u8) -> Result<Ipv4Addr> {
    let network = Ipv4Network::new(addr, prefix_len)
        .map_err(|_| WolError::InvalidIpAddress(format!("{addr}/{prefix_len}")))?;
    Ok(network.broadcast())
}

/// Parse a broadcast target given as an address (`192.168.1.255`) or a network
/// in CIDR notation (`192.168.1.0/24`), returning the address to send to
pub fn parse_broadcast_target(value: &str) -> Result<Ipv4Addr> {
    let value = value.trim();
    let invalid = || WolError::InvalidIpAddress(value.to_string());

    match value.split_once('/') {
        None => value.parse().map_err(|_| invalid()),
        Some((addr, prefix_len)) => {
            let addr: Ipv4Addr = addr.parse().map_err(|_| invalid())?;
            let prefix_len: u8 = prefix_len.parse().map_err(|_| invalid())?;
            subnet_broadcast(addr, prefix_len)
        }
    }
}
