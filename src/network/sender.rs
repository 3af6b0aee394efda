//! Wake-on-LAN packet transmission
//!
//! Each wake request opens a UDP socket, enables `SO_BROADCAST` when the
//! destination is a broadcast address, sends one 102-byte datagram and drops the
//! socket. Nothing is retried and no reply is expected.

use crate::config::Device;
use crate::error::{Result, WolError};
use crate::network::broadcast::LIMITED_BROADCAST;
use crate::network::magic_packet::{MacAddress, MagicPacket};
use crate::validation;
use rayon::prelude::*;
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4, ToSocketAddrs, UdpSocket};
use tracing::{debug, info, warn};

/// Outcome of one device in a batch wake
#[derive(Debug)]
pub struct WakeReport {
    /// Name of the device the packet was meant for
    pub device_name: String,
    /// Address the packet was sent to, or why it was not
    pub result: Result<SocketAddr>,
}

/// Sends magic packets over UDP
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WakeOnLanSender {
    broadcast_addr: Ipv4Addr,
    bind_addr: Ipv4Addr,
}

impl Default for WakeOnLanSender {
    fn default() -> Self {
        Self {
            broadcast_addr: LIMITED_BROADCAST,
            bind_addr: Ipv4Addr::UNSPECIFIED,
        }
    }
}

impl WakeOnLanSender {
    /// Sender using the limited broadcast address and any local interface
    pub fn new() -> Self {
        Self::default()
    }

    /// Send broadcast-mode packets to `addr` instead of `255.255.255.255`
    #[must_use]
    pub fn with_broadcast_addr(mut self, addr: Ipv4Addr) -> Self {
        self.broadcast_addr = addr;
        self
    }

    /// Bind outgoing sockets to `addr`, which selects the interface used
    #[must_use]
    pub fn with_bind_addr(mut self, addr: Ipv4Addr) -> Self {
        self.bind_addr = addr;
        self
    }

    /// Address used for broadcast-mode devices
    pub fn broadcast_addr(&self) -> Ipv4Addr {
        self.broadcast_addr
    }

    /// Wake `device`: unicast to its IP if it has one, otherwise broadcast
    ///
    /// Returns the address the datagram was sent to.
    pub fn wake_device(&self, device: &Device) -> Result<SocketAddr> {
        let ip = (!device.is_broadcast()).then_some(device.ip_address.as_str());
        let sent_to = self.wake_by_address(&device.mac_address, ip, device.port)?;
        info!("Sent magic packet for '{}' to {}", device.name, sent_to);
        Ok(sent_to)
    }

    /// Wake a device by raw fields; `None` or an empty `ip` means broadcast
    ///
    /// `ip` is normally an IPv4 address but a resolvable host name is accepted too.
    pub fn wake_by_address(&self, mac: &str, ip: Option<&str>, port: u16) -> Result<SocketAddr> {
        let mac: MacAddress = mac.trim().parse()?;
        let packet = MagicPacket::new(&mac);

        let target = match ip.map(str::trim).filter(|ip| !ip.is_empty()) {
            Some(host) => resolve_ipv4(host, port)?,
            None => SocketAddrV4::new(self.broadcast_addr, port),
        };

        self.send(&packet, target)?;
        debug!("Magic packet for {} sent to {}", mac, target);
        Ok(SocketAddr::V4(target))
    }

    /// Wake every device independently, in parallel
    ///
    /// Reports come back in the order of `devices`; a failure for one device does
    /// not stop the others.
    pub fn wake_all(&self, devices: &[Device]) -> Vec<WakeReport> {
        devices
            .par_iter()
            .map(|device| {
                let result = self.wake_device(device);
                if let Err(ref e) = result {
                    warn!("Failed to wake '{}': {}", device.name, e);
                }
                WakeReport {
                    device_name: device.name.clone(),
                    result,
                }
            })
            .collect()
    }

    /// Whether `mac` is six hex pairs separated by `:` or `-`
    pub fn validate_mac(mac: &str) -> bool {
        validation::validate_mac(mac)
    }

    /// Whether `ip` is a strict dotted-quad IPv4 address
    pub fn validate_ip(ip: &str) -> bool {
        validation::validate_ip(ip)
    }

    fn send(&self, packet: &MagicPacket, target: SocketAddrV4) -> Result<()> {
        let socket = UdpSocket::bind(SocketAddrV4::new(self.bind_addr, 0))
            .map_err(|e| WolError::transmission(target.to_string(), e))?;

        if self.is_broadcast_target(*target.ip()) {
            socket
                .set_broadcast(true)
                .map_err(|e| WolError::transmission(target.to_string(), e))?;
        }

        let sent = socket
            .send_to(packet.as_bytes(), target)
            .map_err(|e| WolError::transmission(target.to_string(), e))?;

        if sent != packet.as_bytes().len() {
            return Err(WolError::transmission(
                target.to_string(),
                std::io::Error::new(
                    std::io::ErrorKind::WriteZero,
                    format!("short send: {sent} of {} bytes", packet.as_bytes().len()),
                ),
            ));
        }

        Ok(())
    }

    fn is_broadcast_target(&self, ip: Ipv4Addr) -> bool {
        ip == self.broadcast_addr || ip.is_broadcast()
    }
}

/// Resolve `host` to an IPv4 socket address, preferring a literal address
fn resolve_ipv4(host: &str, port: u16) -> Result<SocketAddrV4> {
    if let Ok(ip) = host.parse::<Ipv4Addr>() {
        return Ok(SocketAddrV4::new(ip, port));
    }

    let target = format!("{host}:{port}");
    (host, port)
        .to_socket_addrs()
        .map_err(|e| WolError::transmission(target.clone(), e))?
        .find_map(|addr| match addr {
            SocketAddr::V4(v4) => Some(v4),
            SocketAddr::V6(_) => None,
        })
        .ok_or_else(|| {
            WolError::transmission(
                target,
                std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("no IPv4 address for {host}"),
                ),
            )
        })
}
