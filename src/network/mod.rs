//! Wake-on-LAN networking module
//!
//! Builds magic packets and sends them as single UDP datagrams.
//!
//! # Wire format
//!
//! ```text
//! FF FF FF FF FF FF | MAC x 16
//! 6 bytes           | 96 bytes      = 102 bytes of UDP payload
//! ```
//!
//! Devices with an IP address receive the packet as ordinary unicast. Devices
//! without one are reached through a broadcast address, which needs `SO_BROADCAST`
//! on the sending socket. Wake-on-LAN is fire-and-forget: a successful send says
//! nothing about whether the target woke up.

pub mod broadcast;
pub mod magic_packet;
pub mod sender;

pub use broadcast::{LIMITED_BROADCAST, parse_broadcast_target, subnet_broadcast};
pub use magic_packet::{MAGIC_PACKET_LEN, MacAddress, MagicPacket};
pub use sender::{WakeOnLanSender, WakeReport};
