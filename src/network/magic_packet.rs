//! MAC address parsing and magic packet construction
//!
//! A magic packet is a 6-byte synchronization stream of `0xFF` followed by the
//! target MAC address repeated 16 times, 102 bytes in total.

use crate::error::{Result, WolError};
use std::fmt;
use std::str::FromStr;

/// Length of the synchronization stream at the start of every magic packet
pub const SYNC_STREAM_LEN: usize = 6;

/// Number of times the target MAC address is repeated after the sync stream
pub const MAC_REPETITIONS: usize = 16;

/// Total payload length of a magic packet in bytes
pub const MAGIC_PACKET_LEN: usize = SYNC_STREAM_LEN + MAC_REPETITIONS * 6;

/// A 6-byte hardware address
///
/// Accepts six hex pairs separated by `:` or `-` (each separator may be either);
/// displays as uppercase colon-delimited pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MacAddress([u8; 6]);

impl MacAddress {
    /// Create a MAC address from raw bytes
    pub const fn new(bytes: [u8; 6]) -> Self {
        Self(bytes)
    }

    /// Get the underlying byte array
    pub const fn as_bytes(&self) -> &[u8; 6] {
        &self.0
    }

    /// Parse `XX:XX:XX:XX:XX:XX` or `XX-XX-XX-XX-XX-XX`, returning `None` on any deviation
    pub fn parse(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 17 {
            return None;
        }

        let mut mac = [0u8; 6];
        for (i, octet) in mac.iter_mut().enumerate() {
            let start = i * 3;
            if i < 5 && !matches!(bytes[start + 2], b':' | b'-') {
                return None;
            }
            *octet = (hex_value(bytes[start])? << 4) | hex_value(bytes[start + 1])?;
        }

        Some(Self(mac))
    }
}

fn hex_value(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl FromStr for MacAddress {
    type Err = WolError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s).ok_or_else(|| WolError::InvalidMacAddress(s.to_string()))
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02X}:{b:02X}:{c:02X}:{d:02X}:{e:02X}:{g:02X}")
    }
}

/// The fixed 102-byte Wake-on-LAN payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MagicPacket([u8; MAGIC_PACKET_LEN]);

impl MagicPacket {
    /// Build the payload for `mac`
    pub fn new(mac: &MacAddress) -> Self {
        let mut payload = [0xFF; MAGIC_PACKET_LEN];
        for chunk in payload[SYNC_STREAM_LEN..].chunks_exact_mut(6) {
            chunk.copy_from_slice(mac.as_bytes());
        }
        Self(payload)
    }

    /// Raw datagram bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_colon_separated() {
        let mac = MacAddress::parse("AA:BB:CC:DD:EE:FF").unwrap();
        assert_eq!(mac.as_bytes(), &[0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF]);
    }

    #[test]
    fn test_parse_hyphen_lowercase() {
        let mac = MacAddress::parse("aa-bb-cc-dd-ee-ff").unwrap();
        assert_eq!(mac.as_bytes(), &[0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF]);
    }

    #[test]
    fn test_parse_mixed_separators() {
        assert!(MacAddress::parse("00:11-22:33-44:55").is_some());
    }

    #[test]
    fn test_parse_invalid() {
        assert!(MacAddress::parse("AA:BB:CC:DD:EE").is_none());
        assert!(MacAddress::parse("GG:BB:CC:DD:EE:FF").is_none());
        assert!(MacAddress::parse("AABBCCDDEEFF").is_none());
        assert!(MacAddress::parse("AA.BB.CC.DD.EE.FF").is_none());
        assert!(MacAddress::parse("AA:BB:CC:DD:EE:FF:").is_none());
        assert!(MacAddress::parse(" AA:BB:CC:DD:EE:F").is_none());
        assert!(MacAddress::parse("").is_none());
    }

    #[test]
    fn test_parse_rejects_multibyte_input() {
        // 17 bytes long but not ASCII hex
        assert!(MacAddress::parse("ÄA:BB:CC:DD:EE:F").is_none());
    }

    #[test]
    fn test_display_is_uppercase_colon() {
        let mac: MacAddress = "0a-1b-2c-3d-4e-5f".parse().unwrap();
        assert_eq!(mac.to_string(), "0A:1B:2C:3D:4E:5F");
    }

    #[test]
    fn test_from_str_error() {
        let err = "nope".parse::<MacAddress>().unwrap_err();
        assert!(matches!(err, WolError::InvalidMacAddress(ref s) if s == "nope"));
    }

    #[test]
    fn test_magic_packet_layout() {
        let mac = MacAddress::parse("00:11:22:33:44:55").unwrap();
        let packet = MagicPacket::new(&mac);
        let bytes = packet.as_bytes();

        assert_eq!(bytes.len(), 102);
        assert_eq!(&bytes[..6], &[0xFF; 6]);
        for repetition in bytes[6..].chunks(6) {
            assert_eq!(repetition, &[0x00, 0x11, 0x22, 0x33, 0x44, 0x55]);
        }
        assert_eq!(bytes[6..].chunks(6).count(), 16);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: any six bytes survive display then parse
            #[test]
            fn display_parses_back(bytes in any::<[u8; 6]>()) {
                let mac = MacAddress::new(bytes);
                prop_assert_eq!(MacAddress::parse(&mac.to_string()), Some(mac));
            }

            /// Property: strings matching the accepted grammar always parse
            #[test]
            fn grammar_matches_parser(s in "([0-9A-Fa-f]{2}[:-]){5}[0-9A-Fa-f]{2}") {
                prop_assert!(MacAddress::parse(&s).is_some());
            }

            /// Property: the payload always ends with the MAC
            #[test]
            fn payload_tail_is_mac(bytes in any::<[u8; 6]>()) {
                let packet = MagicPacket::new(&MacAddress::new(bytes));
                prop_assert_eq!(&packet.as_bytes()[MAGIC_PACKET_LEN - 6..], &bytes[..]);
            }
        }
    }
}
