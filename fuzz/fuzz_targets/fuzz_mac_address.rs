#![no_main]

use libfuzzer_sys::fuzz_target;
use simple_wol::network::{MacAddress, MagicPacket};

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Some(mac) = MacAddress::parse(s) {
            // Canonical form must parse to the same address
            assert_eq!(MacAddress::parse(&mac.to_string()), Some(mac));
            assert_eq!(MagicPacket::new(&mac).as_bytes().len(), 102);
        }
    }
});
