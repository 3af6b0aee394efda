#![no_main]

use libfuzzer_sys::fuzz_target;
use simple_wol::Device;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes as a device file; parse errors are fine, panics are not
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(devices) = serde_json::from_str::<Vec<Device>>(s) {
            // Anything that loads must save and load back unchanged
            let json = serde_json::to_string(&devices).unwrap();
            let reloaded: Vec<Device> = serde_json::from_str(&json).unwrap();
            assert_eq!(devices, reloaded);
        }
    }
});
