//! `simple-wol` - Wake-on-LAN device manager
//!
//! Keeps a list of network devices in a JSON file and wakes them by sending
//! Wake-on-LAN magic packets over UDP.
//!
//! - [`config`]: device record and the JSON device file
//! - [`registry`]: the in-memory, ordered device list a session edits
//! - [`validation`]: MAC/IP/port checks for user input
//! - [`network`]: magic packet construction and transmission
//!
//! ```no_run
//! use simple_wol::{ConfigManager, DeviceRegistry, WakeOnLanSender};
//!
//! let manager = ConfigManager::default();
//! let mut registry = DeviceRegistry::new();
//! registry.load(&manager)?;
//!
//! let sender = WakeOnLanSender::new();
//! for report in sender.wake_all(registry.devices()) {
//!     if let Err(e) = report.result {
//!         eprintln!("{}: {e}", report.device_name);
//!     }
//! }
//! # Ok::<(), simple_wol::WolError>(())
//! ```

// Module declarations
pub mod config;
pub mod error;
pub mod network;
pub mod registry;
pub mod utils;
pub mod validation;

#[cfg(test)]
mod test_utils;

// Re-export commonly used types
pub use config::{ConfigManager, Device};
pub use error::{ErrorKind, Result, WolError};
pub use network::WakeOnLanSender;
pub use registry::{DeviceRegistry, SortKey};
