//! Device persistence module
//!
//! This module handles loading, saving, importing and exporting the device list.
//! Devices are stored as a JSON array in `devices.json` (or `$SIMPLE_WOL_CONFIG`)
//! with atomic writes to prevent corruption.

pub mod manager;
pub mod models;

pub use manager::{CONFIG_ENV_VAR, ConfigManager, DEFAULT_CONFIG_FILE};
pub use models::{DEFAULT_PORT, Device};
