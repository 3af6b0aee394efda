//! Utility modules
//!
//! Provides logging setup.

pub mod logging;

pub use logging::{LoggingOptions, init_logging};
