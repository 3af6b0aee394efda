//! Error types for `simple-wol`
//!
//! This module defines all error types used throughout the crate. Errors fall into
//! three categories (see [`ErrorKind`]): bad user input, device file problems, and
//! socket-level send failures. Logging setup failures sit outside those and get a
//! kind of their own.
//!
//! Error variants use `#[source]` to preserve error chains for better
//! observability and debugging.

use std::path::PathBuf;
use thiserror::Error;

/// Simple error type for wrapping string messages while implementing `std::error::Error`
#[derive(Debug, Error)]
#[error("{0}")]
pub struct StringError(pub String);

impl StringError {
    /// Create a new `StringError` from a string message
    pub fn new(msg: impl Into<String>) -> Box<Self> {
        Box::new(Self(msg.into()))
    }
}

/// Broad category of a [`WolError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad MAC/IP/port/name input; the user corrects it and retries
    Validation,
    /// Device file unreadable, unwritable or malformed
    Persistence,
    /// Socket-level failure while sending a magic packet
    Transmission,
    /// Log file or subscriber could not be set up
    Logging,
}

/// Main error type for `simple-wol`
#[derive(Debug, Error)]
pub enum WolError {
    /// Device name is empty or whitespace
    #[error("Device name is required")]
    InvalidName,

    /// MAC address does not match `XX:XX:XX:XX:XX:XX` / `XX-XX-XX-XX-XX-XX`
    #[error("Invalid MAC address: {0}")]
    InvalidMacAddress(String),

    /// IP address is not a dotted-quad IPv4 address
    #[error("Invalid IP address: {0}")]
    InvalidIpAddress(String),

    /// Port is not a number in 0-65535
    #[error("Invalid port: {0}")]
    InvalidPort(String),

    /// No device in the registry matches the given name
    #[error("No device named '{0}'")]
    DeviceNotFound(String),

    /// Reading or writing the device file failed
    /// Preserves the underlying error source for full error chain transparency
    #[error("Failed to access device file {}: {source}", .path.display())]
    Persistence {
        /// File that was being read or written
        path: PathBuf,
        /// Underlying I/O or JSON error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Sending the magic packet failed
    #[error("Failed to send Wake-on-LAN packet to {target}: {source}")]
    Transmission {
        /// Destination as given by the caller (address and port)
        target: String,
        /// Underlying socket or resolution error
        #[source]
        source: std::io::Error,
    },

    /// Logging setup failed
    /// Preserves the underlying error source for full error chain transparency
    #[error("Logging setup failed: {0}")]
    LoggingError(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl WolError {
    /// Wrap an I/O or JSON error raised while handling `path`
    pub fn persistence(
        path: impl Into<PathBuf>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Persistence {
            path: path.into(),
            source: source.into(),
        }
    }

    /// Wrap a socket error raised while sending to `target`
    pub fn transmission(target: impl Into<String>, source: std::io::Error) -> Self {
        Self::Transmission {
            target: target.into(),
            source,
        }
    }

    /// Category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidName
            | Self::InvalidMacAddress(_)
            | Self::InvalidIpAddress(_)
            | Self::InvalidPort(_)
            | Self::DeviceNotFound(_) => ErrorKind::Validation,
            Self::Persistence { .. } => ErrorKind::Persistence,
            Self::Transmission { .. } => ErrorKind::Transmission,
            Self::LoggingError(_) => ErrorKind::Logging,
        }
    }
}

/// Result type alias for `simple-wol` operations
pub type Result<T> = std::result::Result<T, WolError>;

/// Convert an error to a user-friendly message
///
/// The messages include short troubleshooting hints for the common cases.
pub fn get_user_friendly_error(error: &WolError) -> String {
    match error {
        WolError::InvalidName => "Device name is required.".to_string(),
        WolError::InvalidMacAddress(mac) => format!(
            "Invalid MAC address format: {mac}\n\n\
             Use six hex pairs separated by colons or hyphens:\n\
             - AA:BB:CC:DD:EE:FF\n\
             - AA-BB-CC-DD-EE-FF"
        ),
        WolError::InvalidIpAddress(ip) => format!(
            "Invalid IP address: {ip}\n\n\
             Use a dotted-quad IPv4 address such as 192.168.1.100,\n\
             or leave it empty to use broadcast mode."
        ),
        WolError::InvalidPort(port) => {
            format!("Invalid port: {port}\n\nPort must be a number between 0 and 65535.")
        }
        WolError::DeviceNotFound(name) => format!(
            "No device named '{name}'.\n\n\
             Run `simple-wol list` to see the configured devices."
        ),
        WolError::Persistence { path, source } => format!(
            "Failed to load or save devices:\n\n{source}\n\n\
             Check that the file is valid JSON and that you have permission to access:\n\
             {}",
            path.display()
        ),
        WolError::Transmission { target, source } => format!(
            "Failed to send Wake-on-LAN packet to {target}:\n\n{source}\n\n\
             Please ensure:\n\
             - The network interface is up\n\
             - Broadcast traffic is permitted on this network\n\
             - The target address is reachable\n\
             - A subnet broadcast address (such as 192.168.1.255) is passed with\n\
               --broadcast rather than stored as the device IP"
        ),
        WolError::LoggingError(e) => format!("Failed to initialize logging:\n\n{e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = WolError::InvalidMacAddress("GG:BB:CC:DD:EE:FF".to_string());
        assert_eq!(error.to_string(), "Invalid MAC address: GG:BB:CC:DD:EE:FF");
    }

    #[test]
    fn test_validation_kind() {
        assert_eq!(WolError::InvalidName.kind(), ErrorKind::Validation);
        assert_eq!(
            WolError::InvalidPort("65536".to_string()).kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            WolError::DeviceNotFound("nas".to_string()).kind(),
            ErrorKind::Validation
        );
    }

    #[test]
    fn test_persistence_preserves_source() {
        let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let error = WolError::persistence("devices.json", io_error);
        assert_eq!(error.kind(), ErrorKind::Persistence);
        assert!(error.to_string().contains("devices.json"));
        let source = std::error::Error::source(&error).map(|e| e.to_string());
        assert_eq!(source.as_deref(), Some("denied"));
    }

    #[test]
    fn test_transmission_display() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NetworkUnreachable, "unreachable");
        let error = WolError::transmission("10.0.0.5:9", io_error);
        assert_eq!(error.kind(), ErrorKind::Transmission);
        assert_eq!(
            error.to_string(),
            "Failed to send Wake-on-LAN packet to 10.0.0.5:9: unreachable"
        );
    }

    #[test]
    fn test_user_friendly_messages() {
        let message = get_user_friendly_error(&WolError::InvalidPort("-1".to_string()));
        assert!(message.contains("between 0 and 65535"));

        let message =
            get_user_friendly_error(&WolError::InvalidMacAddress("AA:BB".to_string()));
        assert!(message.contains("AA:BB"));
        assert!(message.contains("AA-BB-CC-DD-EE-FF"));
    }

    #[test]
    fn test_user_friendly_transmission_hints() {
        let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let message = get_user_friendly_error(&WolError::transmission("255.255.255.255:9", io_error));
        assert!(message.contains("255.255.255.255:9"));
        assert!(message.contains("Broadcast traffic"));
        assert!(message.contains("--broadcast"));
    }

    #[test]
    fn test_logging_kind() {
        let error = WolError::LoggingError(StringError::new("Invalid log path"));
        assert_eq!(error.kind(), ErrorKind::Logging);
        assert_ne!(error.kind(), ErrorKind::Persistence);
    }
}
