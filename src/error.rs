//! Error types for the telemetry bridge.
//!
//! Only startup and transport failures surface as errors. Malformed packets,
//! short trailing strides and unknown groups are dropped silently by the
//! decoder and never reach this module.
//!
//! ## Error Categories
//!
//! - **Socket Errors**: binding the UDP port or receiving a datagram
//! - **Shared Memory Errors**: creating or mapping the published segment
//! - **Configuration Errors**: unreadable or invalid bridge configuration
//! - **Layout Errors**: a record snapshot with the wrong byte length
//! - **Windows API Errors**: platform-specific file mapping failures
//!
//! ```rust
//! use xplane_bridge::BridgeError;
//!
//! let error = BridgeError::shared_memory("TelemetryData", "segment name rejected");
//! assert!(error.is_fatal());
//! for suggestion in error.recovery_suggestions() {
//!     println!("  - {}", suggestion);
//! }
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;
use thiserror::Error;

#[cfg(windows)]
use windows_core as core;

/// Result type alias for bridge operations.
pub type Result<T, E = BridgeError> = std::result::Result<T, E>;

/// Main error type for bridge operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum BridgeError {
    #[error("Failed to bind UDP socket on {addr}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to receive datagram")]
    Receive {
        #[source]
        source: std::io::Error,
    },

    #[error("Shared memory segment '{name}': {reason}")]
    SharedMemory {
        name: String,
        reason: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Configuration error in {context}: {details}")]
    Config { context: String, details: String },

    #[error("I/O error: {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Record layout mismatch: expected {expected} bytes, found {found}")]
    Layout { expected: usize, found: usize },

    #[error("Windows API error: {operation}")]
    #[cfg(windows)]
    WindowsApi {
        operation: String,
        #[source]
        source: core::Error,
    },
}

impl BridgeError {
    /// Returns whether this error ends the bridge process.
    ///
    /// Socket and shared memory failures are terminal: the bridge has no
    /// reconnect path. Layout errors only affect the caller holding a snapshot.
    pub fn is_fatal(&self) -> bool {
        match self {
            BridgeError::Bind { .. } => true,
            BridgeError::Receive { .. } => true,
            BridgeError::SharedMemory { .. } => true,
            BridgeError::Config { .. } => true,
            BridgeError::Io { .. } => true,
            BridgeError::Layout { .. } => false,
            #[cfg(windows)]
            BridgeError::WindowsApi { .. } => true,
        }
    }

    /// Returns suggested recovery actions for this error.
    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            BridgeError::Bind { .. } => vec![
                "Check that no other bridge instance is already running",
                "Verify the UDP port is free and not reserved",
                "Confirm the bind address is a local interface",
            ],
            BridgeError::Receive { .. } => vec![
                "Restart the bridge",
                "Check the network stack is available",
            ],
            BridgeError::SharedMemory { .. } => vec![
                "Check permissions for creating shared memory",
                "Verify the segment name contains no path separators",
                "Ensure the shared memory directory exists and is writable",
            ],
            BridgeError::Config { .. } => vec![
                "Check the configuration file is valid YAML",
                "Remove unknown or misspelled keys",
                "Fall back to the built-in defaults by omitting the file",
            ],
            BridgeError::Io { .. } => vec![
                "Check the file exists and is readable",
                "Check file permissions",
            ],
            BridgeError::Layout { .. } => vec![
                "Read exactly RECORD_SIZE bytes from the segment",
                "Verify reader and writer agree on the record version",
            ],
            #[cfg(windows)]
            BridgeError::WindowsApi { .. } => vec![
                "Check Windows API permissions",
                "Verify system resources availability",
            ],
        }
    }

    /// Helper constructor for bind errors.
    pub fn bind_failed(addr: SocketAddr, source: std::io::Error) -> Self {
        BridgeError::Bind { addr, source }
    }

    /// Helper constructor for shared memory errors.
    pub fn shared_memory(name: impl Into<String>, reason: impl Into<String>) -> Self {
        BridgeError::SharedMemory { name: name.into(), reason: reason.into(), source: None }
    }

    /// Helper constructor for shared memory errors with source.
    pub fn shared_memory_with_source(
        name: impl Into<String>,
        reason: impl Into<String>,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        BridgeError::SharedMemory { name: name.into(), reason: reason.into(), source: Some(source) }
    }

    /// Helper constructor for configuration errors.
    pub fn config(context: impl Into<String>, details: impl Into<String>) -> Self {
        BridgeError::Config { context: context.into(), details: details.into() }
    }

    /// Helper constructor for file errors with path context.
    pub fn io_error(path: PathBuf, source: std::io::Error) -> Self {
        BridgeError::Io { path, source }
    }

    /// Helper constructor for Windows API errors.
    #[cfg(windows)]
    pub fn windows_api_error(operation: impl Into<String>, source: core::Error) -> Self {
        BridgeError::WindowsApi { operation: operation.into(), source }
    }
}

impl From<std::io::Error> for BridgeError {
    fn from(err: std::io::Error) -> Self {
        BridgeError::Io { path: PathBuf::from("<unknown>"), source: err }
    }
}

#[cfg(windows)]
impl From<core::Error> for BridgeError {
    fn from(err: core::Error) -> Self {
        BridgeError::WindowsApi {
            operation: "Unknown Windows operation".to_string(),
            source: err,
        }
    }
}
