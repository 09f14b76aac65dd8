//! Bridge configuration.
//!
//! Every setting has a compile-time default, so the bridge runs with no
//! configuration at all. A YAML file may override any subset:
//!
//! ```yaml
//! bind_addr: 127.0.0.1:49001
//! segment_name: TelemetryData
//! shm_dir: /dev/shm
//! ```

use serde::{Deserialize, Serialize};
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::{BridgeError, Result};

/// UDP port X-Plane sends `DATA` packets to.
pub const DEFAULT_PORT: u16 = 49001;
/// Well-known name of the published segment.
pub const DEFAULT_SEGMENT_NAME: &str = "TelemetryData";
/// Largest datagram read per receive; longer datagrams are truncated by the OS.
pub const MAX_DATAGRAM_SIZE: usize = 2048;
/// Directory holding named segments on Unix.
#[cfg(unix)]
pub const DEFAULT_SHM_DIR: &str = "/dev/shm";

/// Runtime settings for [`Bridge`](crate::Bridge).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BridgeConfig {
    /// Local address the UDP socket binds to.
    pub bind_addr: SocketAddr,
    /// Name of the shared memory segment.
    pub segment_name: String,
    /// Directory where Unix segments are created.
    #[cfg(unix)]
    pub shm_dir: PathBuf,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::LOCALHOST, DEFAULT_PORT)),
            segment_name: DEFAULT_SEGMENT_NAME.to_string(),
            #[cfg(unix)]
            shm_dir: PathBuf::from(DEFAULT_SHM_DIR),
        }
    }
}

impl BridgeConfig {
    /// Parse and validate a YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml_ng::from_str(yaml)
            .map_err(|e| BridgeError::config("BridgeConfig deserialization", e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path)
            .map_err(|e| BridgeError::io_error(path.to_path_buf(), e))?;
        debug!(path = %path.display(), "Loaded bridge configuration");
        Self::from_yaml_str(&yaml)
    }

    /// Reject settings that could never produce a usable segment.
    pub fn validate(&self) -> Result<()> {
        if self.segment_name.is_empty() {
            return Err(BridgeError::config("segment_name", "must not be empty"));
        }

        if self.segment_name.contains(['/', '\\', '\0']) {
            return Err(BridgeError::config(
                "segment_name",
                format!("'{}' must not contain path separators or NUL", self.segment_name),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_wire_contract() {
        let config = BridgeConfig::default();
        assert_eq!(config.bind_addr, "127.0.0.1:49001".parse().unwrap());
        assert_eq!(config.segment_name, "TelemetryData");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_document_yields_defaults() {
        let config = BridgeConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config, BridgeConfig::default());
    }

    #[test]
    fn partial_override() {
        let config = BridgeConfig::from_yaml_str("bind_addr: 127.0.0.1:50000\n").unwrap();
        assert_eq!(config.bind_addr.port(), 50000);
        assert_eq!(config.segment_name, DEFAULT_SEGMENT_NAME);
    }

    #[test]
    fn rejects_unknown_keys() {
        let err = BridgeConfig::from_yaml_str("segmnt_name: Foo\n").unwrap_err();
        assert!(matches!(err, BridgeError::Config { .. }));
    }

    #[test]
    fn rejects_bad_segment_names() {
        for name in ["", "a/b", "a\\b"] {
            let config = BridgeConfig { segment_name: name.to_string(), ..Default::default() };
            assert!(config.validate().is_err(), "{:?} should be rejected", name);
        }
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bridge.yaml");
        std::fs::write(&path, "segment_name: SimTelemetry\n").unwrap();

        let config = BridgeConfig::from_file(&path).unwrap();
        assert_eq!(config.segment_name, "SimTelemetry");
    }

    #[test]
    fn missing_file_reports_path() {
        let err = BridgeConfig::from_file("/nonexistent/bridge.yaml").unwrap_err();
        match err {
            BridgeError::Io { path, .. } => assert_eq!(path, PathBuf::from("/nonexistent/bridge.yaml")),
            other => panic!("Expected Io error, got {other:?}"),
        }
    }
}
