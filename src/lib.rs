//! Bridge X-Plane UDP telemetry into a fixed-layout shared memory record.
//!
//! X-Plane streams `DATA` packets to a local UDP port. The bridge decodes the
//! groups it understands, converts angles to radians, and overwrites a named
//! shared memory segment so other local processes can read the latest state
//! without any per-frame IPC.
//!
//! # Pipeline
//!
//! ```text
//! UdpReceiver ──► protocol::decode ──► groups::apply ──► stamp ──► SharedMemory
//! ```
//!
//! - **Receive**: one datagram of up to 2048 bytes
//! - **Decode**: `"DATA\0"` magic, then 36-byte groups (`i32` id + 8 × `f32`)
//! - **Map**: known group ids update record channels in place
//! - **Publish**: the whole 240-byte record is written from offset zero
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use xplane_bridge::{BridgeConfig, LiveBridge};
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> xplane_bridge::Result<()> {
//!     let mut bridge = LiveBridge::start(&BridgeConfig::default()).await?;
//!     bridge.run(CancellationToken::new()).await
//! }
//! ```
//!
//! # Reading the segment
//!
//! Readers map the segment and decode it by byte offset; see
//! [`types::record`] for the layout table and
//! [`TelemetryRecord::from_bytes`](types::TelemetryRecord::from_bytes).

pub mod bridge;
pub mod config;
mod error;
pub mod protocol;
pub mod shm;
pub mod sink;
pub mod source;
pub mod sources;
#[cfg_attr(any(test, feature = "benchmark"), path = "test_utils.rs")]
#[cfg(any(test, feature = "benchmark"))]
pub mod test_utils;
pub mod types;

// Core exports
pub use bridge::{Bridge, BridgeStats, LiveBridge};
pub use config::BridgeConfig;
pub use error::*;
pub use shm::SharedMemory;
pub use sink::RecordSink;
pub use source::DatagramSource;
pub use sources::{ReplaySource, UdpReceiver};
pub use types::{Channel, TelemetryRecord};
