//! Core types for the published telemetry record.
//!
//! ## Architecture
//!
//! - [`TelemetryRecord`] is the single mutable aggregate the bridge owns
//! - [`Channel`] names each `f64` slot and fixes its byte offset
//! - Layout constants ([`RECORD_SIZE`], [`TIMESTAMP_OFFSET`], ...) describe the
//!   little-endian ABI that shared memory readers depend on
//!
//! ## Usage Example
//!
//! ```rust
//! use xplane_bridge::types::{Channel, RECORD_SIZE, TelemetryRecord};
//!
//! let mut record = TelemetryRecord::new();
//! record.set(Channel::Throttle, 0.8);
//! record.stamp(1_700_000_000_000);
//!
//! let bytes = record.to_bytes();
//! assert_eq!(bytes.len(), RECORD_SIZE);
//!
//! let offset = Channel::Throttle.offset();
//! let throttle = f64::from_le_bytes(bytes[offset..offset + 8].try_into().unwrap());
//! assert_eq!(throttle, 0.8);
//! ```

mod channel;
pub mod record;

pub use channel::{CHANNEL_COUNT, Channel};
pub use record::{
    CHANNELS_OFFSET, ON_TRACK_OFFSET, ON_TRACK_PADDING, RECORD_SIZE, TIMESTAMP_OFFSET, TelemetryRecord, unix_millis,
};
