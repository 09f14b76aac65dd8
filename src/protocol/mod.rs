//! X-Plane UDP `DATA` protocol.
//!
//! [`packet`] validates the magic and walks fixed 36-byte group strides;
//! [`groups`] maps the groups the bridge understands onto record channels.
//!
//! ```rust
//! use xplane_bridge::protocol::{self, groups};
//! use xplane_bridge::types::{Channel, TelemetryRecord};
//!
//! let mut datagram = b"DATA\0".to_vec();
//! datagram.extend_from_slice(&21i32.to_le_bytes());
//! for value in [5200.0f32, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0] {
//!     datagram.extend_from_slice(&value.to_le_bytes());
//! }
//!
//! let mut record = TelemetryRecord::new();
//! for group in protocol::decode(&datagram).expect("magic matches") {
//!     groups::apply(&mut record, &group);
//! }
//! assert_eq!(record.get(Channel::Rpm), 5200.0);
//! ```

pub mod groups;
pub mod packet;

pub use groups::{Conversion, GROUP_TABLE, GroupMapping};
pub use packet::{DataGroup, GROUP_STRIDE, Groups, MAGIC, Packet, VALUES_PER_GROUP, decode};
