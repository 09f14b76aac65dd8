//! Fixed-layout telemetry record published to shared memory.
//!
//! # Layout
//!
//! The record is serialized little-endian with every byte accounted for.
//! Readers address fields by byte offset, so this table is the compatibility
//! contract:
//!
//! | offset | width | field                                    |
//! |--------|-------|------------------------------------------|
//! | 0      | 1     | on-track flag (`u8`, 0 or 1)             |
//! | 1      | 7     | padding, always zero                     |
//! | 8      | 8×28  | channels (`f64`), see [`Channel::ALL`]   |
//! | 232    | 8     | packet time (`i64`, ms since Unix epoch) |
//!
//! Total size: [`RECORD_SIZE`] = 240 bytes. The padding after the flag keeps
//! every double 8-byte aligned, which is the layout existing C-struct readers
//! of the segment were built against.

use std::ops::{Index, IndexMut};
use std::time::{SystemTime, UNIX_EPOCH};

use super::channel::{CHANNEL_COUNT, Channel};
use crate::{BridgeError, Result};

/// Offset of the on-track flag.
pub const ON_TRACK_OFFSET: usize = 0;
/// Zero bytes between the flag and the first channel.
pub const ON_TRACK_PADDING: usize = 7;
/// Offset of the first `f64` channel.
pub const CHANNELS_OFFSET: usize = ON_TRACK_OFFSET + size_of::<u8>() + ON_TRACK_PADDING;
/// Offset of the packet timestamp.
pub const TIMESTAMP_OFFSET: usize = CHANNELS_OFFSET + CHANNEL_COUNT * size_of::<f64>();
/// Exact serialized size of the record.
pub const RECORD_SIZE: usize = TIMESTAMP_OFFSET + size_of::<i64>();

const _: () = assert!(CHANNELS_OFFSET % align_of::<f64>() == 0);
const _: () = assert!(RECORD_SIZE == 240);

/// The single persistent telemetry record.
///
/// Starts zeroed and is mutated in place. A channel is only written when a
/// packet carries the group that feeds it; everything else keeps its value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TelemetryRecord {
    on_track: bool,
    channels: [f64; CHANNEL_COUNT],
    timestamp_ms: i64,
}

impl TelemetryRecord {
    /// Create a zeroed record.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, channel: Channel) -> f64 {
        self.channels[channel.index()]
    }

    pub fn set(&mut self, channel: Channel, value: f64) {
        self.channels[channel.index()] = value;
    }

    pub fn is_on_track(&self) -> bool {
        self.on_track
    }

    /// Packet time in milliseconds since the Unix epoch.
    pub fn timestamp_ms(&self) -> i64 {
        self.timestamp_ms
    }

    /// Mark the record as carrying a fresh packet.
    ///
    /// Sets the on-track flag and moves the timestamp to `now_ms`. The stamp
    /// never repeats or goes backwards: two packets in the same millisecond,
    /// or a wall clock stepped back, yield `previous + 1`.
    pub fn stamp(&mut self, now_ms: i64) {
        self.on_track = true;
        self.timestamp_ms = now_ms.max(self.timestamp_ms.saturating_add(1));
    }

    /// Serialize into the published byte layout.
    pub fn to_bytes(&self) -> [u8; RECORD_SIZE] {
        let mut bytes = [0u8; RECORD_SIZE];
        self.write_into(&mut bytes);
        bytes
    }

    /// Serialize into an existing buffer of exactly [`RECORD_SIZE`] bytes.
    ///
    /// The padding bytes are rewritten as zero.
    pub fn write_into(&self, out: &mut [u8; RECORD_SIZE]) {
        out[ON_TRACK_OFFSET] = u8::from(self.on_track);
        out[ON_TRACK_OFFSET + 1..CHANNELS_OFFSET].fill(0);
        for channel in Channel::ALL {
            let offset = channel.offset();
            out[offset..offset + 8].copy_from_slice(&self.get(channel).to_le_bytes());
        }
        out[TIMESTAMP_OFFSET..RECORD_SIZE].copy_from_slice(&self.timestamp_ms.to_le_bytes());
    }

    /// Decode a snapshot read from the segment.
    ///
    /// Any non-zero flag byte reads as on-track.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != RECORD_SIZE {
            return Err(BridgeError::Layout { expected: RECORD_SIZE, found: bytes.len() });
        }

        let mut record = Self { on_track: bytes[ON_TRACK_OFFSET] != 0, ..Self::default() };
        for channel in Channel::ALL {
            record.set(channel, read_f64_le(bytes, channel.offset()));
        }
        record.timestamp_ms = i64::from_le_bytes(read_array(bytes, TIMESTAMP_OFFSET));
        Ok(record)
    }
}

impl Index<Channel> for TelemetryRecord {
    type Output = f64;

    fn index(&self, channel: Channel) -> &f64 {
        &self.channels[channel.index()]
    }
}

impl IndexMut<Channel> for TelemetryRecord {
    fn index_mut(&mut self, channel: Channel) -> &mut f64 {
        &mut self.channels[channel.index()]
    }
}

/// Current wall-clock time in milliseconds since the Unix epoch.
///
/// A clock set before 1970 reads as zero.
pub fn unix_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}

// Callers have already checked the length against RECORD_SIZE.
fn read_array(bytes: &[u8], offset: usize) -> [u8; 8] {
    let mut raw = [0u8; 8];
    raw.copy_from_slice(&bytes[offset..offset + 8]);
    raw
}

fn read_f64_le(bytes: &[u8], offset: usize) -> f64 {
    f64::from_le_bytes(read_array(bytes, offset))
}
