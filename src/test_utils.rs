//! Test utilities for building `DATA` packets and capturing published records
//!
//! Shared by unit tests and the benchmark suite.

#![cfg(any(test, feature = "benchmark"))]

use crate::Result;
use crate::protocol::{GROUP_STRIDE, MAGIC, VALUES_PER_GROUP};
use crate::sink::RecordSink;
use crate::types::{RECORD_SIZE, TelemetryRecord};

/// Encode one group as its 36 wire bytes.
pub fn encode_group(id: i32, values: [f32; VALUES_PER_GROUP]) -> [u8; GROUP_STRIDE] {
    let mut stride = [0u8; GROUP_STRIDE];
    stride[..4].copy_from_slice(&id.to_le_bytes());
    for (i, value) in values.iter().enumerate() {
        let offset = 4 + i * 4;
        stride[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
    }
    stride
}

/// Builder for X-Plane `DATA` datagrams.
///
/// ```rust,ignore
/// let packet = PacketBuilder::new().group(3, [90.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]).build();
/// ```
#[derive(Debug, Clone, Default)]
pub struct PacketBuilder {
    groups: Vec<[u8; GROUP_STRIDE]>,
}

impl PacketBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a group.
    pub fn group(mut self, id: i32, values: [f32; VALUES_PER_GROUP]) -> Self {
        self.groups.push(encode_group(id, values));
        self
    }

    /// Magic followed by every group in insertion order.
    pub fn build(&self) -> Vec<u8> {
        let mut packet = Vec::with_capacity(MAGIC.len() + self.groups.len() * GROUP_STRIDE);
        packet.extend_from_slice(MAGIC);
        for group in &self.groups {
            packet.extend_from_slice(group);
        }
        packet
    }
}

/// Sink that keeps every published record in memory.
#[derive(Debug, Default)]
pub struct CaptureSink {
    pub frames: Vec<[u8; RECORD_SIZE]>,
}

impl CaptureSink {
    /// Most recently published bytes.
    pub fn last(&self) -> Option<&[u8; RECORD_SIZE]> {
        self.frames.last()
    }
}

impl RecordSink for CaptureSink {
    fn publish(&mut self, record: &TelemetryRecord) -> Result<()> {
        self.frames.push(record.to_bytes());
        Ok(())
    }
}
