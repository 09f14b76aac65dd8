//! X-Plane `DATA` packet decoding.
//!
//! ## Wire Format
//!
//! ```text
//! offset 0   "DATA\0"                    5-byte magic
//! offset 5   group 0                     36 bytes
//!              i32  group id (LE)
//!              f32  values[0..8] (LE)
//! offset 41  group 1
//! ...
//! ```
//!
//! A trailing remainder shorter than one group is ignored. Decoding borrows
//! the datagram buffer and allocates nothing.

use std::iter::FusedIterator;
use tracing::trace;

/// Packet magic: ASCII `DATA` followed by one NUL byte.
pub const MAGIC: &[u8; 5] = b"DATA\0";
/// Number of `f32` values carried by each group.
pub const VALUES_PER_GROUP: usize = 8;
/// Bytes per group: one `i32` id plus eight `f32` values.
pub const GROUP_STRIDE: usize = 4 + VALUES_PER_GROUP * 4;

/// One decoded group: an id and its eight raw values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DataGroup {
    pub id: i32,
    pub values: [f32; VALUES_PER_GROUP],
}

impl DataGroup {
    /// Decode a group from exactly one stride.
    fn parse(stride: &[u8; GROUP_STRIDE]) -> Self {
        let id = parse_i32_le(stride, 0);
        let mut values = [0f32; VALUES_PER_GROUP];
        for (i, value) in values.iter_mut().enumerate() {
            *value = parse_f32_le(stride, 4 + i * 4);
        }
        Self { id, values }
    }
}

/// Validated view over a `DATA` packet.
#[derive(Debug, Clone, Copy)]
pub struct Packet<'a> {
    body: &'a [u8],
}

impl<'a> Packet<'a> {
    /// Check the magic and wrap the group section.
    ///
    /// Returns `None` when the datagram is shorter than the magic or does not
    /// start with it; such datagrams are dropped whole.
    pub fn parse(datagram: &'a [u8]) -> Option<Self> {
        let body = datagram.strip_prefix(MAGIC.as_slice())?;
        trace!(len = datagram.len(), groups = body.len() / GROUP_STRIDE, "Accepted DATA packet");
        Some(Self { body })
    }

    /// Iterate the complete groups in wire order.
    pub fn groups(&self) -> Groups<'a> {
        Groups { strides: self.body.chunks_exact(GROUP_STRIDE) }
    }

    /// Number of complete groups in the packet.
    pub fn group_count(&self) -> usize {
        self.body.len() / GROUP_STRIDE
    }

    /// Bytes after the last complete group, which are discarded.
    pub fn trailing_len(&self) -> usize {
        self.body.len() % GROUP_STRIDE
    }
}

/// Iterator over the complete groups of a [`Packet`].
#[derive(Debug, Clone)]
pub struct Groups<'a> {
    strides: std::slice::ChunksExact<'a, u8>,
}

impl Iterator for Groups<'_> {
    type Item = DataGroup;

    fn next(&mut self) -> Option<DataGroup> {
        let stride = self.strides.next()?;
        // chunks_exact only yields full strides
        let stride: &[u8; GROUP_STRIDE] = stride.try_into().ok()?;
        Some(DataGroup::parse(stride))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.strides.size_hint()
    }
}

impl ExactSizeIterator for Groups<'_> {}
impl FusedIterator for Groups<'_> {}

/// Decode all complete groups of a datagram, or `None` on a magic mismatch.
pub fn decode(datagram: &[u8]) -> Option<Groups<'_>> {
    Packet::parse(datagram).map(|packet| packet.groups())
}

fn parse_i32_le(data: &[u8; GROUP_STRIDE], offset: usize) -> i32 {
    i32::from_le_bytes([data[offset], data[offset + 1], data[offset + 2], data[offset + 3]])
}

fn parse_f32_le(data: &[u8; GROUP_STRIDE], offset: usize) -> f32 {
    f32::from_le_bytes([data[offset], data[offset + 1], data[offset + 2], data[offset + 3]])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{PacketBuilder, encode_group};
    use proptest::prelude::*;

    #[test]
    fn stride_is_36_bytes() {
        assert_eq!(GROUP_STRIDE, 36);
        assert_eq!(MAGIC.len(), 5);
    }

    #[test]
    fn rejects_bad_or_short_magic() {
        assert!(Packet::parse(b"").is_none());
        assert!(Packet::parse(b"DATA").is_none());
        assert!(Packet::parse(b"DATA*").is_none());
        assert!(Packet::parse(b"data\0").is_none());

        let mut packet = PacketBuilder::new().group(3, [1.0; 8]).build();
        packet[4] = b'@';
        assert!(decode(&packet).is_none());
    }

    #[test]
    fn magic_only_packet_has_no_groups() {
        let packet = Packet::parse(MAGIC).expect("magic alone is a valid packet");
        assert_eq!(packet.group_count(), 0);
        assert_eq!(packet.groups().count(), 0);
    }

    #[test]
    fn decodes_id_and_values_little_endian() {
        let values = [90.0, -1.5, 0.25, 3.0, 4.0, 5.0, 6.0, f32::MAX];
        let bytes = PacketBuilder::new().group(3, values).build();

        let groups: Vec<_> = decode(&bytes).unwrap().collect();
        assert_eq!(groups, vec![DataGroup { id: 3, values }]);

        // id is little-endian i32 directly after the magic
        assert_eq!(&bytes[5..9], &[3, 0, 0, 0]);
    }

    #[test]
    fn negative_ids_decode() {
        let bytes = PacketBuilder::new().group(-7, [0.0; 8]).build();
        let group = decode(&bytes).unwrap().next().unwrap();
        assert_eq!(group.id, -7);
    }

    #[test]
    fn trailing_partial_stride_is_skipped() {
        let mut bytes = PacketBuilder::new().group(16, [1.0; 8]).group(17, [2.0; 8]).build();
        bytes.extend_from_slice(&encode_group(20, [9.0; 8])[..35]);

        let packet = Packet::parse(&bytes).unwrap();
        assert_eq!(packet.group_count(), 2);
        assert_eq!(packet.trailing_len(), 35);

        let ids: Vec<_> = packet.groups().map(|g| g.id).collect();
        assert_eq!(ids, vec![16, 17]);
    }

    proptest! {
        #[test]
        fn group_count_follows_body_length(
            groups in prop::collection::vec((any::<i32>(), prop::array::uniform8(-1.0e6f32..1.0e6)), 0..20),
            trailing in 0usize..GROUP_STRIDE
        ) {
            let mut builder = PacketBuilder::new();
            for (id, values) in &groups {
                builder = builder.group(*id, *values);
            }
            let mut bytes = builder.build();
            bytes.extend(std::iter::repeat_n(0xAB, trailing));

            let decoded: Vec<_> = decode(&bytes).unwrap().collect();
            prop_assert_eq!(decoded.len(), groups.len());
            for (group, (id, values)) in decoded.iter().zip(&groups) {
                prop_assert_eq!(group.id, *id);
                prop_assert_eq!(&group.values, values);
            }
        }

        #[test]
        fn arbitrary_bytes_never_panic(bytes in prop::collection::vec(any::<u8>(), 0..2048)) {
            if let Some(groups) = decode(&bytes) {
                prop_assert_eq!(groups.len(), (bytes.len() - MAGIC.len()) / GROUP_STRIDE);
            } else {
                prop_assert!(!bytes.starts_with(MAGIC));
            }
        }
    }
}
