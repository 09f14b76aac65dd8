//! Source trait for incoming datagrams

use crate::Result;

/// Trait for datagram sources feeding the bridge
///
/// The live bridge reads from a UDP socket; tests and benchmarks replay
/// captured datagrams from memory. Each source handles its own waiting.
#[async_trait::async_trait]
pub trait DatagramSource: Send {
    /// Receive the next datagram into `buf`
    ///
    /// Returns:
    /// - `Ok(Some(len))` - `buf[..len]` holds one datagram
    /// - `Ok(None)` - Source exhausted (normal termination)
    /// - `Err(e)` - Fatal receive failure
    ///
    /// Datagrams longer than `buf` are truncated to `buf.len()`.
    async fn recv(&mut self, buf: &mut [u8]) -> Result<Option<usize>>;
}
