//! Receive, decode, map and publish loop
//!
//! [`Bridge`] owns the datagram source, the single [`TelemetryRecord`] and
//! the sink. Each cycle:
//!
//! 1. wait for a datagram
//! 2. drop it if the magic does not match
//! 3. apply every known group to the record
//! 4. stamp on-track and the packet time
//! 5. publish the full record
//!
//! Everything after the receive is synchronous, so a datagram is fully
//! published before the next one is read.

use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, trace};

use crate::config::MAX_DATAGRAM_SIZE;
use crate::protocol::{Packet, groups};
use crate::shm::SharedMemory;
use crate::sink::RecordSink;
use crate::source::DatagramSource;
use crate::sources::UdpReceiver;
use crate::types::{TelemetryRecord, unix_millis};
use crate::{BridgeConfig, Result};

/// Counters for the life of a bridge
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BridgeStats {
    /// Datagrams read from the source
    pub datagrams: u64,
    /// Records written to the sink
    pub published: u64,
    /// Datagrams dropped for a magic mismatch
    pub bad_magic: u64,
    /// Groups written into the record
    pub groups_applied: u64,
    /// Groups with an unknown id
    pub groups_ignored: u64,
    /// Bytes discarded after the last complete group
    pub trailing_bytes: u64,
}

/// The bridge used by the binary: UDP in, shared memory out
pub type LiveBridge = Bridge<UdpReceiver, SharedMemory>;

/// Owned pipeline context
pub struct Bridge<S, K> {
    source: S,
    sink: K,
    record: TelemetryRecord,
    stats: BridgeStats,
    buf: Vec<u8>,
}

impl LiveBridge {
    /// Create the shared memory segment and bind the socket from `config`
    pub async fn start(config: &BridgeConfig) -> Result<Self> {
        config.validate()?;
        let shm = SharedMemory::create(config)?;
        let receiver = UdpReceiver::bind(config.bind_addr).await?;
        Ok(Bridge::new(receiver, shm))
    }
}

impl<S, K> Bridge<S, K>
where
    S: DatagramSource,
    K: RecordSink,
{
    /// Create a bridge with a zeroed record
    pub fn new(source: S, sink: K) -> Self {
        Self {
            source,
            sink,
            record: TelemetryRecord::new(),
            stats: BridgeStats::default(),
            buf: vec![0u8; MAX_DATAGRAM_SIZE],
        }
    }

    pub fn record(&self) -> &TelemetryRecord {
        &self.record
    }

    pub fn stats(&self) -> BridgeStats {
        self.stats
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    /// Process one datagram stamped with the current wall clock
    ///
    /// Returns `Ok(true)` when the packet was accepted and published.
    pub fn process_datagram(&mut self, datagram: &[u8]) -> Result<bool> {
        self.process_datagram_at(datagram, unix_millis())
    }

    /// Process one datagram stamped with `now_ms`
    pub fn process_datagram_at(&mut self, datagram: &[u8], now_ms: i64) -> Result<bool> {
        cycle(&mut self.record, &mut self.stats, &mut self.sink, datagram, now_ms)
    }

    /// Run until the source ends, a fatal error occurs, or `cancel` fires
    pub async fn run(&mut self, cancel: CancellationToken) -> Result<()> {
        info!("Bridge loop started");

        loop {
            let received = tokio::select! {
                _ = cancel.cancelled() => {
                    info!("Bridge cancelled");
                    break;
                }
                received = self.source.recv(&mut self.buf) => received,
            };

            let len = match received {
                Ok(Some(len)) => len,
                Ok(None) => {
                    info!("Datagram source ended");
                    break;
                }
                Err(e) => {
                    error!("Fatal receive failure: {}", e);
                    return Err(e);
                }
            };

            let datagram = &self.buf[..len];
            if let Err(e) =
                cycle(&mut self.record, &mut self.stats, &mut self.sink, datagram, unix_millis())
            {
                error!("Fatal publish failure: {}", e);
                return Err(e);
            }
        }

        let stats = self.stats;
        info!(
            datagrams = stats.datagrams,
            published = stats.published,
            bad_magic = stats.bad_magic,
            groups_applied = stats.groups_applied,
            groups_ignored = stats.groups_ignored,
            trailing_bytes = stats.trailing_bytes,
            "Bridge loop ended"
        );
        Ok(())
    }
}

/// One decode, map, stamp, publish pass over a datagram.
fn cycle<K: RecordSink>(
    record: &mut TelemetryRecord,
    stats: &mut BridgeStats,
    sink: &mut K,
    datagram: &[u8],
    now_ms: i64,
) -> Result<bool> {
    stats.datagrams += 1;

    let Some(packet) = Packet::parse(datagram) else {
        stats.bad_magic += 1;
        debug!(len = datagram.len(), "Dropping datagram without DATA magic");
        return Ok(false);
    };

    for group in packet.groups() {
        if groups::apply(record, &group) {
            stats.groups_applied += 1;
        } else {
            stats.groups_ignored += 1;
        }
    }

    let trailing = packet.trailing_len();
    if trailing > 0 {
        stats.trailing_bytes += trailing as u64;
        debug!(trailing, "Discarding incomplete trailing group");
    }

    record.stamp(now_ms);
    sink.publish(record)?;
    stats.published += 1;

    trace!(
        groups = packet.group_count(),
        timestamp_ms = record.timestamp_ms(),
        "Published telemetry record"
    );
    Ok(true)
}
