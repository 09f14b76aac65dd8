//! Replay source for recorded datagrams

use std::collections::VecDeque;
use std::time::Duration;
use tokio::time::{Interval, MissedTickBehavior, interval};
use tracing::{debug, info};

use crate::Result;
use crate::source::DatagramSource;

/// Source that yields a fixed list of datagrams, then ends
///
/// Without pacing, datagrams are delivered back to back.
pub struct ReplaySource {
    datagrams: VecDeque<Vec<u8>>,

    /// Optional pacing between datagrams
    interval: Option<Interval>,
}

impl ReplaySource {
    /// Create a replay over `datagrams` in order
    pub fn new<I>(datagrams: I) -> Self
    where
        I: IntoIterator<Item = Vec<u8>>,
    {
        let datagrams: VecDeque<_> = datagrams.into_iter().collect();
        info!("Replaying {} datagrams", datagrams.len());
        Self { datagrams, interval: None }
    }

    /// Deliver at most one datagram per `period`
    ///
    /// Must be called from within a tokio runtime.
    pub fn paced(mut self, period: Duration) -> Self {
        let mut pacing = interval(period);
        pacing.set_missed_tick_behavior(MissedTickBehavior::Delay);
        debug!(period_ms = period.as_millis() as u64, "Replay pacing enabled");
        self.interval = Some(pacing);
        self
    }

    /// Datagrams not yet delivered
    pub fn remaining(&self) -> usize {
        self.datagrams.len()
    }
}

#[async_trait::async_trait]
impl DatagramSource for ReplaySource {
    async fn recv(&mut self, buf: &mut [u8]) -> Result<Option<usize>> {
        if self.datagrams.is_empty() {
            debug!("Replay exhausted");
            return Ok(None);
        }

        if let Some(pacing) = self.interval.as_mut() {
            pacing.tick().await;
        }

        let Some(datagram) = self.datagrams.pop_front() else {
            return Ok(None);
        };
        let len = datagram.len().min(buf.len());
        buf[..len].copy_from_slice(&datagram[..len]);
        Ok(Some(len))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[tokio::test]
    async fn yields_in_order_then_ends() {
        let mut source = ReplaySource::new(vec![b"one".to_vec(), b"three".to_vec()]);
        let mut buf = [0u8; 8];

        assert_eq!(source.recv(&mut buf).await.unwrap(), Some(3));
        assert_eq!(&buf[..3], b"one");
        assert_eq!(source.recv(&mut buf).await.unwrap(), Some(5));
        assert_eq!(&buf[..5], b"three");
        assert_eq!(source.recv(&mut buf).await.unwrap(), None);
        assert_eq!(source.remaining(), 0);
    }

    #[tokio::test]
    async fn truncates_to_buffer() {
        let mut source = ReplaySource::new(vec![vec![1u8; 10]]);
        let mut buf = [0u8; 4];
        assert_eq!(source.recv(&mut buf).await.unwrap(), Some(4));
    }

    #[tokio::test]
    async fn pacing_spaces_datagrams() {
        let mut source = ReplaySource::new(vec![vec![0u8]; 3]).paced(Duration::from_millis(20));
        let mut buf = [0u8; 1];

        let start = Instant::now();
        while source.recv(&mut buf).await.unwrap().is_some() {}
        // First tick fires immediately, the next two wait one period each
        assert!(start.elapsed() >= Duration::from_millis(40));
    }
}
