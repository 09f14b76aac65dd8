//! UDP receiver for the simulator feed

use std::net::SocketAddr;
use tokio::net::UdpSocket;
use tracing::{info, trace};

use crate::source::DatagramSource;
use crate::{BridgeError, Result};

/// Winsock reports a datagram longer than the buffer as an error after
/// filling the buffer (`WSAEMSGSIZE`).
#[cfg(windows)]
const WSAEMSGSIZE: i32 = 10040;

/// Bound UDP socket receiving X-Plane `DATA` packets
pub struct UdpReceiver {
    socket: UdpSocket,
    local_addr: SocketAddr,
}

impl UdpReceiver {
    /// Bind to `addr`
    ///
    /// Binding failure is fatal for the bridge; there is no retry.
    pub async fn bind(addr: SocketAddr) -> Result<Self> {
        let socket = UdpSocket::bind(addr).await.map_err(|e| BridgeError::bind_failed(addr, e))?;
        let local_addr = socket.local_addr().map_err(|e| BridgeError::bind_failed(addr, e))?;

        info!(%local_addr, "Listening for simulator datagrams");
        Ok(Self { socket, local_addr })
    }

    /// Address actually bound (resolves port 0)
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }
}

#[async_trait::async_trait]
impl DatagramSource for UdpReceiver {
    async fn recv(&mut self, buf: &mut [u8]) -> Result<Option<usize>> {
        match self.socket.recv_from(buf).await {
            Ok((len, peer)) => {
                trace!(len, %peer, "Datagram received");
                Ok(Some(len))
            }
            #[cfg(windows)]
            Err(e) if e.raw_os_error() == Some(WSAEMSGSIZE) => {
                trace!(len = buf.len(), "Oversized datagram truncated");
                Ok(Some(buf.len()))
            }
            Err(source) => Err(BridgeError::Receive { source }),
        }
    }
}
