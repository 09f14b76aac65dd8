//! Named shared memory segment holding the published record.
//!
//! # Design
//!
//! - **Exact Size**: the segment is [`RECORD_SIZE`](crate::types::RECORD_SIZE)
//!   bytes, nothing more
//! - **Single Writer**: the bridge is the only writer and overwrites the whole
//!   record from offset zero on every packet
//! - **No Synchronization**: no lock, sequence counter or double buffer;
//!   readers tolerate torn records in exchange for zero-wait access
//!
//! Windows uses a pagefile-backed named file mapping. Unix uses a file under
//! a tmpfs directory mapped with `memmap2`.
//!
//! ```rust,no_run
//! use xplane_bridge::{BridgeConfig, SharedMemory};
//! use xplane_bridge::types::TelemetryRecord;
//!
//! # fn main() -> xplane_bridge::Result<()> {
//! let mut shm = SharedMemory::create(&BridgeConfig::default())?;
//! shm.write(&TelemetryRecord::new().to_bytes());
//! # Ok(())
//! # }
//! ```

#[cfg(unix)]
mod unix;
#[cfg(windows)]
mod win32;

#[cfg(unix)]
pub use unix::SharedMemory;
#[cfg(windows)]
pub use win32::SharedMemory;
