//! File-backed shared memory segment for Unix.
//!
//! The segment is a file named after the configured segment under a tmpfs
//! directory (normally `/dev/shm`), mapped `MAP_SHARED`. Readers map the same
//! path read-only and see writes through the page cache immediately.

use memmap2::MmapMut;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::types::RECORD_SIZE;
use crate::{BridgeConfig, BridgeError, Result};

/// Writable mapping of the published record.
pub struct SharedMemory {
    name: String,
    path: PathBuf,
    map: MmapMut,
}

impl SharedMemory {
    /// Create (or reopen) the segment described by `config`.
    pub fn create(config: &BridgeConfig) -> Result<Self> {
        Self::create_in(&config.shm_dir, &config.segment_name)
    }

    /// Create (or reopen) segment `name` inside `dir`, sized to one record and zeroed.
    pub fn create_in(dir: &Path, name: &str) -> Result<Self> {
        let path = dir.join(name);
        debug!(path = %path.display(), size = RECORD_SIZE, "Creating shared memory segment");

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)
            .map_err(|e| {
                BridgeError::shared_memory_with_source(name, "failed to open backing file", Box::new(e))
            })?;

        file.set_len(RECORD_SIZE as u64).map_err(|e| {
            BridgeError::shared_memory_with_source(name, "failed to size backing file", Box::new(e))
        })?;

        // SAFETY: the file was just sized to RECORD_SIZE. Other processes may
        // write the same file; the bridge only ever overwrites whole records
        // and never hands out references into the mapping.
        let mut map = unsafe { MmapMut::map_mut(&file) }.map_err(|e| {
            BridgeError::shared_memory_with_source(name, "failed to map backing file", Box::new(e))
        })?;
        map.fill(0);

        info!(path = %path.display(), size = RECORD_SIZE, "Shared memory segment ready");
        Ok(Self { name: name.to_string(), path, map })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Filesystem path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Overwrite the segment from offset zero.
    ///
    /// Plain memory copy: a concurrent reader can observe a torn record.
    pub fn write(&mut self, bytes: &[u8; RECORD_SIZE]) {
        self.map[..RECORD_SIZE].copy_from_slice(bytes);
    }

    /// Copy the current segment contents.
    pub fn snapshot(&self) -> [u8; RECORD_SIZE] {
        let mut bytes = [0u8; RECORD_SIZE];
        bytes.copy_from_slice(&self.map[..RECORD_SIZE]);
        bytes
    }
}

impl Drop for SharedMemory {
    fn drop(&mut self) {
        // Readers that already mapped the file keep their view
        if let Err(e) = std::fs::remove_file(&self.path) {
            warn!(path = %self.path.display(), "Failed to remove shared memory segment: {}", e);
        }
    }
}
