//! Named pagefile-backed file mapping for Windows.
//!
//! Readers open the same name with `OpenFileMappingW` + `MapViewOfFile`.
//! The kernel object lives as long as any process holds a handle to it.

use std::ptr::NonNull;
use tracing::{debug, info};
use windows::Win32::Foundation::{CloseHandle, HANDLE, INVALID_HANDLE_VALUE};
use windows::Win32::System::Memory::{
    CreateFileMappingW, FILE_MAP_WRITE, MEMORY_MAPPED_VIEW_ADDRESS, MapViewOfFile, PAGE_READWRITE,
    UnmapViewOfFile,
};
use windows::core::PCWSTR;

use crate::types::RECORD_SIZE;
use crate::{BridgeConfig, BridgeError, Result};

/// Writable view of the published record.
pub struct SharedMemory {
    name: String,
    mapping: HANDLE,
    base: NonNull<u8>,
}

impl SharedMemory {
    /// Create (or open) the segment described by `config`.
    pub fn create(config: &BridgeConfig) -> Result<Self> {
        Self::create_named(&config.segment_name)
    }

    /// Create (or open) named mapping `name`, sized to one record and zeroed.
    pub fn create_named(name: &str) -> Result<Self> {
        debug!(segment = name, size = RECORD_SIZE, "Creating file mapping");

        let mapping = unsafe {
            let wide_name = wide_string(name);
            CreateFileMappingW(
                INVALID_HANDLE_VALUE,
                None,
                PAGE_READWRITE,
                0,
                RECORD_SIZE as u32,
                PCWSTR::from_raw(wide_name.as_ptr()),
            )
            .map_err(|e| BridgeError::windows_api_error("CreateFileMappingW", e))?
        };

        let base = unsafe {
            let view = MapViewOfFile(mapping, FILE_MAP_WRITE, 0, 0, RECORD_SIZE);
            match NonNull::new(view.Value as *mut u8) {
                Some(base) => base,
                None => {
                    let win_err = windows::core::Error::from_thread();
                    let _ = CloseHandle(mapping);
                    return Err(BridgeError::windows_api_error("MapViewOfFile", win_err));
                }
            }
        };

        // SAFETY: the view is at least RECORD_SIZE bytes and writable
        unsafe { std::ptr::write_bytes(base.as_ptr(), 0, RECORD_SIZE) };

        info!(segment = name, size = RECORD_SIZE, "Shared memory segment ready");
        Ok(Self { name: name.to_string(), mapping, base })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Overwrite the segment from offset zero.
    ///
    /// Plain memory copy: a concurrent reader can observe a torn record.
    pub fn write(&mut self, bytes: &[u8; RECORD_SIZE]) {
        // SAFETY: the view is RECORD_SIZE bytes, owned for the lifetime of self
        unsafe { std::ptr::copy_nonoverlapping(bytes.as_ptr(), self.base.as_ptr(), RECORD_SIZE) };
    }

    /// Copy the current segment contents.
    pub fn snapshot(&self) -> [u8; RECORD_SIZE] {
        let mut bytes = [0u8; RECORD_SIZE];
        // SAFETY: see write
        unsafe { std::ptr::copy_nonoverlapping(self.base.as_ptr(), bytes.as_mut_ptr(), RECORD_SIZE) };
        bytes
    }
}

impl Drop for SharedMemory {
    fn drop(&mut self) {
        unsafe {
            let addr = MEMORY_MAPPED_VIEW_ADDRESS { Value: self.base.as_ptr() as *mut _ };
            let _ = UnmapViewOfFile(addr);
            let _ = CloseHandle(self.mapping);
        }
    }
}

// SAFETY: the struct owns its handle and view exclusively; nothing else in
// this process aliases the mapping.
unsafe impl Send for SharedMemory {}

/// Convert string to null-terminated wide string for Windows APIs
fn wide_string(s: &str) -> Vec<u16> {
    use std::ffi::OsStr;
    use std::os::windows::ffi::OsStrExt;
    OsStr::new(s).encode_wide().chain(std::iter::once(0)).collect()
}
