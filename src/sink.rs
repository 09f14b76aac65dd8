//! Sink trait for published records

use crate::Result;
use crate::shm::SharedMemory;
use crate::types::TelemetryRecord;

/// Destination for the serialized record
///
/// Called once per accepted packet with the full record state. Sinks
/// overwrite; they never append or merge.
pub trait RecordSink {
    fn publish(&mut self, record: &TelemetryRecord) -> Result<()>;
}

impl RecordSink for SharedMemory {
    fn publish(&mut self, record: &TelemetryRecord) -> Result<()> {
        self.write(&record.to_bytes());
        Ok(())
    }
}

impl<T: RecordSink + ?Sized> RecordSink for &mut T {
    fn publish(&mut self, record: &TelemetryRecord) -> Result<()> {
        (**self).publish(record)
    }
}
