//! SPI bus abstractions
//!
//! Provides the transmit-only SPI master used by the stream transport.

use crate::error::BusError;

/// SPI bus master
///
/// The display never reads back, so only blocking writes are required.
pub trait SpiBus {
    /// Transmit `data`, blocking until the hardware completes or
    /// `timeout_ms` elapses
    fn write(&mut self, data: &[u8], timeout_ms: u32) -> Result<(), BusError>;
}

impl<S: SpiBus + ?Sized> SpiBus for &mut S {
    fn write(&mut self, data: &[u8], timeout_ms: u32) -> Result<(), BusError> {
        S::write(self, data, timeout_ms)
    }
}

/// Bytes clocked out between deadline checks
pub const DEADLINE_CHUNK: usize = 16;

/// Transmit `data` in chunks, giving up with `Timeout` once `expired` reports
/// the deadline has passed
///
/// For blocking peripherals with no timeout of their own. The deadline is
/// checked between chunks only: a peripheral that stalls inside a chunk
/// still blocks the caller.
pub fn write_with_deadline(
    data: &[u8],
    mut write: impl FnMut(&[u8]) -> Result<(), BusError>,
    mut expired: impl FnMut() -> bool,
) -> Result<(), BusError> {
    for chunk in data.chunks(DEADLINE_CHUNK) {
        if expired() {
            return Err(BusError::Timeout);
        }
        write(chunk)?;
    }
    Ok(())
}
