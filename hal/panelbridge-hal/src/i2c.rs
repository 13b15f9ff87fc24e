//! I2C bus abstractions
//!
//! Provides the addressed-write primitive used by the staged transport.

use crate::error::BusError;

/// I2C bus master
pub trait I2cBus {
    /// Write data to a device at the given address
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `data` - Bytes to write, sent as one transaction
    /// * `timeout_ms` - Upper bound on the blocking transmit
    fn write(&mut self, address: u8, data: &[u8], timeout_ms: u32) -> Result<(), BusError>;
}

impl<B: I2cBus + ?Sized> I2cBus for &mut B {
    fn write(&mut self, address: u8, data: &[u8], timeout_ms: u32) -> Result<(), BusError> {
        B::write(self, address, data, timeout_ms)
    }
}
