//! Link errors

use panelbridge_hal::BusError;

/// Errors reported by the transport and GPIO adapters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkError {
    /// The peripheral reported a failed or timed-out transmit
    Transmit(BusError),
    /// A frame exceeded the staging buffer capacity
    BufferOverflow,
    /// Bytes were sent outside a transfer-start/transfer-end frame
    NoFrame,
}

impl From<BusError> for LinkError {
    fn from(e: BusError) -> Self {
        LinkError::Transmit(e)
    }
}
