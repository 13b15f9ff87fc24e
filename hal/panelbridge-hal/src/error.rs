//! Bus error classification
//!
//! Every transport reports failures through [`BusError`] so the adapters
//! stay independent of vendor error types.

/// Error from a blocking bus transmit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusError {
    /// Transmit did not complete within the timeout
    Timeout,
    /// Device did not acknowledge (addressed buses)
    Nack,
    /// Arbitration lost
    ArbitrationLost,
    /// Bus error (misplaced start/stop, framing)
    Bus,
    /// Data overrun
    Overrun,
    /// Other error
    Other,
}
