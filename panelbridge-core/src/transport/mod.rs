//! Byte transport adapters
//!
//! Two transports serve the display runtime's byte callback:
//!
//! - [`SpiTransport`]: stream-oriented. Bytes are clocked out as they
//!   arrive, framed by chip-select.
//! - [`I2cTransport`]: addressed. Bytes are staged and sent as one
//!   transmission to the device address when the frame closes.

pub mod i2c;
pub mod spi;

pub use i2c::I2cTransport;
pub use spi::SpiTransport;

use panelbridge_hal::Level;

use crate::error::LinkError;
use crate::gpio::GpioAndDelay;
use crate::message::ByteMessage;

/// How the controller tells commands from data on a transport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportKind {
    /// Dedicated data/command line, unbounded frames
    Stream,
    /// Control byte at the start of each frame, frames bounded by the
    /// staging capacity
    Addressed {
        /// Largest frame the transport can stage
        max_frame: usize,
    },
}

/// Position of a transport within the frame protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameState {
    /// No frame open
    #[default]
    Idle,
    /// Between transfer start and transfer end
    Framing,
}

/// Chip-select levels of the attached controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChipSelect {
    /// Level that selects the controller
    pub enable: Level,
    /// Level that releases the controller
    pub disable: Level,
}

impl ChipSelect {
    /// Active-low chip-select, the common case
    pub const ACTIVE_LOW: Self = Self {
        enable: Level::Low,
        disable: Level::High,
    };
}

impl Default for ChipSelect {
    fn default() -> Self {
        Self::ACTIVE_LOW
    }
}

/// Receiver of byte transport messages
pub trait ByteTransport {
    /// Command/data framing this transport needs from the runtime
    fn kind(&self) -> TransportKind;

    /// Current frame state
    fn frame_state(&self) -> FrameState;

    /// Adopt the controller's chip-select levels
    ///
    /// Transports without a chip-select line ignore this.
    fn bind_chip_select(&mut self, _levels: ChipSelect) {}

    /// Handle one message, calling back into `gpio` for control lines and delays
    fn handle<G: GpioAndDelay>(
        &mut self,
        msg: ByteMessage<'_>,
        gpio: &mut G,
    ) -> Result<(), LinkError>;
}
