//! Addressed transport over a hardware I2C bus
//!
//! The bus primitive is "write N bytes to address A", so the SEND calls of
//! a frame are staged and flushed as one transmission on transfer end:
//!
//! ```text
//! StartTransfer ──▶ cursor = 0
//! Send(bytes)   ──▶ append at cursor (bounds-checked)
//! EndTransfer   ──▶ write(address, staged bytes)
//! ```
//!
//! `Send` and `EndTransfer` with no frame open fail with `NoFrame`.
//!
//! There is no data/command line; the controller tells them apart by the
//! control byte the runtime puts at the start of each frame.

use panelbridge_hal::I2cBus;

use super::{ByteTransport, FrameState, TransportKind};
use crate::config::{LinkConfig, STAGING_CAPACITY};
use crate::error::LinkError;
use crate::gpio::GpioAndDelay;
use crate::message::ByteMessage;
use crate::staging::StagingBuffer;

/// Addressed transport adapter
pub struct I2cTransport<B, const N: usize = STAGING_CAPACITY> {
    bus: B,
    /// 7-bit device address
    address: u8,
    tx_timeout_ms: u32,
    staging: StagingBuffer<N>,
    state: FrameState,
}

impl<B: I2cBus, const N: usize> I2cTransport<B, N> {
    /// Create a new I2C transport
    pub fn new(bus: B, config: &LinkConfig) -> Self {
        Self {
            bus,
            address: config.device_address,
            tx_timeout_ms: config.tx_timeout_ms,
            staging: StagingBuffer::new(),
            state: FrameState::Idle,
        }
    }

    /// Get the target device address
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Bytes staged in the current (or last) frame
    pub fn staged(&self) -> &[u8] {
        self.staging.as_slice()
    }

    /// Give back the bus
    pub fn release(self) -> B {
        self.bus
    }

    fn flush(&mut self) -> Result<(), LinkError> {
        if self.staging.overflowed() {
            // Never put a truncated frame on the wire
            return Err(LinkError::BufferOverflow);
        }
        self.bus
            .write(self.address, self.staging.as_slice(), self.tx_timeout_ms)
            .map_err(|e| {
                #[cfg(feature = "defmt")]
                defmt::warn!("i2c write to {=u8:#x} failed: {}", self.address, e);
                LinkError::from(e)
            })
    }
}

impl<B: I2cBus, const N: usize> ByteTransport for I2cTransport<B, N> {
    fn kind(&self) -> TransportKind {
        TransportKind::Addressed { max_frame: N }
    }

    fn frame_state(&self) -> FrameState {
        self.state
    }

    fn handle<G: GpioAndDelay>(
        &mut self,
        msg: ByteMessage<'_>,
        _gpio: &mut G,
    ) -> Result<(), LinkError> {
        match msg {
            ByteMessage::Init => Ok(()),
            // No data/command line on this transport
            ByteMessage::SetDc(_) => Ok(()),
            ByteMessage::StartTransfer => {
                self.staging.reset();
                self.state = FrameState::Framing;
                Ok(())
            }
            ByteMessage::Send(data) => {
                if self.state != FrameState::Framing {
                    return Err(LinkError::NoFrame);
                }
                self.staging.append(data).inspect_err(|_e| {
                    #[cfg(feature = "defmt")]
                    defmt::warn!(
                        "staging overflow: {} + {} > {}",
                        self.staging.cursor(),
                        data.len(),
                        N
                    );
                })
            }
            ByteMessage::EndTransfer => {
                if self.state != FrameState::Framing {
                    // Never resend the previous frame
                    return Err(LinkError::NoFrame);
                }
                // Cursor stays put until the next StartTransfer
                self.state = FrameState::Idle;
                self.flush()
            }
        }
    }
}
