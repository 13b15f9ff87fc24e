//! Bridge from `embedded-hal` 1.0 peripherals
//!
//! Wraps vendor HAL types that implement the `embedded-hal` traits so they
//! satisfy the panelbridge traits. The transmit timeout is not forwarded:
//! `embedded-hal` has no per-call timeout, so it must be set in the
//! peripheral's own configuration (as embassy-stm32 does for I2C).

use core::convert::Infallible;

use embedded_hal::{delay, digital, i2c, spi};

use crate::delay::DelayMs;
use crate::error::BusError;
use crate::gpio::OutputPin;
use crate::i2c::I2cBus;
use crate::spi::SpiBus;

impl From<spi::ErrorKind> for BusError {
    fn from(kind: spi::ErrorKind) -> Self {
        match kind {
            spi::ErrorKind::Overrun => BusError::Overrun,
            spi::ErrorKind::ModeFault | spi::ErrorKind::FrameFormat => BusError::Bus,
            _ => BusError::Other,
        }
    }
}

impl From<i2c::ErrorKind> for BusError {
    fn from(kind: i2c::ErrorKind) -> Self {
        match kind {
            i2c::ErrorKind::Bus => BusError::Bus,
            i2c::ErrorKind::ArbitrationLoss => BusError::ArbitrationLost,
            i2c::ErrorKind::NoAcknowledge(_) => BusError::Nack,
            i2c::ErrorKind::Overrun => BusError::Overrun,
            _ => BusError::Other,
        }
    }
}

/// `embedded-hal` SPI bus adapter
///
/// The transmit timeout is not enforced; there is no clock to check it
/// against. Chip HALs with a time source use [`crate::write_with_deadline`].
pub struct EhSpi<T>(pub T);

impl<T: spi::SpiBus<u8>> SpiBus for EhSpi<T> {
    fn write(&mut self, data: &[u8], _timeout_ms: u32) -> Result<(), BusError> {
        spi::SpiBus::write(&mut self.0, data).map_err(|e| spi::Error::kind(&e))?;
        // Blocks until the last byte has left the shift register
        spi::SpiBus::flush(&mut self.0).map_err(|e| spi::Error::kind(&e).into())
    }
}

/// `embedded-hal` I2C bus adapter
///
/// The transmit timeout is not enforced here; configure it on the peripheral.
pub struct EhI2c<T>(pub T);

impl<T: i2c::I2c> I2cBus for EhI2c<T> {
    fn write(&mut self, address: u8, data: &[u8], _timeout_ms: u32) -> Result<(), BusError> {
        i2c::I2c::write(&mut self.0, address, data).map_err(|e| i2c::Error::kind(&e).into())
    }
}

/// `embedded-hal` output pin adapter (infallible pins only)
pub struct EhPin<T>(pub T);

impl<T: digital::OutputPin<Error = Infallible>> OutputPin for EhPin<T> {
    fn set_high(&mut self) {
        match self.0.set_high() {
            Ok(()) => {}
            Err(never) => match never {},
        }
    }

    fn set_low(&mut self) {
        match self.0.set_low() {
            Ok(()) => {}
            Err(never) => match never {},
        }
    }
}

/// `embedded-hal` delay adapter
pub struct EhDelay<T>(pub T);

impl<T: delay::DelayNs> DelayMs for EhDelay<T> {
    fn delay_ms(&mut self, ms: u32) {
        self.0.delay_ms(ms);
    }
}
