//! SPI bus adapter for STM32F4
//!
//! Wraps a blocking embassy-stm32 SPI peripheral. embassy's blocking write
//! has no timeout, so the transmit is split into chunks and the deadline is
//! checked against `embassy_time::Instant` between them. A peripheral that
//! stalls mid-chunk still blocks; see [`write_with_deadline`].

use embassy_stm32::spi::Error as SpiError;
use embassy_time::{Duration, Instant};
use embedded_hal::spi::SpiBus as EhSpiBus;
use panelbridge_hal::{write_with_deadline, BusError, SpiBus};

/// Map an embassy-stm32 SPI error
pub fn bus_error(e: SpiError) -> BusError {
    match e {
        SpiError::Overrun => BusError::Overrun,
        SpiError::ModeFault => BusError::Bus,
        SpiError::Framing | SpiError::Crc => BusError::Other,
        #[allow(unreachable_patterns)]
        _ => BusError::Other,
    }
}

/// Deadline for a transmit starting at `start`
pub fn deadline(start: Instant, timeout_ms: u32) -> Instant {
    start + Duration::from_millis(timeout_ms as u64)
}

/// Blocking SPI peripheral (TX only is enough)
pub struct Stm32Spi<S> {
    spi: S,
}

impl<S: EhSpiBus<u8, Error = SpiError>> Stm32Spi<S> {
    /// Wrap an embassy-stm32 SPI created with `new_blocking*`
    pub fn new(spi: S) -> Self {
        Self { spi }
    }

    /// Give back the peripheral
    pub fn release(self) -> S {
        self.spi
    }
}

impl<S: EhSpiBus<u8, Error = SpiError>> SpiBus for Stm32Spi<S> {
    fn write(&mut self, data: &[u8], timeout_ms: u32) -> Result<(), BusError> {
        let deadline = deadline(Instant::now(), timeout_ms);
        let spi = &mut self.spi;
        write_with_deadline(
            data,
            |chunk| spi.write(chunk).map_err(bus_error),
            || Instant::now() > deadline,
        )
        .inspect_err(|_e| {
            #[cfg(feature = "defmt")]
            defmt::debug!("spi write of {} bytes failed: {}", data.len(), _e);
        })?;
        self.spi.flush().map_err(bus_error)
    }
}
