//! I2C bus adapter for STM32F4
//!
//! embassy-stm32 enforces the transfer timeout itself, so the per-call
//! timeout is not forwarded. Build the peripheral with [`i2c_config`] to
//! carry the link's transmit timeout into it.

use embassy_stm32::i2c::{Config, Error as I2cError};
use embassy_time::Duration;
use embedded_hal::i2c::I2c as EhI2c;
use panelbridge_hal::{BusError, I2cBus};

/// Map an embassy-stm32 I2C error
pub fn bus_error(e: I2cError) -> BusError {
    match e {
        I2cError::Bus => BusError::Bus,
        I2cError::Arbitration => BusError::ArbitrationLost,
        I2cError::Nack => BusError::Nack,
        I2cError::Timeout => BusError::Timeout,
        I2cError::Overrun => BusError::Overrun,
        _ => BusError::Other,
    }
}

/// Peripheral config whose timeout is the link's transmit timeout
pub fn i2c_config(tx_timeout_ms: u32) -> Config {
    let mut config = Config::default();
    config.timeout = Duration::from_millis(tx_timeout_ms as u64);
    config
}

/// Blocking I2C master
pub struct Stm32I2c<I> {
    i2c: I,
}

impl<I: EhI2c<Error = I2cError>> Stm32I2c<I> {
    /// Wrap an embassy-stm32 I2C created with `new_blocking` and [`i2c_config`]
    pub fn new(i2c: I) -> Self {
        Self { i2c }
    }

    /// Give back the peripheral
    pub fn release(self) -> I {
        self.i2c
    }
}

impl<I: EhI2c<Error = I2cError>> I2cBus for Stm32I2c<I> {
    fn write(&mut self, address: u8, data: &[u8], _timeout_ms: u32) -> Result<(), BusError> {
        self.i2c.write(address, data).map_err(|e| {
            #[cfg(feature = "defmt")]
            defmt::debug!("i2c error {}", e);
            bus_error(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_carries_timeout() {
        assert_eq!(i2c_config(100).timeout, Duration::from_millis(100));
        assert_eq!(i2c_config(25).timeout, Duration::from_millis(25));
    }

    #[test]
    fn test_error_mapping() {
        assert_eq!(bus_error(I2cError::Nack), BusError::Nack);
        assert_eq!(bus_error(I2cError::Timeout), BusError::Timeout);
        assert_eq!(bus_error(I2cError::Arbitration), BusError::ArbitrationLost);
    }
}
