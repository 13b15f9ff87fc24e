//! GPIO and delay adapter
//!
//! Serves the display runtime's pin-level control messages and its
//! millisecond delay. Pins and the delay source are injected, so the same
//! adapter drives real hardware or recording test doubles.

use panelbridge_hal::{DelayMs, Level, OutputPin};

use crate::error::LinkError;
use crate::message::GpioMessage;

/// Control line driven by the GPIO adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControlLine {
    /// Chip-select
    ChipSelect,
    /// Data/command select
    DataCommand,
    /// Controller reset
    Reset,
    /// Software I2C clock
    I2cClock,
    /// Software I2C data
    I2cData,
}

/// Receiver of GPIO and delay messages
///
/// Implemented by [`GpioDelayAdapter`]. Transports call back into it for
/// chip-select, data/command and settle delays.
pub trait GpioAndDelay {
    /// Handle one message
    fn handle(&mut self, msg: GpioMessage) -> Result<(), LinkError>;

    /// Drive the chip-select line
    fn set_cs(&mut self, level: Level) -> Result<(), LinkError> {
        self.handle(GpioMessage::ChipSelect(level))
    }

    /// Drive the data/command line
    fn set_dc(&mut self, level: Level) -> Result<(), LinkError> {
        self.handle(GpioMessage::DataCommand(level))
    }

    /// Drive the reset line
    fn set_reset(&mut self, level: Level) -> Result<(), LinkError> {
        self.handle(GpioMessage::Reset(level))
    }

    /// Block for `ms` milliseconds
    fn delay_ms(&mut self, ms: u8) -> Result<(), LinkError> {
        self.handle(GpioMessage::DelayMilli(ms))
    }
}

impl<G: GpioAndDelay + ?Sized> GpioAndDelay for &mut G {
    fn handle(&mut self, msg: GpioMessage) -> Result<(), LinkError> {
        G::handle(self, msg)
    }
}

/// Pins wired to the panel
///
/// Lines the board does not connect stay `None`; messages for them are
/// accepted and ignored.
pub struct ControlPins<P> {
    /// Chip-select
    pub cs: Option<P>,
    /// Data/command select
    pub dc: Option<P>,
    /// Controller reset
    pub reset: Option<P>,
    /// Software I2C clock (bit-banged transport only)
    pub i2c_clock: Option<P>,
    /// Software I2C data (bit-banged transport only)
    pub i2c_data: Option<P>,
}

impl<P> ControlPins<P> {
    /// No lines connected
    pub const fn none() -> Self {
        Self {
            cs: None,
            dc: None,
            reset: None,
            i2c_clock: None,
            i2c_data: None,
        }
    }

    /// 4-wire SPI panel: chip-select, data/command and reset
    pub fn spi(cs: P, dc: P, reset: P) -> Self {
        Self {
            cs: Some(cs),
            dc: Some(dc),
            reset: Some(reset),
            ..Self::none()
        }
    }

    /// Bit-banged I2C panel: clock and data lines
    pub fn i2c_bitbang(clock: P, data: P) -> Self {
        Self {
            i2c_clock: Some(clock),
            i2c_data: Some(data),
            ..Self::none()
        }
    }

    /// Add a reset line
    pub fn with_reset(mut self, reset: P) -> Self {
        self.reset = Some(reset);
        self
    }

    fn line_mut(&mut self, line: ControlLine) -> Option<&mut P> {
        match line {
            ControlLine::ChipSelect => self.cs.as_mut(),
            ControlLine::DataCommand => self.dc.as_mut(),
            ControlLine::Reset => self.reset.as_mut(),
            ControlLine::I2cClock => self.i2c_clock.as_mut(),
            ControlLine::I2cData => self.i2c_data.as_mut(),
        }
    }
}

/// GPIO and delay adapter
pub struct GpioDelayAdapter<P, D> {
    pins: ControlPins<P>,
    delay: D,
}

impl<P: OutputPin, D: DelayMs> GpioDelayAdapter<P, D> {
    /// Create a new adapter from the wired pins and a delay source
    pub fn new(pins: ControlPins<P>, delay: D) -> Self {
        Self { pins, delay }
    }

    /// Give back the pins and the delay source
    pub fn release(self) -> (ControlPins<P>, D) {
        (self.pins, self.delay)
    }

    fn drive(&mut self, line: ControlLine, level: Level) {
        if let Some(pin) = self.pins.line_mut(line) {
            pin.set_level(level);
        }
    }
}

impl<P: OutputPin, D: DelayMs> GpioAndDelay for GpioDelayAdapter<P, D> {
    fn handle(&mut self, msg: GpioMessage) -> Result<(), LinkError> {
        match msg {
            // Pins and timers are configured by platform start-up
            GpioMessage::Init => {}
            GpioMessage::DelayMilli(ms) => self.delay.delay_ms(ms as u32),
            GpioMessage::ChipSelect(level) => self.drive(ControlLine::ChipSelect, level),
            GpioMessage::DataCommand(level) => self.drive(ControlLine::DataCommand, level),
            GpioMessage::Reset(level) => self.drive(ControlLine::Reset, level),
            // Hardware SPI owns the clock and data lines
            GpioMessage::SpiClock(_) | GpioMessage::SpiData(_) => {}
            GpioMessage::I2cClock(level) => self.drive(ControlLine::I2cClock, level),
            GpioMessage::I2cData(level) => self.drive(ControlLine::I2cData, level),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{Event, FakeClock, MockPin, Recorder};
    use core::cell::RefCell;

    fn spi_adapter(log: &RefCell<Recorder>) -> GpioDelayAdapter<MockPin<'_>, FakeClock<'_>> {
        let pins = ControlPins::spi(
            MockPin::new(ControlLine::ChipSelect, log),
            MockPin::new(ControlLine::DataCommand, log),
            MockPin::new(ControlLine::Reset, log),
        );
        GpioDelayAdapter::new(pins, FakeClock::new(log))
    }

    #[test]
    fn test_pin_messages_drive_lines() {
        let log = RefCell::new(Recorder::new());
        let mut gpio = spi_adapter(&log);

        gpio.handle(GpioMessage::ChipSelect(Level::Low)).unwrap();
        gpio.handle(GpioMessage::DataCommand(Level::High)).unwrap();
        gpio.handle(GpioMessage::Reset(Level::Low)).unwrap();

        assert_eq!(
            log.borrow().events(),
            &[
                Event::Pin(ControlLine::ChipSelect, Level::Low),
                Event::Pin(ControlLine::DataCommand, Level::High),
                Event::Pin(ControlLine::Reset, Level::Low),
            ]
        );
    }

    #[test]
    fn test_delay_blocks_for_requested_time() {
        let log = RefCell::new(Recorder::new());
        let mut gpio = spi_adapter(&log);

        gpio.handle(GpioMessage::DelayMilli(10)).unwrap();

        // The clock has advanced by the full amount before control returns
        assert_eq!(log.borrow().now_ms(), 10);
        assert_eq!(log.borrow().events(), &[Event::Delay(10)]);
    }

    #[test]
    fn test_delays_accumulate() {
        let log = RefCell::new(Recorder::new());
        let mut gpio = spi_adapter(&log);

        gpio.delay_ms(2).unwrap();
        gpio.delay_ms(0).unwrap();
        gpio.delay_ms(255).unwrap();

        assert_eq!(log.borrow().now_ms(), 257);
    }

    #[test]
    fn test_unused_lines_are_accepted_noops() {
        let log = RefCell::new(Recorder::new());
        let mut gpio = spi_adapter(&log);

        assert_eq!(gpio.handle(GpioMessage::Init), Ok(()));
        assert_eq!(gpio.handle(GpioMessage::SpiClock(Level::High)), Ok(()));
        assert_eq!(gpio.handle(GpioMessage::SpiData(Level::High)), Ok(()));
        // Not wired on an SPI panel
        assert_eq!(gpio.handle(GpioMessage::I2cClock(Level::High)), Ok(()));
        assert_eq!(gpio.handle(GpioMessage::I2cData(Level::Low)), Ok(()));

        assert!(log.borrow().events().is_empty());
    }

    #[test]
    fn test_bitbang_lines() {
        let log = RefCell::new(Recorder::new());
        let pins = ControlPins::i2c_bitbang(
            MockPin::new(ControlLine::I2cClock, &log),
            MockPin::new(ControlLine::I2cData, &log),
        );
        let mut gpio = GpioDelayAdapter::new(pins, FakeClock::new(&log));

        gpio.handle(GpioMessage::I2cClock(Level::High)).unwrap();
        gpio.handle(GpioMessage::I2cData(Level::Low)).unwrap();
        // No chip-select on an I2C panel
        gpio.set_cs(Level::Low).unwrap();

        assert_eq!(
            log.borrow().events(),
            &[
                Event::Pin(ControlLine::I2cClock, Level::High),
                Event::Pin(ControlLine::I2cData, Level::Low),
            ]
        );
    }

    #[test]
    fn test_with_reset() {
        let log = RefCell::new(Recorder::new());
        let pins = ControlPins::i2c_bitbang(
            MockPin::new(ControlLine::I2cClock, &log),
            MockPin::new(ControlLine::I2cData, &log),
        )
        .with_reset(MockPin::new(ControlLine::Reset, &log));
        let mut gpio = GpioDelayAdapter::new(pins, FakeClock::new(&log));

        gpio.set_reset(Level::High).unwrap();

        assert_eq!(
            log.borrow().events(),
            &[Event::Pin(ControlLine::Reset, Level::High)]
        );
    }
}
