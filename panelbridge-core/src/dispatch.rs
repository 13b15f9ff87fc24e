//! Callback-shaped entry points
//!
//! Display runtimes that speak the raw `(message, arg_int, arg_ptr) -> u8`
//! callback protocol call these. They decode into the typed messages and
//! report 1 for handled, 0 for failed.

use crate::gpio::GpioAndDelay;
use crate::message::{ByteMessage, GpioMessage};
use crate::transport::ByteTransport;

/// Callback status: message handled
pub const HANDLED: u8 = 1;

/// Callback status: message failed or unknown
pub const FAILED: u8 = 0;

/// GPIO and delay callback
///
/// Unknown identifiers are ignored and reported as handled, matching the
/// runtime's expectation that every GPIO message succeeds.
pub fn dispatch_gpio<G: GpioAndDelay>(gpio: &mut G, msg: u8, arg: u8) -> u8 {
    match GpioMessage::from_raw(msg, arg) {
        Some(message) => status(gpio.handle(message).is_ok()),
        None => HANDLED,
    }
}

/// Byte transport callback
///
/// For a send, `arg` is the number of bytes to take from `data`. Unknown
/// identifiers and short buffers fail without touching the transport.
pub fn dispatch_byte<T: ByteTransport, G: GpioAndDelay>(
    transport: &mut T,
    gpio: &mut G,
    msg: u8,
    arg: u8,
    data: &[u8],
) -> u8 {
    match ByteMessage::from_raw(msg, arg, data) {
        Some(message) => status(transport.handle(message, gpio).is_ok()),
        None => FAILED,
    }
}

fn status(ok: bool) -> u8 {
    if ok {
        HANDLED
    } else {
        FAILED
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LinkConfig;
    use crate::gpio::{ControlLine, ControlPins, GpioDelayAdapter};
    use crate::message::id;
    use crate::mock::{Event, FakeClock, MockI2c, MockPin, MockSpi, Recorder};
    use crate::transport::{I2cTransport, SpiTransport};
    use core::cell::RefCell;
    use panelbridge_hal::{BusError, Level};

    fn gpio(log: &RefCell<Recorder>) -> GpioDelayAdapter<MockPin<'_>, FakeClock<'_>> {
        let pins = ControlPins::spi(
            MockPin::new(ControlLine::ChipSelect, log),
            MockPin::new(ControlLine::DataCommand, log),
            MockPin::new(ControlLine::Reset, log),
        );
        GpioDelayAdapter::new(pins, FakeClock::new(log))
    }

    #[test]
    fn test_addressed_frame_end_to_end() {
        let log = RefCell::new(Recorder::new());
        let mut gpio = gpio(&log);
        let mut i2c: I2cTransport<_> = I2cTransport::new(MockI2c::new(&log), &LinkConfig::default());

        let steps: [(u8, u8, &[u8]); 4] = [
            (id::BYTE_START_TRANSFER, 0, &[]),
            (id::BYTE_SEND, 2, &[0x01, 0x02]),
            (id::BYTE_SEND, 1, &[0x03]),
            (id::BYTE_END_TRANSFER, 0, &[]),
        ];
        for (msg, arg, data) in steps {
            assert_eq!(dispatch_byte(&mut i2c, &mut gpio, msg, arg, data), HANDLED);
        }

        assert_eq!(
            log.borrow().events(),
            &[Event::I2cWrite {
                address: 0x3C,
                len: 3
            }]
        );
        assert_eq!(log.borrow().written(), &[0x01, 0x02, 0x03]);
    }

    #[test]
    fn test_stream_chip_select_ordering() {
        let log = RefCell::new(Recorder::new());
        let mut gpio = gpio(&log);
        let mut spi = SpiTransport::new(MockSpi::new(&log), &LinkConfig::default());

        dispatch_byte(&mut spi, &mut gpio, id::BYTE_START_TRANSFER, 0, &[]);
        dispatch_byte(&mut spi, &mut gpio, id::BYTE_SET_DC, 0, &[]);
        dispatch_byte(&mut spi, &mut gpio, id::BYTE_SEND, 3, &[0xB0, 0x02, 0x10]);
        dispatch_byte(&mut spi, &mut gpio, id::BYTE_SET_DC, 1, &[]);
        dispatch_byte(&mut spi, &mut gpio, id::BYTE_SEND, 4, &[0; 4]);
        dispatch_byte(&mut spi, &mut gpio, id::BYTE_END_TRANSFER, 0, &[]);

        let log = log.borrow();
        let is_write = |e: &Event| matches!(e, Event::SpiWrite { .. });
        let select = log
            .position(|e| *e == Event::Pin(ControlLine::ChipSelect, Level::Low))
            .unwrap();
        let release = log
            .rposition(|e| *e == Event::Pin(ControlLine::ChipSelect, Level::High))
            .unwrap();
        let first_write = log.position(is_write).unwrap();
        let last_write = log.rposition(is_write).unwrap();

        assert!(select < first_write);
        assert!(last_write < release);
    }

    #[test]
    fn test_transmit_failure_reports_failed() {
        let log = RefCell::new(Recorder::new());
        let mut gpio = gpio(&log);
        let mut spi = SpiTransport::new(
            MockSpi::new(&log).fail_on_call(0, BusError::Timeout),
            &LinkConfig::default(),
        );

        dispatch_byte(&mut spi, &mut gpio, id::BYTE_START_TRANSFER, 0, &[]);
        assert_eq!(
            dispatch_byte(&mut spi, &mut gpio, id::BYTE_SEND, 1, &[0xAF]),
            FAILED
        );
        assert_eq!(log.borrow().spi_attempts(), 1);
    }

    #[test]
    fn test_unknown_byte_message_fails_without_side_effects() {
        let log = RefCell::new(Recorder::new());
        let mut gpio = gpio(&log);
        let mut i2c: I2cTransport<_> = I2cTransport::new(MockI2c::new(&log), &LinkConfig::default());

        dispatch_byte(&mut i2c, &mut gpio, id::BYTE_START_TRANSFER, 0, &[]);
        dispatch_byte(&mut i2c, &mut gpio, id::BYTE_SEND, 1, &[0x7E]);

        assert_eq!(dispatch_byte(&mut i2c, &mut gpio, 0xEE, 1, &[0x55]), FAILED);
        assert_eq!(
            dispatch_byte(&mut i2c, &mut gpio, id::GPIO_CS, 0, &[]),
            FAILED
        );
        // Announced count larger than the buffer
        assert_eq!(
            dispatch_byte(&mut i2c, &mut gpio, id::BYTE_SEND, 4, &[0x55]),
            FAILED
        );

        assert_eq!(i2c.staged(), &[0x7E]);
        assert!(log.borrow().events().is_empty());
    }

    #[test]
    fn test_unknown_gpio_message_succeeds_without_pin_change() {
        let log = RefCell::new(Recorder::new());
        let mut gpio = gpio(&log);

        assert_eq!(dispatch_gpio(&mut gpio, 0xEE, 1), HANDLED);
        assert_eq!(dispatch_gpio(&mut gpio, id::BYTE_SEND, 1), HANDLED);
        assert!(log.borrow().events().is_empty());
    }

    #[test]
    fn test_gpio_dispatch_drives_pins_and_delays() {
        let log = RefCell::new(Recorder::new());
        let mut gpio = gpio(&log);

        assert_eq!(dispatch_gpio(&mut gpio, id::GPIO_RESET, 0), HANDLED);
        assert_eq!(dispatch_gpio(&mut gpio, id::DELAY_MILLI, 10), HANDLED);
        assert_eq!(dispatch_gpio(&mut gpio, id::GPIO_RESET, 1), HANDLED);

        assert_eq!(
            log.borrow().events(),
            &[
                Event::Pin(ControlLine::Reset, Level::Low),
                Event::Delay(10),
                Event::Pin(ControlLine::Reset, Level::High),
            ]
        );
        assert_eq!(log.borrow().now_ms(), 10);
    }
}
