//! Stream transport over a hardware SPI bus
//!
//! Frame protocol:
//!
//! ```text
//! Idle ──StartTransfer──▶ CS enable, settle ──▶ Framing
//! Framing ──Send(bytes)──▶ blocking transmit ──▶ Framing
//! Framing ──EndTransfer──▶ settle, CS disable ──▶ Idle
//! ```
//!
//! `SetDc` is forwarded to the GPIO adapter regardless of frame state. A
//! failed transmit is reported immediately and never retried.

use panelbridge_hal::SpiBus;

use super::{ByteTransport, ChipSelect, FrameState, TransportKind};
use crate::config::LinkConfig;
use crate::error::LinkError;
use crate::gpio::GpioAndDelay;
use crate::message::ByteMessage;

/// Stream transport adapter
pub struct SpiTransport<S> {
    bus: S,
    chip_select: ChipSelect,
    /// Settle delay around chip-select edges (ms)
    settle_ms: u8,
    tx_timeout_ms: u32,
    state: FrameState,
}

impl<S: SpiBus> SpiTransport<S> {
    /// Create a new SPI transport with active-low chip-select
    pub fn new(bus: S, config: &LinkConfig) -> Self {
        Self {
            bus,
            chip_select: ChipSelect::ACTIVE_LOW,
            settle_ms: config.settle_ms,
            tx_timeout_ms: config.tx_timeout_ms,
            state: FrameState::Idle,
        }
    }

    /// Get the chip-select levels in use
    pub fn chip_select(&self) -> ChipSelect {
        self.chip_select
    }

    /// Give back the bus
    pub fn release(self) -> S {
        self.bus
    }
}

impl<S: SpiBus> ByteTransport for SpiTransport<S> {
    fn kind(&self) -> TransportKind {
        TransportKind::Stream
    }

    fn frame_state(&self) -> FrameState {
        self.state
    }

    fn bind_chip_select(&mut self, levels: ChipSelect) {
        self.chip_select = levels;
    }

    fn handle<G: GpioAndDelay>(
        &mut self,
        msg: ByteMessage<'_>,
        gpio: &mut G,
    ) -> Result<(), LinkError> {
        match msg {
            // Bus already configured by platform start-up
            ByteMessage::Init => Ok(()),
            ByteMessage::SetDc(level) => gpio.set_dc(level),
            ByteMessage::StartTransfer => {
                gpio.set_cs(self.chip_select.enable)?;
                gpio.delay_ms(self.settle_ms)?;
                self.state = FrameState::Framing;
                Ok(())
            }
            ByteMessage::Send(data) => {
                if self.state != FrameState::Framing {
                    return Err(LinkError::NoFrame);
                }
                self.bus.write(data, self.tx_timeout_ms).map_err(|e| {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("spi transmit of {} bytes failed: {}", data.len(), e);
                    LinkError::from(e)
                })
            }
            ByteMessage::EndTransfer => {
                gpio.delay_ms(self.settle_ms)?;
                gpio.set_cs(self.chip_select.disable)?;
                self.state = FrameState::Idle;
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gpio::{ControlLine, ControlPins, GpioDelayAdapter};
    use crate::mock::{Event, FakeClock, MockPin, MockSpi, Recorder};
    use core::cell::RefCell;
    use panelbridge_hal::{BusError, Level};

    type Gpio<'a> = GpioDelayAdapter<MockPin<'a>, FakeClock<'a>>;

    fn gpio(log: &RefCell<Recorder>) -> Gpio<'_> {
        let pins = ControlPins::spi(
            MockPin::new(ControlLine::ChipSelect, log),
            MockPin::new(ControlLine::DataCommand, log),
            MockPin::new(ControlLine::Reset, log),
        );
        GpioDelayAdapter::new(pins, FakeClock::new(log))
    }

    #[test]
    fn test_frame_brackets_transmits() {
        let log = RefCell::new(Recorder::new());
        let mut gpio = gpio(&log);
        let mut spi = SpiTransport::new(MockSpi::new(&log), &LinkConfig::default());

        spi.handle(ByteMessage::StartTransfer, &mut gpio).unwrap();
        spi.handle(ByteMessage::Send(&[0xAE, 0xD5]), &mut gpio).unwrap();
        spi.handle(ByteMessage::Send(&[0x80]), &mut gpio).unwrap();
        spi.handle(ByteMessage::EndTransfer, &mut gpio).unwrap();

        assert_eq!(
            log.borrow().events(),
            &[
                Event::Pin(ControlLine::ChipSelect, Level::Low),
                Event::Delay(2),
                Event::SpiWrite { len: 2 },
                Event::SpiWrite { len: 1 },
                Event::Delay(2),
                Event::Pin(ControlLine::ChipSelect, Level::High),
            ]
        );
        assert_eq!(log.borrow().written(), &[0xAE, 0xD5, 0x80]);
        assert_eq!(spi.frame_state(), FrameState::Idle);
    }

    #[test]
    fn test_set_dc_forwards_to_gpio() {
        let log = RefCell::new(Recorder::new());
        let mut gpio = gpio(&log);
        let mut spi = SpiTransport::new(MockSpi::new(&log), &LinkConfig::default());

        // Independent of frame state
        spi.handle(ByteMessage::SetDc(Level::High), &mut gpio).unwrap();
        spi.handle(ByteMessage::StartTransfer, &mut gpio).unwrap();
        spi.handle(ByteMessage::SetDc(Level::Low), &mut gpio).unwrap();

        let log = log.borrow();
        assert_eq!(
            log.events()[0],
            Event::Pin(ControlLine::DataCommand, Level::High)
        );
        assert_eq!(
            log.events().last(),
            Some(&Event::Pin(ControlLine::DataCommand, Level::Low))
        );
    }

    #[test]
    fn test_transmit_failure_is_not_retried() {
        let log = RefCell::new(Recorder::new());
        let mut gpio = gpio(&log);
        let mut spi = SpiTransport::new(
            MockSpi::new(&log).fail_on_call(1, BusError::Timeout),
            &LinkConfig::default(),
        );

        spi.handle(ByteMessage::StartTransfer, &mut gpio).unwrap();
        spi.handle(ByteMessage::Send(&[0x01]), &mut gpio).unwrap();
        let result = spi.handle(ByteMessage::Send(&[0x02, 0x03]), &mut gpio);

        assert_eq!(result, Err(LinkError::Transmit(BusError::Timeout)));
        // One attempt per call, the failed bytes never reach the wire
        assert_eq!(log.borrow().spi_attempts(), 2);
        assert_eq!(log.borrow().written(), &[0x01]);

        // The frame can still be closed
        spi.handle(ByteMessage::EndTransfer, &mut gpio).unwrap();
        assert_eq!(
            log.borrow().events().last(),
            Some(&Event::Pin(ControlLine::ChipSelect, Level::High))
        );
    }

    #[test]
    fn test_send_outside_frame_rejected() {
        let log = RefCell::new(Recorder::new());
        let mut gpio = gpio(&log);
        let mut spi = SpiTransport::new(MockSpi::new(&log), &LinkConfig::default());

        assert_eq!(
            spi.handle(ByteMessage::Send(&[0x01]), &mut gpio),
            Err(LinkError::NoFrame)
        );
        assert_eq!(log.borrow().spi_attempts(), 0);
    }

    #[test]
    fn test_bound_chip_select_levels() {
        let log = RefCell::new(Recorder::new());
        let mut gpio = gpio(&log);
        let mut spi = SpiTransport::new(MockSpi::new(&log), &LinkConfig::default());
        spi.bind_chip_select(ChipSelect {
            enable: Level::High,
            disable: Level::Low,
        });

        spi.handle(ByteMessage::StartTransfer, &mut gpio).unwrap();
        spi.handle(ByteMessage::EndTransfer, &mut gpio).unwrap();

        let log = log.borrow();
        assert_eq!(
            log.events().first(),
            Some(&Event::Pin(ControlLine::ChipSelect, Level::High))
        );
        assert_eq!(
            log.events().last(),
            Some(&Event::Pin(ControlLine::ChipSelect, Level::Low))
        );
    }

    #[test]
    fn test_init_is_noop() {
        let log = RefCell::new(Recorder::new());
        let mut gpio = gpio(&log);
        let mut spi = SpiTransport::new(MockSpi::new(&log), &LinkConfig::default());

        assert_eq!(spi.handle(ByteMessage::Init, &mut gpio), Ok(()));
        assert!(log.borrow().events().is_empty());
        assert_eq!(spi.kind(), TransportKind::Stream);
    }
}
