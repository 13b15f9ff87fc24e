//! Recording test doubles
//!
//! Pins, buses and the fake clock all append to one shared [`Recorder`], so
//! tests can assert on the exact interleaving of pin edges, delays and
//! transmits without hardware.
//!
//! ```ignore
//! let log = RefCell::new(Recorder::new());
//! let cs = MockPin::new(ControlLine::ChipSelect, &log);
//! let spi = MockSpi::new(&log);
//! // ... drive the adapters ...
//! assert_eq!(log.borrow().written(), &[0xAE]);
//! ```

use core::cell::RefCell;

use heapless::Vec;
use panelbridge_hal::{BusError, DelayMs, I2cBus, Level, OutputPin, SpiBus};

use crate::gpio::ControlLine;

/// Maximum number of events a recorder keeps
pub const MAX_EVENTS: usize = 512;

/// Maximum number of transmitted bytes a recorder keeps
pub const MAX_BYTES: usize = 4096;

/// Observable side effect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// A control line was driven
    Pin(ControlLine, Level),
    /// The fake clock was advanced (ms)
    Delay(u32),
    /// A successful SPI transmit
    SpiWrite {
        /// Bytes transmitted
        len: usize,
    },
    /// A successful I2C transmit
    I2cWrite {
        /// 7-bit device address
        address: u8,
        /// Bytes transmitted
        len: usize,
    },
}

/// Shared log of side effects
#[derive(Debug, Default)]
pub struct Recorder {
    events: Vec<Event, MAX_EVENTS>,
    bytes: Vec<u8, MAX_BYTES>,
    now_ms: u64,
    spi_attempts: usize,
    i2c_attempts: usize,
}

impl Recorder {
    /// Create an empty recorder
    pub const fn new() -> Self {
        Self {
            events: Vec::new(),
            bytes: Vec::new(),
            now_ms: 0,
            spi_attempts: 0,
            i2c_attempts: 0,
        }
    }

    /// All events in order
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Concatenation of every successfully transmitted byte
    pub fn written(&self) -> &[u8] {
        &self.bytes
    }

    /// Fake clock reading in milliseconds
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// SPI transmits attempted, including failed ones
    pub fn spi_attempts(&self) -> usize {
        self.spi_attempts
    }

    /// I2C transmits attempted, including failed ones
    pub fn i2c_attempts(&self) -> usize {
        self.i2c_attempts
    }

    /// Index of the first event matching `pred`
    pub fn position(&self, pred: impl Fn(&Event) -> bool) -> Option<usize> {
        self.events.iter().position(pred)
    }

    /// Index of the last event matching `pred`
    pub fn rposition(&self, pred: impl Fn(&Event) -> bool) -> Option<usize> {
        self.events.iter().rposition(pred)
    }

    /// Forget everything recorded so far (the clock keeps running)
    pub fn clear(&mut self) {
        self.events.clear();
        self.bytes.clear();
        self.spi_attempts = 0;
        self.i2c_attempts = 0;
    }

    fn push(&mut self, event: Event) {
        assert!(self.events.push(event).is_ok(), "recorder event log full");
    }

    fn record_bytes(&mut self, data: &[u8]) {
        assert!(
            self.bytes.extend_from_slice(data).is_ok(),
            "recorder byte log full"
        );
    }
}

/// Output pin that records its edges
pub struct MockPin<'a> {
    line: ControlLine,
    log: &'a RefCell<Recorder>,
}

impl<'a> MockPin<'a> {
    /// Create a pin labelled with the line it stands for
    pub fn new(line: ControlLine, log: &'a RefCell<Recorder>) -> Self {
        Self { line, log }
    }
}

impl OutputPin for MockPin<'_> {
    fn set_high(&mut self) {
        self.log.borrow_mut().push(Event::Pin(self.line, Level::High));
    }

    fn set_low(&mut self) {
        self.log.borrow_mut().push(Event::Pin(self.line, Level::Low));
    }
}

/// Delay source that advances a fake clock instead of blocking
pub struct FakeClock<'a> {
    log: &'a RefCell<Recorder>,
}

impl<'a> FakeClock<'a> {
    /// Create a clock backed by the recorder
    pub fn new(log: &'a RefCell<Recorder>) -> Self {
        Self { log }
    }
}

impl DelayMs for FakeClock<'_> {
    fn delay_ms(&mut self, ms: u32) {
        let mut log = self.log.borrow_mut();
        log.now_ms += ms as u64;
        log.push(Event::Delay(ms));
    }
}

/// Injected failure: the zero-based call index and the error it returns
type FailAt = Option<(usize, BusError)>;

/// SPI bus that records transmits
pub struct MockSpi<'a> {
    log: &'a RefCell<Recorder>,
    fail_at: FailAt,
    calls: usize,
}

impl<'a> MockSpi<'a> {
    /// Create a bus that always succeeds
    pub fn new(log: &'a RefCell<Recorder>) -> Self {
        Self {
            log,
            fail_at: None,
            calls: 0,
        }
    }

    /// Make the `call`-th write (zero-based) fail with `error`
    pub fn fail_on_call(mut self, call: usize, error: BusError) -> Self {
        self.fail_at = Some((call, error));
        self
    }
}

impl SpiBus for MockSpi<'_> {
    fn write(&mut self, data: &[u8], _timeout_ms: u32) -> Result<(), BusError> {
        let call = self.calls;
        self.calls += 1;

        let mut log = self.log.borrow_mut();
        log.spi_attempts += 1;
        if let Some((fail_call, error)) = self.fail_at {
            if fail_call == call {
                return Err(error);
            }
        }
        log.push(Event::SpiWrite { len: data.len() });
        log.record_bytes(data);
        Ok(())
    }
}

/// I2C bus that records transmits
pub struct MockI2c<'a> {
    log: &'a RefCell<Recorder>,
    fail_at: FailAt,
    calls: usize,
}

impl<'a> MockI2c<'a> {
    /// Create a bus that always acknowledges
    pub fn new(log: &'a RefCell<Recorder>) -> Self {
        Self {
            log,
            fail_at: None,
            calls: 0,
        }
    }

    /// Make the `call`-th write (zero-based) fail with `error`
    pub fn fail_on_call(mut self, call: usize, error: BusError) -> Self {
        self.fail_at = Some((call, error));
        self
    }
}

impl I2cBus for MockI2c<'_> {
    fn write(&mut self, address: u8, data: &[u8], _timeout_ms: u32) -> Result<(), BusError> {
        let call = self.calls;
        self.calls += 1;

        let mut log = self.log.borrow_mut();
        log.i2c_attempts += 1;
        if let Some((fail_call, error)) = self.fail_at {
            if fail_call == call {
                return Err(error);
            }
        }
        log.push(Event::I2cWrite {
            address,
            len: data.len(),
        });
        log.record_bytes(data);
        Ok(())
    }
}
