//! Callback message vocabulary
//!
//! The display runtime talks to the glue through two callbacks, each taking
//! a message identifier, an integer argument and a byte pointer. Here every
//! message is a variant carrying its own payload, so an unhandled message is
//! a compile error rather than a silent default branch.
//!
//! The raw identifiers in [`id`] are kept for the callback-shaped entry
//! points in [`crate::dispatch`].

use panelbridge_hal::Level;

/// Raw message identifiers used by the callback-shaped entry points
pub mod id {
    /// Byte transport: one-time transport setup
    pub const BYTE_INIT: u8 = 20;
    /// Byte transport: transmit `arg` bytes from the pointer
    pub const BYTE_SEND: u8 = 23;
    /// Byte transport: open a frame
    pub const BYTE_START_TRANSFER: u8 = 24;
    /// Byte transport: close a frame
    pub const BYTE_END_TRANSFER: u8 = 25;
    /// Byte transport: select command (0) or data (1)
    pub const BYTE_SET_DC: u8 = 32;

    /// GPIO: one-time pin and timer setup
    pub const GPIO_AND_DELAY_INIT: u8 = 40;
    /// Delay: block for `arg` milliseconds
    pub const DELAY_MILLI: u8 = 41;

    /// GPIO: software SPI clock line
    pub const GPIO_SPI_CLOCK: u8 = 64;
    /// GPIO: software SPI data line
    pub const GPIO_SPI_DATA: u8 = 65;
    /// GPIO: chip-select line
    pub const GPIO_CS: u8 = 73;
    /// GPIO: data/command line
    pub const GPIO_DC: u8 = 74;
    /// GPIO: reset line
    pub const GPIO_RESET: u8 = 75;
    /// GPIO: software I2C clock line
    pub const GPIO_I2C_CLOCK: u8 = 76;
    /// GPIO: software I2C data line
    pub const GPIO_I2C_DATA: u8 = 77;
}

/// Message for the GPIO and delay callback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GpioMessage {
    /// One-time setup (pins are configured by platform start-up)
    Init,
    /// Block for the given number of milliseconds
    DelayMilli(u8),
    /// Drive the chip-select line
    ChipSelect(Level),
    /// Drive the data/command line (low = command, high = data)
    DataCommand(Level),
    /// Drive the controller reset line
    Reset(Level),
    /// Software SPI clock (unused with hardware SPI)
    SpiClock(Level),
    /// Software SPI data (unused with hardware SPI)
    SpiData(Level),
    /// Software I2C clock
    I2cClock(Level),
    /// Software I2C data
    I2cData(Level),
}

impl GpioMessage {
    /// Decode a raw callback message
    ///
    /// Returns `None` for identifiers outside the GPIO vocabulary.
    pub fn from_raw(msg: u8, arg: u8) -> Option<Self> {
        let level = Level::from_arg(arg);
        match msg {
            id::GPIO_AND_DELAY_INIT => Some(GpioMessage::Init),
            id::DELAY_MILLI => Some(GpioMessage::DelayMilli(arg)),
            id::GPIO_CS => Some(GpioMessage::ChipSelect(level)),
            id::GPIO_DC => Some(GpioMessage::DataCommand(level)),
            id::GPIO_RESET => Some(GpioMessage::Reset(level)),
            id::GPIO_SPI_CLOCK => Some(GpioMessage::SpiClock(level)),
            id::GPIO_SPI_DATA => Some(GpioMessage::SpiData(level)),
            id::GPIO_I2C_CLOCK => Some(GpioMessage::I2cClock(level)),
            id::GPIO_I2C_DATA => Some(GpioMessage::I2cData(level)),
            _ => None,
        }
    }

    /// Raw identifier of this message
    pub fn id(&self) -> u8 {
        match self {
            GpioMessage::Init => id::GPIO_AND_DELAY_INIT,
            GpioMessage::DelayMilli(_) => id::DELAY_MILLI,
            GpioMessage::ChipSelect(_) => id::GPIO_CS,
            GpioMessage::DataCommand(_) => id::GPIO_DC,
            GpioMessage::Reset(_) => id::GPIO_RESET,
            GpioMessage::SpiClock(_) => id::GPIO_SPI_CLOCK,
            GpioMessage::SpiData(_) => id::GPIO_SPI_DATA,
            GpioMessage::I2cClock(_) => id::GPIO_I2C_CLOCK,
            GpioMessage::I2cData(_) => id::GPIO_I2C_DATA,
        }
    }
}

/// Message for the byte transport callback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ByteMessage<'a> {
    /// One-time transport setup
    Init,
    /// Select command (low) or data (high) for the following bytes
    SetDc(Level),
    /// Open a frame
    StartTransfer,
    /// Transmit bytes within the current frame
    Send(&'a [u8]),
    /// Close the current frame
    EndTransfer,
}

impl<'a> ByteMessage<'a> {
    /// Decode a raw callback message
    ///
    /// For `BYTE_SEND`, `arg` is the byte count taken from the front of
    /// `data`. Returns `None` for unknown identifiers or when `data` is
    /// shorter than the announced count.
    pub fn from_raw(msg: u8, arg: u8, data: &'a [u8]) -> Option<Self> {
        match msg {
            id::BYTE_INIT => Some(ByteMessage::Init),
            id::BYTE_SET_DC => Some(ByteMessage::SetDc(Level::from_arg(arg))),
            id::BYTE_START_TRANSFER => Some(ByteMessage::StartTransfer),
            id::BYTE_SEND => data.get(..arg as usize).map(ByteMessage::Send),
            id::BYTE_END_TRANSFER => Some(ByteMessage::EndTransfer),
            _ => None,
        }
    }

    /// Raw identifier of this message
    pub fn id(&self) -> u8 {
        match self {
            ByteMessage::Init => id::BYTE_INIT,
            ByteMessage::SetDc(_) => id::BYTE_SET_DC,
            ByteMessage::StartTransfer => id::BYTE_START_TRANSFER,
            ByteMessage::Send(_) => id::BYTE_SEND,
            ByteMessage::EndTransfer => id::BYTE_END_TRANSFER,
        }
    }
}
