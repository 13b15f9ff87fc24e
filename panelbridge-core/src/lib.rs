//! Board-agnostic glue between a display runtime and its peripherals
//!
//! A u8x8-style display runtime moves pixels through two callbacks: a byte
//! transport and a GPIO/delay handler. This crate implements both on top of
//! the `panelbridge-hal` traits:
//!
//! - [`GpioDelayAdapter`] - chip-select, data/command, reset, delays
//! - [`SpiTransport`] - chip-select framed stream transport
//! - [`I2cTransport`] - staged, addressed transport
//! - [`dispatch`] - raw `(message, arg, bytes) -> u8` entry points
//!
//! Everything is synchronous and blocking. Peripheral handles are owned by
//! the adapters, so exclusive access is enforced at compile time.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod config;
pub mod dispatch;
pub mod error;
pub mod gpio;
pub mod message;
pub mod staging;
pub mod transport;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use config::LinkConfig;
pub use error::LinkError;
pub use gpio::{ControlLine, ControlPins, GpioAndDelay, GpioDelayAdapter};
pub use message::{ByteMessage, GpioMessage};
pub use staging::StagingBuffer;
pub use transport::{
    ByteTransport, ChipSelect, FrameState, I2cTransport, SpiTransport, TransportKind,
};
