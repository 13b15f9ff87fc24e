//! panelbridge Hardware Abstraction Layer
//!
//! This crate defines the peripheral traits the display glue drives. Chip
//! HALs (or the `embedded-hal` bridge in [`embedded`]) implement them so the
//! same adapters run on any board and on the host under test.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Display runtime (panelbridge-display)  │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  Adapters (panelbridge-core)            │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  panelbridge-hal (this crate - traits)  │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ embedded-hal  │       │ panelbridge-  │
//! │    bridge     │       │  hal-stm32f4  │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`] - Control lines (CS, DC, RESET, bit-banged I2C)
//! - [`spi::SpiBus`] - Stream transmit with timeout
//! - [`i2c::I2cBus`] - Addressed transmit with timeout
//! - [`delay::DelayMs`] - Blocking millisecond delay

#![no_std]
#![deny(unsafe_code)]

pub mod delay;
pub mod error;
pub mod gpio;
pub mod i2c;
pub mod spi;

#[cfg(feature = "embedded-hal")]
pub mod embedded;

// Re-export key traits at crate root for convenience
pub use delay::{BusyWaitDelay, DelayMs, DEFAULT_LOOPS_PER_MS};
pub use error::BusError;
pub use gpio::{Level, OutputPin};
pub use i2c::I2cBus;
pub use spi::{write_with_deadline, SpiBus};
