//! Display instance and bring-up for panelbridge
//!
//! This crate provides:
//! - [`ControllerProfile`] describing a controller/panel combination
//! - [`Panel`], a display instance bound to a transport and a GPIO adapter
//! - [`bring_up`], the fixed start-up sequence
//!
//! # Usage
//!
//! ```ignore
//! let transport = SpiTransport::new(spi, &LinkConfig::default());
//! let gpio = GpioDelayAdapter::new(ControlPins::spi(cs, dc, reset), delay);
//! let mut panel = Panel::setup(&SSD1312_128X64, Rotation::R2, transport, gpio)?;
//! bring_up(&mut panel)?;
//! ```

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod error;
pub mod panel;
pub mod profile;
pub mod profiles;
pub mod runtime;

pub use error::PanelError;
pub use panel::Panel;
pub use profile::{ControllerProfile, Rotation};
pub use profiles::SSD1312_128X64;
pub use runtime::{bring_up, initialize, DisplayRuntime};
