//! STM32F4-specific HAL for panelbridge
//!
//! This crate provides STM32F4 implementations of the `panelbridge-hal`
//! bus traits on top of embassy-stm32, plus the board's pin assignments:
//!
//! - STM32F407VG (Discovery board)
//! - STM32F411CE (Black Pill)
//!
//! # Features
//!
//! - `stm32f407vg` / `stm32f411ce` - Select the chip
//! - `defmt` - Enable debug formatting support
//!
//! # Usage
//!
//! Peripherals are created with embassy-stm32 in blocking mode and handed to
//! [`Stm32Spi`] / [`Stm32I2c`]. Pins are wrapped with
//! `panelbridge_hal::embedded::EhPin`.

#![no_std]
#![deny(unsafe_code)]

pub mod i2c;
pub mod pins;
pub mod spi;

pub use i2c::{i2c_config, Stm32I2c};
pub use spi::Stm32Spi;
