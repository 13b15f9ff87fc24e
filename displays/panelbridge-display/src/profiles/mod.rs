//! Built-in controller profiles

pub mod ssd1312;

pub use ssd1312::SSD1312_128X64;
