//! Link configuration
//!
//! Named constants for every tunable of the glue layer, plus [`LinkConfig`]
//! which carries them at runtime. Boards override individual fields; the
//! defaults match an SSD13xx panel on an STM32F4.

#[cfg(any(test, feature = "serde"))]
use serde::{Deserialize, Serialize};

use panelbridge_hal::DEFAULT_LOOPS_PER_MS;

/// 7-bit I2C address of the panel controller (0x3D when SA0 is strapped high)
pub const DEVICE_ADDRESS: u8 = 0x3C;

/// Upper bound on a single blocking transmit, in milliseconds
pub const TX_TIMEOUT_MS: u32 = 100;

/// Settle delay after asserting and before de-asserting chip-select, in milliseconds
///
/// Setup/hold requirement of the SSD13xx family, not a property of SPI.
pub const FRAME_SETTLE_MS: u8 = 2;

/// Capacity of the addressed transport's staging buffer
///
/// The display runtime never sends more than this between transfer start
/// and transfer end.
pub const STAGING_CAPACITY: usize = 32;

/// Runtime link configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(any(test, feature = "serde"), derive(Serialize, Deserialize))]
#[cfg_attr(any(test, feature = "serde"), serde(default))]
pub struct LinkConfig {
    /// 7-bit device address for addressed transports
    pub device_address: u8,
    /// Transmit timeout in milliseconds
    pub tx_timeout_ms: u32,
    /// Chip-select settle delay in milliseconds
    pub settle_ms: u8,
    /// Busy-wait calibration (spin iterations per millisecond)
    pub loops_per_ms: u32,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            device_address: DEVICE_ADDRESS,
            tx_timeout_ms: TX_TIMEOUT_MS,
            settle_ms: FRAME_SETTLE_MS,
            loops_per_ms: DEFAULT_LOOPS_PER_MS,
        }
    }
}

impl LinkConfig {
    /// Set the device address
    pub const fn with_device_address(mut self, address: u8) -> Self {
        self.device_address = address;
        self
    }

    /// Set the busy-wait calibration
    pub const fn with_loops_per_ms(mut self, loops_per_ms: u32) -> Self {
        self.loops_per_ms = loops_per_ms;
        self
    }

    /// Check that the address fits in 7 bits and the timeout is non-zero
    pub const fn is_valid(&self) -> bool {
        self.device_address <= 0x7F && self.tx_timeout_ms > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LinkConfig::default();

        assert_eq!(config.device_address, 0x3C);
        assert_eq!(config.tx_timeout_ms, 100);
        assert_eq!(config.settle_ms, 2);
        assert_eq!(config.loops_per_ms, 12_000);
        assert!(config.is_valid());
    }

    #[test]
    fn test_builders() {
        let config = LinkConfig::default()
            .with_device_address(0x3D)
            .with_loops_per_ms(42_000);

        assert_eq!(config.device_address, 0x3D);
        assert_eq!(config.loops_per_ms, 42_000);
    }

    #[test]
    fn test_invalid_address() {
        let config = LinkConfig::default().with_device_address(0x78);
        assert!(!config.is_valid());
    }

    #[test]
    fn test_parse_partial_toml() {
        let text = r#"
            device_address = 61
            loops_per_ms = 42000
        "#;

        let config: LinkConfig = toml::from_str(text).unwrap();

        assert_eq!(config.device_address, 0x3D);
        assert_eq!(config.loops_per_ms, 42_000);
        // Unspecified fields keep their defaults
        assert_eq!(config.tx_timeout_ms, TX_TIMEOUT_MS);
        assert_eq!(config.settle_ms, FRAME_SETTLE_MS);
    }
}
