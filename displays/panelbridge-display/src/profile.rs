//! Controller profiles
//!
//! A profile captures everything the runtime needs to know about one
//! controller/panel combination: geometry, chip-select polarity, reset
//! timing and the command bytes for init, power save and flipping.

use panelbridge_core::ChipSelect;

/// Panel orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Rotation {
    /// Native orientation
    #[default]
    R0,
    /// Rotated 180 degrees (segment remap and COM scan reversed)
    R2,
}

impl Rotation {
    /// Check if the controller must scan in reverse
    pub const fn is_flipped(self) -> bool {
        matches!(self, Rotation::R2)
    }
}

/// Static description of a display controller
#[derive(Debug, Clone, Copy)]
pub struct ControllerProfile {
    /// Human-readable name
    pub name: &'static str,
    /// Visible width in pixels
    pub width: u16,
    /// Visible height in pixels (multiple of 8)
    pub height: u16,
    /// First visible RAM column
    pub column_offset: u8,
    /// Chip-select polarity
    pub chip_select: ChipSelect,
    /// Length of the reset low pulse (ms)
    pub reset_pulse_ms: u8,
    /// Wait after releasing reset before the first command (ms)
    pub post_reset_ms: u8,
    /// Commands sent by `init_display`; leave the panel in power save
    pub init_sequence: &'static [u8],
    /// Commands that enter power save
    pub power_save_on: &'static [u8],
    /// Commands that leave power save
    pub power_save_off: &'static [u8],
    /// Commands for the native scan direction
    pub flip_off: &'static [u8],
    /// Commands for the reversed scan direction
    pub flip_on: &'static [u8],
}

impl ControllerProfile {
    /// Number of 8-pixel pages
    pub const fn pages(&self) -> usize {
        self.height as usize / 8
    }

    /// Bytes needed for a full 1-bpp frame buffer
    pub const fn buffer_len(&self) -> usize {
        self.width as usize * self.pages()
    }

    /// Scan-direction commands for a rotation
    pub const fn flip_commands(&self, rotation: Rotation) -> &'static [u8] {
        if rotation.is_flipped() {
            self.flip_on
        } else {
            self.flip_off
        }
    }
}
