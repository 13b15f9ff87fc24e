//! SSD1312 OLED controller
//!
//! 128x64 monochrome panels ("noname" module) on 4-wire SPI or I2C.
//! Command set is shared with the SSD1306/SH1106 family.

use panelbridge_core::ChipSelect;

use crate::profile::ControllerProfile;

/// SSD1312 commands
#[allow(dead_code)]
pub mod cmd {
    pub const DISPLAY_OFF: u8 = 0xAE;
    pub const DISPLAY_ON: u8 = 0xAF;
    pub const SET_CONTRAST: u8 = 0x81;
    pub const ENTIRE_DISPLAY_RAM: u8 = 0xA4;
    pub const SET_NORMAL: u8 = 0xA6;
    pub const SET_INVERSE: u8 = 0xA7;
    pub const SET_MEMORY_MODE: u8 = 0x20;
    pub const SET_DISPLAY_OFFSET: u8 = 0xD3;
    pub const SET_COM_PINS: u8 = 0xDA;
    pub const SET_VCOM_DETECT: u8 = 0xDB;
    pub const SET_CLOCK_DIV: u8 = 0xD5;
    pub const SET_PRECHARGE: u8 = 0xD9;
    pub const SET_MUX_RATIO: u8 = 0xA8;
    pub const SET_LOW_COLUMN: u8 = 0x00;
    pub const SET_HIGH_COLUMN: u8 = 0x10;
    pub const SET_PAGE_ADDR: u8 = 0xB0;
    pub const SET_START_LINE: u8 = 0x40;
    pub const SEG_REMAP_OFF: u8 = 0xA0;
    pub const SEG_REMAP_ON: u8 = 0xA1;
    pub const COM_SCAN_INC: u8 = 0xC0;
    pub const COM_SCAN_DEC: u8 = 0xC8;
    pub const SET_CHARGE_PUMP: u8 = 0x8D;
}

const INIT_SEQUENCE: &[u8] = &[
    cmd::DISPLAY_OFF,
    cmd::SET_CLOCK_DIV,
    0x80, // Default clock
    cmd::SET_MUX_RATIO,
    0x3F, // 64 lines
    cmd::SET_DISPLAY_OFFSET,
    0x00,
    cmd::SET_START_LINE,
    cmd::SET_CHARGE_PUMP,
    0x14, // Enable charge pump
    cmd::SET_MEMORY_MODE,
    0x02, // Page addressing
    cmd::SET_COM_PINS,
    0x12, // Alternative COM config
    cmd::SET_CONTRAST,
    0xCF,
    cmd::SET_PRECHARGE,
    0xF1,
    cmd::SET_VCOM_DETECT,
    0x40,
    cmd::ENTIRE_DISPLAY_RAM,
    cmd::SET_NORMAL,
];

/// SSD1312 128x64 panel
pub const SSD1312_128X64: ControllerProfile = ControllerProfile {
    name: "ssd1312_128x64_noname",
    width: 128,
    height: 64,
    column_offset: 0,
    chip_select: ChipSelect::ACTIVE_LOW,
    reset_pulse_ms: 100,
    post_reset_ms: 100,
    init_sequence: INIT_SEQUENCE,
    power_save_on: &[cmd::DISPLAY_OFF],
    power_save_off: &[cmd::DISPLAY_ON],
    flip_off: &[cmd::SEG_REMAP_ON, cmd::COM_SCAN_DEC],
    flip_on: &[cmd::SEG_REMAP_OFF, cmd::COM_SCAN_INC],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_leaves_display_off() {
        assert_eq!(INIT_SEQUENCE.first(), Some(&cmd::DISPLAY_OFF));
        assert!(!INIT_SEQUENCE.contains(&cmd::DISPLAY_ON));
    }

    #[test]
    fn test_init_fits_one_addressed_frame() {
        // One control byte plus the sequence must fit the staging buffer
        assert!(INIT_SEQUENCE.len() < panelbridge_core::config::STAGING_CAPACITY);
    }
}
