//! Display instance
//!
//! [`Panel`] binds a controller profile and rotation to a byte transport and
//! a GPIO/delay adapter, and drives them with the same message sequence a
//! u8x8-style runtime would. It owns the full-frame buffer but performs no
//! drawing; callers render into [`Panel::buffer_mut`] with their own
//! graphics code.
//!
//! Command/data framing depends on the transport:
//!
//! - Stream: one chip-selected frame, `SetDc(Low)` for commands and
//!   `SetDc(High)` for data.
//! - Addressed: each frame starts with a control byte (`0x00` commands,
//!   `0x40` data) and is split so it fits the staging buffer.

use panelbridge_core::{ByteMessage, ByteTransport, GpioAndDelay, GpioMessage, LinkError, TransportKind};
use panelbridge_hal::Level;

use crate::error::PanelError;
use crate::profile::{ControllerProfile, Rotation};
use crate::profiles::ssd1312::cmd;
use crate::runtime::DisplayRuntime;

/// Widest supported panel in pixels
pub const MAX_WIDTH: u16 = 128;

/// Tallest supported panel in pixels
pub const MAX_HEIGHT: u16 = 64;

/// Frame buffer size for the largest supported panel
pub const FRAME_BYTES: usize = MAX_WIDTH as usize * MAX_HEIGHT as usize / 8;

/// Control byte announcing a command stream on addressed transports
const CONTROL_COMMAND: u8 = 0x00;

/// Control byte announcing display data on addressed transports
const CONTROL_DATA: u8 = 0x40;

/// Zeroed page used by `clear_display`
const BLANK_PAGE: [u8; MAX_WIDTH as usize] = [0; MAX_WIDTH as usize];

/// Display instance
pub struct Panel<T, G> {
    profile: &'static ControllerProfile,
    rotation: Rotation,
    transport: T,
    gpio: G,
    /// Page-major 1-bpp frame buffer
    buffer: [u8; FRAME_BYTES],
}

impl<T: ByteTransport, G: GpioAndDelay> Panel<T, G> {
    /// Create a display instance and register its transport and GPIO adapters
    ///
    /// Nothing is sent to the panel; see [`crate::bring_up`].
    pub fn setup(
        profile: &'static ControllerProfile,
        rotation: Rotation,
        mut transport: T,
        gpio: G,
    ) -> Result<Self, PanelError> {
        if profile.width == 0
            || profile.height == 0
            || profile.width > MAX_WIDTH
            || profile.height > MAX_HEIGHT
            || profile.height % 8 != 0
        {
            return Err(PanelError::UnsupportedGeometry);
        }
        if let TransportKind::Addressed { max_frame } = transport.kind() {
            // Need room for the control byte plus at least one payload byte
            if max_frame < 2 {
                return Err(PanelError::UnsupportedTransport);
            }
        }

        transport.bind_chip_select(profile.chip_select);

        Ok(Self {
            profile,
            rotation,
            transport,
            gpio,
            buffer: [0; FRAME_BYTES],
        })
    }

    /// Get the controller profile
    pub fn profile(&self) -> &'static ControllerProfile {
        self.profile
    }

    /// Get the rotation
    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Frame buffer, one byte per 8 vertical pixels, page-major
    pub fn buffer(&self) -> &[u8] {
        &self.buffer[..self.profile.buffer_len()]
    }

    /// Mutable frame buffer for external rendering
    pub fn buffer_mut(&mut self) -> &mut [u8] {
        let len = self.profile.buffer_len();
        &mut self.buffer[..len]
    }

    /// Give back the transport and GPIO adapters
    pub fn release(self) -> (T, G) {
        (self.transport, self.gpio)
    }

    /// Push the whole frame buffer to the controller, page by page
    pub fn send_buffer(&mut self) -> Result<(), LinkError> {
        let width = self.profile.width as usize;
        for page in 0..self.profile.pages() {
            self.set_page(page as u8)?;
            let start = page * width;
            // Copy out so the page does not borrow the buffer while sending
            let mut row = BLANK_PAGE;
            row[..width].copy_from_slice(&self.buffer[start..start + width]);
            self.send_data(&row[..width])?;
        }
        Ok(())
    }

    /// Send command bytes
    pub fn send_commands(&mut self, cmds: &[u8]) -> Result<(), LinkError> {
        self.send_framed(Level::Low, CONTROL_COMMAND, cmds)
    }

    /// Send display data bytes
    pub fn send_data(&mut self, data: &[u8]) -> Result<(), LinkError> {
        self.send_framed(Level::High, CONTROL_DATA, data)
    }

    fn send_framed(&mut self, dc: Level, control: u8, bytes: &[u8]) -> Result<(), LinkError> {
        match self.transport.kind() {
            TransportKind::Stream => self.stream_frame(dc, bytes),
            TransportKind::Addressed { max_frame } => {
                for chunk in bytes.chunks(max_frame - 1) {
                    self.addressed_frame(control, chunk)?;
                }
                Ok(())
            }
        }
    }

    fn stream_frame(&mut self, dc: Level, bytes: &[u8]) -> Result<(), LinkError> {
        self.byte(ByteMessage::StartTransfer)?;
        let sent = self
            .byte(ByteMessage::SetDc(dc))
            .and_then(|()| self.byte(ByteMessage::Send(bytes)));
        // Release chip-select even when the transmit failed
        let closed = self.byte(ByteMessage::EndTransfer);
        sent.and(closed)
    }

    fn addressed_frame(&mut self, control: u8, bytes: &[u8]) -> Result<(), LinkError> {
        self.byte(ByteMessage::StartTransfer)?;
        let sent = self
            .byte(ByteMessage::Send(&[control]))
            .and_then(|()| self.byte(ByteMessage::Send(bytes)));
        let closed = self.byte(ByteMessage::EndTransfer);
        sent.and(closed)
    }

    fn byte(&mut self, msg: ByteMessage<'_>) -> Result<(), LinkError> {
        self.transport.handle(msg, &mut self.gpio)
    }

    fn set_page(&mut self, page: u8) -> Result<(), LinkError> {
        let column = self.profile.column_offset;
        self.send_commands(&[
            cmd::SET_PAGE_ADDR | page,
            cmd::SET_LOW_COLUMN | (column & 0x0F),
            cmd::SET_HIGH_COLUMN | (column >> 4),
        ])
    }

    fn reset_pulse(&mut self) -> Result<(), LinkError> {
        let profile = self.profile;
        self.gpio.set_reset(Level::High)?;
        self.gpio.delay_ms(profile.reset_pulse_ms)?;
        self.gpio.set_reset(Level::Low)?;
        self.gpio.delay_ms(profile.reset_pulse_ms)?;
        self.gpio.set_reset(Level::High)?;
        self.gpio.delay_ms(profile.post_reset_ms)
    }
}

impl<T: ByteTransport, G: GpioAndDelay> DisplayRuntime for Panel<T, G> {
    type Error = LinkError;

    fn set_power_save(&mut self, enabled: bool) -> Result<(), LinkError> {
        let profile = self.profile;
        if enabled {
            self.send_commands(profile.power_save_on)
        } else {
            self.send_commands(profile.power_save_off)
        }
    }

    fn init_display(&mut self) -> Result<(), LinkError> {
        let profile = self.profile;
        self.gpio.handle(GpioMessage::Init)?;
        self.byte(ByteMessage::Init)?;
        self.reset_pulse()?;
        self.send_commands(profile.init_sequence)?;
        self.send_commands(profile.flip_commands(self.rotation))
    }

    fn clear_display(&mut self) -> Result<(), LinkError> {
        let width = self.profile.width as usize;
        for page in 0..self.profile.pages() {
            self.set_page(page as u8)?;
            self.send_data(&BLANK_PAGE[..width])?;
        }
        Ok(())
    }

    fn clear_buffer(&mut self) {
        self.buffer.fill(0);
    }
}
