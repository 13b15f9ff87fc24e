//! Display bring-up
//!
//! The runtime-facing calls a display instance must answer, and the fixed
//! order they are issued in at start-up.

use panelbridge_core::{ByteTransport, GpioAndDelay};

use crate::error::PanelError;
use crate::panel::Panel;
use crate::profile::{ControllerProfile, Rotation};

/// Runtime calls used during bring-up
pub trait DisplayRuntime {
    /// Error returned by the runtime
    type Error;

    /// Enter (`true`) or leave (`false`) power save
    fn set_power_save(&mut self, enabled: bool) -> Result<(), Self::Error>;

    /// Reset the controller and send its init sequence
    fn init_display(&mut self) -> Result<(), Self::Error>;

    /// Zero the controller's display RAM
    fn clear_display(&mut self) -> Result<(), Self::Error>;

    /// Zero the local frame buffer
    fn clear_buffer(&mut self);
}

/// Bring a display up from power-on
///
/// Power save on, init, clear display RAM, clear buffer, power save off.
/// Stops at the first failure; the panel is left in power save if init or
/// clearing failed.
pub fn bring_up<R: DisplayRuntime>(display: &mut R) -> Result<(), R::Error> {
    display.set_power_save(true)?;
    display.init_display()?;
    display.clear_display()?;
    display.clear_buffer();
    display.set_power_save(false)
}

/// Create a display instance and bring it up
pub fn initialize<T: ByteTransport, G: GpioAndDelay>(
    profile: &'static ControllerProfile,
    rotation: Rotation,
    transport: T,
    gpio: G,
) -> Result<Panel<T, G>, PanelError> {
    let mut panel = Panel::setup(profile, rotation, transport, gpio)?;
    bring_up(&mut panel)?;
    Ok(panel)
}
