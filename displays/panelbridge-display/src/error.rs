//! Display errors

use panelbridge_core::LinkError;

/// Display instance errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PanelError {
    /// Communication with the controller failed
    Link(LinkError),
    /// Profile dimensions do not fit the frame buffer
    UnsupportedGeometry,
    /// Transport cannot carry a control byte plus payload in one frame
    UnsupportedTransport,
}

impl From<LinkError> for PanelError {
    fn from(e: LinkError) -> Self {
        PanelError::Link(e)
    }
}
