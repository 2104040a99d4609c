//! Display trait

use crate::scene::Scene;

/// Errors that can occur while pushing a scene to the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// The panel interface (SPI, DC line) reported an error
    Interface,
    /// A label did not fit the panel
    OutOfBounds,
}

/// Display collaborator
///
/// The display shows one root scene at a time. Brightness is handled by
/// [`BacklightOutput`](super::BacklightOutput).
pub trait Display {
    /// Replace the root scene and render it
    fn set_root(&mut self, scene: &Scene) -> Result<(), DisplayError>;

    /// Hide or show the root scene
    fn set_hidden(&mut self, hidden: bool) -> Result<(), DisplayError>;
}
