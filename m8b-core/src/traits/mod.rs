//! Hardware abstraction traits
//!
//! These traits define the interface between the runtime and the
//! board-specific drivers.

pub mod backlight;
pub mod display;
pub mod input;
pub mod motion;

pub use backlight::BacklightOutput;
pub use display::{Display, DisplayError};
pub use input::{PulseCounter, TouchSensor};
pub use motion::{MotionSensor, SensorError};
