//! Event sources polled by the scheduler
//!
//! - [`touch`] - debounced touch pads
//! - [`calibration`] - touch thresholds for the capacitive pads
//! - [`shake`] - coalesced shake switch pulses
//! - [`charger`] - de-duplicated charge controller state

pub mod calibration;
pub mod charger;
pub mod shake;
pub mod touch;

pub use calibration::TouchCalibration;
pub use charger::ChargerSource;
pub use shake::ShakeSource;
pub use touch::{PadState, TouchEngine, TouchPad};
