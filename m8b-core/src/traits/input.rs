//! Raw input traits

use crate::events::Pad;

/// Raw capacitive touch readings
pub trait TouchSensor {
    /// Check if the pad is currently touched (undebounced)
    fn is_touched(&mut self, pad: Pad) -> bool;
}

/// Hardware pulse counter fed by the shake switch
pub trait PulseCounter {
    /// Return the number of pulses since the last call and reset to zero
    fn take(&mut self) -> u32;
}
