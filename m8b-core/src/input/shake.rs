//! Shake event source
//!
//! The shake switch drives a hardware pulse counter. Any number of
//! pulses between two polls collapses into a single event.

use crate::traits::PulseCounter;

pub struct ShakeSource<C> {
    counter: C,
}

impl<C: PulseCounter> ShakeSource<C> {
    pub fn new(counter: C) -> Self {
        Self { counter }
    }

    /// Returns true (one shake event) if the counter moved since the last poll
    ///
    /// The counter is reset to zero as part of the read.
    pub fn poll(&mut self) -> bool {
        self.counter.take() > 0
    }

    pub fn counter_mut(&mut self) -> &mut C {
        &mut self.counter
    }
}
