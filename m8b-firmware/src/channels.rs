//! Inter-task communication
//!
//! The shake task counts switch pulses in an atomic that the runtime
//! drains once per tick, and raises [`SHAKE_EDGE`] so a sleeping runtime
//! task can wake.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use portable_atomic::{AtomicU32, Ordering};

use m8b_core::traits::PulseCounter;

/// Shake switch pulses since the runtime last looked
pub static SHAKE_PULSES: AtomicU32 = AtomicU32::new(0);

/// Raised on every shake switch edge
pub static SHAKE_EDGE: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Runtime-side view of [`SHAKE_PULSES`]
pub struct ShakeCounter;

impl PulseCounter for ShakeCounter {
    fn take(&mut self) -> u32 {
        SHAKE_PULSES.swap(0, Ordering::Relaxed)
    }
}
