//! Watchdog scratch registers
//!
//! The RP2040 watchdog has eight scratch words that survive a soft reset.
//! Words 4 to 7 are used by the bootrom on watchdog reboots, so only the
//! low words are handed out.

use embassy_rp::watchdog::Watchdog;
use m8b_hal::{ScratchSlot, ScratchStorage};

/// Scratch storage backed by the watchdog block
pub struct WatchdogScratch {
    watchdog: Watchdog,
}

impl WatchdogScratch {
    pub fn new(watchdog: Watchdog) -> Self {
        Self { watchdog }
    }

    fn index(slot: ScratchSlot) -> usize {
        slot.as_u8() as usize
    }
}

impl ScratchStorage for WatchdogScratch {
    fn read(&mut self, slot: ScratchSlot) -> u32 {
        self.watchdog.get_scratch(Self::index(slot))
    }

    fn write(&mut self, slot: ScratchSlot, value: u32) {
        self.watchdog.set_scratch(Self::index(slot), value);
    }
}
