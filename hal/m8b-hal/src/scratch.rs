//! Reset-surviving scratch storage
//!
//! A handful of 32-bit words that keep their value across a soft reset
//! but not across power loss. The badge stores its boot record here
//! before it goes to sleep.

/// Scratch word identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ScratchSlot {
    /// First word of the encoded boot record
    BootRecordLo = 0,
    /// Second word of the encoded boot record
    BootRecordHi = 1,
}

impl ScratchSlot {
    /// Get the slot as a register index
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

/// Scratch storage trait
///
/// Reads of a slot that was never written return whatever the hardware
/// holds after a cold boot; callers must validate what they read.
pub trait ScratchStorage {
    fn read(&mut self, slot: ScratchSlot) -> u32;

    fn write(&mut self, slot: ScratchSlot, value: u32);
}
