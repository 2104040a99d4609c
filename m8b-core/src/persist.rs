//! Boot record kept across sleep
//!
//! Before the badge suspends, the runtime writes a small record naming the
//! app to come back to. At boot the record is read back from the scratch
//! registers; anything that does not decode to a valid record is treated as
//! a first startup.
//!
//! Encoding is postcard into two 32-bit scratch words:
//!
//! ```text
//! [magic (varint u16)] [version] [mode (varint)] [wake_count (varint u16)] [zero pad]
//! |<------------------------------- 8 bytes ---------------------------------->|
//! ```

use m8b_hal::{ScratchSlot, ScratchStorage};
use serde::{Deserialize, Serialize};

use crate::apps::AppId;

/// Marks a scratch pair written by this firmware
pub const BOOT_RECORD_MAGIC: u16 = 0x8BB8;

/// Current boot record layout version
pub const BOOT_RECORD_VERSION: u8 = 1;

/// Encoded size, two scratch words
pub const BOOT_RECORD_SIZE: usize = 8;

/// Boot record errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PersistError {
    /// Record did not fit the scratch words
    Serialize,
    /// Scratch words did not decode
    Deserialize,
    /// Decoded, but magic or version is wrong
    InvalidFormat,
}

/// What the badge should do after the next boot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BootRecord {
    magic: u16,
    version: u8,
    /// App to start
    pub mode: AppId,
    /// Number of wakes from sleep since the last cold boot
    pub wake_count: u16,
}

impl Default for BootRecord {
    fn default() -> Self {
        Self::first_startup()
    }
}

impl BootRecord {
    /// Record used on a cold boot
    pub const fn first_startup() -> Self {
        Self::new(AppId::MainMenu, 0)
    }

    pub const fn new(mode: AppId, wake_count: u16) -> Self {
        Self {
            magic: BOOT_RECORD_MAGIC,
            version: BOOT_RECORD_VERSION,
            mode,
            wake_count,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.magic == BOOT_RECORD_MAGIC && self.version == BOOT_RECORD_VERSION
    }

    /// Record to write before sleeping in `mode`
    pub fn for_sleep(self, mode: AppId) -> Self {
        Self::new(mode, self.wake_count)
    }

    /// Record for the boot that follows a wake
    pub fn on_wake(self) -> Self {
        Self::new(self.mode, self.wake_count.saturating_add(1))
    }

    /// Encode into the two scratch words `(lo, hi)`
    pub fn encode(&self) -> Result<(u32, u32), PersistError> {
        let mut buffer = [0u8; BOOT_RECORD_SIZE];
        postcard::to_slice(self, &mut buffer).map_err(|_| PersistError::Serialize)?;

        let lo = u32::from_le_bytes([buffer[0], buffer[1], buffer[2], buffer[3]]);
        let hi = u32::from_le_bytes([buffer[4], buffer[5], buffer[6], buffer[7]]);
        Ok((lo, hi))
    }

    /// Decode from the two scratch words
    pub fn decode(lo: u32, hi: u32) -> Result<Self, PersistError> {
        let mut buffer = [0u8; BOOT_RECORD_SIZE];
        buffer[..4].copy_from_slice(&lo.to_le_bytes());
        buffer[4..].copy_from_slice(&hi.to_le_bytes());

        let record: BootRecord = postcard::from_bytes(&buffer).map_err(|_| PersistError::Deserialize)?;
        if !record.is_valid() {
            return Err(PersistError::InvalidFormat);
        }
        Ok(record)
    }
}

/// Read the boot record, falling back to a first startup
pub fn load<S: ScratchStorage>(storage: &mut S) -> BootRecord {
    let lo = storage.read(ScratchSlot::BootRecordLo);
    let hi = storage.read(ScratchSlot::BootRecordHi);

    match BootRecord::decode(lo, hi) {
        Ok(record) => record,
        Err(_e) => {
            #[cfg(feature = "defmt")]
            defmt::info!("No boot record ({}), first startup", _e);
            BootRecord::first_startup()
        }
    }
}

/// Write the boot record
pub fn store<S: ScratchStorage>(storage: &mut S, record: &BootRecord) -> Result<(), PersistError> {
    let (lo, hi) = record.encode()?;
    storage.write(ScratchSlot::BootRecordLo, lo);
    storage.write(ScratchSlot::BootRecordHi, hi);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MemoryScratch;

    #[test]
    fn test_cold_scratch_is_first_startup() {
        let mut scratch = MemoryScratch::default();
        assert_eq!(load(&mut scratch), BootRecord::first_startup());
    }

    #[test]
    fn test_store_then_load() {
        let mut scratch = MemoryScratch::default();
        let record = BootRecord::new(AppId::ImuTest, 3);
        store(&mut scratch, &record).unwrap();
        assert_eq!(load(&mut scratch), record);
    }

    #[test]
    fn test_largest_record_fits() {
        let record = BootRecord::new(AppId::BacklightTest, u16::MAX);
        let (lo, hi) = record.encode().unwrap();
        assert_eq!(BootRecord::decode(lo, hi), Ok(record));
    }

    #[test]
    fn test_garbage_falls_back() {
        let mut scratch = MemoryScratch::default();
        scratch.write(ScratchSlot::BootRecordLo, 0xDEAD_BEEF);
        scratch.write(ScratchSlot::BootRecordHi, 0x1234_5678);
        assert_eq!(load(&mut scratch), BootRecord::first_startup());
    }

    #[test]
    fn test_wrong_version_is_rejected() {
        let mut record = BootRecord::new(AppId::Magic8Ball, 1);
        record.version = BOOT_RECORD_VERSION + 1;
        let (lo, hi) = record.encode().unwrap();
        assert_eq!(BootRecord::decode(lo, hi), Err(PersistError::InvalidFormat));
    }

    #[test]
    fn test_wake_counts_up() {
        let record = BootRecord::first_startup().for_sleep(AppId::Magic8Ball).on_wake();
        assert_eq!(record.mode, AppId::Magic8Ball);
        assert_eq!(record.wake_count, 1);

        let saturated = BootRecord::new(AppId::MainMenu, u16::MAX).on_wake();
        assert_eq!(saturated.wake_count, u16::MAX);
    }
}
