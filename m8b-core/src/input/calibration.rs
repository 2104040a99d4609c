//! Capacitive pad calibration
//!
//! A pad reading is a drain-time count. The count taken with nothing on
//! the pad is its baseline, and a later reading counts as a touch once it
//! exceeds the baseline by [`THRESHOLD_MARGIN`].

/// Counts above baseline that register as a touch
pub const THRESHOLD_MARGIN: u32 = 100;

/// Untouched reading and the derived touch threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchCalibration {
    pub baseline: u32,
    pub threshold: u32,
}

impl TouchCalibration {
    pub fn from_baseline(baseline: u32) -> Self {
        Self {
            baseline,
            threshold: baseline.saturating_add(THRESHOLD_MARGIN),
        }
    }

    pub fn is_touched(&self, reading: u32) -> bool {
        reading > self.threshold
    }
}
