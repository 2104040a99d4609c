//! Capacitive touch pads
//!
//! Each pad is a bare copper area with an external 1 MΩ pull-down. A
//! reading charges the pad by driving it high, releases it to an input and
//! counts loop iterations until the pull-down drains it below the logic
//! threshold. A finger adds capacitance, so a touched pad takes longer to
//! drain.
//!
//! The count taken at start-up is the untouched baseline. Thresholding is
//! done by [`TouchCalibration`].

use embassy_rp::gpio::{Flex, Pull};
use embassy_time::{block_for, Duration};
use m8b_core::events::{Pad, PAD_COUNT};
use m8b_core::input::TouchCalibration;
use m8b_core::traits::TouchSensor;

/// Charge/drain cycles summed per reading
pub const CHARGE_CYCLES: u32 = 10;

/// Loop iterations after which a drain is abandoned
pub const DRAIN_TIMEOUT: u32 = 10_000;

/// Time the pad is driven high before each drain
const CHARGE_TIME: Duration = Duration::from_micros(10);

/// A single capacitive pad
pub struct CapacitivePad<'d> {
    pin: Flex<'d>,
    calibration: TouchCalibration,
}

impl<'d> CapacitivePad<'d> {
    /// Take over a pin and calibrate against an untouched reading
    pub fn new(mut pin: Flex<'d>) -> Self {
        pin.set_pull(Pull::None);
        let mut pad = Self {
            pin,
            calibration: TouchCalibration::from_baseline(0),
        };
        let baseline = pad.raw_reading();
        pad.calibration = TouchCalibration::from_baseline(baseline);

        #[cfg(feature = "defmt")]
        defmt::debug!("Touch pad calibrated: baseline {}", baseline);

        pad
    }

    pub fn calibration(&self) -> TouchCalibration {
        self.calibration
    }

    /// Sum of drain times over [`CHARGE_CYCLES`] cycles
    pub fn raw_reading(&mut self) -> u32 {
        let mut total = 0;
        for _ in 0..CHARGE_CYCLES {
            self.pin.set_high();
            self.pin.set_as_output();
            block_for(CHARGE_TIME);

            self.pin.set_as_input();
            let mut ticks = 0;
            while self.pin.is_high() && ticks < DRAIN_TIMEOUT {
                ticks += 1;
            }
            total += ticks;
        }
        total
    }

    pub fn is_touched(&mut self) -> bool {
        let reading = self.raw_reading();
        self.calibration.is_touched(reading)
    }
}

/// The six badge pads, indexed in [`Pad`] order
pub struct TouchPads<'d> {
    pads: [CapacitivePad<'d>; PAD_COUNT],
}

impl<'d> TouchPads<'d> {
    /// Pads must be given in `A, B, Up, Down, Left, Right` order
    pub fn new(pads: [CapacitivePad<'d>; PAD_COUNT]) -> Self {
        Self { pads }
    }

    pub fn pad(&self, pad: Pad) -> &CapacitivePad<'d> {
        &self.pads[pad as usize]
    }
}

impl<'d> TouchSensor for TouchPads<'d> {
    fn is_touched(&mut self, pad: Pad) -> bool {
        self.pads[pad as usize].is_touched()
    }
}
