//! Board collaborators the runtime drives

use m8b_hal::InputPin;

use crate::traits::{BacklightOutput, Display, MotionSensor, PulseCounter, TouchSensor};

/// Set of hardware types one board provides
///
/// Tie the associated types together once per board so the runtime has a
/// single type parameter.
pub trait Board {
    type Touch: TouchSensor;
    type Imu: MotionSensor;
    type Shake: PulseCounter;
    /// Charge controller `CHG` line, active low
    type Charging: InputPin;
    /// Charge controller `STDBY` line, active low
    type Standby: InputPin;
    type Backlight: BacklightOutput;
    type Display: Display;
}

/// Owned board handles passed to [`Runtime::new`](super::Runtime::new)
pub struct RuntimeContext<B: Board> {
    pub touch: B::Touch,
    /// `None` when the IMU failed to initialise; the runtime then runs
    /// without IMU events
    pub imu: Option<B::Imu>,
    pub shake: B::Shake,
    pub charging: B::Charging,
    pub standby: B::Standby,
    pub backlight: B::Backlight,
    pub display: B::Display,
}
