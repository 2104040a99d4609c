//! Motion sensor trait

use crate::events::ImuEvent;

/// Errors a motion sensor reports to the scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// Bus transfer failed
    Bus,
    /// Data never became available within the poll budget
    Timeout,
    /// Accelerometer or gyroscope is switched off
    NotEnabled,
    /// Any other device-level failure
    Fault,
}

/// Source of scaled accelerometer and gyroscope samples
pub trait MotionSensor {
    /// Take one fresh sample
    ///
    /// Samples are never cached; every call reads the device.
    fn sample(&mut self) -> Result<ImuEvent, SensorError>;
}
