//! Inertial measurement units

pub mod qmi8658;

pub use qmi8658::{AccelRange, DeviceInfo, GyroRange, Qmi8658, Qmi8658Config, Qmi8658Error};
