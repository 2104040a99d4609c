//! Hardware drivers
//!
//! Concrete implementations of the traits defined in m8b-core:
//!
//! - IMU (QMI8658 over I2C)
//! - Backlight (PWM duty cycle)
//! - Display (scene rendering onto any embedded-graphics target)

#![no_std]
#![deny(unsafe_code)]

pub mod backlight;
pub mod display;
pub mod imu;
