//! RP2040-specific HAL for the Magic 8 Badge
//!
//! This crate provides RP2040 implementations of the shared `m8b-hal`
//! traits on top of embassy-rp:
//!
//! - Blocking I2C master (implements `m8b_hal::I2cBus`)
//! - Digital inputs for the charger status lines
//! - Capacitive touch pads timed on `Flex` pins
//! - Watchdog scratch registers (implements `m8b_hal::ScratchStorage`)

#![no_std]

pub mod gpio;
pub mod i2c;
pub mod scratch;
pub mod touch;

pub use gpio::RpInput;
pub use i2c::RpI2c;
pub use scratch::WatchdogScratch;
pub use touch::{CapacitivePad, TouchPads};
