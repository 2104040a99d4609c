//! Blocking I2C master
//!
//! The QMI8658 driver is synchronous and short-lived (a handful of
//! register transfers per tick), so the blocking embassy-rp driver is
//! used rather than the interrupt-driven one.

use embassy_rp::i2c::{self, Blocking, I2c, Instance};
use m8b_hal::i2c::{I2cBus, I2cConfig};

/// Build the embassy-rp configuration for a bus
pub fn config(config: I2cConfig) -> i2c::Config {
    let mut rp_config = i2c::Config::default();
    rp_config.frequency = config.frequency;
    rp_config
}

/// RP2040 I2C bus
pub struct RpI2c<'d, T: Instance> {
    i2c: I2c<'d, T, Blocking>,
}

impl<'d, T: Instance> RpI2c<'d, T> {
    pub fn new(i2c: I2c<'d, T, Blocking>) -> Self {
        Self { i2c }
    }
}

impl<'d, T: Instance> I2cBus for RpI2c<'d, T> {
    type Error = i2c::Error;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        self.i2c.blocking_write(address, data)
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        self.i2c.blocking_read(address, buf)
    }

    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), Self::Error> {
        self.i2c.blocking_write_read(address, write_data, read_buf)
    }
}
