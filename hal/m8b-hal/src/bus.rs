//! Exclusive access to a shared bus
//!
//! The IMU owns the I2C bus for as long as its driver lives. Ownership is
//! expressed as a guard: [`SharedBus::acquire`] hands out a [`BusGuard`]
//! and the bus is released when the guard is dropped. A second acquire
//! while a guard is alive fails instead of blocking.

use core::cell::{RefCell, RefMut};
use core::ops::{Deref, DerefMut};

use crate::i2c::I2cBus;

/// Returned when the bus is already held by another guard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BusBusy;

/// A bus that can be lent out to one user at a time
pub struct SharedBus<B> {
    inner: RefCell<B>,
}

impl<B> SharedBus<B> {
    pub const fn new(bus: B) -> Self {
        Self {
            inner: RefCell::new(bus),
        }
    }

    /// Take exclusive access to the bus
    pub fn acquire(&self) -> Result<BusGuard<'_, B>, BusBusy> {
        self.inner
            .try_borrow_mut()
            .map(|bus| BusGuard { bus })
            .map_err(|_| BusBusy)
    }

    /// Whether a guard is currently alive
    pub fn is_held(&self) -> bool {
        self.inner.try_borrow_mut().is_err()
    }
}

/// Exclusive handle on a [`SharedBus`], released on drop
pub struct BusGuard<'a, B> {
    bus: RefMut<'a, B>,
}

impl<B> Deref for BusGuard<'_, B> {
    type Target = B;

    fn deref(&self) -> &B {
        &self.bus
    }
}

impl<B> DerefMut for BusGuard<'_, B> {
    fn deref_mut(&mut self) -> &mut B {
        &mut self.bus
    }
}

impl<B: I2cBus> I2cBus for BusGuard<'_, B> {
    type Error = B::Error;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        self.bus.write(address, data)
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        self.bus.read(address, buf)
    }

    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), Self::Error> {
        self.bus.write_read(address, write_data, read_buf)
    }
}
