//! QMI8658 6-axis IMU driver (I2C)
//!
//! The QMI8658 combines a 3-axis accelerometer and a 3-axis gyroscope.
//! Registers are accessed over I2C with auto-increment enabled, so one
//! transfer can read a whole block of output registers.
//!
//! # Command handshake
//!
//! Some settings are changed by commands rather than registers. A command
//! is written to `CTRL9`; the device sets `STATUSINT.CmdDone` when it has
//! executed it. The host then writes `ACK` to `CTRL9` and waits for the bit
//! to clear:
//!
//! ```text
//! host:  CTRL9 <- cmd      poll ... CmdDone=1     CTRL9 <- ACK      poll ... CmdDone=0
//! dev:               executes ----^                         clears ----^
//! ```
//!
//! # Quirks
//!
//! - Accelerometer samples only update while the gyroscope runs, so enabling
//!   the accelerometer also enables the gyroscope, and disabling the
//!   gyroscope also disables the accelerometer.
//! - With sync sample mode, `STATUSINT.Locked` stays set until the output
//!   block has been read through the last gyroscope register. Accelerometer
//!   reads therefore fetch all 12 bytes when the gyroscope is on.
//!
//! Every status poll is bounded by [`Qmi8658Config::poll_budget`].

use embedded_hal::delay::DelayNs;
use m8b_core::events::ImuEvent;
use m8b_core::traits::{MotionSensor, SensorError};
use m8b_hal::{BusBusy, BusGuard, I2cBus, SharedBus};

/// I2C address with SA0 high (badge wiring)
pub const I2C_ADDRESS_H: u8 = 0x6A;

/// I2C address with SA0 low
pub const I2C_ADDRESS_L: u8 = 0x6B;

/// QMI8658 register addresses
pub mod reg {
    /// Device identifier, reads [`super::WHO_AM_I_VALUE`]
    pub const WHO_AM_I: u8 = 0x00;
    pub const REVISION_ID: u8 = 0x01;
    /// Serial interface and sensor configuration
    pub const CTRL1: u8 = 0x02;
    /// Accelerometer range, ODR and self-test
    pub const CTRL2: u8 = 0x03;
    /// Gyroscope range and ODR
    pub const CTRL3: u8 = 0x04;
    /// Sensor enables and sync sample
    pub const CTRL7: u8 = 0x08;
    /// Command register
    pub const CTRL9: u8 = 0x0A;
    /// Host-controlled calibration, command argument
    pub const CAL1_L: u8 = 0x0B;
    pub const STATUSINT: u8 = 0x2D;
    pub const TEMP_L: u8 = 0x33;
    pub const AX_L: u8 = 0x35;
    pub const GX_L: u8 = 0x3B;
    /// Firmware version after `COPY_USID`
    pub const DQW_L: u8 = 0x49;
    /// Self-test result, or serial id after `COPY_USID`
    pub const DVX_L: u8 = 0x51;
    pub const RESET: u8 = 0x60;
}

/// CTRL9 commands
pub mod cmd {
    pub const ACK: u8 = 0x00;
    pub const COPY_USID: u8 = 0x10;
    pub const AHB_CLOCK_GATING: u8 = 0x12;
}

/// Register bit masks
pub mod mask {
    /// CTRL1: register address auto-increment
    pub const AUTO_INCREMENT: u8 = 0b0100_0000;
    /// CTRL7: accelerometer enable
    pub const ACCEL_ENABLE: u8 = 0b0000_0001;
    /// CTRL7: gyroscope enable
    pub const GYRO_ENABLE: u8 = 0b0000_0010;
    /// CTRL7: synchronised sampling
    pub const SYNC_SAMPLE: u8 = 0b1000_0000;
    /// CTRL2: accelerometer self-test
    pub const ACCEL_SELF_TEST: u8 = 0b1000_0000;
    /// CTRL2/CTRL3: full-scale field
    pub const FULL_SCALE: u8 = 0b0111_0000;
    /// STATUSINT: command done
    pub const CTRL9_DONE: u8 = 0b1000_0000;
    /// STATUSINT: new data available
    pub const AVAIL: u8 = 0b0000_0001;
    /// STATUSINT: output registers locked
    pub const LOCKED: u8 = 0b0000_0010;
}

/// Identity register contents
pub const WHO_AM_I_VALUE: u8 = 0x05;

/// Value written to `RESET` for a soft reset
pub const RESET_VALUE: u8 = 0xB0;

/// Time the device needs after a soft reset
pub const RESET_DELAY_MS: u32 = 15;

/// Smallest self-test delta per axis for a healthy accelerometer
pub const SELF_TEST_MIN_DELTA: u16 = 400;

/// CTRL2 during the accelerometer self-test: aST set, 1 kHz ODR
const SELF_TEST_CTRL2: u8 = mask::ACCEL_SELF_TEST | 0b0000_0011;

const FULL_SCALE_SHIFT: u8 = 4;

/// Accelerometer full-scale range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AccelRange {
    G2 = 0,
    G4 = 1,
    G8 = 2,
    G16 = 3,
}

impl AccelRange {
    /// Range from its value in g
    pub fn from_g(g: u16) -> Option<Self> {
        match g {
            2 => Some(AccelRange::G2),
            4 => Some(AccelRange::G4),
            8 => Some(AccelRange::G8),
            16 => Some(AccelRange::G16),
            _ => None,
        }
    }

    fn from_field(field: u8) -> Self {
        match field & 0b11 {
            0 => AccelRange::G2,
            1 => AccelRange::G4,
            2 => AccelRange::G8,
            _ => AccelRange::G16,
        }
    }

    /// Full scale in g
    pub fn g(self) -> u16 {
        2 << (self as u16)
    }

    /// Raw counts per g
    pub fn ticks_per_g(self) -> f32 {
        (32768 / self.g() as u32) as f32
    }
}

/// Gyroscope full-scale range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GyroRange {
    Dps16 = 0,
    Dps32 = 1,
    Dps64 = 2,
    Dps128 = 3,
    Dps256 = 4,
    Dps512 = 5,
    Dps1024 = 6,
    Dps2048 = 7,
}

impl GyroRange {
    /// Range from its value in degrees per second
    pub fn from_dps(dps: u16) -> Option<Self> {
        match dps {
            16 => Some(GyroRange::Dps16),
            32 => Some(GyroRange::Dps32),
            64 => Some(GyroRange::Dps64),
            128 => Some(GyroRange::Dps128),
            256 => Some(GyroRange::Dps256),
            512 => Some(GyroRange::Dps512),
            1024 => Some(GyroRange::Dps1024),
            2048 => Some(GyroRange::Dps2048),
            _ => None,
        }
    }

    fn from_field(field: u8) -> Self {
        match field & 0b111 {
            0 => GyroRange::Dps16,
            1 => GyroRange::Dps32,
            2 => GyroRange::Dps64,
            3 => GyroRange::Dps128,
            4 => GyroRange::Dps256,
            5 => GyroRange::Dps512,
            6 => GyroRange::Dps1024,
            _ => GyroRange::Dps2048,
        }
    }

    /// Full scale in degrees per second
    pub fn dps(self) -> u16 {
        16 << (self as u16)
    }

    /// Raw counts per degree per second
    pub fn ticks_per_dps(self) -> f32 {
        (32768 / self.dps() as u32) as f32
    }
}

/// QMI8658 configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Qmi8658Config {
    /// 7-bit I2C address
    pub address: u8,
    pub accel_range: AccelRange,
    pub gyro_range: GyroRange,
    /// Maximum number of status reads per wait before giving up
    pub poll_budget: u16,
}

impl Default for Qmi8658Config {
    fn default() -> Self {
        Self {
            address: I2C_ADDRESS_H,
            accel_range: AccelRange::G2,
            gyro_range: GyroRange::Dps16,
            poll_budget: 200,
        }
    }
}

/// QMI8658 errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Qmi8658Error<E> {
    /// Bus transfer failed
    Bus(E),
    /// Identity register held something else (value read)
    DeviceNotFound(u8),
    /// Accelerometer self-test deltas below [`SELF_TEST_MIN_DELTA`]
    SelfTestFailed { x: u16, y: u16, z: u16 },
    /// Unsupported range requested
    InvalidConfiguration,
    /// A status wait ran out of poll budget
    Timeout,
    /// The shared bus is held elsewhere
    BusBusy,
    /// Read of a sensor that is switched off
    NotEnabled,
}

impl<E> From<BusBusy> for Qmi8658Error<E> {
    fn from(_: BusBusy) -> Self {
        Qmi8658Error::BusBusy
    }
}

/// Device identification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceInfo {
    pub revision: u8,
    pub firmware: [u8; 3],
    pub usid: [u8; 6],
}

/// QMI8658 driver
///
/// Owns its bus handle for its whole lifetime; [`Qmi8658::release`] hands
/// it back.
pub struct Qmi8658<I> {
    i2c: I,
    config: Qmi8658Config,
    accel_enabled: bool,
    gyro_enabled: bool,
    accel_range: AccelRange,
    gyro_range: GyroRange,
    ahb_clock_gated: bool,
}

impl<'a, B: I2cBus> Qmi8658<BusGuard<'a, B>> {
    /// Take the shared bus and bring the device up
    ///
    /// The bus stays held until the driver is released or dropped.
    pub fn acquire<D: DelayNs>(
        bus: &'a SharedBus<B>,
        config: Qmi8658Config,
        delay: &mut D,
    ) -> Result<Self, Qmi8658Error<B::Error>> {
        let guard = bus.acquire()?;
        let mut imu = Qmi8658::new(guard, config);
        imu.init(delay)?;
        Ok(imu)
    }
}

impl<I: I2cBus> Qmi8658<I> {
    /// Create a driver; call [`Qmi8658::init`] before use
    pub fn new(i2c: I, config: Qmi8658Config) -> Self {
        Self {
            i2c,
            config,
            accel_enabled: false,
            gyro_enabled: false,
            accel_range: AccelRange::G2,
            gyro_range: GyroRange::Dps16,
            ahb_clock_gated: true,
        }
    }

    pub fn config(&self) -> &Qmi8658Config {
        &self.config
    }

    /// Give the bus back
    pub fn release(self) -> I {
        self.i2c
    }

    /// Identify, reset and configure the device
    pub fn init<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Qmi8658Error<I::Error>> {
        let id = self.read_u8(reg::WHO_AM_I)?;
        if id != WHO_AM_I_VALUE {
            #[cfg(feature = "defmt")]
            defmt::error!("QMI8658: unexpected WHO_AM_I {=u8:#x}", id);
            return Err(Qmi8658Error::DeviceNotFound(id));
        }

        self.reset(delay)?;
        self.set_auto_increment(true)?;
        self.set_ahb_clock_gating(false)?;
        self.set_register_bits(reg::CTRL7, mask::SYNC_SAMPLE)?;
        self.write_accel_range(self.config.accel_range)?;
        self.write_gyro_range(self.config.gyro_range)?;

        #[cfg(feature = "defmt")]
        defmt::info!(
            "QMI8658 ready: {=u16} g, {=u16} dps",
            self.accel_range.g(),
            self.gyro_range.dps()
        );
        Ok(())
    }

    /// Soft reset; every setting returns to its power-on default
    pub fn reset<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Qmi8658Error<I::Error>> {
        self.write_register(reg::RESET, RESET_VALUE)?;
        delay.delay_ms(RESET_DELAY_MS);

        self.accel_enabled = false;
        self.gyro_enabled = false;
        self.accel_range = AccelRange::G2;
        self.gyro_range = GyroRange::Dps16;
        self.ahb_clock_gated = true;
        Ok(())
    }

    /// Read `buf.len()` consecutive registers starting at `register`
    pub fn read_register(&mut self, register: u8, buf: &mut [u8]) -> Result<(), Qmi8658Error<I::Error>> {
        self.i2c
            .write_read(self.config.address, &[register], buf)
            .map_err(Qmi8658Error::Bus)
    }

    pub fn write_register(&mut self, register: u8, value: u8) -> Result<(), Qmi8658Error<I::Error>> {
        self.i2c
            .write(self.config.address, &[register, value])
            .map_err(Qmi8658Error::Bus)
    }

    fn read_u8(&mut self, register: u8) -> Result<u8, Qmi8658Error<I::Error>> {
        let mut buf = [0u8; 1];
        self.read_register(register, &mut buf)?;
        Ok(buf[0])
    }

    pub fn set_register_bits(&mut self, register: u8, bits: u8) -> Result<(), Qmi8658Error<I::Error>> {
        let value = self.read_u8(register)?;
        self.write_register(register, value | bits)
    }

    pub fn clear_register_bits(&mut self, register: u8, bits: u8) -> Result<(), Qmi8658Error<I::Error>> {
        let value = self.read_u8(register)?;
        self.write_register(register, value & !bits)
    }

    /// Poll STATUSINT until `ready` accepts it
    fn wait_status(&mut self, ready: impl Fn(u8) -> bool) -> Result<u8, Qmi8658Error<I::Error>> {
        for _ in 0..self.config.poll_budget {
            let status = self.read_u8(reg::STATUSINT)?;
            if ready(status) {
                return Ok(status);
            }
        }
        #[cfg(feature = "defmt")]
        defmt::warn!("QMI8658: status wait timed out");
        Err(Qmi8658Error::Timeout)
    }

    /// Run a CTRL9 command through the done/ack handshake
    pub fn send_command(&mut self, command: u8) -> Result<(), Qmi8658Error<I::Error>> {
        self.write_register(reg::CTRL9, command)?;
        self.wait_status(|s| s & mask::CTRL9_DONE != 0)?;

        self.write_register(reg::CTRL9, cmd::ACK)?;
        self.wait_status(|s| s & mask::CTRL9_DONE == 0)?;
        Ok(())
    }

    pub fn auto_increment(&mut self) -> Result<bool, Qmi8658Error<I::Error>> {
        Ok(self.read_u8(reg::CTRL1)? & mask::AUTO_INCREMENT != 0)
    }

    pub fn set_auto_increment(&mut self, enabled: bool) -> Result<(), Qmi8658Error<I::Error>> {
        if enabled {
            self.set_register_bits(reg::CTRL1, mask::AUTO_INCREMENT)
        } else {
            self.clear_register_bits(reg::CTRL1, mask::AUTO_INCREMENT)
        }
    }

    pub fn ahb_clock_gated(&self) -> bool {
        self.ahb_clock_gated
    }

    /// Switch AHB clock gating; the argument goes in CAL1_L
    pub fn set_ahb_clock_gating(&mut self, gated: bool) -> Result<(), Qmi8658Error<I::Error>> {
        let argument = if gated { 0x00 } else { 0x01 };
        self.write_register(reg::CAL1_L, argument)?;
        self.send_command(cmd::AHB_CLOCK_GATING)?;
        self.ahb_clock_gated = gated;
        Ok(())
    }

    pub fn accel_enabled(&self) -> bool {
        self.accel_enabled
    }

    pub fn gyro_enabled(&self) -> bool {
        self.gyro_enabled
    }

    /// Enable or disable the accelerometer
    ///
    /// Enabling also enables the gyroscope.
    pub fn set_accel_enabled(&mut self, enabled: bool) -> Result<(), Qmi8658Error<I::Error>> {
        if enabled {
            self.set_register_bits(reg::CTRL7, mask::ACCEL_ENABLE)?;
            self.accel_enabled = true;
            self.set_gyro_enabled(true)?;
        } else {
            self.clear_register_bits(reg::CTRL7, mask::ACCEL_ENABLE)?;
            self.accel_enabled = false;
        }
        Ok(())
    }

    /// Enable or disable the gyroscope
    ///
    /// Disabling also disables the accelerometer.
    pub fn set_gyro_enabled(&mut self, enabled: bool) -> Result<(), Qmi8658Error<I::Error>> {
        if enabled {
            self.set_register_bits(reg::CTRL7, mask::GYRO_ENABLE)?;
            self.gyro_enabled = true;
        } else {
            self.clear_register_bits(reg::CTRL7, mask::GYRO_ENABLE)?;
            self.gyro_enabled = false;
            self.set_accel_enabled(false)?;
        }
        Ok(())
    }

    /// Accelerometer range as configured in the device
    pub fn accel_range(&mut self) -> Result<AccelRange, Qmi8658Error<I::Error>> {
        let field = (self.read_u8(reg::CTRL2)? & mask::FULL_SCALE) >> FULL_SCALE_SHIFT;
        Ok(AccelRange::from_field(field))
    }

    /// Set the accelerometer range in g (2, 4, 8 or 16)
    pub fn set_accel_range(&mut self, g: u16) -> Result<(), Qmi8658Error<I::Error>> {
        let range = AccelRange::from_g(g).ok_or(Qmi8658Error::InvalidConfiguration)?;
        self.write_accel_range(range)
    }

    fn write_accel_range(&mut self, range: AccelRange) -> Result<(), Qmi8658Error<I::Error>> {
        self.write_full_scale(reg::CTRL2, range as u8)?;
        self.accel_range = range;
        Ok(())
    }

    /// Gyroscope range as configured in the device
    pub fn gyro_range(&mut self) -> Result<GyroRange, Qmi8658Error<I::Error>> {
        let field = (self.read_u8(reg::CTRL3)? & mask::FULL_SCALE) >> FULL_SCALE_SHIFT;
        Ok(GyroRange::from_field(field))
    }

    /// Set the gyroscope range in dps (16, 32, ..., 2048)
    pub fn set_gyro_range(&mut self, dps: u16) -> Result<(), Qmi8658Error<I::Error>> {
        let range = GyroRange::from_dps(dps).ok_or(Qmi8658Error::InvalidConfiguration)?;
        self.write_gyro_range(range)
    }

    fn write_gyro_range(&mut self, range: GyroRange) -> Result<(), Qmi8658Error<I::Error>> {
        self.write_full_scale(reg::CTRL3, range as u8)?;
        self.gyro_range = range;
        Ok(())
    }

    fn write_full_scale(&mut self, register: u8, field: u8) -> Result<(), Qmi8658Error<I::Error>> {
        let value = self.read_u8(register)?;
        let value = (value & !mask::FULL_SCALE) | ((field << FULL_SCALE_SHIFT) & mask::FULL_SCALE);
        self.write_register(register, value)
    }

    /// Wait until new data is available and the output block is unlocked
    fn wait_data_ready(&mut self) -> Result<(), Qmi8658Error<I::Error>> {
        self.wait_status(|s| s & mask::AVAIL != 0 && s & mask::LOCKED == 0)?;
        Ok(())
    }

    /// Raw accelerometer counts
    pub fn accel_raw(&mut self) -> Result<[i16; 3], Qmi8658Error<I::Error>> {
        if !self.accel_enabled {
            return Err(Qmi8658Error::NotEnabled);
        }
        self.wait_data_ready()?;

        let mut buf = [0u8; 12];
        // Reading through the gyro block releases the lock
        let len = if self.gyro_enabled { 12 } else { 6 };
        self.read_register(reg::AX_L, &mut buf[..len])?;
        Ok(axes(&buf[..6]))
    }

    /// Acceleration in g
    pub fn accel(&mut self) -> Result<[f32; 3], Qmi8658Error<I::Error>> {
        let raw = self.accel_raw()?;
        Ok(scale(raw, self.accel_range.ticks_per_g()))
    }

    /// Raw gyroscope counts
    pub fn gyro_raw(&mut self) -> Result<[i16; 3], Qmi8658Error<I::Error>> {
        if !self.gyro_enabled {
            return Err(Qmi8658Error::NotEnabled);
        }
        self.wait_data_ready()?;

        let mut buf = [0u8; 6];
        self.read_register(reg::GX_L, &mut buf)?;
        Ok(axes(&buf))
    }

    /// Angular rate in degrees per second
    pub fn gyro(&mut self) -> Result<[f32; 3], Qmi8658Error<I::Error>> {
        let raw = self.gyro_raw()?;
        Ok(scale(raw, self.gyro_range.ticks_per_dps()))
    }

    /// Accelerometer and gyroscope from one synchronised block read
    pub fn read_motion(&mut self) -> Result<ImuEvent, Qmi8658Error<I::Error>> {
        if !(self.accel_enabled && self.gyro_enabled) {
            return Err(Qmi8658Error::NotEnabled);
        }
        self.wait_data_ready()?;

        let mut buf = [0u8; 12];
        self.read_register(reg::AX_L, &mut buf)?;
        Ok(ImuEvent {
            accel: scale(axes(&buf[..6]), self.accel_range.ticks_per_g()),
            gyro: scale(axes(&buf[6..]), self.gyro_range.ticks_per_dps()),
        })
    }

    /// Die temperature in degrees Celsius
    pub fn temperature(&mut self) -> Result<f32, Qmi8658Error<I::Error>> {
        let mut buf = [0u8; 2];
        self.read_register(reg::TEMP_L, &mut buf)?;
        Ok(i16::from_le_bytes(buf) as f32 / 256.0)
    }

    pub fn revision_id(&mut self) -> Result<u8, Qmi8658Error<I::Error>> {
        self.read_u8(reg::REVISION_ID)
    }

    /// Revision, firmware version and unique serial id
    pub fn device_info(&mut self) -> Result<DeviceInfo, Qmi8658Error<I::Error>> {
        let revision = self.revision_id()?;
        self.send_command(cmd::COPY_USID)?;

        let mut firmware = [0u8; 3];
        self.read_register(reg::DQW_L, &mut firmware)?;
        let mut usid = [0u8; 6];
        self.read_register(reg::DVX_L, &mut usid)?;

        Ok(DeviceInfo {
            revision,
            firmware,
            usid,
        })
    }

    /// Run the accelerometer self-test
    ///
    /// Both sensors are left disabled and the accelerometer range at 2 g.
    /// Returns the per-axis deltas.
    pub fn self_test_accel(&mut self) -> Result<[u16; 3], Qmi8658Error<I::Error>> {
        self.write_register(reg::CTRL7, 0x00)?;
        self.accel_enabled = false;
        self.gyro_enabled = false;

        self.write_register(reg::CTRL2, SELF_TEST_CTRL2)?;
        self.accel_range = AccelRange::G2;
        self.wait_status(|s| s & mask::AVAIL != 0)?;

        self.clear_register_bits(reg::CTRL2, mask::ACCEL_SELF_TEST)?;
        self.wait_status(|s| s & mask::AVAIL == 0)?;

        let mut buf = [0u8; 6];
        self.read_register(reg::DVX_L, &mut buf)?;
        let [x, y, z] = axes(&buf).map(i16::unsigned_abs);

        if x < SELF_TEST_MIN_DELTA || y < SELF_TEST_MIN_DELTA || z < SELF_TEST_MIN_DELTA {
            #[cfg(feature = "defmt")]
            defmt::warn!("QMI8658 self-test failed: {} {} {}", x, y, z);
            return Err(Qmi8658Error::SelfTestFailed { x, y, z });
        }
        Ok([x, y, z])
    }
}

impl<I: I2cBus> MotionSensor for Qmi8658<I> {
    fn sample(&mut self) -> Result<ImuEvent, SensorError> {
        self.read_motion().map_err(|e| match e {
            Qmi8658Error::Bus(_) | Qmi8658Error::BusBusy => SensorError::Bus,
            Qmi8658Error::Timeout => SensorError::Timeout,
            Qmi8658Error::NotEnabled => SensorError::NotEnabled,
            _ => SensorError::Fault,
        })
    }
}

/// Three little-endian i16 values
fn axes(buf: &[u8]) -> [i16; 3] {
    [
        i16::from_le_bytes([buf[0], buf[1]]),
        i16::from_le_bytes([buf[2], buf[3]]),
        i16::from_le_bytes([buf[4], buf[5]]),
    ]
}

fn scale(raw: [i16; 3], ticks_per_unit: f32) -> [f32; 3] {
    raw.map(|v| v as f32 / ticks_per_unit)
}
