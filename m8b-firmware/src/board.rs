//! Board definition for the Waveshare RP2040-LCD-1.28 badge
//!
//! Pin map:
//!
//! | Function        | GPIO | Notes                              |
//! |-----------------|------|------------------------------------|
//! | LCD DC          | 0    |                                    |
//! | LCD CS          | 1    |                                    |
//! | LCD SCK         | 2    | SPI0                               |
//! | LCD MOSI        | 3    | SPI0                               |
//! | LCD RESET       | 4    |                                    |
//! | LCD backlight   | 5    | PWM slice 2, channel B             |
//! | IMU SDA         | 6    | I2C1                               |
//! | IMU SCL         | 7    | I2C1                               |
//! | Shake switch    | 11   | pull-up, pulses low when shaken    |
//! | Touch Right     | 12   |                                    |
//! | Touch Up        | 13   |                                    |
//! | Touch Down      | 14   |                                    |
//! | Touch Left      | 15   |                                    |
//! | Touch B         | 17   |                                    |
//! | Touch A         | 18   |                                    |
//! | Charger CHG     | 21   | active low                         |
//! | Charger STDBY   | 22   | active low                         |

use embassy_rp::gpio::Output;
use embassy_rp::peripherals::{I2C1, SPI0};
use embassy_rp::pwm::PwmOutput;
use embassy_rp::spi::{Blocking, Spi};
use embedded_hal_bus::spi::{ExclusiveDevice, NoDelay};
use mipidsi::interface::SpiInterface;
use mipidsi::models::GC9A01;

use m8b_core::scheduler::Board;
use m8b_drivers::backlight::PwmBacklight;
use m8b_drivers::display::SceneRenderer;
use m8b_drivers::imu::Qmi8658;
use m8b_hal::BusGuard;
use m8b_hal_rp2040::{RpI2c, RpInput, TouchPads};

use crate::channels::ShakeCounter;

/// LCD SPI clock
pub const LCD_SPI_FREQUENCY: u32 = 48_000_000;

/// Bytes buffered by the panel interface per SPI transfer
pub const LCD_BUFFER_SIZE: usize = 512;

/// Backlight PWM frequency
pub const BACKLIGHT_PWM_FREQUENCY: u32 = 1_000;

/// Backlight PWM clock divider
pub const BACKLIGHT_PWM_DIVIDER: u8 = 8;

/// Runtime tick period
pub const TICK_INTERVAL_MS: u64 = 5;

/// PWM counter wrap value for the backlight frequency
pub fn backlight_pwm_top(clk_sys: u32) -> u16 {
    let top = clk_sys / (BACKLIGHT_PWM_DIVIDER as u32 * BACKLIGHT_PWM_FREQUENCY);
    top.saturating_sub(1).min(u16::MAX as u32) as u16
}

pub type ImuBus = RpI2c<'static, I2C1>;

pub type Imu = Qmi8658<BusGuard<'static, ImuBus>>;

pub type PanelSpi = ExclusiveDevice<Spi<'static, SPI0, Blocking>, Output<'static>, NoDelay>;

pub type Panel =
    mipidsi::Display<SpiInterface<'static, PanelSpi, Output<'static>>, GC9A01, Output<'static>>;

/// The badge hardware as seen by the runtime
pub struct Badge;

impl Board for Badge {
    type Touch = TouchPads<'static>;
    type Imu = Imu;
    type Shake = ShakeCounter;
    type Charging = RpInput<'static>;
    type Standby = RpInput<'static>;
    type Backlight = PwmBacklight<PwmOutput<'static>>;
    type Display = SceneRenderer<Panel>;
}
