//! Magic 8 Badge firmware
//!
//! Main firmware binary for the RP2040 round-display badge. Brings up the
//! peripherals, hands them to the board-agnostic runtime and spawns the
//! tasks that drive it.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Flex, Input, Level, Output, Pull};
use embassy_rp::i2c::I2c;
use embassy_rp::pwm::{self, Pwm};
use embassy_rp::spi::{self, Spi};
use embassy_rp::watchdog::Watchdog;
use embassy_time::{Delay, Instant};
use embedded_hal_bus::spi::ExclusiveDevice;
use fixed::traits::ToFixed;
use mipidsi::interface::SpiInterface;
use mipidsi::models::GC9A01;
use mipidsi::options::{ColorInversion, Orientation, Rotation};
use mipidsi::Builder;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use m8b_core::config::RuntimeConfig;
use m8b_core::persist;
use m8b_core::scheduler::{Runtime, RuntimeContext};
use m8b_drivers::backlight::PwmBacklight;
use m8b_drivers::display::SceneRenderer;
use m8b_drivers::imu::{Qmi8658, Qmi8658Config};
use m8b_hal::i2c::I2cConfig;
use m8b_hal::SharedBus;
use m8b_hal_rp2040::{CapacitivePad, RpI2c, RpInput, TouchPads, WatchdogScratch};

mod board;
mod channels;
mod tasks;

use board::{Imu, ImuBus, Panel};

// Static cells for peripherals shared with the runtime (must live forever)
static IMU_BUS: StaticCell<SharedBus<ImuBus>> = StaticCell::new();
static LCD_BUFFER: StaticCell<[u8; board::LCD_BUFFER_SIZE]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Magic 8 Badge starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Boot record from before the last sleep, if any
    let mut scratch = WatchdogScratch::new(Watchdog::new(p.WATCHDOG));
    let boot = persist::load(&mut scratch);
    info!("Boot mode {}, wake count {}", boot.mode, boot.wake_count);

    // Backlight first so the panel stays dark while it initialises
    let mut pwm_config = pwm::Config::default();
    pwm_config.divider = board::BACKLIGHT_PWM_DIVIDER.to_fixed();
    pwm_config.top = board::backlight_pwm_top(embassy_rp::clocks::clk_sys_freq());
    let pwm = Pwm::new_output_b(p.PWM_SLICE2, p.PIN_5, pwm_config);
    let (_, backlight_output) = pwm.split();
    let backlight = PwmBacklight::new(unwrap!(backlight_output));
    info!("Backlight initialized");

    // Display
    let mut spi_config = spi::Config::default();
    spi_config.frequency = board::LCD_SPI_FREQUENCY;
    let spi = Spi::new_blocking_txonly(p.SPI0, p.PIN_2, p.PIN_3, spi_config);
    let cs = Output::new(p.PIN_1, Level::High);
    let dc = Output::new(p.PIN_0, Level::Low);
    let reset = Output::new(p.PIN_4, Level::High);
    let spi_device = unwrap!(ExclusiveDevice::new_no_delay(spi, cs));
    let buffer = LCD_BUFFER.init([0u8; board::LCD_BUFFER_SIZE]);
    let interface = SpiInterface::new(spi_device, dc, buffer);

    let panel: Panel = match Builder::new(GC9A01, interface)
        .reset_pin(reset)
        .orientation(Orientation::new().rotate(Rotation::Deg180))
        .invert_colors(ColorInversion::Inverted)
        .init(&mut Delay)
    {
        Ok(panel) => panel,
        Err(_) => defmt::panic!("Display init failed"),
    };
    let display = SceneRenderer::new(panel);
    info!("Display initialized");

    // IMU on its own I2C bus
    let i2c = I2c::new_blocking(
        p.I2C1,
        p.PIN_7,
        p.PIN_6,
        m8b_hal_rp2040::i2c::config(I2cConfig::FAST),
    );
    let imu_bus: &'static SharedBus<ImuBus> = IMU_BUS.init(SharedBus::new(RpI2c::new(i2c)));
    let imu = bring_up_imu(imu_bus);

    // Touch pads, in A, B, Up, Down, Left, Right order
    let touch = TouchPads::new([
        CapacitivePad::new(Flex::new(p.PIN_18)),
        CapacitivePad::new(Flex::new(p.PIN_17)),
        CapacitivePad::new(Flex::new(p.PIN_13)),
        CapacitivePad::new(Flex::new(p.PIN_14)),
        CapacitivePad::new(Flex::new(p.PIN_15)),
        CapacitivePad::new(Flex::new(p.PIN_12)),
    ]);
    info!("Touch pads calibrated");

    // Charger status lines
    let charging = RpInput::new(Input::new(p.PIN_21, Pull::Up));
    let standby = RpInput::new(Input::new(p.PIN_22, Pull::Up));

    // Shake switch
    let shake_pin = Input::new(p.PIN_11, Pull::Up);

    let ctx = RuntimeContext {
        touch,
        imu,
        shake: channels::ShakeCounter,
        charging,
        standby,
        backlight,
        display,
    };
    let now_ms = Instant::now().as_millis() as u32;
    let runtime = Runtime::new(ctx, RuntimeConfig::default(), boot, now_ms);

    info!("Spawning tasks...");

    spawner.spawn(tasks::shake_task(shake_pin)).unwrap();
    spawner.spawn(tasks::runtime_task(runtime, scratch)).unwrap();

    info!("All tasks spawned, badge running");
}

/// Identify the IMU and switch both sensors on
///
/// The badge keeps working without motion data, so failures are logged
/// and the runtime runs without an IMU.
fn bring_up_imu(bus: &'static SharedBus<ImuBus>) -> Option<Imu> {
    let mut imu = match Qmi8658::acquire(bus, Qmi8658Config::default(), &mut Delay) {
        Ok(imu) => imu,
        Err(e) => {
            warn!("IMU init failed: {}", e);
            return None;
        }
    };

    if let Err(e) = imu.set_accel_enabled(true) {
        warn!("IMU enable failed: {}", e);
        return None;
    }

    match imu.device_info() {
        Ok(info) => info!(
            "IMU revision {=u8:#x}, firmware {}",
            info.revision,
            info.firmware
        ),
        Err(e) => warn!("IMU device info unavailable: {}", e),
    }

    Some(imu)
}
