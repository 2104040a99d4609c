//! Compiled-in configuration
//!
//! The badge has no configuration file or command line. All timing
//! constants live here; [`RuntimeConfig`] bundles them so tests can run
//! the scheduler with shorter timeouts.

/// Press duration after which a touch becomes a hold
pub const HOLD_TIME_MS: u32 = 1000;

/// Minimum time between two draws (strictly greater than this elapses)
pub const FRAME_INTERVAL_MS: u32 = 33;

/// Inactivity period before the badge goes to sleep
pub const SLEEP_TIMEOUT_MS: u32 = 30_000;

/// How long the magic 8 ball keeps shuffling answers
pub const MAGIC8_SHAKE_MS: u32 = 2000;

/// Backlight fade-in when the runtime starts
pub const STARTUP_FADE_MS: u32 = 1000;

/// Duration of the backlight test ramps
pub const BACKLIGHT_TEST_RAMP_MS: u32 = 1000;

/// Scheduler configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RuntimeConfig {
    pub hold_time_ms: u32,
    pub frame_interval_ms: u32,
    pub sleep_timeout_ms: u32,
    /// Poll the charger status lines
    pub charger_enabled: bool,
    /// Sample the IMU every tick (when one is fitted)
    pub imu_enabled: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            hold_time_ms: HOLD_TIME_MS,
            frame_interval_ms: FRAME_INTERVAL_MS,
            sleep_timeout_ms: SLEEP_TIMEOUT_MS,
            charger_enabled: true,
            imu_enabled: true,
        }
    }
}
