//! PWM backlight output
//!
//! Maps a brightness level in `0.0..=1.0` linearly onto the PWM duty cycle
//! of the backlight pin.

use embedded_hal::pwm::SetDutyCycle;
use m8b_core::traits::BacklightOutput;

pub struct PwmBacklight<P> {
    pwm: P,
    /// Duty cycle last written
    duty: u16,
}

impl<P: SetDutyCycle> PwmBacklight<P> {
    /// Create a backlight output, starting dark
    pub fn new(pwm: P) -> Self {
        let mut backlight = Self { pwm, duty: 0 };
        backlight.set_brightness(0.0);
        backlight
    }

    pub fn duty(&self) -> u16 {
        self.duty
    }

    /// Duty cycle for a brightness level
    pub fn duty_for(&self, level: f32) -> u16 {
        let max = self.pwm.max_duty_cycle() as f32;
        (level.clamp(0.0, 1.0) * max + 0.5) as u16
    }

    pub fn release(self) -> P {
        self.pwm
    }
}

impl<P: SetDutyCycle> BacklightOutput for PwmBacklight<P> {
    fn set_brightness(&mut self, level: f32) {
        let duty = self.duty_for(level);
        if self.pwm.set_duty_cycle(duty).is_ok() {
            self.duty = duty;
        } else {
            #[cfg(feature = "defmt")]
            defmt::warn!("Backlight: failed to set duty {}", duty);
        }
    }
}
