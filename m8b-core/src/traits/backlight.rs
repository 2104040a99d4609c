//! Backlight output trait

/// Physical backlight output
///
/// Implementations map the level onto whatever the hardware offers
/// (PWM duty cycle on the badge).
pub trait BacklightOutput {
    /// Set the brightness, `0.0` (off) to `1.0` (full)
    ///
    /// Values outside that range are clamped by the implementation.
    fn set_brightness(&mut self, level: f32);
}
