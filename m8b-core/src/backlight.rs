//! Backlight ramp controller
//!
//! Moves the backlight linearly from its current level to a target over
//! a given duration. The scheduler calls [`BacklightController::update`]
//! once per tick; each update advances the level by `rate * elapsed`,
//! never past the target, and writes it to the output.

use crate::traits::BacklightOutput;

/// Ramp controller owning the physical backlight output
pub struct BacklightController<O> {
    output: O,
    /// Level currently written to the output
    current: f32,
    target: f32,
    /// Change per millisecond, signed
    rate_per_ms: f32,
    /// Time left until the ramp must have reached its target
    remaining_ms: u32,
    last_update_ms: u32,
}

impl<O: BacklightOutput> BacklightController<O> {
    /// Create a controller with the backlight off
    pub fn new(mut output: O, now_ms: u32) -> Self {
        output.set_brightness(0.0);
        Self {
            output,
            current: 0.0,
            target: 0.0,
            rate_per_ms: 0.0,
            remaining_ms: 0,
            last_update_ms: now_ms,
        }
    }

    /// Start a ramp from the current level to `target` over `duration_ms`
    ///
    /// A ramp already in flight is replaced; the new rate is computed from
    /// wherever the level is now. A zero duration jumps straight to the
    /// target.
    pub fn ramp_to(&mut self, target: f32, duration_ms: u32, now_ms: u32) {
        let target = target.clamp(0.0, 1.0);
        self.target = target;
        self.last_update_ms = now_ms;

        if duration_ms == 0 {
            self.set_level(target);
            return;
        }

        self.rate_per_ms = (target - self.current) / duration_ms as f32;
        self.remaining_ms = duration_ms;
    }

    /// Advance the ramp and write the level to the output
    pub fn update(&mut self, now_ms: u32) {
        let elapsed = now_ms.wrapping_sub(self.last_update_ms);
        self.last_update_ms = now_ms;

        if self.remaining_ms > 0 {
            self.remaining_ms = self.remaining_ms.saturating_sub(elapsed);
            if self.remaining_ms == 0 {
                self.current = self.target;
            } else {
                let next = self.current + self.rate_per_ms * elapsed as f32;
                self.current = if self.rate_per_ms > 0.0 {
                    next.min(self.target)
                } else {
                    next.max(self.target)
                };
            }
        }

        self.output.set_brightness(self.current);
    }

    /// Set the level immediately, cancelling any ramp
    pub fn set_level(&mut self, level: f32) {
        let level = level.clamp(0.0, 1.0);
        self.current = level;
        self.target = level;
        self.rate_per_ms = 0.0;
        self.remaining_ms = 0;
        self.output.set_brightness(level);
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn is_ramping(&self) -> bool {
        self.remaining_ms > 0
    }

    pub fn output(&self) -> &O {
        &self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Default)]
    struct Recorder {
        last: f32,
        writes: usize,
    }

    impl BacklightOutput for Recorder {
        fn set_brightness(&mut self, level: f32) {
            self.last = level;
            self.writes += 1;
        }
    }

    #[test]
    fn test_ramp_up_over_one_second() {
        let mut bl = BacklightController::new(Recorder::default(), 0);
        bl.ramp_to(1.0, 1000, 0);

        bl.update(250);
        assert!((bl.current() - 0.25).abs() < 1e-6);
        bl.update(500);
        assert!((bl.current() - 0.5).abs() < 1e-6);
        bl.update(1000);
        assert_eq!(bl.current(), 1.0);
        assert!(!bl.is_ramping());
        assert_eq!(bl.output().last, 1.0);
    }

    #[test]
    fn test_retarget_mid_ramp_starts_from_current() {
        let mut bl = BacklightController::new(Recorder::default(), 0);
        bl.ramp_to(1.0, 1000, 0);
        bl.update(500);

        // Halfway up, head back down over 500 ms
        bl.ramp_to(0.0, 500, 500);
        bl.update(750);
        assert!((bl.current() - 0.25).abs() < 1e-6);
        bl.update(1000);
        assert_eq!(bl.current(), 0.0);
    }

    #[test]
    fn test_zero_duration_jumps() {
        let mut bl = BacklightController::new(Recorder::default(), 0);
        bl.ramp_to(0.7, 0, 10);
        assert_eq!(bl.current(), 0.7);
        assert_eq!(bl.output().last, 0.7);
        assert!(!bl.is_ramping());
    }

    #[test]
    fn test_update_writes_every_tick() {
        let mut bl = BacklightController::new(Recorder::default(), 0);
        bl.update(5);
        bl.update(10);
        // One write from new(), one per update
        assert_eq!(bl.output().writes, 3);
    }

    #[test]
    fn test_target_is_clamped() {
        let mut bl = BacklightController::new(Recorder::default(), 0);
        bl.ramp_to(3.0, 100, 0);
        bl.update(100);
        assert_eq!(bl.current(), 1.0);
    }

    proptest! {
        #[test]
        fn prop_converges_without_overshoot(
            start in 0.0f32..=1.0,
            target in 0.0f32..=1.0,
            duration in 1u32..5000,
            delta in 1u32..500,
        ) {
            let mut bl = BacklightController::new(Recorder::default(), 0);
            bl.set_level(start);
            bl.ramp_to(target, duration, 0);

            let (lo, hi) = if start <= target { (start, target) } else { (target, start) };
            let calls = duration.div_ceil(delta);
            let mut now = 0;
            let mut previous = start;
            for _ in 0..calls {
                now += delta;
                bl.update(now);
                let level = bl.current();
                prop_assert!(level >= lo && level <= hi, "level {} outside [{}, {}]", level, lo, hi);
                if start <= target {
                    prop_assert!(level >= previous);
                } else {
                    prop_assert!(level <= previous);
                }
                previous = level;
            }
            prop_assert_eq!(bl.current(), target);
        }
    }
}
