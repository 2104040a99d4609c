//! Digital inputs

use embassy_rp::gpio::Input;
use m8b_hal::InputPin;

/// Embassy input wrapped for the HAL trait
pub struct RpInput<'d>(pub Input<'d>);

impl<'d> RpInput<'d> {
    pub fn new(input: Input<'d>) -> Self {
        Self(input)
    }
}

impl<'d> InputPin for RpInput<'d> {
    fn is_high(&self) -> bool {
        self.0.is_high()
    }
}
