//! GPIO pin abstractions

/// Digital input pin
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}

impl<T: InputPin + ?Sized> InputPin for &T {
    fn is_high(&self) -> bool {
        T::is_high(self)
    }
}

/// Inverts an input so that "asserted" reads as high
///
/// The charger status lines are open-drain and pulled up, so the chip
/// signals an active state by pulling them low.
pub struct ActiveLow<P>(pub P);

impl<P: InputPin> ActiveLow<P> {
    /// True when the underlying line is pulled low
    pub fn is_active(&self) -> bool {
        self.0.is_low()
    }
}

impl<P: InputPin> InputPin for ActiveLow<P> {
    fn is_high(&self) -> bool {
        self.0.is_low()
    }
}
