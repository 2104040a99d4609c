//! Events produced by the input sources and consumed by apps

/// Capacitive touch pads, in polling order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Pad {
    A,
    B,
    Up,
    Down,
    Left,
    Right,
}

/// Number of touch pads on the badge
pub const PAD_COUNT: usize = 6;

impl Pad {
    /// All pads in declaration (and therefore polling) order
    pub const ALL: [Pad; PAD_COUNT] = [Pad::A, Pad::B, Pad::Up, Pad::Down, Pad::Left, Pad::Right];

    /// Short label shown on screen
    pub fn name(self) -> &'static str {
        match self {
            Pad::A => "A",
            Pad::B => "B",
            Pad::Up => "Up",
            Pad::Down => "Down",
            Pad::Left => "Left",
            Pad::Right => "Right",
        }
    }

    /// Check if this is one of the four direction pads
    pub fn is_direction(self) -> bool {
        matches!(self, Pad::Up | Pad::Down | Pad::Left | Pad::Right)
    }

    /// Check if this is one of the two action pads
    pub fn is_action(self) -> bool {
        matches!(self, Pad::A | Pad::B)
    }
}

/// Touch transitions reported by the debounce engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TouchAction {
    PressStart,
    PressEnd,
    HoldStart,
    /// Release after a hold. No `PressEnd` precedes it.
    HoldEnd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchEvent {
    pub action: TouchAction,
    pub pad: Pad,
}

impl TouchEvent {
    pub const fn new(action: TouchAction, pad: Pad) -> Self {
        Self { action, pad }
    }
}

/// Charger state derived from the charge controller status lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChargingState {
    Charging,
    Full,
    NotCharging,
}

impl ChargingState {
    /// Derive the state from the (already inverted) status lines
    ///
    /// An active charging line wins over an active standby line.
    pub fn from_lines(charging_active: bool, standby_active: bool) -> Self {
        if charging_active {
            ChargingState::Charging
        } else if standby_active {
            ChargingState::Full
        } else {
            ChargingState::NotCharging
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ChargingState::Charging => "Charging",
            ChargingState::Full => "Charged",
            ChargingState::NotCharging => "On battery",
        }
    }
}

/// Raw charger status lines, `true` when the line is pulled low
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChargerLines {
    pub charging_active: bool,
    pub standby_active: bool,
}

impl ChargerLines {
    pub fn state(self) -> ChargingState {
        ChargingState::from_lines(self.charging_active, self.standby_active)
    }
}

/// One scaled accelerometer and gyroscope sample
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ImuEvent {
    /// Acceleration in g
    pub accel: [f32; 3],
    /// Angular rate in degrees per second
    pub gyro: [f32; 3],
}

/// Events delivered to the active app
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    Touch(TouchEvent),
    Imu(ImuEvent),
    Shake,
    Charger(ChargingState),
}

impl Event {
    /// Check if this event counts as user interaction for the sleep timer
    pub fn is_interaction(&self) -> bool {
        matches!(self, Event::Touch(_) | Event::Shake)
    }

    /// The touch event, if this is one
    pub fn as_touch(&self) -> Option<TouchEvent> {
        match self {
            Event::Touch(touch) => Some(*touch),
            _ => None,
        }
    }
}

impl From<TouchEvent> for Event {
    fn from(event: TouchEvent) -> Self {
        Event::Touch(event)
    }
}

impl From<ImuEvent> for Event {
    fn from(event: ImuEvent) -> Self {
        Event::Imu(event)
    }
}
