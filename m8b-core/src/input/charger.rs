//! Charger event source
//!
//! The charge controller reports through two open-drain status lines,
//! `charging` and `standby`, both pulled low when active. An event is
//! produced only when the derived state differs from the previous
//! observation; the first observation always produces one.

use m8b_hal::{ActiveLow, InputPin};

use crate::events::{ChargerLines, ChargingState};

pub struct ChargerSource<C, S> {
    charging: ActiveLow<C>,
    standby: ActiveLow<S>,
    previous: Option<ChargingState>,
}

impl<C: InputPin, S: InputPin> ChargerSource<C, S> {
    pub fn new(charging: C, standby: S) -> Self {
        Self {
            charging: ActiveLow(charging),
            standby: ActiveLow(standby),
            previous: None,
        }
    }

    /// Status lines as they read right now
    pub fn lines(&self) -> ChargerLines {
        ChargerLines {
            charging_active: self.charging.is_active(),
            standby_active: self.standby.is_active(),
        }
    }

    /// Current state read from the status lines
    pub fn state(&self) -> ChargingState {
        self.lines().state()
    }

    /// Last reported state, if any
    pub fn previous(&self) -> Option<ChargingState> {
        self.previous
    }

    /// Returns the new state if it changed since the last poll
    pub fn poll(&mut self) -> Option<ChargingState> {
        let state = self.state();
        if self.previous == Some(state) {
            return None;
        }
        self.previous = Some(state);
        Some(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;
    use proptest::prelude::*;

    /// Line level, `true` = high (inactive)
    struct Line<'a>(&'a Cell<bool>);

    impl InputPin for Line<'_> {
        fn is_high(&self) -> bool {
            self.0.get()
        }
    }

    #[test]
    fn test_first_observation_emits() {
        let charging = Cell::new(true);
        let standby = Cell::new(true);
        let mut source = ChargerSource::new(Line(&charging), Line(&standby));

        assert_eq!(source.poll(), Some(ChargingState::NotCharging));
        assert_eq!(source.poll(), None);
        assert_eq!(source.poll(), None);
    }

    #[test]
    fn test_plug_in_and_charge_complete() {
        let charging = Cell::new(true);
        let standby = Cell::new(true);
        let mut source = ChargerSource::new(Line(&charging), Line(&standby));
        source.poll();

        charging.set(false);
        assert_eq!(source.poll(), Some(ChargingState::Charging));

        // Both lines active: charging wins, so nothing changes
        standby.set(false);
        assert_eq!(source.poll(), None);

        charging.set(true);
        assert_eq!(source.poll(), Some(ChargingState::Full));
        assert_eq!(source.previous(), Some(ChargingState::Full));
    }

    #[test]
    fn test_lines_report_active_low() {
        let charging = Cell::new(false);
        let standby = Cell::new(true);
        let source = ChargerSource::new(Line(&charging), Line(&standby));

        assert_eq!(
            source.lines(),
            ChargerLines {
                charging_active: true,
                standby_active: false,
            }
        );
        assert_eq!(source.state(), ChargingState::Charging);
    }

    proptest! {
        #[test]
        fn prop_emits_iff_state_changed(levels in proptest::collection::vec((any::<bool>(), any::<bool>()), 1..100)) {
            let charging = Cell::new(true);
            let standby = Cell::new(true);
            let mut source = ChargerSource::new(Line(&charging), Line(&standby));

            let mut last: Option<ChargingState> = None;
            for (c, s) in levels {
                charging.set(c);
                standby.set(s);
                let derived = ChargingState::from_lines(!c, !s);
                let event = source.poll();
                if last == Some(derived) {
                    prop_assert_eq!(event, None);
                } else {
                    prop_assert_eq!(event, Some(derived));
                }
                last = Some(derived);
            }
        }
    }
}
