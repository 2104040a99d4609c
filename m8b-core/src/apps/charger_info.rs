//! Charger status
//!
//! Shows what the charge controller reports. Holding Up and Down together
//! adds the raw status line levels underneath, `L` for a line pulled low.

use crate::events::{ChargingState, Event, Pad, TouchAction};
use crate::scene::{Label, LabelId, Scene, Tone, CENTER};
use crate::traits::{Display, DisplayError};

use super::{present, App, AppContext, AppId};

fn message(state: ChargingState) -> &'static str {
    match state {
        ChargingState::Charging => "Charging!",
        ChargingState::Full => "Fully charged!",
        ChargingState::NotCharging => "Not charging",
    }
}

fn level(active: bool) -> char {
    if active {
        'L'
    } else {
        'H'
    }
}

pub struct ChargerInfo {
    state: ChargingState,
    up_held: bool,
    down_held: bool,
    wants_to_exit: bool,
    scene: Scene,
    status: LabelId,
    lines: LabelId,
}

impl Default for ChargerInfo {
    fn default() -> Self {
        Self::new()
    }
}

impl ChargerInfo {
    pub fn new() -> Self {
        let state = ChargingState::NotCharging;
        let mut scene = Scene::new();
        let status = scene.push(Label::new(message(state), CENTER, CENTER).with_scale(2));
        let lines = scene.push(Label::new("", CENTER, 150).with_tone(Tone::Secondary));
        scene.push(Label::new("Tap A or B to quit", CENTER, 200).with_tone(Tone::Secondary));
        Self {
            state,
            up_held: false,
            down_held: false,
            wants_to_exit: false,
            scene,
            status,
            lines,
        }
    }

    pub fn state(&self) -> ChargingState {
        self.state
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    fn showing_lines(&self) -> bool {
        self.up_held && self.down_held
    }
}

impl App for ChargerInfo {
    fn handle_event(&mut self, event: &Event, _ctx: &mut AppContext) {
        match event {
            Event::Charger(state) => {
                self.state = *state;
                self.scene.set_text(self.status, message(*state));
            }
            Event::Touch(touch) => {
                let held = match touch.action {
                    TouchAction::PressStart | TouchAction::HoldStart => true,
                    TouchAction::PressEnd | TouchAction::HoldEnd => false,
                };
                match touch.pad {
                    Pad::A | Pad::B => self.wants_to_exit = true,
                    Pad::Up => self.up_held = held,
                    Pad::Down => self.down_held = held,
                    _ => {}
                }
            }
            _ => {}
        }
    }

    fn run(&mut self, ctx: &mut AppContext) {
        match ctx.charger_lines() {
            Some(lines) if self.showing_lines() => self.scene.set_fmt(
                self.lines,
                format_args!(
                    "CHRG: {}, STBY: {}",
                    level(lines.charging_active),
                    level(lines.standby_active)
                ),
            ),
            _ => self.scene.set_text(self.lines, ""),
        }
    }

    fn draw<D: Display>(&mut self, display: &mut D) -> Result<(), DisplayError> {
        present(display, &mut self.scene)
    }

    fn wants_to_exit(&self) -> bool {
        self.wants_to_exit
    }

    fn stop(&mut self) -> Option<AppId> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{ChargerLines, TouchEvent};
    use crate::testing::RecordingDisplay;

    fn touch(action: TouchAction, pad: Pad) -> Event {
        Event::Touch(TouchEvent::new(action, pad))
    }

    fn charger_ctx(charging_active: bool, standby_active: bool) -> AppContext {
        AppContext::new(0).with_charger(ChargerLines {
            charging_active,
            standby_active,
        })
    }

    #[test]
    fn test_shows_each_state() {
        let mut app = ChargerInfo::new();
        let mut ctx = AppContext::new(0);
        assert_eq!(app.scene().labels()[0].text(), "Not charging");

        for (state, text) in [
            (ChargingState::Charging, "Charging!"),
            (ChargingState::Full, "Fully charged!"),
            (ChargingState::NotCharging, "Not charging"),
        ] {
            app.handle_event(&Event::Charger(state), &mut ctx);
            assert_eq!(app.state(), state);
            assert_eq!(app.scene().labels()[0].text(), text);
        }
    }

    #[test]
    fn test_up_and_down_show_line_levels() {
        let mut app = ChargerInfo::new();
        let mut ctx = charger_ctx(true, false);

        app.handle_event(&touch(TouchAction::PressStart, Pad::Up), &mut ctx);
        app.run(&mut ctx);
        assert_eq!(app.scene().labels()[1].text(), "");

        app.handle_event(&touch(TouchAction::PressStart, Pad::Down), &mut ctx);
        app.handle_event(&touch(TouchAction::HoldStart, Pad::Down), &mut ctx);
        app.run(&mut ctx);
        assert_eq!(app.scene().labels()[1].text(), "CHRG: L, STBY: H");

        let mut ctx = charger_ctx(false, true);
        app.run(&mut ctx);
        assert_eq!(app.scene().labels()[1].text(), "CHRG: H, STBY: L");

        app.handle_event(&touch(TouchAction::HoldEnd, Pad::Down), &mut ctx);
        app.run(&mut ctx);
        assert_eq!(app.scene().labels()[1].text(), "");
        assert!(!app.wants_to_exit());
    }

    #[test]
    fn test_no_line_levels_without_charger_source() {
        let mut app = ChargerInfo::new();
        let mut ctx = AppContext::new(0);
        app.handle_event(&touch(TouchAction::PressStart, Pad::Up), &mut ctx);
        app.handle_event(&touch(TouchAction::PressStart, Pad::Down), &mut ctx);
        app.run(&mut ctx);
        assert_eq!(app.scene().labels()[1].text(), "");
    }

    #[test]
    fn test_action_pads_quit() {
        for pad in [Pad::A, Pad::B] {
            let mut app = ChargerInfo::new();
            let mut ctx = AppContext::new(0);
            app.handle_event(&touch(TouchAction::PressStart, pad), &mut ctx);
            assert!(app.wants_to_exit());
            assert_eq!(app.stop(), None);
        }
    }

    #[test]
    fn test_redraws_only_on_change() {
        let mut app = ChargerInfo::new();
        let mut display = RecordingDisplay::default();
        let mut ctx = charger_ctx(false, false);

        app.run(&mut ctx);
        app.draw(&mut display).unwrap();
        app.run(&mut ctx);
        app.draw(&mut display).unwrap();
        assert_eq!(display.roots_set, 1);

        app.handle_event(&Event::Charger(ChargingState::Full), &mut ctx);
        app.draw(&mut display).unwrap();
        assert_eq!(display.roots_set, 2);
        assert_eq!(display.last_scene().unwrap().labels()[0].text(), "Fully charged!");
    }
}
