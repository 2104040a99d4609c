//! Backlight tester
//!
//! Up fades the backlight in, Down fades it out.

use crate::config::BACKLIGHT_TEST_RAMP_MS;
use crate::events::{Event, Pad};
use crate::scene::{Label, Scene, Tone, CENTER};
use crate::traits::{Display, DisplayError};

use super::{present, App, AppContext, AppId};

pub struct BacklightTest {
    wants_to_exit: bool,
    scene: Scene,
}

impl Default for BacklightTest {
    fn default() -> Self {
        Self::new()
    }
}

impl BacklightTest {
    pub fn new() -> Self {
        let mut scene = Scene::new();
        scene.push(Label::new("Tap Up/Down to\nadjust backlight", CENTER, CENTER).with_scale(2));
        scene.push(Label::new("Tap B to quit", CENTER, 200).with_tone(Tone::Secondary));
        Self {
            wants_to_exit: false,
            scene,
        }
    }
}

impl App for BacklightTest {
    fn handle_event(&mut self, event: &Event, ctx: &mut AppContext) {
        let Some(touch) = event.as_touch() else {
            return;
        };
        match touch.pad {
            Pad::Up => ctx.ramp_backlight(1.0, BACKLIGHT_TEST_RAMP_MS),
            Pad::Down => ctx.ramp_backlight(0.0, BACKLIGHT_TEST_RAMP_MS),
            Pad::A | Pad::B => self.wants_to_exit = true,
            _ => {}
        }
    }

    fn run(&mut self, _ctx: &mut AppContext) {}

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
    use crate::apps::RampRequest;
    use crate::events::{TouchAction, TouchEvent};
    use crate::testing::RecordingDisplay;

    fn touch(pad: Pad) -> Event {
        Event::Touch(TouchEvent::new(TouchAction::PressStart, pad))
    }

    #[test]
    fn test_up_and_down_request_ramps() {
        let mut app = BacklightTest::new();

        let mut ctx = AppContext::new(0);
        app.handle_event(&touch(Pad::Down), &mut ctx);
        assert_eq!(
            ctx.take_ramp(),
            Some(RampRequest {
                target: 0.0,
                duration_ms: BACKLIGHT_TEST_RAMP_MS
            })
        );

        let mut ctx = AppContext::new(0);
        app.handle_event(&touch(Pad::Up), &mut ctx);
        assert_eq!(ctx.take_ramp().map(|r| r.target), Some(1.0));
        assert!(!app.wants_to_exit());
    }

    #[test]
    fn test_left_right_do_nothing() {
        let mut app = BacklightTest::new();
        let mut ctx = AppContext::new(0);
        app.handle_event(&touch(Pad::Left), &mut ctx);
        app.handle_event(&touch(Pad::Right), &mut ctx);
        assert_eq!(ctx.take_ramp(), None);
        assert!(!app.wants_to_exit());
    }

    #[test]
    fn test_action_pads_quit() {
        for pad in [Pad::A, Pad::B] {
            let mut app = BacklightTest::new();
            let mut ctx = AppContext::new(0);
            app.handle_event(&touch(pad), &mut ctx);
            assert!(app.wants_to_exit());
        }
    }

    #[test]
    fn test_draws_instructions_once() {
        let mut app = BacklightTest::new();
        let mut display = RecordingDisplay::default();
        app.draw(&mut display).unwrap();
        app.draw(&mut display).unwrap();
        assert_eq!(display.roots_set, 1);
        assert_eq!(display.last_scene().unwrap().labels()[1].text(), "Tap B to quit");
    }
}
