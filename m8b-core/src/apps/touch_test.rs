//! Touch pad tester

use crate::events::{Event, Pad, TouchAction};
use crate::scene::{Label, LabelId, Scene, Tone, CENTER};
use crate::traits::{Display, DisplayError};

use super::{present, App, AppContext, AppId};

pub struct TouchTest {
    wants_to_exit: bool,
    scene: Scene,
    event_label: LabelId,
}

impl Default for TouchTest {
    fn default() -> Self {
        Self::new()
    }
}

impl TouchTest {
    pub fn new() -> Self {
        let mut scene = Scene::new();
        let event_label = scene.push(Label::new("Test out the\ntouch pads!", CENTER, CENTER).with_scale(2));
        scene.push(Label::new("Hold B to quit", CENTER, 200).with_tone(Tone::Secondary));
        Self {
            wants_to_exit: false,
            scene,
            event_label,
        }
    }

    pub fn message(&self) -> &str {
        self.scene.text(self.event_label)
    }
}

impl App for TouchTest {
    fn handle_event(&mut self, event: &Event, _ctx: &mut AppContext) {
        let Some(touch) = event.as_touch() else {
            return;
        };

        let verb = match touch.action {
            TouchAction::PressStart => "pressed",
            // A hold ends with a release, so both read the same
            TouchAction::PressEnd | TouchAction::HoldEnd => "released",
            TouchAction::HoldStart => "held",
        };
        self.scene.set_scale(self.event_label, 1);
        self.scene.set_fmt(self.event_label, format_args!("Pad {} {}!", touch.pad.name(), verb));

        if touch.action == TouchAction::HoldStart && touch.pad == Pad::B {
            self.wants_to_exit = true;
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
    use crate::events::TouchEvent;

    fn send(app: &mut TouchTest, action: TouchAction, pad: Pad) {
        let mut ctx = AppContext::new(0);
        app.handle_event(&Event::Touch(TouchEvent::new(action, pad)), &mut ctx);
    }

    #[test]
    fn test_reports_each_transition() {
        let mut app = TouchTest::new();
        send(&mut app, TouchAction::PressStart, Pad::Up);
        assert_eq!(app.message(), "Pad Up pressed!");
        send(&mut app, TouchAction::PressEnd, Pad::Up);
        assert_eq!(app.message(), "Pad Up released!");
        send(&mut app, TouchAction::HoldStart, Pad::A);
        assert_eq!(app.message(), "Pad A held!");
        send(&mut app, TouchAction::HoldEnd, Pad::A);
        assert_eq!(app.message(), "Pad A released!");
        assert!(!app.wants_to_exit());
    }

    #[test]
    fn test_holding_b_quits() {
        let mut app = TouchTest::new();
        send(&mut app, TouchAction::PressStart, Pad::B);
        assert!(!app.wants_to_exit());
        send(&mut app, TouchAction::HoldStart, Pad::B);
        assert!(app.wants_to_exit());
    }

    #[test]
    fn test_ignores_other_events() {
        let mut app = TouchTest::new();
        let mut ctx = AppContext::new(0);
        app.handle_event(&Event::Shake, &mut ctx);
        assert_eq!(app.message(), "Test out the\ntouch pads!");
    }
}
