//! Main menu
//!
//! Up/Down scroll through the options, A launches the selected one.
//! The selected entry is drawn large in the middle with its neighbours
//! above and below.
//!
//! A release only counts if the menu also saw the press. The app that
//! was just left may have exited on the press, and its release must not
//! launch anything.

use crate::events::{ChargingState, Event, Pad, TouchAction, PAD_COUNT};
use crate::scene::{Label, LabelId, Scene, Tone, CENTER};
use crate::traits::{Display, DisplayError};

use super::{present, App, AppContext, AppId};

/// What a menu entry does when launched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MenuOption {
    Launch(AppId),
    Sleep,
}

impl MenuOption {
    pub fn label(self) -> &'static str {
        match self {
            MenuOption::Launch(id) => id.name(),
            MenuOption::Sleep => "Sleep",
        }
    }
}

/// Menu entries in display order
pub const OPTIONS: [MenuOption; 6] = [
    MenuOption::Launch(AppId::Magic8Ball),
    MenuOption::Launch(AppId::ChargerInfo),
    MenuOption::Launch(AppId::TouchTest),
    MenuOption::Launch(AppId::ImuTest),
    MenuOption::Launch(AppId::BacklightTest),
    MenuOption::Sleep,
];

pub struct MainMenu {
    current_option_index: usize,
    needs_redraw: bool,
    wants_to_exit: bool,
    app_to_run: Option<AppId>,
    pressed: [bool; PAD_COUNT],
    scene: Scene,
    selected: LabelId,
    next: LabelId,
    previous: LabelId,
    charger: LabelId,
}

impl Default for MainMenu {
    fn default() -> Self {
        Self::new()
    }
}

impl MainMenu {
    pub fn new() -> Self {
        let mut scene = Scene::new();
        let selected = scene.push(Label::new("", CENTER, 120).with_scale(2));
        let next = scene.push(Label::new("", CENTER, 150).with_tone(Tone::Secondary));
        let previous = scene.push(Label::new("", CENTER, 90).with_tone(Tone::Secondary));
        let charger = scene.push(Label::new("", CENTER, 200).with_tone(Tone::Secondary));

        Self {
            current_option_index: 0,
            needs_redraw: true,
            wants_to_exit: false,
            app_to_run: None,
            pressed: [false; PAD_COUNT],
            scene,
            selected,
            next,
            previous,
            charger,
        }
    }

    pub fn current_option_index(&self) -> usize {
        self.current_option_index
    }

    pub fn current_option(&self) -> MenuOption {
        OPTIONS[self.current_option_index]
    }

    pub fn needs_redraw(&self) -> bool {
        self.needs_redraw
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    fn run_option(&mut self, ctx: &mut AppContext) {
        match self.current_option() {
            MenuOption::Launch(id) => {
                #[cfg(feature = "defmt")]
                defmt::info!("Menu: launching {}", id);
                self.app_to_run = Some(id);
                self.wants_to_exit = true;
            }
            MenuOption::Sleep => ctx.request_sleep(),
        }
    }

    fn navigate(&mut self, pad: Pad, ctx: &mut AppContext) {
        let count = OPTIONS.len();
        match pad {
            Pad::A => self.run_option(ctx),
            Pad::Up => self.current_option_index = (self.current_option_index + count - 1) % count,
            Pad::Down => self.current_option_index = (self.current_option_index + 1) % count,
            _ => {}
        }
        self.needs_redraw = true;
    }

    fn show_charger(&mut self, state: ChargingState) {
        #[cfg(feature = "defmt")]
        defmt::info!("Charger: {}", state);
        self.scene.set_text(self.charger, state.label());
    }
}

impl App for MainMenu {
    fn handle_event(&mut self, event: &Event, ctx: &mut AppContext) {
        match event {
            Event::Touch(touch) => {
                let pressed = &mut self.pressed[touch.pad as usize];
                match touch.action {
                    TouchAction::PressStart => *pressed = true,
                    TouchAction::PressEnd if *pressed => {
                        *pressed = false;
                        self.navigate(touch.pad, ctx);
                    }
                    TouchAction::PressEnd | TouchAction::HoldEnd => *pressed = false,
                    TouchAction::HoldStart => {}
                }
            }
            Event::Charger(state) => self.show_charger(*state),
            _ => {}
        }
    }

    fn run(&mut self, _ctx: &mut AppContext) {}

    fn draw<D: Display>(&mut self, display: &mut D) -> Result<(), DisplayError> {
        if self.needs_redraw {
            self.needs_redraw = false;
            let count = OPTIONS.len();
            let index = self.current_option_index;
            self.scene.set_text(self.selected, OPTIONS[index].label());
            self.scene.set_text(self.next, OPTIONS[(index + 1) % count].label());
            self.scene.set_text(self.previous, OPTIONS[(index + count - 1) % count].label());
        }
        present(display, &mut self.scene)
    }

    fn wants_to_exit(&self) -> bool {
        self.wants_to_exit
    }

    fn stop(&mut self) -> Option<AppId> {
        self.app_to_run.take()
    }
}
