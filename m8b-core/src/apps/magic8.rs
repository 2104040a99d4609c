//! Magic 8 ball
//!
//! Shake the badge (or touch a direction pad) and it shuffles through
//! answers for a couple of seconds before settling on one.

use crate::config::MAGIC8_SHAKE_MS;
use crate::events::Event;
use crate::rng::XorShift32;
use crate::scene::{Label, LabelId, Scene, CENTER};
use crate::traits::{Display, DisplayError};

use super::{present, App, AppContext, AppId};

/// The classic twenty answers
pub const CLASSIC_ANSWERS: [&str; 20] = [
    "It is\ncertain",
    "It is\ndecidedly so",
    "Without\na doubt",
    "Yes\ndefinitely",
    "You may\nrely on it",
    "Concentrate\nand ask again",
    "Very\ndoubtful",
    "As I see\nit, yes",
    "Most\nlikely",
    "Outlook\ngood",
    "Yes",
    "Signs point\nto yes",
    "Reply hazy,\ntry again",
    "Ask again\nlater",
    "Better not\ntell you now",
    "Cannot\npredict now",
    "Don't count\non it",
    "My reply\nis no",
    "My sources\nsay no",
    "Outlook not\nso good",
];

/// Answers for a hacker conference audience
pub const HACKER_ANSWERS: [&str; 12] = [
    "404 response:\nnot found",
    "Turn it off\nand on again",
    "Patches\nwelcome",
    "It's a\nfeature",
    "It's a\nbug",
    "It's a\nhack",
    "Password:",
    "Permission\ndenied",
    "Segmentation\nfault",
    "Unexpected\nEOF",
    "Type 'cookie'\nyou idiot",
    "command not\nfound: m8b",
];

const PROMPT: &str = "Shake me!";

const RNG_SEED: u32 = 0x8BA1_1B8A;

pub struct Magic8Ball {
    answers: &'static [&'static str],
    answer: Option<&'static str>,
    is_shaking: bool,
    shake_started_ms: u32,
    wants_to_exit: bool,
    rng: XorShift32,
    scene: Scene,
    label: LabelId,
}

impl Default for Magic8Ball {
    fn default() -> Self {
        Self::new()
    }
}

impl Magic8Ball {
    pub fn new() -> Self {
        Self::with_answers(&HACKER_ANSWERS)
    }

    pub fn with_answers(answers: &'static [&'static str]) -> Self {
        let mut scene = Scene::new();
        let label = scene.push(Label::new(PROMPT, CENTER, CENTER).with_scale(2));
        Self {
            answers,
            answer: None,
            is_shaking: false,
            shake_started_ms: 0,
            wants_to_exit: false,
            rng: XorShift32::new(RNG_SEED),
            scene,
            label,
        }
    }

    pub fn is_shaking(&self) -> bool {
        self.is_shaking
    }

    /// The answer currently shown, `None` while still prompting
    pub fn answer(&self) -> Option<&'static str> {
        self.answer
    }

    pub fn answers(&self) -> &'static [&'static str] {
        self.answers
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    fn start_shake(&mut self, now_ms: u32) {
        #[cfg(feature = "defmt")]
        defmt::debug!("Magic 8 ball: shaking");
        self.is_shaking = true;
        self.shake_started_ms = now_ms;
        self.rng.reseed(now_ms);
        self.scene.set_scale(self.label, 1);
    }
}

impl App for Magic8Ball {
    fn handle_event(&mut self, event: &Event, ctx: &mut AppContext) {
        match event {
            Event::Shake => self.start_shake(ctx.now_ms()),
            Event::Touch(touch) if touch.pad.is_direction() => self.start_shake(ctx.now_ms()),
            Event::Touch(touch) if touch.pad.is_action() => self.wants_to_exit = true,
            _ => {}
        }
    }

    fn run(&mut self, ctx: &mut AppContext) {
        if !self.is_shaking || self.answers.is_empty() {
            return;
        }

        // Shuffle every tick while shaking, settle on the last pick
        let answer = self.answers[self.rng.index(self.answers.len())];
        self.answer = Some(answer);
        self.scene.set_text(self.label, answer);

        if ctx.now_ms().wrapping_sub(self.shake_started_ms) > MAGIC8_SHAKE_MS {
            self.is_shaking = false;
            self.scene.set_scale(self.label, 2);
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
