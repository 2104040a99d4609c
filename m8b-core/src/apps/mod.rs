//! Apps
//!
//! Exactly one app is active at a time. The scheduler feeds it events,
//! ticks its logic, asks it to draw at a capped rate, and replaces it
//! when it wants to exit. Apps never talk to each other; the only thing
//! that crosses an app switch is the [`AppId`] returned from
//! [`App::stop`].

pub mod backlight_test;
pub mod charger_info;
pub mod magic8;
pub mod menu;
pub mod touch_test;

use serde::{Deserialize, Serialize};

use crate::events::{ChargerLines, Event};
use crate::scene::Scene;
use crate::traits::{Display, DisplayError};

pub use backlight_test::BacklightTest;
pub use charger_info::ChargerInfo;
pub use imu_test::ImuTest;
pub use magic8::Magic8Ball;
pub use menu::{MainMenu, MenuOption};
pub use touch_test::TouchTest;

/// Identifies an app that can be launched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AppId {
    MainMenu,
    Magic8Ball,
    TouchTest,
    ImuTest,
    BacklightTest,
    // Appended so persisted boot records keep their encoding
    ChargerInfo,
}

impl AppId {
    pub const ALL: [AppId; 6] = [
        AppId::MainMenu,
        AppId::Magic8Ball,
        AppId::ChargerInfo,
        AppId::TouchTest,
        AppId::ImuTest,
        AppId::BacklightTest,
    ];

    /// Display name, also used as the menu entry
    pub fn name(self) -> &'static str {
        match self {
            AppId::MainMenu => "Main Menu",
            AppId::Magic8Ball => "Magic 8 Ball",
            AppId::ChargerInfo => "Charger Info",
            AppId::TouchTest => "Touch Test",
            AppId::ImuTest => "IMU Test",
            AppId::BacklightTest => "Backlight Test",
        }
    }
}

/// Backlight ramp requested by an app
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RampRequest {
    pub target: f32,
    pub duration_ms: u32,
}

/// What an app can see and ask for during one call
///
/// The scheduler creates a context per call, then carries out whatever
/// the app requested.
#[derive(Debug, Clone)]
pub struct AppContext {
    now_ms: u32,
    charger: Option<ChargerLines>,
    ramp: Option<RampRequest>,
    sleep: bool,
}

impl AppContext {
    pub fn new(now_ms: u32) -> Self {
        Self {
            now_ms,
            charger: None,
            ramp: None,
            sleep: false,
        }
    }

    /// Scheduler time of this tick in milliseconds
    pub fn now_ms(&self) -> u32 {
        self.now_ms
    }

    /// Attach the charger status lines read this tick
    pub fn with_charger(mut self, lines: ChargerLines) -> Self {
        self.charger = Some(lines);
        self
    }

    /// Charger status lines, `None` when the charger source is disabled
    pub fn charger_lines(&self) -> Option<ChargerLines> {
        self.charger
    }

    /// Ask for a backlight ramp; a later request in the same call wins
    pub fn ramp_backlight(&mut self, target: f32, duration_ms: u32) {
        self.ramp = Some(RampRequest {
            target,
            duration_ms,
        });
    }

    /// Ask the scheduler to put the badge to sleep
    pub fn request_sleep(&mut self) {
        self.sleep = true;
    }

    pub fn take_ramp(&mut self) -> Option<RampRequest> {
        self.ramp.take()
    }

    pub fn sleep_requested(&self) -> bool {
        self.sleep
    }
}

/// Capability set every app implements
pub trait App {
    /// React to one event
    fn handle_event(&mut self, event: &Event, ctx: &mut AppContext);

    /// Logic tick, called once per scheduler iteration
    fn run(&mut self, ctx: &mut AppContext);

    /// Push the scene to the display if it changed since the last draw
    fn draw<D: Display>(&mut self, display: &mut D) -> Result<(), DisplayError>;

    fn wants_to_exit(&self) -> bool;

    /// Called once before the app is dropped. `None` returns to the menu.
    fn stop(&mut self) -> Option<AppId>;
}

/// Render `scene` if it is dirty
pub(crate) fn present<D: Display>(display: &mut D, scene: &mut Scene) -> Result<(), DisplayError> {
    if scene.is_dirty() {
        display.set_root(scene)?;
        scene.mark_clean();
    }
    Ok(())
}

/// The active app, one variant per app
pub enum ActiveApp {
    MainMenu(MainMenu),
    Magic8Ball(Magic8Ball),
    ChargerInfo(ChargerInfo),
    TouchTest(TouchTest),
    ImuTest(ImuTest),
    BacklightTest(BacklightTest),
}

macro_rules! dispatch {
    ($self:expr, $app:ident => $call:expr) => {
        match $self {
            ActiveApp::MainMenu($app) => $call,
            ActiveApp::Magic8Ball($app) => $call,
            ActiveApp::ChargerInfo($app) => $call,
            ActiveApp::TouchTest($app) => $call,
            ActiveApp::ImuTest($app) => $call,
            ActiveApp::BacklightTest($app) => $call,
        }
    };
}

impl ActiveApp {
    /// Construct the app registered under `id`
    pub fn launch(id: AppId) -> Self {
        match id {
            AppId::MainMenu => ActiveApp::MainMenu(MainMenu::new()),
            AppId::Magic8Ball => ActiveApp::Magic8Ball(Magic8Ball::new()),
            AppId::ChargerInfo => ActiveApp::ChargerInfo(ChargerInfo::new()),
            AppId::TouchTest => ActiveApp::TouchTest(TouchTest::new()),
            AppId::ImuTest => ActiveApp::ImuTest(ImuTest::new()),
            AppId::BacklightTest => ActiveApp::BacklightTest(BacklightTest::new()),
        }
    }

    pub fn id(&self) -> AppId {
        match self {
            ActiveApp::MainMenu(_) => AppId::MainMenu,
            ActiveApp::Magic8Ball(_) => AppId::Magic8Ball,
            ActiveApp::ChargerInfo(_) => AppId::ChargerInfo,
            ActiveApp::TouchTest(_) => AppId::TouchTest,
            ActiveApp::ImuTest(_) => AppId::ImuTest,
            ActiveApp::BacklightTest(_) => AppId::BacklightTest,
        }
    }
}

impl App for ActiveApp {
    fn handle_event(&mut self, event: &Event, ctx: &mut AppContext) {
        dispatch!(self, app => app.handle_event(event, ctx))
    }

    fn run(&mut self, ctx: &mut AppContext) {
        dispatch!(self, app => app.run(ctx))
    }

    fn draw<D: Display>(&mut self, display: &mut D) -> Result<(), DisplayError> {
        dispatch!(self, app => app.draw(display))
    }

    fn wants_to_exit(&self) -> bool {
        dispatch!(self, app => app.wants_to_exit())
    }

    fn stop(&mut self) -> Option<AppId> {
        dispatch!(self, app => app.stop())
    }
}
