//! Runtime loop
//!
//! One [`Runtime::tick`] is one cooperative iteration:
//!
//! ```text
//!   backlight.update
//!        |
//!   poll sources: touch -> imu -> shake -> charger
//!        |
//!   for each event: reset inactivity (touch, shake), app.handle_event
//!        |
//!   app.run
//!        |
//!   draw if more than one frame interval since the last draw
//!        |
//!   app wants to exit? stop() -> launch returned app or the menu,
//!        |                          replay the last charger state to it
//!        |
//!   idle too long or sleep requested? -> Sleeping, TickOutcome::Suspend
//! ```
//!
//! Sleeping is terminal. The caller persists the returned boot record and
//! suspends the chip; the next boot builds a fresh runtime.

use heapless::Vec;

use crate::apps::{ActiveApp, App, AppContext, AppId};
use crate::backlight::BacklightController;
use crate::config::{RuntimeConfig, STARTUP_FADE_MS};
use crate::events::Event;
use crate::input::{ChargerSource, ShakeSource, TouchEngine};
use crate::persist::BootRecord;
use crate::traits::{Display, MotionSensor};

use super::board::{Board, RuntimeContext};

/// Upper bound on events gathered in one tick (six pads, IMU, shake, charger)
pub const MAX_EVENTS_PER_TICK: usize = 16;

/// Scheduler state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RunState {
    Running(AppId),
    Sleeping,
}

/// Result of one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TickOutcome {
    /// Keep ticking
    Continue,
    /// Persist the record and suspend until a wake source fires
    Suspend(BootRecord),
}

pub struct Runtime<B: Board> {
    config: RuntimeConfig,
    boot: BootRecord,
    state: RunState,

    touch_engine: TouchEngine,
    touch: B::Touch,
    imu: Option<B::Imu>,
    shake: ShakeSource<B::Shake>,
    charger: ChargerSource<B::Charging, B::Standby>,
    backlight: BacklightController<B::Backlight>,
    display: B::Display,

    app: ActiveApp,
    sleep_requested: bool,
    last_draw_ms: u32,
    last_interaction_ms: u32,

    draw_count: u32,
    run_count: u32,
}

impl<B: Board> Runtime<B> {
    /// Build the runtime and start the app named by `boot`
    pub fn new(ctx: RuntimeContext<B>, config: RuntimeConfig, boot: BootRecord, now_ms: u32) -> Self {
        let mut backlight = BacklightController::new(ctx.backlight, now_ms);
        backlight.ramp_to(1.0, STARTUP_FADE_MS, now_ms);

        #[cfg(feature = "defmt")]
        defmt::info!("Runtime: starting {} (wake {})", boot.mode, boot.wake_count);

        Self {
            config,
            boot,
            state: RunState::Running(boot.mode),
            touch_engine: TouchEngine::new(config.hold_time_ms),
            touch: ctx.touch,
            imu: ctx.imu,
            shake: ShakeSource::new(ctx.shake),
            charger: ChargerSource::new(ctx.charging, ctx.standby),
            backlight,
            display: ctx.display,
            app: ActiveApp::launch(boot.mode),
            sleep_requested: false,
            last_draw_ms: now_ms,
            last_interaction_ms: now_ms,
            draw_count: 0,
            run_count: 0,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn active_app(&self) -> AppId {
        self.app.id()
    }

    pub fn app(&self) -> &ActiveApp {
        &self.app
    }

    pub fn backlight(&self) -> &BacklightController<B::Backlight> {
        &self.backlight
    }

    pub fn display(&self) -> &B::Display {
        &self.display
    }

    pub fn touch_mut(&mut self) -> &mut B::Touch {
        &mut self.touch
    }

    pub fn imu_mut(&mut self) -> Option<&mut B::Imu> {
        self.imu.as_mut()
    }

    pub fn shake_mut(&mut self) -> &mut B::Shake {
        self.shake.counter_mut()
    }

    /// Number of draws since start
    pub fn draw_count(&self) -> u32 {
        self.draw_count
    }

    /// Number of app logic ticks since start
    pub fn run_count(&self) -> u32 {
        self.run_count
    }

    /// Run one iteration
    pub fn tick(&mut self, now_ms: u32) -> TickOutcome {
        if self.state == RunState::Sleeping {
            return TickOutcome::Suspend(self.sleep_record());
        }

        self.backlight.update(now_ms);

        let events = self.poll_sources(now_ms);
        for event in &events {
            if event.is_interaction() {
                self.last_interaction_ms = now_ms;
            }
            let mut ctx = self.context(now_ms);
            self.app.handle_event(event, &mut ctx);
            self.apply(ctx, now_ms);
        }

        let mut ctx = self.context(now_ms);
        self.app.run(&mut ctx);
        self.run_count = self.run_count.wrapping_add(1);
        self.apply(ctx, now_ms);

        if now_ms.wrapping_sub(self.last_draw_ms) > self.config.frame_interval_ms {
            self.last_draw_ms = now_ms;
            self.draw_count = self.draw_count.wrapping_add(1);
            if let Err(_e) = self.app.draw(&mut self.display) {
                #[cfg(feature = "defmt")]
                defmt::warn!("Draw failed: {}", _e);
            }
        }

        if self.app.wants_to_exit() {
            let next = self.app.stop().unwrap_or(AppId::MainMenu);
            self.switch_to(next, now_ms);
        }

        let idle_ms = now_ms.wrapping_sub(self.last_interaction_ms);
        if self.sleep_requested || idle_ms > self.config.sleep_timeout_ms {
            return self.sleep();
        }

        TickOutcome::Continue
    }

    /// Gather this tick's events in source order
    fn poll_sources(&mut self, now_ms: u32) -> Vec<Event, MAX_EVENTS_PER_TICK> {
        let mut events = Vec::new();

        for touch in self.touch_engine.poll(&mut self.touch, now_ms) {
            let _ = events.push(Event::Touch(touch));
        }

        if self.config.imu_enabled {
            if let Some(imu) = self.imu.as_mut() {
                match imu.sample() {
                    Ok(sample) => {
                        let _ = events.push(Event::Imu(sample));
                    }
                    Err(_e) => {
                        #[cfg(feature = "defmt")]
                        defmt::warn!("IMU sample failed: {}", _e);
                    }
                }
            }
        }

        if self.shake.poll() {
            let _ = events.push(Event::Shake);
        }

        if self.config.charger_enabled {
            if let Some(state) = self.charger.poll() {
                let _ = events.push(Event::Charger(state));
            }
        }

        events
    }

    fn context(&self, now_ms: u32) -> AppContext {
        let ctx = AppContext::new(now_ms);
        if self.config.charger_enabled {
            ctx.with_charger(self.charger.lines())
        } else {
            ctx
        }
    }

    /// Carry out what the app asked for
    fn apply(&mut self, mut ctx: AppContext, now_ms: u32) {
        if let Some(ramp) = ctx.take_ramp() {
            self.backlight.ramp_to(ramp.target, ramp.duration_ms, now_ms);
        }
        if ctx.sleep_requested() {
            self.sleep_requested = true;
        }
    }

    fn switch_to(&mut self, id: AppId, now_ms: u32) {
        #[cfg(feature = "defmt")]
        defmt::info!("Switching {} -> {}", self.app.id(), id);
        self.app = ActiveApp::launch(id);
        self.state = RunState::Running(id);

        // The source only reports changes, so the new app would never
        // hear about the current state otherwise
        if !self.config.charger_enabled {
            return;
        }
        if let Some(state) = self.charger.previous() {
            let mut ctx = self.context(now_ms);
            self.app.handle_event(&Event::Charger(state), &mut ctx);
            self.apply(ctx, now_ms);
        }
    }

    fn sleep_record(&self) -> BootRecord {
        self.boot.for_sleep(self.app.id())
    }

    fn sleep(&mut self) -> TickOutcome {
        #[cfg(feature = "defmt")]
        defmt::info!("Going to sleep in {}", self.app.id());

        self.backlight.set_level(0.0);
        if let Err(_e) = self.display.set_hidden(true) {
            #[cfg(feature = "defmt")]
            defmt::warn!("Failed to hide display: {}", _e);
        }
        self.state = RunState::Sleeping;
        TickOutcome::Suspend(self.sleep_record())
    }
}
