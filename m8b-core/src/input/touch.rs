//! Touch debounce engine
//!
//! Turns raw per-pad touch samples into press and hold transitions.
//!
//! ```text
//!            raw                      raw && elapsed > hold
//!   Idle ──────────▶ Pressed ──────────────────────────────▶ Held
//!    ▲  PRESS_START     │            HOLD_START               │
//!    │                  │ !raw                                │ !raw
//!    │◀─────────────────┘ PRESS_END                           │
//!    │◀───────────────────────────────────────────────────────┘
//!                                     HOLD_END (no PRESS_END)
//! ```
//!
//! At most one event per pad per poll; pads are polled in
//! [`Pad::ALL`] order and their events come out in the same order.

use heapless::Vec;

use crate::config::HOLD_TIME_MS;
use crate::events::{Pad, TouchAction, TouchEvent, PAD_COUNT};
use crate::traits::TouchSensor;

/// Debounce state of one pad
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PadState {
    Idle,
    Pressed,
    Held,
}

/// Per-pad debounce record
#[derive(Debug, Clone, Copy)]
pub struct TouchPad {
    pad: Pad,
    touched: bool,
    /// Time of the last Idle -> Pressed transition
    last_change_ms: u32,
    holding: bool,
}

impl TouchPad {
    pub const fn new(pad: Pad) -> Self {
        Self {
            pad,
            touched: false,
            last_change_ms: 0,
            holding: false,
        }
    }

    pub fn pad(&self) -> Pad {
        self.pad
    }

    pub fn state(&self) -> PadState {
        match (self.touched, self.holding) {
            (false, _) => PadState::Idle,
            (true, false) => PadState::Pressed,
            (true, true) => PadState::Held,
        }
    }

    /// Feed one raw sample and return the transition it caused, if any
    pub fn step(&mut self, raw: bool, now_ms: u32, hold_time_ms: u32) -> Option<TouchAction> {
        match self.state() {
            PadState::Idle if raw => {
                self.touched = true;
                self.last_change_ms = now_ms;
                Some(TouchAction::PressStart)
            }
            PadState::Pressed if !raw => {
                self.touched = false;
                Some(TouchAction::PressEnd)
            }
            PadState::Pressed if now_ms.wrapping_sub(self.last_change_ms) > hold_time_ms => {
                self.holding = true;
                Some(TouchAction::HoldStart)
            }
            PadState::Held if !raw => {
                self.touched = false;
                self.holding = false;
                Some(TouchAction::HoldEnd)
            }
            _ => None,
        }
    }
}

/// Debounce engine covering every pad on the badge
#[derive(Debug, Clone)]
pub struct TouchEngine {
    pads: [TouchPad; PAD_COUNT],
    hold_time_ms: u32,
}

impl Default for TouchEngine {
    fn default() -> Self {
        Self::new(HOLD_TIME_MS)
    }
}

impl TouchEngine {
    pub fn new(hold_time_ms: u32) -> Self {
        Self {
            pads: Pad::ALL.map(TouchPad::new),
            hold_time_ms,
        }
    }

    /// Sample every pad once and collect the resulting events
    pub fn poll<S: TouchSensor>(&mut self, sensor: &mut S, now_ms: u32) -> Vec<TouchEvent, PAD_COUNT> {
        let mut events = Vec::new();
        for pad in self.pads.iter_mut() {
            let raw = sensor.is_touched(pad.pad);
            if let Some(action) = pad.step(raw, now_ms, self.hold_time_ms) {
                // One event per pad, so this never overflows
                let _ = events.push(TouchEvent::new(action, pad.pad));
            }
        }
        events
    }

    pub fn state(&self, pad: Pad) -> PadState {
        self.pads
            .iter()
            .find(|p| p.pad == pad)
            .map(TouchPad::state)
            .unwrap_or(PadState::Idle)
    }
}
