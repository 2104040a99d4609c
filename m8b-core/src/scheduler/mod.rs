//! App scheduler
//!
//! Owns the event sources, the backlight and the active app, and runs
//! one cooperative iteration per [`Runtime::tick`].

pub mod board;
pub mod runtime;

pub use board::{Board, RuntimeContext};
pub use runtime::{RunState, Runtime, TickOutcome, MAX_EVENTS_PER_TICK};
