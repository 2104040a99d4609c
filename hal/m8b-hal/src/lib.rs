//! Magic 8 Badge Hardware Abstraction Layer
//!
//! Traits that sit between the board-agnostic runtime and the chip
//! support crate. The core and driver crates only ever see these traits,
//! which keeps them testable on the host.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  m8b-firmware (embassy tasks, wiring)   │
//! └─────────────────────────────────────────┘
//!            │                    │
//!            ▼                    ▼
//! ┌──────────────────┐  ┌──────────────────┐
//! │ m8b-core         │  │ m8b-drivers      │
//! └──────────────────┘  └──────────────────┘
//!            │                    │
//!            └─────────┬──────────┘
//!                      ▼
//! ┌─────────────────────────────────────────┐
//! │  m8b-hal (this crate - traits)          │
//! └─────────────────────────────────────────┘
//!                      │
//!                      ▼
//!             ┌─────────────────┐
//!             │ m8b-hal-rp2040  │
//!             └─────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::InputPin`] - Digital inputs (charger status lines)
//! - [`i2c::I2cBus`] - I2C master operations
//! - [`bus::SharedBus`] - Exclusive acquire/release around a bus
//! - [`scratch::ScratchStorage`] - Words that survive a reset

#![no_std]
#![deny(unsafe_code)]

pub mod bus;
pub mod gpio;
pub mod i2c;
pub mod scratch;

pub use bus::{BusBusy, BusGuard, SharedBus};
pub use gpio::{ActiveLow, InputPin};
pub use i2c::I2cBus;
pub use scratch::{ScratchSlot, ScratchStorage};
