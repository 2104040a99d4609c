//! Board-agnostic core of the Magic 8 Badge runtime
//!
//! Everything here runs on the host as well as on the badge:
//!
//! - Event types and the touch, shake and charger event sources
//! - Backlight ramp controller
//! - The apps (menu, magic 8 ball, testers) and their scenes
//! - The scheduler that ties sources, apps, drawing and sleep together
//! - Compiled-in configuration and the boot record kept across sleep
//!
//! Hardware is reached only through the traits in [`traits`] and
//! [`m8b_hal`].

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod apps;
pub mod backlight;
pub mod config;
pub mod events;
pub mod input;
pub mod persist;
pub mod rng;
pub mod scene;
pub mod scheduler;
pub mod traits;

#[cfg(test)]
pub(crate) mod testing;
