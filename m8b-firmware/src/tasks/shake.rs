//! Shake switch task
//!
//! The ball switch bounces open and closed while the badge is shaken.
//! Every falling edge counts as one pulse.

use defmt::*;
use embassy_rp::gpio::Input;
use portable_atomic::Ordering;

use crate::channels::{SHAKE_EDGE, SHAKE_PULSES};

#[embassy_executor::task]
pub async fn shake_task(mut pin: Input<'static>) {
    info!("Shake task started");

    loop {
        pin.wait_for_falling_edge().await;
        SHAKE_PULSES.fetch_add(1, Ordering::Relaxed);
        SHAKE_EDGE.signal(());
        trace!("Shake pulse");
    }
}
