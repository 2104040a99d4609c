//! Runtime task
//!
//! Owns the scheduler and ticks it at a fixed rate. When the scheduler
//! suspends, the boot record for the next wake is written to the watchdog
//! scratch registers and the task parks until the shake switch fires,
//! then resets the chip so the next boot resumes the saved app.

use cortex_m::peripheral::SCB;
use defmt::*;
use embassy_time::{Duration, Instant, Ticker};

use m8b_core::persist;
use m8b_core::scheduler::{Runtime, TickOutcome};
use m8b_hal_rp2040::WatchdogScratch;

use crate::board::{Badge, TICK_INTERVAL_MS};
use crate::channels::SHAKE_EDGE;

#[embassy_executor::task]
pub async fn runtime_task(mut runtime: Runtime<Badge>, mut scratch: WatchdogScratch) {
    info!("Runtime task started");

    let mut ticker = Ticker::every(Duration::from_millis(TICK_INTERVAL_MS));

    let record = loop {
        ticker.next().await;

        let now_ms = Instant::now().as_millis() as u32;
        if let TickOutcome::Suspend(record) = runtime.tick(now_ms) {
            break record;
        }
    };

    let next_boot = record.on_wake();
    match persist::store(&mut scratch, &next_boot) {
        Ok(()) => info!("Sleeping, will wake into {}", next_boot.mode),
        Err(e) => error!("Failed to store boot record: {}", e),
    }

    SHAKE_EDGE.reset();
    SHAKE_EDGE.wait().await;

    info!("Shake detected, waking");
    SCB::sys_reset();
}
