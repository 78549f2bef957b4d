//! Tick task for time-based updates
//!
//! Drives the control loop: notification expiry, face rotation and
//! periodic redraws are all evaluated on these ticks.

use defmt::*;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Ticker};
use mochi_core::traits::Clock;

use crate::display::EmbassyClock;

/// Tick interval in milliseconds
pub const TICK_INTERVAL_MS: u32 = 100;

/// Signal to notify controller of tick
pub static TICK_SIGNAL: Signal<CriticalSectionRawMutex, u32> = Signal::new();

/// Tick task - sends periodic tick signals with timestamp
#[embassy_executor::task]
pub async fn tick_task() {
    info!("Tick task started");

    let clock = EmbassyClock;
    let mut ticker = Ticker::every(Duration::from_millis(TICK_INTERVAL_MS as u64));

    loop {
        ticker.next().await;
        TICK_SIGNAL.signal(clock.now_ms());
    }
}
