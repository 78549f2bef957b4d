//! Main controller task
//!
//! Owns the display controller. Applies link events as they arrive and, on
//! every tick, selects the face and presents it when a redraw is due.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_rp::gpio::Output;
use embassy_time::Delay;
use mochi_core::traits::Clock;
use mochi_core::Controller;

use crate::channels::LINK_EVENTS;
use crate::display::{EmbassyClock, StatusLed, TraceRenderer};
use crate::tasks::tick::TICK_SIGNAL;

/// Controller task - main coordination loop
#[embassy_executor::task]
pub async fn controller_task(controller: &'static mut Controller, led: Output<'static>) {
    info!("Controller task started");

    let clock = EmbassyClock;
    let mut renderer = TraceRenderer::new();
    let mut led = StatusLed::new(led);
    // Blocking delay: the dim transition is a short busy-wait
    let mut delay = Delay;

    loop {
        match select(LINK_EVENTS.receive(), TICK_SIGNAL.wait()).await {
            Either::First(event) => {
                let now = clock.now_ms();
                debug!("Link event: {}", event.name());

                if let Some(dropped) = controller.handle_event(event, now) {
                    warn!(
                        "Notification queue full, dropped oldest from {}",
                        dropped.app_label()
                    );
                }
                led.show_connection(controller.link().connected);
            }

            Either::Second(now_ms) => {
                let before = controller.scheduler().current();
                let decision = controller.tick(now_ms);
                if decision.face_changed {
                    info!("Face: {:?} -> {:?}", before, decision.face);
                }

                if let Err(e) = controller.present(&decision, now_ms, &mut renderer, &mut delay) {
                    match e {}
                }
            }
        }
    }
}
