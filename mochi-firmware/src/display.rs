//! Board bindings for the core traits
//!
//! `TraceRenderer` stands in for the OLED driver: every presented face is
//! written to the defmt log with the data the panel would show.

use core::convert::Infallible;

use defmt::*;
use embassy_time::Instant;
use embedded_hal::digital::OutputPin;
use mochi_core::traits::{Clock, FaceRenderer};
use mochi_core::{Face, FaceView, Millis};

/// Milliseconds since boot from the embassy time driver
#[derive(Clone, Copy)]
pub struct EmbassyClock;

impl Clock for EmbassyClock {
    fn now_ms(&self) -> Millis {
        // Wraps after ~49 days; the core uses wrapping arithmetic
        Instant::now().as_millis() as Millis
    }
}

/// Renderer that logs each face instead of drawing it
pub struct TraceRenderer {
    dimmed: bool,
}

impl TraceRenderer {
    pub const fn new() -> Self {
        Self { dimmed: false }
    }
}

impl FaceRenderer for TraceRenderer {
    type Error = Infallible;

    fn set_dimmed(&mut self, dimmed: bool) -> Result<(), Self::Error> {
        if self.dimmed != dimmed {
            trace!("Panel {}", if dimmed { "dimmed" } else { "restored" });
        }
        self.dimmed = dimmed;
        Ok(())
    }

    fn render(&mut self, face: Face, view: &FaceView<'_>) -> Result<(), Self::Error> {
        let link = if view.link.connected { "linked" } else { "offline" };

        match face {
            Face::Time => {
                debug!("[time] uptime {}s ({})", view.now_ms / 1000, link);
            }
            Face::Weather => match view.weather {
                Some(weather) => {
                    info!(
                        "[weather] {} {}C H{} L{} {}",
                        view.city,
                        weather.temperature,
                        weather.high,
                        weather.low,
                        weather.condition().label()
                    );
                    if let Some(age) = view.weather_age_ms {
                        debug!("[weather] cached {}s ago", age / 1000);
                    }
                }
                None => info!("[weather] no data ({})", link),
            },
            Face::Forecast => {
                info!("[forecast] {} entries ({})", view.forecast.len(), link);
                for (slot, entry) in view.forecast.iter().enumerate() {
                    info!(
                        "[forecast {}] {}C H{} L{} {}",
                        slot + 1,
                        entry.temperature,
                        entry.high,
                        entry.low,
                        entry.condition().label()
                    );
                }
            }
            Face::Notification => match (view.notification, view.position) {
                (Some(item), Some((index, count))) => info!(
                    "[notification {}/{}] {}: {}",
                    index,
                    count,
                    item.app_label(),
                    item.body()
                ),
                _ => info!("[notification] none pending"),
            },
            Face::Navigation => {
                debug!("[navigation] route active ({})", link);
            }
        }

        Ok(())
    }
}

/// Status LED mirroring the phone connection
pub struct StatusLed<P> {
    pin: P,
    lit: bool,
}

impl<P: OutputPin> StatusLed<P> {
    pub fn new(pin: P) -> Self {
        Self { pin, lit: false }
    }

    /// Light the LED while connected; ignores pin errors
    pub fn show_connection(&mut self, connected: bool) {
        if connected == self.lit {
            return;
        }
        let result = if connected {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        if result.is_ok() {
            self.lit = connected;
        } else {
            warn!("Status LED update failed");
        }
    }
}
