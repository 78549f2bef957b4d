//! Mochi - Companion Display Firmware
//!
//! Main firmware binary for the RP2040-based Mochi display. The phone app
//! feeds time, weather, notifications and navigation over the wireless
//! link; the core in `mochi-core` decides which face is on screen.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Level, Output};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use mochi_core::config::{parse_config, DisplayConfig};
use mochi_core::Controller;

mod channels;
mod display;
mod tasks;

/// Name advertised to the phone app
pub const DEVICE_NAME: &str = "Mochi-Display";

/// Embedded configuration (compiled into firmware)
/// Edit display.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../display.toml");

// Lives for the whole program; the controller task borrows it mutably
static CONTROLLER: StaticCell<Controller> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("{} firmware starting...", DEVICE_NAME);

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = load_config();
    let controller = CONTROLLER.init(Controller::new(config));
    info!("Controller initialized");

    // On-board LED shows the phone connection
    let led = Output::new(p.PIN_25, Level::Low);

    spawner.spawn(tasks::tick_task()).unwrap();
    spawner.spawn(tasks::controller_task(controller, led)).unwrap();

    info!("All tasks spawned, firmware running");
}

/// Parse the embedded configuration, falling back to defaults
fn load_config() -> DisplayConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Parsed embedded configuration successfully");
            config
        }
        Err(e) => {
            error!(
                "Embedded configuration invalid (line {}): {:?}, using defaults",
                e.line, e.kind
            );
            DisplayConfig::default()
        }
    }
}
