//! Link state
//!
//! Tracks what the phone app has told us: whether it is connected, whether
//! it is navigating, and how much live weather it has sent since it
//! connected.

pub mod events;

pub use events::LinkEvent;

/// Live status of the phone link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkStatus {
    /// Phone app connected
    pub connected: bool,
    /// Phone reports an active route
    pub navigation_active: bool,
    /// Live weather entries (current + forecast) received while connected
    pub weather_entries: u8,
}

impl LinkStatus {
    /// Disconnected, no live data
    pub const fn new() -> Self {
        Self {
            connected: false,
            navigation_active: false,
            weather_entries: 0,
        }
    }

    /// Apply the flag changes carried by an event
    pub fn apply(&mut self, event: &LinkEvent) {
        match event {
            LinkEvent::Connected => self.connected = true,
            LinkEvent::Disconnected => *self = Self::new(),
            LinkEvent::Navigation(active) => self.navigation_active = *active,
            LinkEvent::Weather {
                forecast, entries, ..
            } => {
                // Never count forecast entries that did not arrive
                let received = 1 + forecast.len() as u8;
                self.weather_entries = (*entries).min(received);
            }
            LinkEvent::Notification(_) => {}
        }
    }

    /// Check if current weather arrived over the live link
    pub const fn weather_live(&self) -> bool {
        self.weather_entries >= 1
    }

    /// Check if at least one forecast entry arrived over the live link
    pub const fn forecast_live(&self) -> bool {
        self.weather_entries >= 2
    }

    /// Navigation counts only while connected
    pub const fn navigating(&self) -> bool {
        self.connected && self.navigation_active
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weather::{ForecastEntry, WeatherSnapshot};

    fn weather(forecast: &[ForecastEntry]) -> LinkEvent {
        LinkEvent::weather(WeatherSnapshot::default(), "", forecast)
    }

    #[test]
    fn test_connect_and_navigate() {
        let mut link = LinkStatus::new();
        link.apply(&LinkEvent::Navigation(true));
        assert!(!link.navigating());

        link.apply(&LinkEvent::Connected);
        assert!(link.navigating());

        link.apply(&LinkEvent::Navigation(false));
        assert!(!link.navigating());
    }

    #[test]
    fn test_weather_entries() {
        let mut link = LinkStatus::new();
        assert!(!link.weather_live());

        link.apply(&weather(&[]));
        assert!(link.weather_live());
        assert!(!link.forecast_live());

        link.apply(&weather(&[ForecastEntry::default(); 4]));
        assert_eq!(link.weather_entries, 5);
        assert!(link.forecast_live());
    }

    #[test]
    fn test_entry_count_limited_to_received_forecast() {
        let mut link = LinkStatus::new();
        link.apply(&LinkEvent::Weather {
            current: WeatherSnapshot::default(),
            location: Default::default(),
            forecast: Default::default(),
            entries: 3,
        });
        assert_eq!(link.weather_entries, 1);
        assert!(!link.forecast_live());
    }

    #[test]
    fn test_disconnect_clears_live_data() {
        let mut link = LinkStatus::new();
        link.apply(&LinkEvent::Connected);
        link.apply(&LinkEvent::Navigation(true));
        link.apply(&weather(&[ForecastEntry::default(); 2]));

        link.apply(&LinkEvent::Disconnected);
        assert_eq!(link, LinkStatus::new());
    }
}
