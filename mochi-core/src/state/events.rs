//! Events delivered by the wireless link

use heapless::String;

use crate::config::MAX_CITY_LEN;
use crate::notification::NotificationItem;
use crate::truncated;
use crate::weather::{forecast_from, Forecast, ForecastEntry, WeatherSnapshot};

/// Something the phone app (or the link layer) reported
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkEvent {
    /// Phone app connected
    Connected,
    /// Phone app disconnected
    Disconnected,
    /// Navigation started (`true`) or ended (`false`)
    Navigation(bool),
    /// New weather data
    Weather {
        /// Current conditions
        current: WeatherSnapshot,
        /// City name from the phone's location, empty if unknown
        location: String<MAX_CITY_LEN>,
        /// Forecast entries following current weather
        forecast: Forecast,
        /// Number of entries in the update (current + forecast)
        entries: u8,
    },
    /// New notification
    Notification(NotificationItem),
}

impl LinkEvent {
    /// Weather update with current conditions and up to four forecast entries
    pub fn weather(current: WeatherSnapshot, location: &str, forecast: &[ForecastEntry]) -> Self {
        let forecast = forecast_from(forecast);
        // At most MAX_FORECAST_ENTRIES + 1
        let entries = 1 + forecast.len() as u8;
        LinkEvent::Weather {
            current,
            location: truncated(location),
            forecast,
            entries,
        }
    }

    /// Short name for logging
    pub const fn name(&self) -> &'static str {
        match self {
            LinkEvent::Connected => "connected",
            LinkEvent::Disconnected => "disconnected",
            LinkEvent::Navigation(_) => "navigation",
            LinkEvent::Weather { .. } => "weather",
            LinkEvent::Notification(_) => "notification",
        }
    }
}
