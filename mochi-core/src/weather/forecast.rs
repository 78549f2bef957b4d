//! Forecast entries
//!
//! The phone sends current weather followed by up to
//! [`MAX_FORECAST_ENTRIES`] forecast entries. Only the numbers the
//! forecast face draws are kept.

use heapless::Vec;

use super::condition::WeatherCondition;
use crate::config::MAX_FORECAST_ENTRIES;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Forecast entries in the order the phone sent them
pub type Forecast = Vec<ForecastEntry, MAX_FORECAST_ENTRIES>;

/// One forecast period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ForecastEntry {
    /// Expected temperature (°C)
    pub temperature: i16,
    /// High (°C)
    pub high: i16,
    /// Low (°C)
    pub low: i16,
    /// Provider icon code
    pub icon: u16,
}

impl ForecastEntry {
    pub const fn new(temperature: i16, high: i16, low: i16, icon: u16) -> Self {
        Self {
            temperature,
            high,
            low,
            icon,
        }
    }

    /// Coarse condition for the icon code
    pub const fn condition(&self) -> WeatherCondition {
        WeatherCondition::from_icon(self.icon)
    }
}

/// Copy the first [`MAX_FORECAST_ENTRIES`] entries into a bounded list
pub fn forecast_from(entries: &[ForecastEntry]) -> Forecast {
    entries.iter().copied().take(MAX_FORECAST_ENTRIES).collect()
}
