//! Weather snapshot cache
//!
//! Keeps the last live weather reading so the weather face can still be
//! shown while the phone is out of range. The snapshot ages out as a whole
//! once it is older than the configured lifetime.

use heapless::String;

use super::condition::WeatherCondition;
use crate::config::{WeatherCacheConfig, MAX_CITY_LEN};
use crate::{elapsed, truncated, Millis};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Current weather as reported by the phone app
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WeatherSnapshot {
    /// Current temperature (°C)
    pub temperature: i16,
    /// Forecast high (°C)
    pub high: i16,
    /// Forecast low (°C)
    pub low: i16,
    /// Provider icon code
    pub icon: u16,
    /// City name
    pub city: String<MAX_CITY_LEN>,
}

impl WeatherSnapshot {
    /// Create a snapshot; a city name longer than the buffer is truncated
    pub fn new(temperature: i16, high: i16, low: i16, icon: u16, city: &str) -> Self {
        Self {
            temperature,
            high,
            low,
            icon,
            city: truncated(city),
        }
    }

    /// Prefer the phone's location name over the provider's city name
    ///
    /// An empty location keeps the provider's name.
    pub fn with_location(mut self, location: &str) -> Self {
        if !location.is_empty() {
            self.city = truncated(location);
        }
        self
    }

    /// Coarse condition for the icon code
    pub fn condition(&self) -> WeatherCondition {
        WeatherCondition::from_icon(self.icon)
    }
}

/// Single-entry cache with a staleness window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherCache {
    snapshot: WeatherSnapshot,
    valid: bool,
    captured_ms: Millis,
    max_age_ms: Millis,
}

impl WeatherCache {
    /// Create an empty cache
    pub fn new(config: WeatherCacheConfig) -> Self {
        Self {
            snapshot: WeatherSnapshot::default(),
            valid: false,
            captured_ms: 0,
            max_age_ms: config.max_age_ms,
        }
    }

    /// Replace the cached snapshot with a live reading
    pub fn update(&mut self, snapshot: WeatherSnapshot, now: Millis) {
        self.snapshot = snapshot;
        self.valid = true;
        self.captured_ms = now;
    }

    /// Check if weather can be shown, live or from the cache
    pub fn has_data(&self, live_available: bool, now: Millis) -> bool {
        live_available || self.is_fresh(now)
    }

    /// Cached snapshot, or `None` once it is missing or too old
    pub fn get_cached(&self, now: Millis) -> Option<&WeatherSnapshot> {
        if self.is_fresh(now) {
            Some(&self.snapshot)
        } else {
            None
        }
    }

    /// Last stored snapshot regardless of age
    ///
    /// Used while live data is available, since the cache always mirrors
    /// the latest live reading.
    pub fn latest(&self) -> Option<&WeatherSnapshot> {
        self.valid.then_some(&self.snapshot)
    }

    /// Age of the cached snapshot
    pub fn age(&self, now: Millis) -> Option<Millis> {
        self.valid.then(|| elapsed(now, self.captured_ms))
    }

    fn is_fresh(&self, now: Millis) -> bool {
        self.valid && elapsed(now, self.captured_ms) < self.max_age_ms
    }
}
