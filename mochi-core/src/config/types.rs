//! Configuration type definitions
//!
//! Everything here is fixed at build/init time. Defaults match the
//! stock device: every face enabled, a 20 s clock dwell, 10 s for the
//! weather faces and one hour of cached weather.

use crate::face::{Face, FaceSet};
use crate::Millis;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Notification queue capacity
pub const MAX_NOTIFICATIONS: usize = 4;

/// Maximum app name length (bytes)
pub const MAX_APP_LEN: usize = 24;

/// Maximum notification title length (bytes)
pub const MAX_TITLE_LEN: usize = 48;

/// Maximum notification message length (bytes)
pub const MAX_MESSAGE_LEN: usize = 160;

/// Maximum city name length (bytes)
pub const MAX_CITY_LEN: usize = 32;

/// Forecast entries kept beyond current weather
pub const MAX_FORECAST_ENTRIES: usize = 4;

/// Panel dim time around a face transition
pub const TRANSITION_DIM_MS: u32 = 5;

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Every face is disabled
    NoFacesEnabled,
    /// An enabled rotating face has a zero dwell time
    ZeroDwell(Face),
    /// Notification display time is zero
    ZeroDisplayTime,
    /// Navigation display time must be shorter than the normal one
    NavigationTimeoutTooLong,
    /// Weather cache lifetime is zero
    ZeroCacheAge,
    /// Marquee step interval is zero
    ZeroScrollStep,
    /// Marquee window is zero characters wide
    ZeroVisibleChars,
}

/// Dwell duration for each rotating face
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DwellTimes {
    pub time_ms: Millis,
    pub weather_ms: Millis,
    pub forecast_ms: Millis,
}

impl Default for DwellTimes {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl DwellTimes {
    pub const DEFAULT: Self = Self {
        time_ms: 20_000,
        weather_ms: 10_000,
        forecast_ms: 10_000,
    };

    /// Dwell for a face, or `None` for faces outside the rotation
    pub const fn get(&self, face: Face) -> Option<Millis> {
        match face {
            Face::Time => Some(self.time_ms),
            Face::Weather => Some(self.weather_ms),
            Face::Forecast => Some(self.forecast_ms),
            Face::Notification | Face::Navigation => None,
        }
    }
}

/// Which faces are enabled and how long the rotating ones stay up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FaceConfig {
    pub enabled: FaceSet,
    pub dwell: DwellTimes,
}

impl FaceConfig {
    /// Create a face config with default dwell times
    pub const fn new(enabled: FaceSet) -> Self {
        Self {
            enabled,
            dwell: DwellTimes::DEFAULT,
        }
    }

    /// Check if a face is enabled
    pub const fn is_enabled(&self, face: Face) -> bool {
        self.enabled.contains(face)
    }

    /// Dwell time for a face (rotating faces only)
    pub const fn dwell(&self, face: Face) -> Option<Millis> {
        self.dwell.get(face)
    }
}

/// Notification display timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NotificationTiming {
    /// Time each notification stays up
    pub display_ms: Millis,
    /// Shorter display time while navigation is active
    pub navigation_display_ms: Millis,
}

impl Default for NotificationTiming {
    fn default() -> Self {
        Self {
            display_ms: 6_000,
            navigation_display_ms: 3_000,
        }
    }
}

impl NotificationTiming {
    /// Display timeout for the current navigation context
    pub const fn timeout(&self, navigation_active: bool) -> Millis {
        if navigation_active {
            self.navigation_display_ms
        } else {
            self.display_ms
        }
    }
}

/// Weather cache lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WeatherCacheConfig {
    /// Maximum age of cached weather (exclusive)
    pub max_age_ms: Millis,
}

impl Default for WeatherCacheConfig {
    fn default() -> Self {
        Self {
            max_age_ms: 3_600_000,
        }
    }
}

/// City name marquee timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScrollTiming {
    /// Time between one-column steps
    pub step_ms: Millis,
    /// Pause at the start and at the end of the text
    pub pause_ms: Millis,
    /// Visible width in characters
    pub visible_chars: u8,
}

impl Default for ScrollTiming {
    fn default() -> Self {
        Self {
            step_ms: 300,
            pause_ms: 2_000,
            visible_chars: 20,
        }
    }
}

/// Periodic refresh for faces with live content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RedrawIntervals {
    /// Clock face refresh (seconds counter)
    pub time_ms: Millis,
    /// Navigation face refresh (ETA, distance)
    pub navigation_ms: Millis,
}

impl Default for RedrawIntervals {
    fn default() -> Self {
        Self {
            time_ms: 1_000,
            navigation_ms: 500,
        }
    }
}

impl RedrawIntervals {
    /// Refresh interval for a face, or `None` for static faces
    pub const fn get(&self, face: Face) -> Option<Millis> {
        match face {
            Face::Time => Some(self.time_ms),
            Face::Navigation => Some(self.navigation_ms),
            _ => None,
        }
    }
}

/// Complete display configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplayConfig {
    pub faces: FaceConfig,
    pub notifications: NotificationTiming,
    pub weather: WeatherCacheConfig,
    pub scroll: ScrollTiming,
    pub redraw: RedrawIntervals,
}

impl DisplayConfig {
    /// Check the configuration for values the scheduler cannot honour
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.faces.enabled.is_empty() {
            return Err(ConfigError::NoFacesEnabled);
        }

        for face in Face::CYCLE {
            if self.faces.is_enabled(face) && self.faces.dwell(face) == Some(0) {
                return Err(ConfigError::ZeroDwell(face));
            }
        }

        if self.notifications.display_ms == 0 {
            return Err(ConfigError::ZeroDisplayTime);
        }
        if self.notifications.navigation_display_ms >= self.notifications.display_ms {
            return Err(ConfigError::NavigationTimeoutTooLong);
        }

        if self.weather.max_age_ms == 0 {
            return Err(ConfigError::ZeroCacheAge);
        }

        if self.scroll.step_ms == 0 {
            return Err(ConfigError::ZeroScrollStep);
        }
        if self.scroll.visible_chars == 0 {
            return Err(ConfigError::ZeroVisibleChars);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(DisplayConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_dwell_lookup() {
        let dwell = DwellTimes::default();
        assert_eq!(dwell.get(Face::Time), Some(20_000));
        assert_eq!(dwell.get(Face::Forecast), Some(10_000));
        assert_eq!(dwell.get(Face::Notification), None);
    }

    #[test]
    fn test_notification_timeout() {
        let timing = NotificationTiming::default();
        assert_eq!(timing.timeout(false), 6_000);
        assert_eq!(timing.timeout(true), 3_000);
    }

    #[test]
    fn test_rejects_empty_face_set() {
        let mut config = DisplayConfig::default();
        config.faces.enabled = FaceSet::empty();
        assert_eq!(config.validate(), Err(ConfigError::NoFacesEnabled));
    }

    #[test]
    fn test_rejects_zero_dwell_only_when_enabled() {
        let mut config = DisplayConfig::default();
        config.faces.dwell.forecast_ms = 0;
        assert_eq!(
            config.validate(),
            Err(ConfigError::ZeroDwell(Face::Forecast))
        );

        config.faces.enabled = config.faces.enabled.without(Face::Forecast);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_rejects_navigation_timeout_not_shorter() {
        let mut config = DisplayConfig::default();
        config.notifications.navigation_display_ms = config.notifications.display_ms;
        assert_eq!(
            config.validate(),
            Err(ConfigError::NavigationTimeoutTooLong)
        );
    }

    #[test]
    fn test_scroll_defaults_and_zero_window() {
        let mut config = DisplayConfig::default();
        assert_eq!(config.scroll.visible_chars, 20);

        config.scroll.visible_chars = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroVisibleChars));
    }

    #[test]
    fn test_redraw_intervals() {
        let redraw = RedrawIntervals::default();
        assert_eq!(redraw.get(Face::Time), Some(1_000));
        assert_eq!(redraw.get(Face::Navigation), Some(500));
        assert_eq!(redraw.get(Face::Weather), None);
    }
}
