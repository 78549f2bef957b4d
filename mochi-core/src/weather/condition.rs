//! Weather condition classification
//!
//! The phone app reports conditions as small icon codes (0-9). Some
//! providers pass OpenWeatherMap condition ids through unchanged, so those
//! ranges are recognised as well.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Coarse weather condition used to pick an icon and a label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum WeatherCondition {
    Clear,
    Sunny,
    Cloudy,
    Rain,
    Storm,
    Snow,
    Fog,
    Drizzle,
}

impl WeatherCondition {
    /// Classify an icon code
    pub const fn from_icon(icon: u16) -> Self {
        use WeatherCondition::*;

        match icon {
            0 => Clear,
            1 => Sunny,
            2 | 9 => Cloudy,
            3 | 4 => Rain,
            5 => Storm,
            6 => Snow,
            7 => Fog,
            8 => Drizzle,
            // OpenWeatherMap condition ids
            200..=299 => Storm,
            300..=399 => Drizzle,
            500..=599 => Rain,
            600..=699 => Snow,
            700..=799 => Fog,
            800 => Clear,
            801 => Sunny,
            _ => Cloudy,
        }
    }

    /// Short label for the weather face
    pub const fn label(self) -> &'static str {
        match self {
            WeatherCondition::Clear => "Clear",
            WeatherCondition::Sunny => "Sunny",
            WeatherCondition::Cloudy => "Cloudy",
            WeatherCondition::Rain => "Rain",
            WeatherCondition::Storm => "Storm",
            WeatherCondition::Snow => "Snow",
            WeatherCondition::Fog => "Fog",
            WeatherCondition::Drizzle => "Drizzle",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_icon_codes() {
        assert_eq!(WeatherCondition::from_icon(0), WeatherCondition::Clear);
        assert_eq!(WeatherCondition::from_icon(4), WeatherCondition::Rain);
        assert_eq!(WeatherCondition::from_icon(9), WeatherCondition::Cloudy);
    }

    #[test]
    fn test_openweathermap_ranges() {
        assert_eq!(WeatherCondition::from_icon(211), WeatherCondition::Storm);
        assert_eq!(WeatherCondition::from_icon(310), WeatherCondition::Drizzle);
        assert_eq!(WeatherCondition::from_icon(502), WeatherCondition::Rain);
        assert_eq!(WeatherCondition::from_icon(601), WeatherCondition::Snow);
        assert_eq!(WeatherCondition::from_icon(741), WeatherCondition::Fog);
        assert_eq!(WeatherCondition::from_icon(800), WeatherCondition::Clear);
        assert_eq!(WeatherCondition::from_icon(801), WeatherCondition::Sunny);
        assert_eq!(WeatherCondition::from_icon(804), WeatherCondition::Cloudy);
    }

    #[test]
    fn test_unknown_codes_are_cloudy() {
        assert_eq!(WeatherCondition::from_icon(42), WeatherCondition::Cloudy);
        assert_eq!(WeatherCondition::from_icon(450), WeatherCondition::Cloudy);
        assert_eq!(WeatherCondition::Cloudy.label(), "Cloudy");
    }
}
