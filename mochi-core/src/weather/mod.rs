//! Weather data handling

pub mod cache;
pub mod condition;
pub mod forecast;

pub use cache::{WeatherCache, WeatherSnapshot};
pub use condition::WeatherCondition;
pub use forecast::{forecast_from, Forecast, ForecastEntry};
