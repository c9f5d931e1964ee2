use serde::{Deserialize, Serialize};

/// Message rendered for every failed lookup, whatever the cause.
pub const GENERIC_ERROR_MESSAGE: &str = "Error fetching weather data. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WeatherQuery {
    pub city: String,
}

impl WeatherQuery {
    pub fn new(city: impl Into<String>) -> Self {
        Self { city: city.into() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// Presentation-ready view of a successful provider response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherResult {
    pub city: String,
    pub country: String,
    /// Degrees Celsius, rounded.
    pub temperature: i64,
    /// Degrees Celsius, rounded.
    pub feels_like: i64,
    pub description: String,
    pub icon: String,
    /// Relative humidity in percent.
    pub humidity: u8,
    pub wind: f64,
    pub pressure: f64,
    /// Local time of day, e.g. `6:42:13 AM`.
    pub sunrise: String,
    pub sunset: String,
    pub coordinates: Coordinates,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResult {
    pub message: String,
}

impl ErrorResult {
    pub fn generic() -> Self {
        Self { message: GENERIC_ERROR_MESSAGE.to_string() }
    }
}

/// State rendered by the single weather page.
///
/// At most one of `weather` and `error` is populated.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WeatherView {
    pub weather: Option<WeatherResult>,
    pub error: Option<ErrorResult>,
}

impl WeatherView {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn success(result: WeatherResult) -> Self {
        Self { weather: Some(result), error: None }
    }

    pub fn failure(error: ErrorResult) -> Self {
        Self { weather: None, error: Some(error) }
    }
}
