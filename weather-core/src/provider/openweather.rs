use async_trait::async_trait;
use chrono::{DateTime, Local, TimeZone};
use reqwest::Client;
use serde::Deserialize;
use std::fmt;

use crate::model::{Coordinates, WeatherQuery, WeatherResult};

use super::{ProviderError, WeatherProvider};

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";
const CURRENT_WEATHER_PATH: &str = "/data/2.5/weather";

#[derive(Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Point the provider at another host, e.g. a mock server.
    pub fn with_base_url(api_key: String, base_url: &str) -> Self {
        Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    async fn fetch_current(&self, city: &str) -> Result<OwCurrentResponse, ProviderError> {
        let url = format!("{}{}", self.base_url, CURRENT_WEATHER_PATH);

        let res = self
            .http
            .get(&url)
            .query(&[
                ("q", city),
                ("units", "metric"),
                ("appid", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(ProviderError::Rejected {
                status,
                body: truncate_body(&body),
            });
        }

        serde_json::from_str(&body).map_err(|e| ProviderError::Malformed(e.to_string()))
    }
}

impl fmt::Debug for OpenWeatherProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenWeatherProvider")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current_weather(&self, query: &WeatherQuery) -> Result<WeatherResult, ProviderError> {
        let city = query.city.trim();
        if city.is_empty() {
            return Err(ProviderError::EmptyQuery);
        }

        let parsed = self.fetch_current(city).await?;
        parsed.into_result(&Local)
    }
}

#[derive(Debug, Deserialize)]
struct OwCoord {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
    pressure: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    country: String,
    sunrise: i64,
    sunset: i64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    coord: OwCoord,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
    sys: OwSys,
}

impl OwCurrentResponse {
    fn into_result<Tz>(self, tz: &Tz) -> Result<WeatherResult, ProviderError>
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        let condition = self.weather.into_iter().next().ok_or_else(|| {
            ProviderError::Malformed("response contained no weather conditions".to_string())
        })?;

        Ok(WeatherResult {
            city: self.name,
            country: self.sys.country,
            temperature: round_half_up(self.main.temp),
            feels_like: round_half_up(self.main.feels_like),
            description: condition.description,
            icon: condition.icon,
            humidity: self.main.humidity,
            wind: self.wind.speed,
            pressure: self.main.pressure,
            sunrise: local_time_of_day(self.sys.sunrise, tz)?,
            sunset: local_time_of_day(self.sys.sunset, tz)?,
            coordinates: Coordinates {
                lat: self.coord.lat,
                lon: self.coord.lon,
            },
        })
    }
}

/// Nearest integer, halves toward positive infinity (`-2.5` becomes `-2`).
fn round_half_up(value: f64) -> i64 {
    let r = value.round();
    // f64::round sends negative halves away from zero
    if value - r == 0.5 { (r + 1.0) as i64 } else { r as i64 }
}

/// Render epoch seconds as a 12-hour time of day in `tz`, e.g. `6:42:13 AM`.
fn local_time_of_day<Tz>(ts: i64, tz: &Tz) -> Result<String, ProviderError>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let utc = DateTime::from_timestamp(ts, 0)
        .ok_or_else(|| ProviderError::Malformed(format!("timestamp {ts} is out of range")))?;

    Ok(utc.with_timezone(tz).format("%-I:%M:%S %p").to_string())
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn london_payload() -> serde_json::Value {
        serde_json::json!({
            "coord": { "lon": -0.1257, "lat": 51.5085 },
            "weather": [
                { "id": 803, "main": "Clouds", "description": "broken clouds", "icon": "04d" }
            ],
            "base": "stations",
            "main": {
                "temp": 11.52,
                "feels_like": 10.49,
                "temp_min": 10.1,
                "temp_max": 12.8,
                "pressure": 1012,
                "humidity": 78
            },
            "visibility": 10000,
            "wind": { "speed": 4.63, "deg": 240 },
            "dt": 1700000600,
            "sys": { "country": "GB", "sunrise": 1700000000, "sunset": 1700040000 },
            "timezone": 0,
            "name": "London",
            "cod": 200
        })
    }

    fn parse(payload: serde_json::Value) -> OwCurrentResponse {
        serde_json::from_value(payload).unwrap()
    }

    #[test]
    fn maps_payload_fields() {
        let result = parse(london_payload()).into_result(&Utc).unwrap();

        assert_eq!(result.city, "London");
        assert_eq!(result.country, "GB");
        assert_eq!(result.temperature, 12);
        assert_eq!(result.feels_like, 10);
        assert_eq!(result.description, "broken clouds");
        assert_eq!(result.icon, "04d");
        assert_eq!(result.humidity, 78);
        assert_eq!(result.wind, 4.63);
        assert_eq!(result.pressure, 1012.0);
        assert_eq!(result.sunrise, "10:13:20 PM");
        assert_eq!(result.sunset, "9:20:00 AM");
        assert_eq!(result.coordinates, Coordinates { lat: 51.5085, lon: -0.1257 });
    }

    #[test]
    fn times_follow_the_given_timezone() {
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        let result = parse(london_payload()).into_result(&plus_two).unwrap();

        assert_eq!(result.sunrise, "12:13:20 AM");
        assert_eq!(result.sunset, "11:20:00 AM");
    }

    #[test]
    fn rounds_halves_toward_positive_infinity() {
        assert_eq!(round_half_up(2.5), 3);
        assert_eq!(round_half_up(2.49), 2);
        assert_eq!(round_half_up(-2.5), -2);
        assert_eq!(round_half_up(-2.51), -3);
        assert_eq!(round_half_up(0.0), 0);
        assert_eq!(round_half_up(0.49999999999999994), 0);
        assert_eq!(round_half_up(-0.5), 0);
        assert_eq!(round_half_up(-0.49999999999999994), 0);
    }

    #[test]
    fn empty_weather_array_is_malformed() {
        let mut payload = london_payload();
        payload["weather"] = serde_json::json!([]);

        let err = parse(payload).into_result(&Utc).unwrap_err();
        assert!(matches!(err, ProviderError::Malformed(_)));
    }

    #[test]
    fn missing_field_fails_to_parse() {
        let mut payload = london_payload();
        payload["sys"].as_object_mut().unwrap().remove("sunset");

        assert!(serde_json::from_value::<OwCurrentResponse>(payload).is_err());
    }

    #[test]
    fn truncate_body_respects_char_boundaries() {
        let body = "é".repeat(250);
        let truncated = truncate_body(&body);
        assert_eq!(truncated.chars().count(), 203);
        assert!(truncated.ends_with("..."));
        assert_eq!(truncate_body("short"), "short");
    }

    #[test]
    fn debug_output_hides_api_key() {
        let provider = OpenWeatherProvider::new("SECRET".into());
        let debug = format!("{provider:?}");
        assert!(!debug.contains("SECRET"));
        assert!(debug.contains(DEFAULT_BASE_URL));
    }

    #[tokio::test]
    async fn sends_city_units_and_key() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .and(query_param("q", "London"))
            .and(query_param("units", "metric"))
            .and(query_param("appid", "KEY"))
            .respond_with(ResponseTemplate::new(200).set_body_json(london_payload()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let provider = OpenWeatherProvider::with_base_url("KEY".into(), &mock_server.uri());
        let result = provider
            .current_weather(&WeatherQuery::new("  London "))
            .await
            .unwrap();

        assert_eq!(result.city, "London");
        assert_eq!(result.temperature, 12);
        assert_eq!(result.sunrise, local_time_of_day(1700000000, &Local).unwrap());
    }

    #[tokio::test]
    async fn not_found_is_rejected() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
                "cod": "404",
                "message": "city not found"
            })))
            .mount(&mock_server)
            .await;

        let provider = OpenWeatherProvider::with_base_url("KEY".into(), &mock_server.uri());
        let err = provider
            .current_weather(&WeatherQuery::new("Atlantis"))
            .await
            .unwrap_err();

        match err {
            ProviderError::Rejected { status, body } => {
                assert_eq!(status.as_u16(), 404);
                assert!(body.contains("city not found"));
            }
            other => panic!("expected Rejected, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn invalid_json_is_malformed() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&mock_server)
            .await;

        let provider = OpenWeatherProvider::with_base_url("KEY".into(), &mock_server.uri());
        let err = provider
            .current_weather(&WeatherQuery::new("London"))
            .await
            .unwrap_err();

        assert!(matches!(err, ProviderError::Malformed(_)));
    }

    #[tokio::test]
    async fn empty_city_never_reaches_the_network() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(london_payload()))
            .expect(0)
            .mount(&mock_server)
            .await;

        let provider = OpenWeatherProvider::with_base_url("KEY".into(), &mock_server.uri());
        let err = provider
            .current_weather(&WeatherQuery::new("   "))
            .await
            .unwrap_err();

        assert!(matches!(err, ProviderError::EmptyQuery));
    }

    #[tokio::test]
    async fn unreachable_host_is_network_error() {
        let provider = OpenWeatherProvider::with_base_url("KEY".into(), "http://127.0.0.1:1");
        let err = provider
            .current_weather(&WeatherQuery::new("London"))
            .await
            .unwrap_err();

        assert!(matches!(err, ProviderError::Network(_)));
    }

    #[tokio::test]
    async fn network_error_text_omits_api_key() {
        let provider =
            OpenWeatherProvider::with_base_url("SECRET_KEY".into(), "http://127.0.0.1:1");
        let err = provider
            .current_weather(&WeatherQuery::new("London"))
            .await
            .unwrap_err();

        assert!(!err.to_string().contains("SECRET_KEY"));
        assert!(!format!("{err:?}").contains("SECRET_KEY"));
    }
}
