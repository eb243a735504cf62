use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;

use crate::{
    SearchError,
    model::{Condition, SunEvents, Temperatures, WeatherSnapshot, Wind},
};

use super::WeatherProvider;

const REQUEST_TIMEOUT_SECS: u64 = 10;
const UNITS: &str = "metric";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    base_url: String,
    api_key: Option<String>,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(base_url: String, api_key: Option<String>) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            http,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/weather", self.base_url)
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
    pressure: Option<f64>,
    temp_min: Option<f64>,
    temp_max: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
    deg: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    country: Option<String>,
    sunrise: Option<i64>,
    sunset: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    country: Option<String>,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
    visibility: Option<f64>,
    sys: Option<OwSys>,
    dt: Option<i64>,
    timezone: Option<i32>,
}

impl OwCurrentResponse {
    fn into_snapshot(self) -> Result<WeatherSnapshot, SearchError> {
        if self.weather.is_empty() {
            return Err(SearchError::service("Weather response contained no conditions"));
        }

        let (sys_country, sun) = match self.sys {
            Some(sys) => {
                let sun = match (sys.sunrise, sys.sunset) {
                    (Some(sunrise), Some(sunset)) => Some(SunEvents { sunrise, sunset }),
                    _ => None,
                };
                (sys.country, sun)
            }
            None => (None, None),
        };

        let conditions = self
            .weather
            .into_iter()
            .map(|w| Condition {
                category: w.main,
                description: w.description,
                icon: w.icon,
            })
            .collect();

        Ok(WeatherSnapshot {
            location_name: self.name,
            country: sys_country.or(self.country),
            temperature: Temperatures {
                current: self.main.temp,
                feels_like: self.main.feels_like,
                min: self.main.temp_min,
                max: self.main.temp_max,
            },
            humidity_pct: self.main.humidity,
            pressure_hpa: self.main.pressure,
            conditions,
            wind: Wind {
                speed_mps: self.wind.speed,
                direction_deg: self.wind.deg,
            },
            visibility_m: self.visibility,
            sun,
            utc_offset_secs: self.timezone,
            observed_at: self.dt.and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0)),
        })
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current_weather(&self, city: &str) -> Result<WeatherSnapshot, SearchError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(SearchError::Configuration);
        };

        tracing::debug!(city, url = %self.endpoint(), "Requesting current weather");

        let res = self
            .http
            .get(self.endpoint())
            .query(&[("q", city), ("appid", api_key), ("units", UNITS)])
            .send()
            .await?;

        let status = res.status();
        if status == StatusCode::NOT_FOUND {
            return Err(SearchError::CityNotFound);
        }
        if !status.is_success() {
            tracing::debug!(%status, "OpenWeather request failed");
            return Err(SearchError::bad_status());
        }

        let body = res.text().await?;
        let parsed: OwCurrentResponse =
            serde_json::from_str(&body).map_err(|err| SearchError::service(err.to_string()))?;

        parsed.into_snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PARIS: &str = r#"{
        "coord": {"lon": 2.35, "lat": 48.85},
        "weather": [{"id": 500, "main": "Rain", "description": "light rain", "icon": "10d"}],
        "main": {"temp": 12.3, "feels_like": 11.1, "temp_min": 10.0, "temp_max": 14.2,
                 "pressure": 1012, "humidity": 81},
        "visibility": 10000,
        "wind": {"speed": 4.1, "deg": 230},
        "dt": 1704135900,
        "sys": {"country": "FR", "sunrise": 1704094000, "sunset": 1704124000},
        "timezone": 3600,
        "name": "Paris"
    }"#;

    fn parse(json: &str) -> Result<WeatherSnapshot, SearchError> {
        let parsed: OwCurrentResponse = serde_json::from_str(json).expect("valid json");
        parsed.into_snapshot()
    }

    #[test]
    fn normalizes_full_response() {
        let snap = parse(PARIS).unwrap();

        assert_eq!(snap.location_name, "Paris");
        assert_eq!(snap.country.as_deref(), Some("FR"));
        assert_eq!(snap.temperature.max, Some(14.2));
        assert_eq!(snap.humidity_pct, 81);
        assert_eq!(snap.pressure_hpa, Some(1012.0));
        assert_eq!(snap.conditions[0].category, "Rain");
        assert_eq!(snap.wind.direction_deg, Some(230.0));
        assert_eq!(snap.visibility_m, Some(10000.0));
        let sun = snap.sun.expect("sun events");
        assert_eq!(sun.sunrise, 1704094000);
        assert_eq!(sun.sunset, 1704124000);
        assert_eq!(snap.utc_offset_secs, Some(3600));
        assert!(snap.observed_at.is_some());
    }

    #[test]
    fn optional_sections_may_be_absent() {
        let snap = parse(
            r#"{
                "name": "Nowhere",
                "main": {"temp": 1.0, "feels_like": -2.0, "humidity": 40},
                "weather": [{"main": "Clear", "description": "clear sky", "icon": "01n"}],
                "wind": {"speed": 0.5}
            }"#,
        )
        .unwrap();

        assert_eq!(snap.country, None);
        assert_eq!(snap.pressure_hpa, None);
        assert_eq!(snap.temperature.min, None);
        assert_eq!(snap.wind.direction_deg, None);
        assert_eq!(snap.visibility_m, None);
        assert_eq!(snap.sun, None);
    }

    #[test]
    fn empty_condition_list_is_rejected() {
        let err = parse(
            r#"{
                "name": "Nowhere",
                "main": {"temp": 1.0, "feels_like": -2.0, "humidity": 40},
                "weather": [],
                "wind": {"speed": 0.5}
            }"#,
        )
        .unwrap_err();

        assert_eq!(err.to_string(), "Weather response contained no conditions");
    }

    #[test]
    fn trailing_slash_in_base_url_is_dropped() {
        let provider =
            OpenWeatherProvider::new("http://localhost:1/data/2.5/".into(), None).unwrap();
        assert_eq!(provider.endpoint(), "http://localhost:1/data/2.5/weather");
    }
}
