//! Weather card: display-ready strings derived from a [`WeatherSnapshot`].

use chrono::{FixedOffset, Local, Offset};
use serde::Serialize;

use crate::{
    config::{DisplayConfig, TemperatureUnit},
    format::{
        celsius_to_fahrenheit, format_time, format_visibility, icon_url, weather_advice,
        wind_direction,
    },
    model::{Condition, WeatherSnapshot},
};

/// Card styling chosen from the primary condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CardTheme {
    SunnyDay,
    ClearNight,
    Cloudy,
    Rainy,
    Snowy,
    Stormy,
    Misty,
    Default,
}

impl CardTheme {
    /// First matching keyword in the condition category wins.
    pub fn for_condition(condition: &Condition) -> Self {
        let category = condition.category.to_lowercase();
        if category.contains("clear") {
            if condition.is_daytime() { Self::SunnyDay } else { Self::ClearNight }
        } else if category.contains("cloud") {
            Self::Cloudy
        } else if category.contains("rain") {
            Self::Rainy
        } else if category.contains("snow") {
            Self::Snowy
        } else if category.contains("thunderstorm") {
            Self::Stormy
        } else if category.contains("mist") || category.contains("fog") {
            Self::Misty
        } else {
            Self::Default
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemperatureRange {
    pub low: String,
    pub high: String,
}

/// Extra rows shown when the card is expanded.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct CardDetails {
    pub visibility: Option<String>,
    pub wind_direction: Option<String>,
    pub sunrise: Option<String>,
    pub sunset: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeatherCard {
    pub title: String,
    pub country: Option<String>,
    pub theme: CardTheme,
    pub icon_url: String,
    pub description: String,
    pub temperature: String,
    pub feels_like: String,
    pub humidity: String,
    pub wind_speed: String,
    pub wind_compass: Option<&'static str>,
    pub pressure: String,
    pub range: Option<TemperatureRange>,
    pub advice: Vec<&'static str>,
    pub details: CardDetails,
}

impl WeatherCard {
    pub fn build(snapshot: &WeatherSnapshot, display: &DisplayConfig) -> Self {
        let degrees = |celsius: f64| format_degrees(celsius, display.temperature_unit);

        let (theme, icon, description, category) = match snapshot.primary_condition() {
            Some(c) => (
                CardTheme::for_condition(c),
                icon_url(&c.icon),
                c.description.clone(),
                c.category.as_str(),
            ),
            None => (CardTheme::Default, String::new(), String::new(), ""),
        };

        let range = match (snapshot.temperature.min, snapshot.temperature.max) {
            (Some(low), Some(high)) => Some(TemperatureRange {
                low: degrees(low),
                high: degrees(high),
            }),
            _ => None,
        };

        let pressure = snapshot
            .pressure_hpa
            .filter(|p| *p != 0.0)
            .map_or_else(|| "N/A".to_string(), |p| format!("{p} hPa"));

        let offset = snapshot.utc_offset().unwrap_or_else(local_offset);
        let (sunrise, sunset) = match snapshot.sun {
            Some(sun) => (
                Some(format_time(sun.sunrise, display.clock, &offset)),
                Some(format_time(sun.sunset, display.clock, &offset)),
            ),
            None => (None, None),
        };

        let deg = snapshot.wind.direction_deg;

        WeatherCard {
            title: snapshot.location_name.clone(),
            country: snapshot.country.clone(),
            theme,
            icon_url: icon,
            description,
            temperature: degrees(snapshot.temperature.current),
            feels_like: format!("Feels like {}", degrees(snapshot.temperature.feels_like)),
            humidity: format!("{}%", snapshot.humidity_pct),
            wind_speed: format!("{} m/s", snapshot.wind.speed_mps),
            wind_compass: deg.map(wind_direction),
            pressure,
            range,
            advice: weather_advice(
                snapshot.temperature.current,
                category,
                snapshot.wind.speed_mps,
            ),
            details: CardDetails {
                visibility: snapshot.visibility_m.map(format_visibility),
                wind_direction: deg.map(|d| format!("{} ({d}°)", wind_direction(d))),
                sunrise,
                sunset,
            },
        }
    }
}

fn format_degrees(celsius: f64, unit: TemperatureUnit) -> String {
    match unit {
        // `+ 0.0` turns a rounded -0 into 0
        TemperatureUnit::Celsius => format!("{}°C", celsius.round() + 0.0),
        TemperatureUnit::Fahrenheit => {
            format!("{}°F", celsius_to_fahrenheit(celsius).round() + 0.0)
        }
    }
}

fn local_offset() -> FixedOffset {
    Local::now().offset().fix()
}
