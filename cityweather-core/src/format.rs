//! Pure conversions from raw weather fields to display strings.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

const COMPASS_POINTS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

const ICON_BASE_URL: &str = "https://openweathermap.org/img/wn";

pub const FREEZING_ADVICE: &str = "Bundle up! It's freezing outside.";
pub const JACKET_ADVICE: &str = "Wear a warm jacket.";
pub const HEAT_ADVICE: &str = "Stay hydrated and seek shade.";
pub const RAIN_ADVICE: &str = "Don't forget your umbrella!";
pub const SNOW_ADVICE: &str = "Drive carefully and wear non-slip shoes.";
pub const WIND_ADVICE: &str = "It's quite windy - secure loose items.";
pub const DEFAULT_ADVICE: &str = "Perfect weather to go outside!";

/// 12-hour ("07:05 AM") or 24-hour ("19:05") clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ClockFormat {
    #[default]
    #[serde(rename = "12h")]
    TwelveHour,
    #[serde(rename = "24h")]
    TwentyFourHour,
}

pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

/// 16-point compass label for a bearing in degrees.
///
/// Bearings outside `[0, 360)` are wrapped first; non-finite input maps to `N`.
pub fn wind_direction(degrees: f64) -> &'static str {
    if !degrees.is_finite() {
        return COMPASS_POINTS[0];
    }
    let sector = (degrees.rem_euclid(360.0) / 22.5).round() as usize % COMPASS_POINTS.len();
    COMPASS_POINTS[sector]
}

/// Hour and minute of a unix timestamp at the given offset.
///
/// Returns an empty string for timestamps chrono cannot represent.
pub fn format_time(timestamp: i64, clock: ClockFormat, offset: &FixedOffset) -> String {
    let Some(utc) = DateTime::from_timestamp(timestamp, 0) else {
        return String::new();
    };
    let local = utc.with_timezone(offset);
    match clock {
        ClockFormat::TwelveHour => local.format("%I:%M %p").to_string(),
        ClockFormat::TwentyFourHour => local.format("%H:%M").to_string(),
    }
}

/// Meters as kilometers with one decimal, e.g. `"1.5 km"`.
pub fn format_visibility(meters: f64) -> String {
    format!("{:.1} km", meters / 1000.0)
}

pub fn icon_url(icon: &str) -> String {
    format!("{ICON_BASE_URL}/{icon}@4x.png")
}

/// Short advisories for the given conditions. Never empty.
///
/// At most one temperature advisory and one precipitation advisory apply;
/// the wind advisory is independent of both.
pub fn weather_advice(temp_c: f64, condition: &str, wind_speed_mps: f64) -> Vec<&'static str> {
    let mut advice = Vec::new();

    if temp_c < 0.0 {
        advice.push(FREEZING_ADVICE);
    } else if temp_c < 10.0 {
        advice.push(JACKET_ADVICE);
    } else if temp_c > 30.0 {
        advice.push(HEAT_ADVICE);
    }

    let condition = condition.to_lowercase();
    if condition.contains("rain") {
        advice.push(RAIN_ADVICE);
    } else if condition.contains("snow") {
        advice.push(SNOW_ADVICE);
    }

    if wind_speed_mps > 10.0 {
        advice.push(WIND_ADVICE);
    }

    if advice.is_empty() {
        advice.push(DEFAULT_ADVICE);
    }
    advice
}
