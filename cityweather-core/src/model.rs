use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

/// Temperatures in degrees Celsius.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Temperatures {
    pub current: f64,
    pub feels_like: f64,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// One weather condition descriptor, e.g. `Rain` / "light rain" / `10d`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    pub category: String,
    pub description: String,
    pub icon: String,
}

impl Condition {
    /// Icon codes end in `d` for daytime and `n` for night.
    pub fn is_daytime(&self) -> bool {
        self.icon.contains('d')
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wind {
    pub speed_mps: f64,
    pub direction_deg: Option<f64>,
}

/// Sunrise and sunset as unix epoch seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SunEvents {
    pub sunrise: i64,
    pub sunset: i64,
}

/// Current conditions for one location, normalized from a provider response.
///
/// A snapshot is never patched: every successful search replaces it wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub location_name: String,
    pub country: Option<String>,
    pub temperature: Temperatures,
    pub humidity_pct: u8,
    pub pressure_hpa: Option<f64>,
    /// The first entry is the primary condition. Providers reject empty lists.
    pub conditions: Vec<Condition>,
    pub wind: Wind,
    pub visibility_m: Option<f64>,
    pub sun: Option<SunEvents>,
    /// Shift from UTC of the location, in seconds.
    pub utc_offset_secs: Option<i32>,
    pub observed_at: Option<DateTime<Utc>>,
}

impl WeatherSnapshot {
    pub fn primary_condition(&self) -> Option<&Condition> {
        self.conditions.first()
    }

    /// The location's own offset, when the provider reported a valid one.
    pub fn utc_offset(&self) -> Option<FixedOffset> {
        self.utc_offset_secs.and_then(FixedOffset::east_opt)
    }
}
