//! Static directory of well-known cities offered as search suggestions.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PopularCity {
    /// Canonical name sent to the weather provider.
    pub name: &'static str,
    /// ISO 3166-1 alpha-2 country code.
    pub country: &'static str,
    pub state: Option<&'static str>,
    pub display_name: &'static str,
}

const fn city(
    name: &'static str,
    country: &'static str,
    display_name: &'static str,
) -> PopularCity {
    PopularCity {
        name,
        country,
        state: None,
        display_name,
    }
}

const fn us_city(
    name: &'static str,
    state: &'static str,
    display_name: &'static str,
) -> PopularCity {
    PopularCity {
        name,
        country: "US",
        state: Some(state),
        display_name,
    }
}

/// Iteration order is the suggestion order; entries are not deduplicated.
pub static POPULAR_CITIES: &[PopularCity] = &[
    // North America
    us_city("New York", "NY", "New York, NY, US"),
    us_city("Los Angeles", "CA", "Los Angeles, CA, US"),
    us_city("Chicago", "IL", "Chicago, IL, US"),
    us_city("Miami", "FL", "Miami, FL, US"),
    city("Toronto", "CA", "Toronto, Canada"),
    city("Vancouver", "CA", "Vancouver, Canada"),
    // Europe
    city("London", "GB", "London, United Kingdom"),
    city("Paris", "FR", "Paris, France"),
    city("Berlin", "DE", "Berlin, Germany"),
    city("Madrid", "ES", "Madrid, Spain"),
    city("Rome", "IT", "Rome, Italy"),
    city("Amsterdam", "NL", "Amsterdam, Netherlands"),
    city("Barcelona", "ES", "Barcelona, Spain"),
    city("Vienna", "AT", "Vienna, Austria"),
    // Asia
    city("Tokyo", "JP", "Tokyo, Japan"),
    city("Singapore", "SG", "Singapore"),
    city("Hong Kong", "HK", "Hong Kong"),
    city("Seoul", "KR", "Seoul, South Korea"),
    city("Bangkok", "TH", "Bangkok, Thailand"),
    city("Mumbai", "IN", "Mumbai, India"),
    city("Delhi", "IN", "Delhi, India"),
    city("Shanghai", "CN", "Shanghai, China"),
    city("Beijing", "CN", "Beijing, China"),
    // Oceania
    city("Sydney", "AU", "Sydney, Australia"),
    city("Melbourne", "AU", "Melbourne, Australia"),
    city("Auckland", "NZ", "Auckland, New Zealand"),
    // South America
    city("São Paulo", "BR", "São Paulo, Brazil"),
    city("Rio de Janeiro", "BR", "Rio de Janeiro, Brazil"),
    city("Buenos Aires", "AR", "Buenos Aires, Argentina"),
    city("Lima", "PE", "Lima, Peru"),
    // Africa
    city("Cairo", "EG", "Cairo, Egypt"),
    city("Cape Town", "ZA", "Cape Town, South Africa"),
    city("Lagos", "NG", "Lagos, Nigeria"),
    // Middle East
    city("Dubai", "AE", "Dubai, UAE"),
    city("Istanbul", "TR", "Istanbul, Turkey"),
    city("Tel Aviv", "IL", "Tel Aviv, Israel"),
];

impl PopularCity {
    /// Case-insensitive substring test against `name` or `display_name`.
    ///
    /// `needle_lower` must already be lowercased.
    pub fn matches(&self, needle_lower: &str) -> bool {
        self.name.to_lowercase().contains(needle_lower)
            || self.display_name.to_lowercase().contains(needle_lower)
    }
}
