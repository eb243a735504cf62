//! Plain-text rendering of the weather card and suggestion list.

use cityweather_core::{PopularCity, WeatherCard, view::CardTheme};

fn theme_glyph(theme: CardTheme) -> &'static str {
    match theme {
        CardTheme::SunnyDay => "☀",
        CardTheme::ClearNight => "☾",
        CardTheme::Cloudy => "☁",
        CardTheme::Rainy => "☂",
        CardTheme::Snowy => "❄",
        CardTheme::Stormy => "⚡",
        CardTheme::Misty => "≋",
        CardTheme::Default => "•",
    }
}

pub fn card(card: &WeatherCard, details: bool) -> String {
    let heading = match &card.country {
        Some(country) => format!("{}, {country}", card.title),
        None => card.title.clone(),
    };
    let wind = match card.wind_compass {
        Some(compass) => format!("{} {compass}", card.wind_speed),
        None => card.wind_speed.clone(),
    };

    let mut lines = vec![
        format!("{} {heading}", theme_glyph(card.theme)),
        format!("  {}  {}", card.temperature, card.description),
        format!("  {}", card.feels_like),
        format!(
            "  Humidity {}  |  Wind {wind}  |  Pressure {}",
            card.humidity, card.pressure
        ),
    ];

    if let Some(range) = &card.range {
        lines.push(format!("  Today's range {} .. {}", range.low, range.high));
    }
    lines.push(format!("  Icon {}", card.icon_url));
    lines.extend(card.advice.iter().map(|advice| format!("  > {advice}")));

    if details {
        let rows = [
            ("Visibility", &card.details.visibility),
            ("Wind direction", &card.details.wind_direction),
            ("Sunrise", &card.details.sunrise),
            ("Sunset", &card.details.sunset),
        ];
        for (label, value) in rows {
            if let Some(value) = value {
                lines.push(format!("  {label:<15}{value}"));
            }
        }
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

pub fn suggestions(cities: &[&PopularCity]) -> String {
    cities
        .iter()
        .map(|city| format!("{:<16}{} ({})\n", city.name, city.display_name, city.country))
        .collect()
}
