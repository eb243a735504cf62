use crate::{Config, SearchError, WeatherSnapshot, provider::openweather::OpenWeatherProvider};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// Source of current weather for a free-text city query.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current_weather(&self, city: &str) -> Result<WeatherSnapshot, SearchError>;
}

/// Construct the OpenWeather provider from config.
///
/// A missing API key is not an error here; it surfaces on each search instead.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let provider = OpenWeatherProvider::new(
        config.api.base_url.clone(),
        config.api_key().map(str::to_owned),
    )?;
    Ok(Box::new(provider))
}
