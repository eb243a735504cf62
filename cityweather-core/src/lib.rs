//! Core library for the `cityweather` CLI.
//!
//! This crate defines:
//! - The popular-city directory and the autocomplete engine over it
//! - The search lifecycle against the weather provider
//! - Formatters and the weather-card view model
//! - Configuration and best-effort persistence of the last searched city
//!
//! It is used by `cityweather-cli`, but holds no terminal code and can back
//! other front-ends.

pub mod app;
pub mod autocomplete;
pub mod cities;
pub mod config;
pub mod error;
pub mod format;
pub mod model;
pub mod provider;
pub mod search;
pub mod storage;
pub mod view;

pub use app::WeatherApp;
pub use autocomplete::{Autocomplete, Key, KeyOutcome};
pub use cities::{POPULAR_CITIES, PopularCity};
pub use config::{Config, DisplayConfig, TemperatureUnit};
pub use error::{ErrorKind, SearchError};
pub use model::WeatherSnapshot;
pub use provider::WeatherProvider;
pub use search::{SearchOrchestrator, SearchState};
pub use storage::{FileStore, KeyValueStore, LastSearchedCity, MemoryStore};
pub use view::WeatherCard;
