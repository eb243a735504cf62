use std::sync::Arc;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use cityweather_core::{
    Config, FileStore, KeyValueStore, LastSearchedCity, MemoryStore, SearchState, WeatherApp,
    autocomplete::filter_cities, cities::POPULAR_CITIES,
};
use inquire::{InquireError, Password, PasswordDisplayMode, Text};

use crate::{completer::CityCompleter, render};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "cityweather", version, about = "Current weather for a city")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Prompt for cities with autocomplete until cancelled (the default).
    Interactive {
        /// Also show visibility, wind direction and sun times.
        #[arg(long)]
        details: bool,
    },

    /// Show the weather for one city.
    Show {
        /// City name, e.g. "Paris" or "Paris,FR".
        city: String,

        /// Also show visibility, wind direction and sun times.
        #[arg(long)]
        details: bool,
    },

    /// List popular cities matching a query.
    Suggest {
        query: String,
    },

    /// Set the API key and endpoint.
    Configure,

    /// Forget the last searched city.
    Forget,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command.unwrap_or(Command::Interactive { details: false }) {
            Command::Interactive { details } => interactive(details).await,
            Command::Show { city, details } => show(&city, details).await,
            Command::Suggest { query } => {
                let matches = filter_cities(POPULAR_CITIES, &query);
                print!("{}", render::suggestions(&matches));
                Ok(())
            }
            Command::Configure => configure(),
            Command::Forget => {
                LastSearchedCity::new(open_store()).clear();
                println!("Forgot the last searched city.");
                Ok(())
            }
        }
    }
}

/// Persistence is best-effort: fall back to memory when there is no data dir.
fn open_store() -> Arc<dyn KeyValueStore> {
    match FileStore::open_default() {
        Ok(store) => {
            tracing::debug!(path = %store.path().display(), "Using file store");
            Arc::new(store)
        }
        Err(err) => {
            tracing::warn!("Falling back to in-memory store: {err:#}");
            Arc::new(MemoryStore::new())
        }
    }
}

fn build_app() -> anyhow::Result<WeatherApp> {
    let config = Config::load()?;
    WeatherApp::from_config(&config, open_store())
}

async fn show(city: &str, details: bool) -> anyhow::Result<()> {
    let mut app = build_app()?;
    app.type_text(city);
    app.submit().await;

    match app.state() {
        SearchState::Failed(err) => bail!("{err}"),
        _ => match app.card() {
            Some(card) => {
                print!("{}", render::card(&card, details));
                Ok(())
            }
            None => bail!("Nothing to show for '{city}'"),
        },
    }
}

async fn interactive(details: bool) -> anyhow::Result<()> {
    let mut app = build_app()?;

    loop {
        if let Some(message) = app.status_message() {
            println!("{message}");
        }

        let initial = app.search_bar().text().to_string();
        let answer = match Text::new("City:")
            .with_initial_value(&initial)
            .with_autocomplete(CityCompleter::new())
            .with_help_message("↑↓ to move, tab to complete, esc to quit")
            .prompt()
        {
            Ok(answer) => answer,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
                return Ok(());
            }
            Err(err) => return Err(err).context("Failed to read city"),
        };

        app.type_text(&answer);
        // Enter on a highlighted suggestion answers with its display name.
        let picked = app
            .search_bar()
            .suggestions()
            .iter()
            .position(|c| c.display_name == answer.trim());
        match picked {
            Some(index) => app.choose(index).await,
            None => app.submit().await,
        };

        if let Some(card) = app.card() {
            print!("{}", render::card(&card, details));
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load_file()?;

    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    let base_url = Text::new("API base URL:")
        .with_default(&config.api.base_url)
        .prompt()
        .context("Failed to read base URL")?;

    config.set_api_key(api_key.trim().to_string());
    config.api.base_url = base_url.trim().to_string();
    config.save()?;

    let path = Config::config_file_path()?;
    println!("Saved configuration to {}", path.display());
    Ok(())
}
