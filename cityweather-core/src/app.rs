//! The controller that owns both the search bar and the search lifecycle.
//!
//! Front-ends feed it input events and render from its accessors; it holds no
//! presentation code of its own.

use std::sync::Arc;

use crate::{
    Config,
    autocomplete::{Autocomplete, Key, KeyOutcome},
    cities::POPULAR_CITIES,
    config::DisplayConfig,
    provider::{WeatherProvider, provider_from_config},
    search::{SearchOrchestrator, SearchState},
    storage::{KeyValueStore, LastSearchedCity},
    view::WeatherCard,
};

pub const EMPTY_STATE_MESSAGE: &str = "Search for a city to get started";

#[derive(Debug)]
pub struct WeatherApp {
    search_bar: Autocomplete<'static>,
    search: SearchOrchestrator,
    display: DisplayConfig,
}

impl WeatherApp {
    /// Pre-fills the search bar with the last searched city, if any.
    pub fn new(
        provider: Arc<dyn WeatherProvider>,
        store: Arc<dyn KeyValueStore>,
        display: DisplayConfig,
    ) -> Self {
        let search = SearchOrchestrator::new(provider, LastSearchedCity::new(store));
        let mut search_bar = Autocomplete::new(POPULAR_CITIES);
        if let Some(city) = search.last_city() {
            search_bar.set_text(city);
        }

        Self {
            search_bar,
            search,
            display,
        }
    }

    pub fn from_config(config: &Config, store: Arc<dyn KeyValueStore>) -> anyhow::Result<Self> {
        let provider: Arc<dyn WeatherProvider> = Arc::from(provider_from_config(config)?);
        Ok(Self::new(provider, store, config.display))
    }

    pub fn search_bar(&self) -> &Autocomplete<'static> {
        &self.search_bar
    }

    pub fn state(&self) -> SearchState<'_> {
        self.search.state()
    }

    pub fn last_city(&self) -> Option<&str> {
        self.search.last_city()
    }

    pub fn display(&self) -> &DisplayConfig {
        &self.display
    }

    pub fn type_text(&mut self, text: &str) {
        self.search_bar.on_query_change(text);
    }

    pub fn focus(&mut self) {
        self.search_bar.on_focus();
    }

    pub fn blur(&mut self) {
        self.search_bar.on_blur();
    }

    pub fn pointer_enter(&mut self) {
        self.search_bar.on_pointer_enter();
    }

    pub fn pointer_leave(&mut self) {
        self.search_bar.on_pointer_leave();
    }

    /// The search button is disabled while loading or when the text is blank.
    pub fn can_submit(&self) -> bool {
        !self.search.is_loading() && !self.search_bar.text().trim().is_empty()
    }

    pub async fn press_key(&mut self, key: Key) -> KeyOutcome {
        let outcome = self.search_bar.on_key(key);
        match (&outcome, key) {
            (KeyOutcome::Selected(city), _) => {
                self.search.search(city).await;
            }
            (KeyOutcome::Ignored, Key::Enter) => {
                self.submit().await;
            }
            _ => {}
        }
        outcome
    }

    /// Pointer selection of the suggestion at `index`.
    pub async fn choose(&mut self, index: usize) -> bool {
        match self.search_bar.on_select(index) {
            Some(city) => self.search.search(&city).await,
            None => false,
        }
    }

    /// Form submission with the typed text.
    pub async fn submit(&mut self) -> bool {
        if !self.can_submit() {
            return false;
        }
        match self.search_bar.submit() {
            Some(city) => self.search.search(&city).await,
            None => false,
        }
    }

    /// Card for the current snapshot, including a stale one shown during loading.
    pub fn card(&self) -> Option<WeatherCard> {
        self.search
            .snapshot()
            .map(|snap| WeatherCard::build(snap, &self.display))
    }

    pub fn dismiss_card(&mut self) {
        self.search.dismiss();
    }

    pub fn forget_last_city(&mut self) {
        self.search.forget_last_city();
    }

    /// Error text, or the empty-state prompt when there is nothing to show.
    pub fn status_message(&self) -> Option<String> {
        match self.search.state() {
            SearchState::Failed(err) => Some(err.to_string()),
            SearchState::Idle => Some(EMPTY_STATE_MESSAGE.to_string()),
            SearchState::Loading | SearchState::Success(_) => None,
        }
    }
}
