//! Search request lifecycle: loading flag, last result or error, and the
//! remembered city.
//!
//! Each search is stamped with a token. Only the response carrying the most
//! recent token is applied, so when searches overlap the latest one wins no
//! matter which response arrives last.

use std::sync::Arc;

use crate::{
    SearchError, WeatherSnapshot, provider::WeatherProvider, storage::LastSearchedCity,
};

/// Observable state of the orchestrator.
///
/// While `Loading` the previous snapshot is still available through
/// [`SearchOrchestrator::snapshot`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SearchState<'a> {
    Idle,
    Loading,
    Success(&'a WeatherSnapshot),
    Failed(&'a SearchError),
}

/// A started search, handed back to [`SearchOrchestrator::settle`] with its result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    token: u64,
    city: String,
}

impl Ticket {
    pub fn city(&self) -> &str {
        &self.city
    }
}

#[derive(Debug)]
pub struct SearchOrchestrator {
    provider: Arc<dyn WeatherProvider>,
    last_city: LastSearchedCity,
    remembered: Option<String>,
    latest: u64,
    loading: bool,
    snapshot: Option<WeatherSnapshot>,
    error: Option<SearchError>,
}

impl SearchOrchestrator {
    /// Reads the last searched city once, here.
    pub fn new(provider: Arc<dyn WeatherProvider>, last_city: LastSearchedCity) -> Self {
        let remembered = last_city.load();
        Self {
            provider,
            last_city,
            remembered,
            latest: 0,
            loading: false,
            snapshot: None,
            error: None,
        }
    }

    pub fn state(&self) -> SearchState<'_> {
        if self.loading {
            SearchState::Loading
        } else if let Some(err) = &self.error {
            SearchState::Failed(err)
        } else if let Some(snap) = &self.snapshot {
            SearchState::Success(snap)
        } else {
            SearchState::Idle
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn snapshot(&self) -> Option<&WeatherSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn error(&self) -> Option<&SearchError> {
        self.error.as_ref()
    }

    /// City text of the last successful search, if any.
    pub fn last_city(&self) -> Option<&str> {
        self.remembered.as_deref()
    }

    pub fn provider(&self) -> Arc<dyn WeatherProvider> {
        Arc::clone(&self.provider)
    }

    /// Search for `city_text` and apply the result.
    ///
    /// Returns whether the result was applied; a blank query is a no-op.
    pub async fn search(&mut self, city_text: &str) -> bool {
        let Some(ticket) = self.begin(city_text) else {
            return false;
        };

        let provider = self.provider();
        let mut guard = LoadingGuard {
            orchestrator: self,
            token: ticket.token,
            settled: false,
        };
        let result = provider.current_weather(&ticket.city).await;
        guard.settled = true;
        guard.orchestrator.settle(ticket, result)
    }

    /// Enter `Loading` for a new search.
    ///
    /// The previous error is cleared; the previous snapshot is left in place
    /// until the search settles.
    pub fn begin(&mut self, city_text: &str) -> Option<Ticket> {
        let city = city_text.trim();
        if city.is_empty() {
            tracing::debug!("Ignoring blank search");
            return None;
        }

        self.latest += 1;
        self.loading = true;
        self.error = None;
        tracing::debug!(city, token = self.latest, "Search started");

        Some(Ticket {
            token: self.latest,
            city: city.to_string(),
        })
    }

    /// Apply the outcome of `ticket`. Superseded tickets are dropped.
    pub fn settle(&mut self, ticket: Ticket, result: Result<WeatherSnapshot, SearchError>) -> bool {
        if ticket.token != self.latest {
            tracing::warn!(
                city = %ticket.city,
                token = ticket.token,
                latest = self.latest,
                "Discarding response for a superseded search"
            );
            return false;
        }

        match result {
            Ok(snapshot) => {
                tracing::info!(
                    city = %ticket.city,
                    location = %snapshot.location_name,
                    "Search succeeded"
                );
                self.snapshot = Some(snapshot);
                self.error = None;
                self.last_city.save(&ticket.city);
                self.remembered = Some(ticket.city);
            }
            Err(err) => {
                tracing::debug!(city = %ticket.city, kind = ?err.kind(), "Search failed: {err}");
                self.snapshot = None;
                self.error = Some(err);
            }
        }
        self.loading = false;
        true
    }

    /// Close the weather card.
    pub fn dismiss(&mut self) {
        self.snapshot = None;
    }

    /// Drop the remembered city, in memory and in the store.
    pub fn forget_last_city(&mut self) {
        self.remembered = None;
        self.last_city.clear();
    }
}

/// Clears `loading` if a search is abandoned before it settles.
struct LoadingGuard<'o> {
    orchestrator: &'o mut SearchOrchestrator,
    token: u64,
    settled: bool,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        if !self.settled && self.orchestrator.latest == self.token {
            self.orchestrator.loading = false;
        }
    }
}
