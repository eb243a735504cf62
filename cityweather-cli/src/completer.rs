use cityweather_core::{Autocomplete, POPULAR_CITIES};
use inquire::{
    CustomUserError,
    autocompletion::{Autocomplete as InquireAutocomplete, Replacement},
};

/// Feeds inquire's suggestion list from the city autocomplete engine.
#[derive(Debug, Clone)]
pub struct CityCompleter {
    engine: Autocomplete<'static>,
}

impl CityCompleter {
    pub fn new() -> Self {
        Self {
            engine: Autocomplete::new(POPULAR_CITIES),
        }
    }
}

impl Default for CityCompleter {
    fn default() -> Self {
        Self::new()
    }
}

impl InquireAutocomplete for CityCompleter {
    fn get_suggestions(&mut self, input: &str) -> Result<Vec<String>, CustomUserError> {
        self.engine.on_query_change(input);
        Ok(self
            .engine
            .suggestions()
            .iter()
            .map(|c| c.display_name.to_string())
            .collect())
    }

    /// Tab on a highlighted row fills in the canonical city name.
    fn get_completion(
        &mut self,
        _input: &str,
        highlighted_suggestion: Option<String>,
    ) -> Result<Replacement, CustomUserError> {
        let Some(display) = highlighted_suggestion else {
            return Ok(None);
        };
        let city = self
            .engine
            .suggestions()
            .iter()
            .copied()
            .find(|c| c.display_name == display);
        Ok(city.map(|c| self.engine.select_city(c)))
    }
}
