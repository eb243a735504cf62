//! City autocomplete: query text, filtered suggestions, active row and
//! keyboard navigation.
//!
//! The engine is pure local state. It never talks to the network; instead the
//! operations that amount to "search for this city" hand back the city name for
//! the caller to submit.

use crate::cities::PopularCity;

/// Upper bound on the number of suggestions shown at once.
pub const MAX_SUGGESTIONS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Enter,
    Escape,
}

/// What the engine did with a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Not intercepted; the host applies its default behavior
    /// (for Enter that is a normal form submission of the typed text).
    Ignored,
    /// Intercepted and applied to the dropdown state.
    Handled,
    /// A suggestion was committed; search for this name.
    Selected(String),
}

#[derive(Debug, Clone)]
pub struct Autocomplete<'a> {
    directory: &'a [PopularCity],
    text: String,
    suggestions: Vec<&'a PopularCity>,
    active: Option<usize>,
    open: bool,
    focused: bool,
    pointer_inside: bool,
}

impl<'a> Autocomplete<'a> {
    pub fn new(directory: &'a [PopularCity]) -> Self {
        Self {
            directory,
            text: String::new(),
            suggestions: Vec::new(),
            active: None,
            open: false,
            focused: false,
            pointer_inside: false,
        }
    }

    /// Raw text as typed, untrimmed.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn suggestions(&self) -> &[&'a PopularCity] {
        &self.suggestions
    }

    /// `None` means no row is highlighted.
    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    pub fn active_suggestion(&self) -> Option<&'a PopularCity> {
        self.active.and_then(|i| self.suggestions.get(i).copied())
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Replace the text without filtering, e.g. to pre-fill a remembered city.
    ///
    /// Suggestions computed for the previous text are dropped and the dropdown
    /// closes; the next edit filters again.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.suggestions.clear();
        self.close();
    }

    /// Handle an edit of the input text.
    pub fn on_query_change(&mut self, text: &str) {
        self.text = text.to_string();
        self.active = None;

        if text.trim().is_empty() {
            self.suggestions.clear();
            self.open = false;
            return;
        }

        self.suggestions = filter_cities(self.directory, text);
        self.open = !self.suggestions.is_empty();
    }

    /// Reopen with the existing suggestions; does not filter again.
    pub fn on_focus(&mut self) {
        self.focused = true;
        if !self.text.trim().is_empty() && !self.suggestions.is_empty() {
            self.open = true;
        }
    }

    /// Close on focus loss, unless the pointer is over the dropdown: a click
    /// on a suggestion is about to be delivered and must still find it open.
    pub fn on_blur(&mut self) {
        self.focused = false;
        if !self.pointer_inside {
            self.close();
        }
    }

    pub fn on_pointer_enter(&mut self) {
        self.pointer_inside = true;
    }

    /// Leaving the dropdown after focus was lost completes the deferred close.
    pub fn on_pointer_leave(&mut self) {
        self.pointer_inside = false;
        if !self.focused {
            self.close();
        }
    }

    pub fn on_key(&mut self, key: Key) -> KeyOutcome {
        if !self.open || self.suggestions.is_empty() {
            return KeyOutcome::Ignored;
        }

        let last = self.suggestions.len() - 1;
        match key {
            Key::Down => {
                self.active = Some(match self.active {
                    Some(i) => (i + 1).min(last),
                    None => 0,
                });
                KeyOutcome::Handled
            }
            Key::Up => {
                self.active = self.active.and_then(|i| i.checked_sub(1));
                KeyOutcome::Handled
            }
            Key::Enter => match self.active {
                Some(i) => self
                    .on_select(i)
                    .map_or(KeyOutcome::Ignored, KeyOutcome::Selected),
                None => KeyOutcome::Ignored,
            },
            Key::Escape => {
                self.close();
                KeyOutcome::Handled
            }
        }
    }

    /// Commit the suggestion at `index`, returning the name to search for.
    pub fn on_select(&mut self, index: usize) -> Option<String> {
        let city = *self.suggestions.get(index)?;
        Some(self.select_city(city))
    }

    /// Commit `city`: the input shows its canonical name, not the display string.
    pub fn select_city(&mut self, city: &PopularCity) -> String {
        self.text = city.name.to_string();
        self.pointer_inside = false;
        self.close();
        self.text.clone()
    }

    /// Form submission. Returns the trimmed text, or `None` when blank.
    pub fn submit(&mut self) -> Option<String> {
        let trimmed = self.text.trim();
        if trimmed.is_empty() {
            return None;
        }
        let query = trimmed.to_string();
        self.close();
        Some(query)
    }

    fn close(&mut self) {
        self.open = false;
        self.active = None;
    }
}

/// First [`MAX_SUGGESTIONS`] directory entries matching `query`, in directory order.
pub fn filter_cities<'a>(directory: &'a [PopularCity], query: &str) -> Vec<&'a PopularCity> {
    let needle = query.to_lowercase();
    directory
        .iter()
        .filter(|city| city.matches(&needle))
        .take(MAX_SUGGESTIONS)
        .collect()
}
