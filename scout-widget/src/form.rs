use crate::dom::Element;

/// Class the search field carries while a search is active.
pub const ACTIVE_CLASS: &str = "is-active";

/// Intent produced by a form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    Search(String),
    Clear,
}

/// The search input form: a text field plus the search/cancel button pair.
///
/// Submission is handled entirely in place; the returned intent is the
/// whole effect, the host never performs a page load.
#[derive(Debug)]
pub struct SearchForm {
    field: Element,
    search_button: Element,
    cancel_button: Element,
}

impl SearchForm {
    pub fn new() -> Self {
        Self {
            field: Element::shown(),
            search_button: Element::shown(),
            cancel_button: Element::hidden(),
        }
    }

    pub fn set_value(&mut self, value: &str) {
        self.field.set_value(value);
    }

    pub fn value(&self) -> &str {
        self.field.value()
    }

    /// Reads and trims the field. Non-empty input switches the form to
    /// its active visual state and yields the trimmed term; empty or
    /// whitespace-only input reverts the visual state and yields `Clear`.
    pub fn submit(&mut self) -> FormEvent {
        let term = self.field.value().trim().to_string();
        if term.is_empty() {
            self.set_inactive();
            FormEvent::Clear
        } else {
            self.set_active();
            FormEvent::Search(term)
        }
    }

    /// Cancel-button click: clears the field and reverts the visual
    /// state. Emits nothing.
    pub fn cancel(&mut self) {
        self.field.set_value("");
        self.set_inactive();
    }

    pub fn field(&self) -> &Element {
        &self.field
    }

    pub fn search_button(&self) -> &Element {
        &self.search_button
    }

    pub fn cancel_button(&self) -> &Element {
        &self.cancel_button
    }

    fn set_active(&mut self) {
        self.field.add_class(ACTIVE_CLASS);
        self.search_button.hide();
        self.cancel_button.show();
    }

    fn set_inactive(&mut self) {
        self.field.remove_class(ACTIVE_CLASS);
        self.search_button.show();
        self.cancel_button.hide();
    }
}

impl Default for SearchForm {
    fn default() -> Self {
        Self::new()
    }
}
