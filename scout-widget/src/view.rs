use tokio::sync::mpsc::UnboundedReceiver;

use crate::collection::SearchCollection;
use crate::dom::Element;
use crate::events::SearchEvent;
use crate::render;

/// The result list view. Owns the widget's container element and the
/// visibility of the sibling course-content region: showing a loading,
/// error, or result state hides the course content, clearing restores it.
///
/// The view subscribes to its collection on construction and maps
/// `Search` to a full redraw, `Next` to an append, and `Error` to the
/// error message.
pub struct ListView {
    el: Element,
    content_el: Element,
    item_fragments: Vec<String>,
    events: UnboundedReceiver<SearchEvent>,
    collection: SearchCollection,
}

impl ListView {
    pub fn new(collection: SearchCollection) -> Self {
        Self {
            el: Element::hidden(),
            content_el: Element::shown(),
            item_fragments: Vec::new(),
            events: collection.subscribe(),
            collection,
        }
    }

    /// Drains pending collection events and applies them in order.
    pub fn pump(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            match event {
                SearchEvent::Search => self.render(),
                SearchEvent::Next => self.render_next(),
                SearchEvent::Error => self.show_error_message(),
            }
        }
    }

    pub fn show_loading_message(&mut self) {
        self.el.set_html(render::LOADING_HTML);
        self.el.show();
        self.content_el.hide();
    }

    pub fn show_error_message(&mut self) {
        self.el.set_html(render::ERROR_HTML);
        self.el.show();
        self.content_el.hide();
    }

    /// Empties and hides the view, revealing the course content again.
    pub fn clear(&mut self) {
        self.item_fragments.clear();
        self.el.set_html("");
        self.el.hide();
        self.content_el.show();
    }

    /// Full redraw from the collection's current items.
    pub fn render(&mut self) {
        self.item_fragments = self
            .collection
            .items()
            .iter()
            .map(render::render_item)
            .collect();
        self.refresh_list();
    }

    /// Appends fragments for newly accumulated items, preserving the
    /// ones already rendered.
    pub fn render_next(&mut self) {
        let items = self.collection.items();
        for item in items.iter().skip(self.item_fragments.len()) {
            self.item_fragments.push(render::render_item(item));
        }
        self.refresh_list();
    }

    pub fn el(&self) -> &Element {
        &self.el
    }

    pub fn content_el(&self) -> &Element {
        &self.content_el
    }

    pub fn html(&self) -> &str {
        self.el.html()
    }

    fn refresh_list(&mut self) {
        if self.item_fragments.is_empty() {
            self.el.set_html(render::NO_RESULTS_HTML);
            return;
        }
        let load_next = self.collection.has_next_page().then(|| {
            render::render_load_next(self.item_fragments.len(), self.collection.total_count())
        });
        self.el
            .set_html(&render::render_list(&self.item_fragments, load_next));
    }
}
