/// Observable state of one host-page element.
///
/// The host page owns the actual markup; the widget only fixes what a
/// user could observe about an element: whether it is visible, which CSS
/// classes it carries, its input value, and (for containers) its HTML
/// payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    visible: bool,
    classes: Vec<String>,
    value: String,
    html: String,
}

impl Element {
    pub fn shown() -> Self {
        Self {
            visible: true,
            ..Self::default()
        }
    }

    pub fn hidden() -> Self {
        Self::default()
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: &str) {
        self.value = value.to_string();
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    pub fn set_html(&mut self, html: &str) {
        self.html = html.to_string();
    }

    pub fn is_empty(&self) -> bool {
        self.html.is_empty()
    }
}
