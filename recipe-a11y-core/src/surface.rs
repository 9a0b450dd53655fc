//! The slice of the document the controller writes to.
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};

use crate::constants::{MANAGED_ROOT_CLASSES, THEME_ATTRIBUTE};
use crate::state::DocumentView;

/// Platform-specific implementations should provide this.
pub trait DocumentSurface {
    /// Add or remove a class on the document root.
    fn set_root_class(&self, class: &str, present: bool);

    fn set_root_attribute(&self, name: &str, value: &str);

    /// Reflect a toggle's state on its control (`aria-pressed`).
    fn set_pressed(&self, control_id: &str, pressed: bool);
}

/// Write a derived view onto the document. Managed classes absent from the
/// view are removed; the theme attribute is left alone until a theme is known.
pub fn render_view<D: DocumentSurface + ?Sized>(surface: &D, view: &DocumentView) {
    for class in MANAGED_ROOT_CLASSES {
        surface.set_root_class(class, view.has_class(class));
    }
    if let Some(theme) = view.theme {
        surface.set_root_attribute(THEME_ATTRIBUTE, theme.as_str());
    }
}

/// In-memory document used by tests and the logic-mode tester.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    classes: RefCell<BTreeSet<String>>,
    attributes: RefCell<BTreeMap<String, String>>,
    pressed: RefCell<BTreeMap<String, bool>>,
}

impl RecordingSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.borrow().contains(class)
    }

    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<String> {
        self.attributes.borrow().get(name).cloned()
    }

    /// `None` when the control was never rendered.
    #[must_use]
    pub fn pressed(&self, control_id: &str) -> Option<bool> {
        self.pressed.borrow().get(control_id).copied()
    }
}

impl DocumentSurface for RecordingSurface {
    fn set_root_class(&self, class: &str, present: bool) {
        let mut classes = self.classes.borrow_mut();
        if present {
            classes.insert(class.to_string());
        } else {
            classes.remove(class);
        }
    }

    fn set_root_attribute(&self, name: &str, value: &str) {
        self.attributes
            .borrow_mut()
            .insert(name.to_string(), value.to_string());
    }

    fn set_pressed(&self, control_id: &str, pressed: bool) {
        self.pressed
            .borrow_mut()
            .insert(control_id.to_string(), pressed);
    }
}

impl<D: DocumentSurface + ?Sized> DocumentSurface for std::rc::Rc<D> {
    fn set_root_class(&self, class: &str, present: bool) {
        (**self).set_root_class(class, present);
    }

    fn set_root_attribute(&self, name: &str, value: &str) {
        (**self).set_root_attribute(name, value);
    }

    fn set_pressed(&self, control_id: &str, pressed: bool) {
        (**self).set_pressed(control_id, pressed);
    }
}
