//! The real document behind the core's [`DocumentSurface`] and [`LiveRegion`].
use recipe_a11y_core::constants::PRESSED_ATTRIBUTE;
use recipe_a11y_core::{DocumentSurface, LiveRegion};
use web_sys::{Document, Element};

use crate::dom::js_error_message;

pub struct WebDocument {
    document: Document,
}

impl WebDocument {
    #[must_use]
    pub const fn new(document: Document) -> Self {
        Self { document }
    }
}

impl DocumentSurface for WebDocument {
    fn set_root_class(&self, class: &str, present: bool) {
        let Some(root) = self.document.document_element() else {
            return;
        };
        let list = root.class_list();
        let result = if present {
            list.add_1(class)
        } else {
            list.remove_1(class)
        };
        if let Err(err) = result {
            log::warn!("could not update root class {class}: {}", js_error_message(&err));
        }
    }

    fn set_root_attribute(&self, name: &str, value: &str) {
        if let Some(root) = self.document.document_element() {
            let _ = root.set_attribute(name, value);
        }
    }

    fn set_pressed(&self, control_id: &str, pressed: bool) {
        match self.document.get_element_by_id(control_id) {
            Some(control) => {
                let value = if pressed { "true" } else { "false" };
                let _ = control.set_attribute(PRESSED_ATTRIBUTE, value);
            }
            None => log::debug!("toggle control #{control_id} not on page"),
        }
    }
}

/// Visually hidden, polite, atomic status region.
pub struct WebLiveRegion {
    element: Element,
}

impl WebLiveRegion {
    /// Reuse the page's region with `id`, or create and append one to `<body>`.
    ///
    /// # Errors
    /// Returns the JS exception if the element cannot be created or attributed.
    pub fn ensure(document: &Document, id: &str) -> Result<Self, wasm_bindgen::JsValue> {
        let element = if let Some(existing) = document.get_element_by_id(id) {
            existing
        } else {
            let created = document.create_element("div")?;
            created.set_id(id);
            if let Some(body) = document.body() {
                body.append_child(&created)?;
            }
            created
        };
        element.set_attribute("role", "status")?;
        element.set_attribute("aria-live", "polite")?;
        element.set_attribute("aria-atomic", "true")?;
        element.class_list().add_1("sr-only")?;
        Ok(Self { element })
    }

    #[must_use]
    pub const fn element(&self) -> &Element {
        &self.element
    }
}

impl LiveRegion for WebLiveRegion {
    fn set_text(&self, text: &str) {
        self.element.set_text_content(Some(text));
    }

    fn text(&self) -> String {
        self.element.text_content().unwrap_or_default()
    }
}
