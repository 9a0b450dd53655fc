use wasm_bindgen::JsValue;

use crate::dom::js_error_message;

/// Failures while wiring the accessibility layer into the page.
#[derive(Debug, thiserror::Error)]
pub enum WebError {
    #[error("no browser window")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("{context}: {message}")]
    Js {
        context: &'static str,
        message: String,
    },
}

impl WebError {
    #[must_use]
    pub fn js(context: &'static str, value: &JsValue) -> Self {
        Self::Js {
            context,
            message: js_error_message(value),
        }
    }
}
