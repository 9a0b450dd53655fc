use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement, Window};

/// Retrieve the global `window` object, if running in a browser.
#[must_use]
pub fn window() -> Option<Window> {
    web_sys::window()
}

/// Retrieve the document object for DOM interactions.
#[must_use]
pub fn document() -> Option<Document> {
    window().and_then(|win| win.document())
}

/// Whether the page was opened with `?test=1`.
#[must_use]
pub fn test_mode_enabled() -> bool {
    window()
        .and_then(|win| win.location().search().ok())
        .is_some_and(|search| requests_test_mode(&search))
}

/// Whether a `location.search` string carries the exact `test=1` pair.
#[must_use]
pub fn requests_test_mode(search: &str) -> bool {
    search
        .trim_start_matches('?')
        .split('&')
        .any(|pair| pair == "test=1")
}

/// Convert a JavaScript value into a readable string for error reporting.
#[must_use]
pub fn js_error_message(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|err| err.message().into())
        })
        .unwrap_or_else(|| format!("{value:?}"))
}

/// Every element matching `selector`. An invalid selector yields nothing.
#[must_use]
pub fn query_all(doc: &Document, selector: &str) -> Vec<Element> {
    let Ok(list) = doc.query_selector_all(selector) else {
        log::warn!("invalid selector {selector:?}");
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|idx| list.get(idx))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// First element matching `selector`, treating an invalid selector as absent.
#[must_use]
pub fn query_one(doc: &Document, selector: &str) -> Option<Element> {
    doc.query_selector(selector).ok().flatten()
}

/// Every element under `root` matching `selector`, as HTML elements.
#[must_use]
pub fn query_within(root: &Element, selector: &str) -> Vec<HtmlElement> {
    let Ok(list) = root.query_selector_all(selector) else {
        log::warn!("invalid selector {selector:?}");
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|idx| list.get(idx))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .collect()
}

/// Run `f` now if the document has been parsed, otherwise on `DOMContentLoaded`.
pub fn when_ready(doc: &Document, f: impl FnOnce() + 'static) {
    if doc.ready_state() != "loading" {
        f();
        return;
    }
    let callback = Closure::once(f);
    if let Err(err) =
        doc.add_event_listener_with_callback("DOMContentLoaded", callback.as_ref().unchecked_ref())
    {
        log::error!("could not wait for DOMContentLoaded: {}", js_error_message(&err));
        return;
    }
    callback.forget();
}
