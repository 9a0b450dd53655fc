//! `window.__recipeA11yTest`, installed only when the page runs with `?test=1`.
use std::rc::Rc;

use recipe_a11y_core::{LiveRegion, StoreMode, Theme};
use serde::Serialize;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::bootstrap::SharedController;
use crate::dom;

const BRIDGE_NAME: &str = "__recipeA11yTest";

/// What automated checks see of the layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BridgeSnapshot {
    pub high_contrast: bool,
    pub large_text: bool,
    pub reduced_motion: bool,
    pub theme: Option<Theme>,
    pub keyboard_navigation: bool,
    pub store_mode: StoreMode,
    pub live_text: String,
}

impl BridgeSnapshot {
    #[must_use]
    pub fn capture(controller: &SharedController) -> Self {
        let ctl = controller.borrow();
        let state = ctl.state();
        Self {
            high_contrast: state.high_contrast,
            large_text: state.large_text,
            reduced_motion: state.reduced_motion,
            theme: state.theme,
            keyboard_navigation: state.keyboard_navigation,
            store_mode: ctl.store_mode(),
            live_text: ctl.region().text(),
        }
    }
}

struct BridgeBindings {
    state: Closure<dyn FnMut() -> JsValue>,
    announce: Closure<dyn FnMut(JsValue)>,
}

fn build_bindings(controller: &SharedController) -> BridgeBindings {
    let state_ctl = Rc::clone(controller);
    let state = Closure::wrap(Box::new(move || {
        serde_wasm_bindgen::to_value(&BridgeSnapshot::capture(&state_ctl))
            .unwrap_or(JsValue::NULL)
    }) as Box<dyn FnMut() -> JsValue>);

    let announce_ctl = Rc::clone(controller);
    let announce = Closure::wrap(Box::new(move |value: JsValue| {
        if let Some(message) = value.as_string() {
            announce_ctl.borrow_mut().announce(&message);
        }
    }) as Box<dyn FnMut(JsValue)>);

    BridgeBindings { state, announce }
}

/// Expose the bridge on `window` for the rest of the page.
pub fn install(controller: &SharedController) {
    let Some(window) = dom::window() else {
        return;
    };
    let bindings = build_bindings(controller);
    let bridge = js_sys::Object::new();
    let _ = js_sys::Reflect::set(
        &bridge,
        &JsValue::from_str("state"),
        bindings.state.as_ref().unchecked_ref(),
    );
    let _ = js_sys::Reflect::set(
        &bridge,
        &JsValue::from_str("announce"),
        bindings.announce.as_ref().unchecked_ref(),
    );
    if js_sys::Reflect::set(&window, &JsValue::from_str(BRIDGE_NAME), &bridge).is_ok() {
        log::info!("test bridge installed as window.{BRIDGE_NAME}");
    }
    bindings.state.forget();
    bindings.announce.forget();
}
