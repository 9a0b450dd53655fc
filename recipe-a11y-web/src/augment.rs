//! Load-time page augmentations.
use std::cell::RefCell;
use std::rc::Rc;

use recipe_a11y_core::constants::{FOCUS_VISIBLE_CLASS, FOCUSABLE_SELECTOR};
use recipe_a11y_core::{FocusChange, backfill_alt, focus_trap_target, normalized_tab_index};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, EventTarget, KeyboardEvent, Window};

use crate::dom::{self, js_error_message};
use crate::error::WebError;

/// Give every `<img>` lacking an `alt` attribute the default text.
/// Returns how many images were changed.
pub fn backfill_image_alts(document: &Document, default_alt: &str) -> usize {
    let mut changed = 0;
    for image in dom::query_all(document, "img") {
        let Some(alt) = backfill_alt(image.get_attribute("alt").as_deref(), default_alt) else {
            continue;
        };
        if image.set_attribute("alt", &alt).is_ok() {
            changed += 1;
        }
    }
    if changed > 0 {
        log::debug!("backfilled alt text on {changed} image(s)");
    }
    changed
}

/// Append a print button to the first element matching `container_selector`.
/// Returns `Ok(false)` when the page has no such container.
///
/// # Errors
/// Returns the JS exception if the button cannot be built or inserted.
pub fn install_print_button(
    window: &Window,
    document: &Document,
    container_selector: &str,
    label: &str,
) -> Result<bool, WebError> {
    let Some(container) = dom::query_one(document, container_selector) else {
        log::debug!("no print container {container_selector:?}");
        return Ok(false);
    };
    let button = document
        .create_element("button")
        .map_err(|err| WebError::js("print button", &err))?;
    button
        .set_attribute("type", "button")
        .map_err(|err| WebError::js("print button", &err))?;
    button.set_class_name("print-button");
    button.set_text_content(Some(label));

    let print_window = window.clone();
    let on_click = Closure::<dyn FnMut()>::new(move || {
        if let Err(err) = print_window.print() {
            log::warn!("print failed: {}", js_error_message(&err));
        }
    });
    button
        .add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
        .map_err(|err| WebError::js("print button", &err))?;
    on_click.forget();

    container
        .append_child(&button)
        .map_err(|err| WebError::js("print button", &err))?;
    Ok(true)
}

/// Put every element matching `selector` into the default tab order.
/// Returns how many elements were changed.
pub fn enforce_tab_order(document: &Document, selector: &str) -> usize {
    dom::query_all(document, selector)
        .into_iter()
        .filter(|element| {
            normalized_tab_index(element.get_attribute("tabindex").as_deref())
                .is_some_and(|index| element.set_attribute("tabindex", index).is_ok())
        })
        .count()
}

/// Listen for keydowns until `observe` reports the switch into keyboard
/// mode, then remove the listener.
///
/// # Errors
/// Returns the JS exception if the listener cannot be attached.
pub fn install_keyboard_mode_listener<F>(
    document: &Document,
    mut observe: F,
) -> Result<(), WebError>
where
    F: FnMut(&str) -> bool + 'static,
{
    let target: EventTarget = document.clone().into();
    let registered: Rc<RefCell<Option<js_sys::Function>>> = Rc::new(RefCell::new(None));

    let handler_target = target.clone();
    let handler_slot = Rc::clone(&registered);
    let on_keydown = Closure::<dyn FnMut(KeyboardEvent)>::new(move |event: KeyboardEvent| {
        if !observe(&event.key()) {
            return;
        }
        if let Some(function) = handler_slot.borrow_mut().take() {
            let _ = handler_target.remove_event_listener_with_callback("keydown", &function);
            log::debug!("keyboard navigation detected; detector detached");
        }
    });
    let function = on_keydown
        .as_ref()
        .unchecked_ref::<js_sys::Function>()
        .clone();
    target
        .add_event_listener_with_callback("keydown", &function)
        .map_err(|err| WebError::js("keyboard mode listener", &err))?;
    *registered.borrow_mut() = Some(function);
    on_keydown.forget();
    Ok(())
}

/// Toggle `focus-visible` on the skip link as it gains and loses focus.
/// Returns `Ok(false)` when the page has no skip link.
///
/// # Errors
/// Returns the JS exception if a listener cannot be attached.
pub fn watch_skip_link(document: &Document, selector: &str) -> Result<bool, WebError> {
    let Some(link) = dom::query_one(document, selector) else {
        log::debug!("no skip link {selector:?}");
        return Ok(false);
    };
    for (event, change) in [("focus", FocusChange::Focus), ("blur", FocusChange::Blur)] {
        let element = link.clone();
        let handler = Closure::<dyn FnMut()>::new(move || {
            let list = element.class_list();
            let _ = if change.marks_visible() {
                list.add_1(FOCUS_VISIBLE_CLASS)
            } else {
                list.remove_1(FOCUS_VISIBLE_CLASS)
            };
        });
        link.add_event_listener_with_callback(event, handler.as_ref().unchecked_ref())
            .map_err(|err| WebError::js("skip link", &err))?;
        handler.forget();
    }
    Ok(true)
}

/// An active focus trap. Dropping it without calling `release` leaves the
/// trap installed for the rest of the page.
#[wasm_bindgen]
pub struct FocusTrap {
    document: Document,
    handler: Option<Closure<dyn FnMut(KeyboardEvent)>>,
}

#[wasm_bindgen]
impl FocusTrap {
    /// Stop constraining focus. Releasing twice is a no-op.
    pub fn release(&mut self) {
        if let Some(handler) = self.handler.take() {
            let _ = self
                .document
                .remove_event_listener_with_callback("keydown", handler.as_ref().unchecked_ref());
        }
    }
}

impl Drop for FocusTrap {
    fn drop(&mut self) {
        if let Some(handler) = self.handler.take() {
            handler.forget();
        }
    }
}

/// Keep Tab and Shift+Tab cycling through `container`'s focusable elements,
/// pulling focus back in when it has escaped.
///
/// # Errors
/// Throws if there is no document or the listener cannot be attached.
#[wasm_bindgen]
pub fn trap_focus(container: &Element) -> Result<FocusTrap, JsValue> {
    let document = dom::document().ok_or_else(|| JsValue::from_str("no document"))?;
    let container = container.clone();
    let active_document = document.clone();
    let handler = Closure::<dyn FnMut(KeyboardEvent)>::new(move |event: KeyboardEvent| {
        if event.key() != "Tab" {
            return;
        }
        let focusable = dom::query_within(&container, FOCUSABLE_SELECTOR);
        let active = active_document.active_element().and_then(|active| {
            focusable
                .iter()
                .position(|candidate| AsRef::<Element>::as_ref(candidate) == &active)
        });
        if let Some(target) = focus_trap_target(active, focusable.len(), event.shift_key())
            .and_then(|idx| focusable.get(idx))
        {
            event.prevent_default();
            let _ = target.focus();
        }
    });
    document.add_event_listener_with_callback("keydown", handler.as_ref().unchecked_ref())?;
    Ok(FocusTrap {
        document,
        handler: Some(handler),
    })
}
