//! Wires the controller into the live page.
use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{Context, anyhow};
use recipe_a11y_core::{
    A11yConfig, A11yController, Activation, Debouncer, MediaPreference, is_activation_key,
};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlButtonElement, KeyboardEvent, Window};

use crate::a11y::inject_base_styles;
use crate::augment::{
    backfill_image_alts, enforce_tab_order, install_keyboard_mode_listener, install_print_button,
    watch_skip_link,
};
use crate::dom;
use crate::error::WebError;
use crate::media::watch_media;
use crate::scheduler::WindowScheduler;
use crate::storage::{LocalStorageBackend, open_preference_store};
use crate::surface::{WebDocument, WebLiveRegion};

pub type WebController =
    A11yController<LocalStorageBackend, WebDocument, WebLiveRegion, WindowScheduler>;
pub type SharedController = Rc<RefCell<WebController>>;

const INLINE_CONFIG_ID: &str = "a11y-config";

fn inline_config(document: &Document) -> anyhow::Result<Option<A11yConfig>> {
    let Some(script) = document.get_element_by_id(INLINE_CONFIG_ID) else {
        return Ok(None);
    };
    let text = script
        .text_content()
        .ok_or_else(|| anyhow!("#{INLINE_CONFIG_ID} is empty"))?;
    let config = A11yConfig::from_json(&text).context("parsing inline accessibility config")?;
    Ok(Some(config))
}

/// Embedded configuration, replaced by the page's inline
/// `<script id="a11y-config">` when it parses and validates.
#[must_use]
pub fn page_config() -> A11yConfig {
    let Some(document) = dom::document() else {
        return A11yConfig::load_from_static();
    };
    match inline_config(&document) {
        Ok(Some(config)) => {
            log::debug!("using inline accessibility config");
            config
        }
        Ok(None) => A11yConfig::load_from_static(),
        Err(err) => {
            log::warn!("{err:#}; keeping embedded config");
            A11yConfig::load_from_static()
        }
    }
}

fn run_step<T>(step: &str, result: Result<T, WebError>) {
    if let Err(err) = result {
        log::error!("{step} failed: {err}");
    }
}

/// Build the controller, restore preferences and attach every listener.
///
/// Only a missing window or document (or an unusable live region) aborts;
/// every other wiring step logs its failure and the rest still run.
///
/// # Errors
/// Returns an error if the page has no window, no document, or the live
/// region cannot be created.
pub fn boot(config: &A11yConfig) -> Result<SharedController, WebError> {
    let window = dom::window().ok_or(WebError::NoWindow)?;
    let document = window.document().ok_or(WebError::NoDocument)?;

    inject_base_styles(&document);
    let region = WebLiveRegion::ensure(&document, &config.controls.live_region)
        .map_err(|err| WebError::js("live region", &err))?;
    let controller = Rc::new(RefCell::new(A11yController::new(
        config,
        open_preference_store(),
        WebDocument::new(document.clone()),
        Rc::new(region),
        WindowScheduler::new(window.clone()),
    )));
    {
        let mut ctl = controller.borrow_mut();
        ctl.restore();
        ctl.enable_script_focus();
    }

    run_step("toggle controls", wire_toggles(&document, &controller));
    for media in MediaPreference::ALL {
        let target = Rc::clone(&controller);
        run_step(
            "media watcher",
            watch_media(&window, media, move |matches| {
                target.borrow_mut().apply_media(media, matches);
            }),
        );
    }

    backfill_image_alts(&document, &config.messages.default_image_alt);
    run_step(
        "print button",
        install_print_button(
            &window,
            &document,
            &config.selectors.print_container,
            &config.messages.print_label,
        ),
    );
    let reachable = enforce_tab_order(&document, &config.selectors.focusable);
    log::debug!("{reachable} element(s) moved into the tab order");

    let keyboard = Rc::clone(&controller);
    run_step(
        "keyboard mode",
        install_keyboard_mode_listener(&document, move |key| {
            keyboard.borrow_mut().observe_key(key)
        }),
    );
    run_step(
        "skip link",
        watch_skip_link(&document, &config.selectors.skip_link),
    );
    run_step("resize", wire_resize(&window, config));

    log::info!("accessibility layer ready");
    Ok(controller)
}

fn wire_toggles(document: &Document, controller: &SharedController) -> Result<(), WebError> {
    let specs = controller.borrow().toggles().to_vec();
    for spec in specs {
        let Some(control) = document.get_element_by_id(&spec.control_id) else {
            log::debug!("toggle control #{} not on page", spec.control_id);
            continue;
        };
        let preference = spec.preference;

        let on_click = {
            let controller = Rc::clone(controller);
            Closure::<dyn FnMut()>::new(move || {
                controller
                    .borrow_mut()
                    .activate(preference, &Activation::Click);
            })
        };
        control
            .add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
            .map_err(|err| WebError::js("toggle click", &err))?;
        on_click.forget();

        // Native buttons already turn Enter and Space into a click.
        if control.dyn_ref::<HtmlButtonElement>().is_some() {
            continue;
        }
        let on_keydown = {
            let controller = Rc::clone(controller);
            Closure::<dyn FnMut(KeyboardEvent)>::new(move |event: KeyboardEvent| {
                let key = event.key();
                if !is_activation_key(&key) {
                    return;
                }
                event.prevent_default();
                controller
                    .borrow_mut()
                    .activate(preference, &Activation::Key(key));
            })
        };
        control
            .add_event_listener_with_callback("keydown", on_keydown.as_ref().unchecked_ref())
            .map_err(|err| WebError::js("toggle keydown", &err))?;
        on_keydown.forget();
    }
    Ok(())
}

fn wire_resize(window: &Window, config: &A11yConfig) -> Result<(), WebError> {
    let viewport = window.clone();
    let debouncer = Rc::new(RefCell::new(Debouncer::new(
        WindowScheduler::new(window.clone()),
        config.timing.resize_debounce(),
        move || {
            let width = viewport
                .inner_width()
                .ok()
                .and_then(|width| width.as_f64())
                .unwrap_or_default();
            log::debug!("viewport settled at {width}px");
        },
    )));
    let on_resize = Closure::<dyn FnMut()>::new(move || debouncer.borrow_mut().trigger());
    window
        .add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())
        .map_err(|err| WebError::js("resize listener", &err))?;
    on_resize.forget();
    Ok(())
}
