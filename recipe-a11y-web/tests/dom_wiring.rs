#![cfg(target_arch = "wasm32")]

use std::cell::Cell;
use std::rc::Rc;

use recipe_a11y_core::{A11yConfig, LiveRegion, Preference, StoreMode};
use recipe_a11y_web::augment::{
    backfill_image_alts, enforce_tab_order, install_print_button, watch_skip_link,
};
use recipe_a11y_web::dom;
use recipe_a11y_web::surface::WebLiveRegion;
use recipe_a11y_web::test_bridge::BridgeSnapshot;
use recipe_a11y_web::{bootstrap, trap_focus};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Document, Element, Event, HtmlElement, KeyboardEvent, KeyboardEventInit};

wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

fn doc() -> Document {
    dom::document().expect("document")
}

fn reset_page(html: &str) -> Element {
    let doc = doc();
    let body = doc.body().expect("document body");
    body.set_inner_html(html);
    let root = doc.document_element().expect("root element");
    root.set_class_name("");
    let _ = root.remove_attribute("data-theme");
    if let Some(storage) = dom::window().and_then(|win| win.local_storage().ok().flatten()) {
        let _ = storage.clear();
    }
    root
}

fn element(id: &str) -> HtmlElement {
    doc()
        .get_element_by_id(id)
        .expect("element exists")
        .dyn_into::<HtmlElement>()
        .expect("html element")
}

fn press(target: &Element, key: &str, shift: bool) -> KeyboardEvent {
    let init = KeyboardEventInit::new();
    init.set_key(key);
    init.set_shift_key(shift);
    init.set_bubbles(true);
    init.set_cancelable(true);
    let event = KeyboardEvent::new_with_keyboard_event_init_dict("keydown", &init)
        .expect("keyboard event");
    target.dispatch_event(&event).expect("dispatch");
    event
}

const PAGE: &str = r##"
    <a class="skip-link" href="#main">Skip</a>
    <header class="recipe-header">
      <button id="contrast-toggle" type="button">Contrast</button>
      <span id="font-size-toggle" role="button">Text</span>
    </header>
    <main id="main">
      <img id="plain" src="a.png">
      <img id="decor" src="b.png" alt="">
      <a id="link" href="/x" tabindex="5">Link</a>
    </main>
"##;

#[wasm_bindgen_test]
fn images_without_alt_are_backfilled() {
    reset_page(PAGE);
    assert_eq!(backfill_image_alts(&doc(), "Decorative image"), 1);
    assert_eq!(
        element("plain").get_attribute("alt").as_deref(),
        Some("Decorative image")
    );
    assert_eq!(element("decor").get_attribute("alt").as_deref(), Some(""));
}

#[wasm_bindgen_test]
fn print_button_lands_in_header() {
    reset_page(PAGE);
    let win = dom::window().expect("window");
    assert!(install_print_button(&win, &doc(), ".recipe-header", "Print recipe").unwrap());
    let button = doc()
        .query_selector(".recipe-header > button.print-button")
        .unwrap()
        .expect("print button");
    assert_eq!(button.get_attribute("type").as_deref(), Some("button"));
    assert_eq!(button.text_content().as_deref(), Some("Print recipe"));
    assert!(!install_print_button(&win, &doc(), ".missing", "Print recipe").unwrap());
}

#[wasm_bindgen_test]
fn interactive_elements_join_tab_order() {
    reset_page(PAGE);
    enforce_tab_order(&doc(), "button, a[href]");
    assert_eq!(element("link").get_attribute("tabindex").as_deref(), Some("0"));
    assert_eq!(
        element("contrast-toggle").get_attribute("tabindex").as_deref(),
        Some("0")
    );
}

#[wasm_bindgen_test]
fn skip_link_marks_focus() {
    reset_page(PAGE);
    assert!(watch_skip_link(&doc(), ".skip-link").unwrap());
    let link = doc().query_selector(".skip-link").unwrap().expect("skip link");
    link.dispatch_event(&Event::new("focus").unwrap()).unwrap();
    assert!(link.class_list().contains("focus-visible"));
    link.dispatch_event(&Event::new("blur").unwrap()).unwrap();
    assert!(!link.class_list().contains("focus-visible"));
}

#[wasm_bindgen_test]
fn missing_skip_link_is_skipped() {
    reset_page("<main><p>No links here</p></main>");
    assert!(!watch_skip_link(&doc(), ".skip-link").unwrap());
}

#[wasm_bindgen_test]
fn inline_config_overrides_embedded_defaults() {
    reset_page(
        r#"<script type="application/json" id="a11y-config">
             {"messages": {"print_label": "Imprimer la recette"}}
           </script>"#,
    );
    let config = bootstrap::page_config();
    assert_eq!(config.messages.print_label, "Imprimer la recette");
    assert_eq!(config.controls.high_contrast, "contrast-toggle");
}

#[wasm_bindgen_test]
fn invalid_inline_config_keeps_embedded_defaults() {
    reset_page(
        r#"<script type="application/json" id="a11y-config">
             {"timing": {"announce_clear_ms": 0}}
           </script>"#,
    );
    assert_eq!(bootstrap::page_config(), A11yConfig::load_from_static());
}

#[wasm_bindgen_test]
fn empty_inline_config_keeps_embedded_defaults() {
    reset_page(r#"<script type="application/json" id="a11y-config"></script>"#);
    assert_eq!(bootstrap::page_config(), A11yConfig::load_from_static());
}

#[wasm_bindgen_test]
fn boot_survives_a_page_without_toggles() {
    let root = reset_page("<main><img id=\"plain\" src=\"a.png\"></main>");
    let controller = bootstrap::boot(&bootstrap::page_config()).expect("boot");
    assert!(root.class_list().contains("js-focus-visible"));
    assert!(!controller.borrow().state().preference(Preference::HighContrast));
    assert_eq!(
        element("plain").get_attribute("alt").as_deref(),
        Some("Decorative image")
    );
    controller.borrow_mut().toggle(Preference::HighContrast);
    assert!(root.class_list().contains("high-contrast"));
}

#[wasm_bindgen_test]
fn live_region_is_created_once() {
    reset_page(PAGE);
    let first = WebLiveRegion::ensure(&doc(), "a11y-announcer").expect("region");
    let _second = WebLiveRegion::ensure(&doc(), "a11y-announcer").expect("region");
    assert_eq!(
        doc().query_selector_all("#a11y-announcer").unwrap().length(),
        1
    );
    let region = first.element();
    assert_eq!(region.get_attribute("aria-live").as_deref(), Some("polite"));
    assert_eq!(region.get_attribute("aria-atomic").as_deref(), Some("true"));
    first.set_text("Hello");
    assert_eq!(first.text(), "Hello");
}

#[wasm_bindgen_test]
fn boot_wires_toggles_and_keyboard_mode() {
    let root = reset_page(PAGE);
    let config = bootstrap::page_config();
    let controller = bootstrap::boot(&config).expect("boot");
    assert!(root.class_list().contains("js-focus-visible"));

    element("contrast-toggle").click();
    assert!(root.class_list().contains("high-contrast"));
    assert_eq!(
        element("contrast-toggle")
            .get_attribute("aria-pressed")
            .as_deref(),
        Some("true")
    );
    let snapshot = BridgeSnapshot::capture(&controller);
    assert_eq!(snapshot.store_mode, StoreMode::Persistent);
    assert_eq!(snapshot.live_text, "High contrast mode enabled");

    let text_toggle = doc().get_element_by_id("font-size-toggle").unwrap();
    press(&text_toggle, "Enter", false);
    assert!(controller.borrow().state().preference(Preference::LargeText));
    press(&text_toggle, "x", false);
    assert!(controller.borrow().state().preference(Preference::LargeText));

    assert!(!root.class_list().contains("keyboard-navigation"));
    press(&text_toggle, "Tab", false);
    assert!(root.class_list().contains("keyboard-navigation"));
}

#[wasm_bindgen_test]
fn focus_trap_wraps_forward_and_back() {
    reset_page(
        r#"<div id="dialog"><button id="first">A</button><button id="last">B</button></div>
           <button id="outside">C</button>"#,
    );
    let dialog = doc().get_element_by_id("dialog").unwrap();
    let mut trap = trap_focus(&dialog).expect("trap");

    element("last").focus().unwrap();
    let event = press(&element("last"), "Tab", false);
    assert!(event.default_prevented());
    assert_eq!(
        doc().active_element().map(|el| el.id()).as_deref(),
        Some("first")
    );

    press(&element("first"), "Tab", true);
    assert_eq!(
        doc().active_element().map(|el| el.id()).as_deref(),
        Some("last")
    );

    trap.release();
    element("last").focus().unwrap();
    let released = press(&element("last"), "Tab", false);
    assert!(!released.default_prevented());
}

#[wasm_bindgen_test]
fn media_watcher_reports_initial_state() {
    reset_page(PAGE);
    let seen = Rc::new(Cell::new(None));
    let sink = Rc::clone(&seen);
    let win = dom::window().expect("window");
    let watched = recipe_a11y_web::media::watch_media(
        &win,
        recipe_a11y_core::MediaPreference::ReducedMotion,
        move |matches| sink.set(Some(matches)),
    )
    .expect("watch");
    assert!(watched);
    assert!(seen.get().is_some());
}
