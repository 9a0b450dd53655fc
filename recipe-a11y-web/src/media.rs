//! `matchMedia` watchers.
use recipe_a11y_core::MediaPreference;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{MediaQueryList, MediaQueryListEvent, Window};

use crate::dom::js_error_message;
use crate::error::WebError;

fn query_list(window: &Window, media: MediaPreference) -> Option<MediaQueryList> {
    match window.match_media(media.query()) {
        Ok(list) => list,
        Err(err) => {
            log::info!("matchMedia unavailable: {}", js_error_message(&err));
            None
        }
    }
}

/// Report the current match state of `media` to `on_change`, then every
/// change for the rest of the page. Returns `Ok(false)` when the browser
/// cannot evaluate the query, in which case `on_change` is never called.
///
/// # Errors
/// Returns the JS exception if the change listener cannot be attached.
pub fn watch_media<F>(
    window: &Window,
    media: MediaPreference,
    on_change: F,
) -> Result<bool, WebError>
where
    F: Fn(bool) + 'static,
{
    let Some(list) = query_list(window, media) else {
        log::info!("skipping {media:?} watcher");
        return Ok(false);
    };
    on_change(list.matches());
    let listener = Closure::<dyn FnMut(MediaQueryListEvent)>::new(
        move |event: MediaQueryListEvent| on_change(event.matches()),
    );
    list.add_event_listener_with_callback("change", listener.as_ref().unchecked_ref())
        .map_err(|err| WebError::js("media listener", &err))?;
    listener.forget();
    Ok(true)
}
