//! `setTimeout`-backed [`Scheduler`].
use recipe_a11y_core::{Scheduler, Task};
use std::time::Duration;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::Window;

use crate::dom::js_error_message;

#[derive(Clone)]
pub struct WindowScheduler {
    window: Window,
}

/// Owns the JS callback until the timeout is cancelled or replaced.
pub struct TimeoutHandle {
    id: Option<i32>,
    callback: Closure<dyn FnMut()>,
}

impl WindowScheduler {
    #[must_use]
    pub const fn new(window: Window) -> Self {
        Self { window }
    }
}

fn clamp_millis(delay: Duration) -> i32 {
    i32::try_from(delay.as_millis()).unwrap_or(i32::MAX)
}

impl Scheduler for WindowScheduler {
    type Handle = TimeoutHandle;

    fn schedule(&self, delay: Duration, task: Task) -> TimeoutHandle {
        let callback = Closure::once(move || task());
        let id = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.as_ref().unchecked_ref(),
                clamp_millis(delay),
            )
            .map_err(|err| log::error!("setTimeout failed: {}", js_error_message(&err)))
            .ok();
        TimeoutHandle { id, callback }
    }

    fn cancel(&self, handle: TimeoutHandle) {
        if let Some(id) = handle.id {
            self.window.clear_timeout_with_handle(id);
        }
        drop(handle.callback);
    }

    fn detach(&self, handle: TimeoutHandle) {
        // The browser still holds the callback; it must outlive this handle.
        handle.callback.forget();
    }

    fn schedule_detached(&self, delay: Duration, task: Task) {
        // `once_into_js` frees the Rust side after the single call.
        let callback = Closure::once_into_js(move || task());
        if let Err(err) = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.unchecked_ref(),
                clamp_millis(delay),
            )
        {
            log::error!("setTimeout failed: {}", js_error_message(&err));
        }
    }
}
