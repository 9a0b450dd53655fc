#![forbid(unsafe_code)]
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

pub mod a11y;
pub mod augment;
pub mod bootstrap;
pub mod dom;
pub mod error;
pub mod logging;
pub mod media;
pub mod scheduler;
pub mod storage;
pub mod surface;
pub mod test_bridge;

pub use augment::{FocusTrap, trap_focus};
pub use error::WebError;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    logging::init_logging(log::LevelFilter::Info);

    let Some(document) = dom::document() else {
        log::error!("accessibility layer needs a document");
        return;
    };
    dom::when_ready(&document, || {
        let config = bootstrap::page_config();
        logging::init_logging(config.logging.level_filter());
        match bootstrap::boot(&config) {
            Ok(controller) => {
                if dom::test_mode_enabled() {
                    test_bridge::install(&controller);
                }
            }
            Err(err) => log::error!("accessibility layer disabled: {err}"),
        }
    });
}
