//! `localStorage` as a preference backend.
use recipe_a11y_core::{PreferenceStorage, PreferenceStore};
use web_sys::Storage;

use crate::dom::{self, js_error_message};

#[derive(Debug, thiserror::Error)]
pub enum WebStorageError {
    #[error("localStorage unavailable: {0}")]
    Unavailable(String),
    #[error("Storage error: {0}")]
    Storage(String),
}

/// Web-specific preference storage using localStorage
pub struct LocalStorageBackend {
    storage: Storage,
}

impl LocalStorageBackend {
    /// Open the origin's `localStorage`.
    ///
    /// # Errors
    /// Returns an error if there is no window, or the browser denies storage
    /// access (privacy mode, disabled cookies, sandboxed frames).
    pub fn open() -> Result<Self, WebStorageError> {
        let win = dom::window()
            .ok_or_else(|| WebStorageError::Unavailable(String::from("no window")))?;
        let storage = win
            .local_storage()
            .map_err(|err| WebStorageError::Unavailable(js_error_message(&err)))?
            .ok_or_else(|| WebStorageError::Unavailable(String::from("not provided")))?;
        Ok(Self { storage })
    }
}

impl PreferenceStorage for LocalStorageBackend {
    type Error = WebStorageError;

    fn get_item(&self, key: &str) -> Result<Option<String>, Self::Error> {
        self.storage
            .get_item(key)
            .map_err(|err| WebStorageError::Storage(js_error_message(&err)))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        self.storage
            .set_item(key, value)
            .map_err(|err| WebStorageError::Storage(js_error_message(&err)))
    }
}

/// A persistent store when `localStorage` opens, otherwise a session-only one.
#[must_use]
pub fn open_preference_store() -> PreferenceStore<LocalStorageBackend> {
    match LocalStorageBackend::open() {
        Ok(backend) => PreferenceStore::new(backend),
        Err(err) => {
            log::warn!("{err}; preferences will last for this page only");
            PreferenceStore::session_only()
        }
    }
}
