//! Persisted boolean preferences with a session-only fallback.
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::HashMap;
use std::convert::Infallible;
use std::rc::Rc;

use crate::constants::{
    HIGH_CONTRAST_CLASS, HIGH_CONTRAST_KEY, LARGE_TEXT_CLASS, LARGE_TEXT_KEY, STORED_FALSE,
    STORED_TRUE,
};

/// A user-controlled visual preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Preference {
    HighContrast,
    LargeText,
}

impl Preference {
    pub const ALL: [Self; 2] = [Self::HighContrast, Self::LargeText];

    #[must_use]
    pub const fn storage_key(self) -> &'static str {
        match self {
            Self::HighContrast => HIGH_CONTRAST_KEY,
            Self::LargeText => LARGE_TEXT_KEY,
        }
    }

    #[must_use]
    pub const fn marker_class(self) -> &'static str {
        match self {
            Self::HighContrast => HIGH_CONTRAST_CLASS,
            Self::LargeText => LARGE_TEXT_CLASS,
        }
    }
}

/// Only the exact string `"true"` counts as enabled.
#[must_use]
pub fn parse_flag(raw: Option<&str>) -> bool {
    raw == Some(STORED_TRUE)
}

#[must_use]
pub const fn encode_flag(enabled: bool) -> &'static str {
    if enabled { STORED_TRUE } else { STORED_FALSE }
}

/// Trait for abstracting the per-origin key-value store.
/// Platform-specific implementations should provide this.
pub trait PreferenceStorage {
    type Error: std::error::Error + 'static;

    /// Read a raw value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, Self::Error>;

    /// Write a raw value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store rejects the write (disabled, quota exceeded).
    fn set_item(&self, key: &str, value: &str) -> Result<(), Self::Error>;
}

/// In-memory storage. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_item(self, key: &str, value: &str) -> Self {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        self
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }
}

impl PreferenceStorage for MemoryStorage {
    type Error = Infallible;

    fn get_item(&self, key: &str) -> Result<Option<String>, Self::Error> {
        Ok(self.get(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StoreMode {
    Persistent,
    SessionOnly,
}

/// Preference store that degrades to session memory when the backend fails.
///
/// Every write lands in the session map first, so values written this session
/// survive a backend failure. A failed read only falls back to the session map
/// for that key; a failed write drops the backend for the rest of the page.
pub struct PreferenceStore<S> {
    backend: Option<S>,
    session: HashMap<String, String>,
}

impl<S: PreferenceStorage> PreferenceStore<S> {
    pub fn new(backend: S) -> Self {
        Self {
            backend: Some(backend),
            session: HashMap::new(),
        }
    }

    /// A store with no backend at all, for when the platform store cannot be opened.
    #[must_use]
    pub fn session_only() -> Self {
        Self {
            backend: None,
            session: HashMap::new(),
        }
    }

    #[must_use]
    pub const fn mode(&self) -> StoreMode {
        if self.backend.is_some() {
            StoreMode::Persistent
        } else {
            StoreMode::SessionOnly
        }
    }

    pub fn get(&mut self, key: &str) -> Option<String> {
        let Some(backend) = self.backend.as_ref() else {
            return self.session.get(key).cloned();
        };
        match backend.get_item(key) {
            Ok(value) => value,
            Err(err) => {
                log::warn!("reading preference {key:?} failed, using session value: {err}");
                self.session.get(key).cloned()
            }
        }
    }

    pub fn set(&mut self, key: &str, value: &str) {
        self.session.insert(key.to_string(), value.to_string());
        let Some(backend) = self.backend.as_ref() else {
            return;
        };
        if let Err(err) = backend.set_item(key, value) {
            self.degrade(key, &err);
        }
    }

    pub fn read_flag(&mut self, key: &str) -> bool {
        parse_flag(self.get(key).as_deref())
    }

    pub fn write_flag(&mut self, key: &str, enabled: bool) {
        self.set(key, encode_flag(enabled));
    }

    fn degrade(&mut self, key: &str, err: &S::Error) {
        log::warn!(
            "preference storage failed on {key:?}, keeping preferences for this session only: {err}"
        );
        self.backend = None;
    }
}
