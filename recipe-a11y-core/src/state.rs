//! Application state and the document view derived from it.
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::constants::{
    HIGH_CONTRAST_CLASS, JS_FOCUS_VISIBLE_CLASS, KEYBOARD_NAVIGATION_CLASS, LARGE_TEXT_CLASS,
    REDUCED_MOTION_CLASS,
};
use crate::prefs::Preference;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    #[must_use]
    pub const fn from_dark(dark: bool) -> Self {
        if dark { Self::Dark } else { Self::Light }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

/// Single source of truth for everything the layer reflects onto the page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct A11yState {
    pub high_contrast: bool,
    pub large_text: bool,
    pub reduced_motion: bool,
    /// `None` until a color-scheme watcher reports; the page keeps its own default.
    pub theme: Option<Theme>,
    pub keyboard_navigation: bool,
    pub script_focus: bool,
}

impl A11yState {
    #[must_use]
    pub const fn preference(&self, preference: Preference) -> bool {
        match preference {
            Preference::HighContrast => self.high_contrast,
            Preference::LargeText => self.large_text,
        }
    }

    pub fn set_preference(&mut self, preference: Preference, enabled: bool) {
        match preference {
            Preference::HighContrast => self.high_contrast = enabled,
            Preference::LargeText => self.large_text = enabled,
        }
    }

    /// Root classes and theme implied by this state.
    #[must_use]
    pub fn view(&self) -> DocumentView {
        let mut classes = SmallVec::new();
        let flags = [
            (self.high_contrast, HIGH_CONTRAST_CLASS),
            (self.large_text, LARGE_TEXT_CLASS),
            (self.reduced_motion, REDUCED_MOTION_CLASS),
            (self.keyboard_navigation, KEYBOARD_NAVIGATION_CLASS),
            (self.script_focus, JS_FOCUS_VISIBLE_CLASS),
        ];
        for (on, class) in flags {
            if on {
                classes.push(class);
            }
        }
        DocumentView {
            classes,
            theme: self.theme,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentView {
    pub classes: SmallVec<[&'static str; 5]>,
    pub theme: Option<Theme>,
}

impl DocumentView {
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(&class)
    }
}
