//! Two-state preference toggles and what activates them.
use serde::{Deserialize, Serialize};

use crate::config::A11yConfig;
use crate::prefs::Preference;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToggleState {
    On,
    Off,
}

impl ToggleState {
    #[must_use]
    pub const fn from_bool(on: bool) -> Self {
        if on { Self::On } else { Self::Off }
    }

    #[must_use]
    pub const fn is_on(self) -> bool {
        matches!(self, Self::On)
    }

    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::On => Self::Off,
            Self::Off => Self::On,
        }
    }
}

/// Everything that distinguishes one toggle instance from another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleSpec {
    pub preference: Preference,
    pub control_id: String,
    pub on_message: String,
    pub off_message: String,
}

impl ToggleSpec {
    #[must_use]
    pub fn from_config(preference: Preference, config: &A11yConfig) -> Self {
        let (control_id, on_message, off_message) = match preference {
            Preference::HighContrast => (
                &config.controls.high_contrast,
                &config.messages.high_contrast_on,
                &config.messages.high_contrast_off,
            ),
            Preference::LargeText => (
                &config.controls.large_text,
                &config.messages.large_text_on,
                &config.messages.large_text_off,
            ),
        };
        Self {
            preference,
            control_id: control_id.clone(),
            on_message: on_message.clone(),
            off_message: off_message.clone(),
        }
    }

    /// Both toggles in page order.
    #[must_use]
    pub fn all_from_config(config: &A11yConfig) -> Vec<Self> {
        Preference::ALL
            .iter()
            .map(|pref| Self::from_config(*pref, config))
            .collect()
    }

    #[must_use]
    pub fn message_for(&self, state: ToggleState) -> &str {
        match state {
            ToggleState::On => &self.on_message,
            ToggleState::Off => &self.off_message,
        }
    }
}

/// A user gesture delivered to a toggle control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activation {
    Click,
    Key(String),
}

impl Activation {
    #[must_use]
    pub fn activates(&self) -> bool {
        match self {
            Self::Click => true,
            Self::Key(key) => is_activation_key(key),
        }
    }
}

/// `KeyboardEvent.key` values that press a toggle. `"Spacebar"` is what older
/// Edge and IE report for Space.
#[must_use]
pub fn is_activation_key(key: &str) -> bool {
    matches!(key, "Enter" | " " | "Spacebar")
}
