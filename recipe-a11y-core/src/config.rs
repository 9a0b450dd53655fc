//! Page contract, messages and timing, loaded from JSON.
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use crate::announce::ClearPolicy;
use crate::constants::{
    ANNOUNCE_CLEAR_MS, DEFAULT_IMAGE_ALT, FOCUSABLE_SELECTOR, HIGH_CONTRAST_CONTROL_ID,
    LARGE_TEXT_CONTROL_ID, LIVE_REGION_ID, PRINT_CONTAINER_SELECTOR, PRINT_LABEL,
    RESIZE_DEBOUNCE_MS, SKIP_LINK_SELECTOR,
};

const DEFAULT_CONFIG_DATA: &str = include_str!("../../recipe-a11y-web/static/a11y.json");

static STATIC_CONFIG: Lazy<A11yConfig> = Lazy::new(|| {
    A11yConfig::from_json(DEFAULT_CONFIG_DATA).unwrap_or_else(|err| {
        log::warn!("embedded accessibility config rejected, using defaults: {err}");
        A11yConfig::default()
    })
});

/// Errors raised when a configuration document is malformed or violates invariants.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{field} must not be empty")]
    Empty { field: &'static str },
    #[error("{field} must be greater than zero")]
    ZeroDelay { field: &'static str },
    #[error("unknown log level {0:?}")]
    LogLevel(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct A11yConfig {
    pub controls: ControlIds,
    pub selectors: Selectors,
    pub messages: Messages,
    pub timing: Timing,
    pub logging: Logging,
}

/// Element ids of the controls the page must provide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlIds {
    pub high_contrast: String,
    pub large_text: String,
    pub live_region: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Selectors {
    pub print_container: String,
    pub skip_link: String,
    pub focusable: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Messages {
    pub high_contrast_on: String,
    pub high_contrast_off: String,
    pub large_text_on: String,
    pub large_text_off: String,
    pub print_label: String,
    pub default_image_alt: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timing {
    pub announce_clear_ms: u32,
    pub resize_debounce_ms: u32,
    pub announce_policy: ClearPolicy,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Logging {
    pub level: String,
}

impl Default for ControlIds {
    fn default() -> Self {
        Self {
            high_contrast: HIGH_CONTRAST_CONTROL_ID.to_string(),
            large_text: LARGE_TEXT_CONTROL_ID.to_string(),
            live_region: LIVE_REGION_ID.to_string(),
        }
    }
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            print_container: PRINT_CONTAINER_SELECTOR.to_string(),
            skip_link: SKIP_LINK_SELECTOR.to_string(),
            focusable: FOCUSABLE_SELECTOR.to_string(),
        }
    }
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            high_contrast_on: String::from("High contrast mode enabled"),
            high_contrast_off: String::from("High contrast mode disabled"),
            large_text_on: String::from("Large text mode enabled"),
            large_text_off: String::from("Large text mode disabled"),
            print_label: PRINT_LABEL.to_string(),
            default_image_alt: DEFAULT_IMAGE_ALT.to_string(),
        }
    }
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            announce_clear_ms: ANNOUNCE_CLEAR_MS,
            resize_debounce_ms: RESIZE_DEBOUNCE_MS,
            announce_policy: ClearPolicy::default(),
        }
    }
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            level: String::from("info"),
        }
    }
}

impl Timing {
    #[must_use]
    pub fn announce_clear(&self) -> Duration {
        Duration::from_millis(u64::from(self.announce_clear_ms))
    }

    #[must_use]
    pub fn resize_debounce(&self) -> Duration {
        Duration::from_millis(u64::from(self.resize_debounce_ms))
    }
}

impl Logging {
    /// Parsed level filter; unknown names were rejected by validation.
    #[must_use]
    pub fn level_filter(&self) -> log::LevelFilter {
        self.level.parse().unwrap_or(log::LevelFilter::Info)
    }
}

impl A11yConfig {
    /// The configuration embedded in the binary, parsed once.
    #[must_use]
    pub fn load_from_static() -> Self {
        STATIC_CONFIG.clone()
    }

    /// Parse and validate a configuration document.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or a field violates its invariant.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check field invariants.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("controls.high_contrast", &self.controls.high_contrast),
            ("controls.large_text", &self.controls.large_text),
            ("controls.live_region", &self.controls.live_region),
            ("selectors.print_container", &self.selectors.print_container),
            ("selectors.skip_link", &self.selectors.skip_link),
            ("selectors.focusable", &self.selectors.focusable),
        ];
        if let Some((field, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(ConfigError::Empty { field });
        }
        if self.timing.announce_clear_ms == 0 {
            return Err(ConfigError::ZeroDelay {
                field: "timing.announce_clear_ms",
            });
        }
        if self.timing.resize_debounce_ms == 0 {
            return Err(ConfigError::ZeroDelay {
                field: "timing.resize_debounce_ms",
            });
        }
        if self.logging.level.parse::<log::LevelFilter>().is_err() {
            return Err(ConfigError::LogLevel(self.logging.level.clone()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_config_matches_defaults() {
        assert_eq!(A11yConfig::load_from_static(), A11yConfig::default());
    }

    #[test]
    fn partial_documents_fill_in_defaults() {
        let cfg = A11yConfig::from_json(r#"{ "timing": { "announce_clear_ms": 300 } }"#).unwrap();
        assert_eq!(cfg.timing.announce_clear_ms, 300);
        assert_eq!(cfg.timing.resize_debounce_ms, RESIZE_DEBOUNCE_MS);
        assert_eq!(cfg.controls.high_contrast, HIGH_CONTRAST_CONTROL_ID);
        assert_eq!(cfg.timing.announce_clear(), Duration::from_millis(300));
    }

    #[test]
    fn overlap_policy_parses_from_kebab_case() {
        let cfg =
            A11yConfig::from_json(r#"{ "timing": { "announce_policy": "overlap" } }"#).unwrap();
        assert_eq!(cfg.timing.announce_policy, ClearPolicy::Overlap);
    }

    #[test]
    fn validation_rejects_zero_delays_and_blank_ids() {
        let err = A11yConfig::from_json(r#"{ "timing": { "resize_debounce_ms": 0 } }"#)
            .expect_err("zero debounce rejected");
        assert!(matches!(
            err,
            ConfigError::ZeroDelay {
                field: "timing.resize_debounce_ms"
            }
        ));

        let err = A11yConfig::from_json(r#"{ "controls": { "large_text": "  " } }"#)
            .expect_err("blank control id rejected");
        assert_eq!(err.to_string(), "controls.large_text must not be empty");
    }

    #[test]
    fn validation_rejects_unknown_log_level() {
        let err = A11yConfig::from_json(r#"{ "logging": { "level": "chatty" } }"#)
            .expect_err("bad level rejected");
        assert!(matches!(err, ConfigError::LogLevel(level) if level == "chatty"));
        let cfg = A11yConfig::from_json(r#"{ "logging": { "level": "debug" } }"#).unwrap();
        assert_eq!(cfg.logging.level_filter(), log::LevelFilter::Debug);
    }

    #[test]
    fn malformed_json_is_reported() {
        let err = A11yConfig::from_json("{ not json").expect_err("parse failure");
        assert!(err.to_string().starts_with("JSON parsing error"));
    }
}
