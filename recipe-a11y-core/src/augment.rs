//! Decisions behind the load-time page augmentations.
//!
//! The browser crate walks the DOM; these functions decide what each element
//! should become so the rules can be tested without a browser.

use crate::constants::DEFAULT_TAB_INDEX;

/// Alt text to set on an image, or `None` to leave it alone.
/// An existing attribute is respected even when empty (`alt=""` marks decoration).
#[must_use]
pub fn backfill_alt(existing: Option<&str>, default_alt: &str) -> Option<String> {
    match existing {
        Some(_) => None,
        None => Some(default_alt.to_string()),
    }
}

/// Tab index to force onto an interactive element, or `None` if it already
/// sits in the default tab order.
#[must_use]
pub fn normalized_tab_index(existing: Option<&str>) -> Option<&'static str> {
    match existing.map(str::trim) {
        Some(DEFAULT_TAB_INDEX) => None,
        _ => Some(DEFAULT_TAB_INDEX),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Detector already fired or the key is not Tab.
    Ignored,
    /// First Tab press: the page is now in keyboard-navigation mode.
    EnteredKeyboardMode,
}

/// Fires once on the first Tab press, then stays detached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyboardModeDetector {
    armed: bool,
}

impl Default for KeyboardModeDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyboardModeDetector {
    #[must_use]
    pub const fn new() -> Self {
        Self { armed: true }
    }

    #[must_use]
    pub const fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn observe_key(&mut self, key: &str) -> KeyOutcome {
        if self.armed && key == "Tab" {
            self.armed = false;
            KeyOutcome::EnteredKeyboardMode
        } else {
            KeyOutcome::Ignored
        }
    }

    pub fn detach(&mut self) {
        self.armed = false;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusChange {
    Focus,
    Blur,
}

impl FocusChange {
    /// Whether the skip link should carry the focus-visible marker.
    #[must_use]
    pub const fn marks_visible(self) -> bool {
        matches!(self, Self::Focus)
    }
}

/// Index of the element that should receive focus when Tab is pressed inside
/// a focus trap, or `None` to let the browser move focus normally.
///
/// `active` is the position of the focused element among the trap's focusable
/// elements; `None` means focus is outside the container.
#[must_use]
pub const fn focus_trap_target(active: Option<usize>, len: usize, shift: bool) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let last = len - 1;
    match active {
        None => Some(0),
        Some(0) if shift => Some(last),
        Some(idx) if !shift && idx == last => Some(0),
        Some(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_alt_gets_default_but_empty_alt_is_kept() {
        assert_eq!(
            backfill_alt(None, "Decorative image").as_deref(),
            Some("Decorative image")
        );
        assert_eq!(backfill_alt(Some(""), "Decorative image"), None);
        assert_eq!(backfill_alt(Some("Bowl of ramen"), "Decorative image"), None);
    }

    #[test]
    fn tab_index_is_forced_to_zero() {
        assert_eq!(normalized_tab_index(None), Some("0"));
        assert_eq!(normalized_tab_index(Some("3")), Some("0"));
        assert_eq!(normalized_tab_index(Some("-1")), Some("0"));
        assert_eq!(normalized_tab_index(Some("0")), None);
        assert_eq!(normalized_tab_index(Some(" 0 ")), None);
    }

    #[test]
    fn keyboard_detector_fires_once_on_tab() {
        let mut detector = KeyboardModeDetector::new();
        assert_eq!(detector.observe_key("a"), KeyOutcome::Ignored);
        assert!(detector.is_armed());
        assert_eq!(detector.observe_key("Tab"), KeyOutcome::EnteredKeyboardMode);
        assert!(!detector.is_armed());
        assert_eq!(detector.observe_key("Tab"), KeyOutcome::Ignored);
    }

    #[test]
    fn detached_detector_ignores_tab() {
        let mut detector = KeyboardModeDetector::default();
        detector.detach();
        assert_eq!(detector.observe_key("Tab"), KeyOutcome::Ignored);
    }

    #[test]
    fn skip_link_marker_follows_focus() {
        assert!(FocusChange::Focus.marks_visible());
        assert!(!FocusChange::Blur.marks_visible());
    }

    #[test]
    fn focus_trap_wraps_at_both_ends() {
        assert_eq!(focus_trap_target(Some(2), 3, false), Some(0));
        assert_eq!(focus_trap_target(Some(0), 3, true), Some(2));
        assert_eq!(focus_trap_target(Some(1), 3, false), None);
        assert_eq!(focus_trap_target(Some(1), 3, true), None);
        assert_eq!(focus_trap_target(None, 3, true), Some(0));
        assert_eq!(focus_trap_target(None, 0, false), None);
        assert_eq!(focus_trap_target(Some(0), 1, false), Some(0));
    }
}
