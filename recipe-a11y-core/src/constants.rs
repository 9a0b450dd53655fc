//! Names and defaults shared by the core and the browser bindings.
//!
//! Class names and the theme attribute form the contract with the page's
//! stylesheet and are deliberately not configurable.

// Persisted keys
pub const HIGH_CONTRAST_KEY: &str = "highContrast";
pub const LARGE_TEXT_KEY: &str = "largeText";
pub const STORED_TRUE: &str = "true";
pub const STORED_FALSE: &str = "false";

// Root markers
pub const HIGH_CONTRAST_CLASS: &str = "high-contrast";
pub const LARGE_TEXT_CLASS: &str = "large-text";
pub const REDUCED_MOTION_CLASS: &str = "reduced-motion";
pub const KEYBOARD_NAVIGATION_CLASS: &str = "keyboard-navigation";
pub const JS_FOCUS_VISIBLE_CLASS: &str = "js-focus-visible";
pub const FOCUS_VISIBLE_CLASS: &str = "focus-visible";
pub const THEME_ATTRIBUTE: &str = "data-theme";
pub const PRESSED_ATTRIBUTE: &str = "aria-pressed";

/// Every class the document view owns on the root element.
pub const MANAGED_ROOT_CLASSES: [&str; 5] = [
    HIGH_CONTRAST_CLASS,
    LARGE_TEXT_CLASS,
    REDUCED_MOTION_CLASS,
    KEYBOARD_NAVIGATION_CLASS,
    JS_FOCUS_VISIBLE_CLASS,
];

// Media queries
pub const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";
pub const DARK_SCHEME_QUERY: &str = "(prefers-color-scheme: dark)";

// Timing
pub const ANNOUNCE_CLEAR_MS: u32 = 100;
pub const RESIZE_DEBOUNCE_MS: u32 = 250;

// Page contract defaults
pub const HIGH_CONTRAST_CONTROL_ID: &str = "contrast-toggle";
pub const LARGE_TEXT_CONTROL_ID: &str = "font-size-toggle";
pub const LIVE_REGION_ID: &str = "a11y-announcer";
pub const PRINT_CONTAINER_SELECTOR: &str = ".recipe-header";
pub const SKIP_LINK_SELECTOR: &str = ".skip-link";
pub const FOCUSABLE_SELECTOR: &str =
    "button, a[href], input, select, textarea, [tabindex]:not([tabindex='-1'])";
pub const DEFAULT_IMAGE_ALT: &str = "Decorative image";
pub const PRINT_LABEL: &str = "Print recipe";
pub const DEFAULT_TAB_INDEX: &str = "0";
