//! Recipe page accessibility core
//!
//! Platform-agnostic logic behind the recipe page's accessibility layer:
//! persisted visual preferences, screen reader announcements, system media
//! preferences and load-time page augmentations. This crate never touches a
//! browser API; the web crate provides the [`PreferenceStorage`],
//! [`DocumentSurface`], [`LiveRegion`] and [`Scheduler`] implementations.

pub mod announce;
pub mod augment;
pub mod config;
pub mod constants;
pub mod controller;
pub mod media;
pub mod prefs;
pub mod state;
pub mod surface;
pub mod timer;
pub mod toggle;

// Re-export commonly used types
pub use announce::{Announcer, ClearPolicy, LiveRegion, RecordingRegion};
pub use augment::{
    FocusChange, KeyOutcome, KeyboardModeDetector, backfill_alt, focus_trap_target,
    normalized_tab_index,
};
pub use config::{A11yConfig, ConfigError};
pub use controller::A11yController;
pub use media::MediaPreference;
pub use prefs::{
    MemoryStorage, Preference, PreferenceStorage, PreferenceStore, StoreMode, encode_flag,
    parse_flag,
};
pub use state::{A11yState, DocumentView, Theme};
pub use surface::{DocumentSurface, RecordingSurface, render_view};
pub use timer::{CancellableTimer, Debouncer, ManualScheduler, Scheduler, Task, TimerId};
pub use toggle::{Activation, ToggleSpec, ToggleState, is_activation_key};
