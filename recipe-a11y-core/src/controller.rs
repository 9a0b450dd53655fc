//! The single owner of accessibility state.
//!
//! Every mutation goes through the controller, which updates [`A11yState`],
//! persists what needs persisting, and re-renders the derived document view.
use std::rc::Rc;

use crate::announce::{Announcer, LiveRegion};
use crate::augment::{KeyOutcome, KeyboardModeDetector};
use crate::config::A11yConfig;
use crate::media::MediaPreference;
use crate::prefs::{Preference, PreferenceStorage, PreferenceStore, StoreMode};
use crate::state::A11yState;
use crate::surface::{DocumentSurface, render_view};
use crate::timer::Scheduler;
use crate::toggle::{Activation, ToggleSpec, ToggleState};

pub struct A11yController<S, D, R, T>
where
    S: PreferenceStorage,
    D: DocumentSurface,
    R: LiveRegion + 'static,
    T: Scheduler,
{
    state: A11yState,
    store: PreferenceStore<S>,
    surface: D,
    announcer: Announcer<R, T>,
    toggles: Vec<ToggleSpec>,
    keyboard: KeyboardModeDetector,
}

impl<S, D, R, T> A11yController<S, D, R, T>
where
    S: PreferenceStorage,
    D: DocumentSurface,
    R: LiveRegion + 'static,
    T: Scheduler,
{
    pub fn new(
        config: &A11yConfig,
        store: PreferenceStore<S>,
        surface: D,
        region: Rc<R>,
        scheduler: T,
    ) -> Self {
        let announcer = Announcer::new(
            region,
            scheduler,
            config.timing.announce_clear(),
            config.timing.announce_policy,
        );
        Self {
            state: A11yState::default(),
            store,
            surface,
            announcer,
            toggles: ToggleSpec::all_from_config(config),
            keyboard: KeyboardModeDetector::new(),
        }
    }

    /// Load persisted preferences and render them. Never writes to the store
    /// and never announces.
    pub fn restore(&mut self) {
        for preference in Preference::ALL {
            let enabled = self.store.read_flag(preference.storage_key());
            self.state.set_preference(preference, enabled);
        }
        log::info!(
            "restored preferences: high contrast {}, large text {}",
            self.state.high_contrast,
            self.state.large_text
        );
        self.render();
    }

    /// Flip a preference, persist it and announce the new state.
    pub fn toggle(&mut self, preference: Preference) -> ToggleState {
        let next = ToggleState::from_bool(self.state.preference(preference)).flipped();
        self.state.set_preference(preference, next.is_on());
        self.store.write_flag(preference.storage_key(), next.is_on());
        self.render();
        let message = self
            .spec(preference)
            .map(|spec| spec.message_for(next).to_string());
        if let Some(message) = message {
            self.announcer.announce(&message);
        }
        log::debug!("{preference:?} -> {next:?}");
        next
    }

    /// Route a gesture on a toggle control; gestures that do not activate are ignored.
    pub fn activate(
        &mut self,
        preference: Preference,
        activation: &Activation,
    ) -> Option<ToggleState> {
        activation.activates().then(|| self.toggle(preference))
    }

    pub fn apply_media(&mut self, media: MediaPreference, matches: bool) {
        if media.apply(&mut self.state, matches) {
            log::debug!("{media:?} now {matches}");
        }
        self.render();
    }

    /// Feed a keydown to the keyboard-mode detector. Returns `true` only for
    /// the press that switched the page into keyboard-navigation mode.
    pub fn observe_key(&mut self, key: &str) -> bool {
        match self.keyboard.observe_key(key) {
            KeyOutcome::EnteredKeyboardMode => {
                self.state.keyboard_navigation = true;
                self.render();
                true
            }
            KeyOutcome::Ignored => false,
        }
    }

    /// Mark the root as having script-driven focus styling.
    pub fn enable_script_focus(&mut self) {
        self.state.script_focus = true;
        self.render();
    }

    pub fn announce(&mut self, message: &str) {
        self.announcer.announce(message);
    }

    #[must_use]
    pub const fn state(&self) -> &A11yState {
        &self.state
    }

    #[must_use]
    pub const fn store_mode(&self) -> StoreMode {
        self.store.mode()
    }

    #[must_use]
    pub const fn surface(&self) -> &D {
        &self.surface
    }

    #[must_use]
    pub fn region(&self) -> &R {
        self.announcer.region()
    }

    #[must_use]
    pub fn toggles(&self) -> &[ToggleSpec] {
        &self.toggles
    }

    #[must_use]
    pub fn spec(&self, preference: Preference) -> Option<&ToggleSpec> {
        self.toggles.iter().find(|spec| spec.preference == preference)
    }

    #[must_use]
    pub const fn keyboard_detector_armed(&self) -> bool {
        self.keyboard.is_armed()
    }

    fn render(&self) {
        render_view(&self.surface, &self.state.view());
        for spec in &self.toggles {
            self.surface
                .set_pressed(&spec.control_id, self.state.preference(spec.preference));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::announce::RecordingRegion;
    use crate::prefs::MemoryStorage;
    use crate::surface::RecordingSurface;
    use crate::timer::ManualScheduler;

    type TestController =
        A11yController<MemoryStorage, Rc<RecordingSurface>, RecordingRegion, ManualScheduler>;

    fn controller(
        storage: MemoryStorage,
    ) -> (TestController, Rc<RecordingSurface>, ManualScheduler) {
        let surface = Rc::new(RecordingSurface::new());
        let scheduler = ManualScheduler::new();
        let controller = A11yController::new(
            &A11yConfig::default(),
            PreferenceStore::new(storage),
            Rc::clone(&surface),
            Rc::new(RecordingRegion::new()),
            scheduler.clone(),
        );
        (controller, surface, scheduler)
    }

    #[test]
    fn restore_renders_without_writing_or_announcing() {
        let storage = MemoryStorage::new().with_item("highContrast", "true");
        let (mut ctl, surface, _) = controller(storage.clone());
        ctl.restore();
        assert!(surface.has_class("high-contrast"));
        assert_eq!(surface.pressed("contrast-toggle"), Some(true));
        assert_eq!(surface.pressed("font-size-toggle"), Some(false));
        assert_eq!(storage.len(), 1);
        assert!(ctl.region().history().is_empty());
    }

    #[test]
    fn non_activating_keys_do_nothing() {
        let (mut ctl, surface, _) = controller(MemoryStorage::new());
        ctl.restore();
        assert_eq!(
            ctl.activate(Preference::LargeText, &Activation::Key("Escape".into())),
            None
        );
        assert!(!surface.has_class("large-text"));
        assert_eq!(
            ctl.activate(Preference::LargeText, &Activation::Key("Enter".into())),
            Some(ToggleState::On)
        );
        assert!(surface.has_class("large-text"));
    }

    #[test]
    fn keyboard_mode_entered_once() {
        let (mut ctl, surface, _) = controller(MemoryStorage::new());
        ctl.enable_script_focus();
        assert!(surface.has_class("js-focus-visible"));
        assert!(!ctl.observe_key("ArrowDown"));
        assert!(ctl.observe_key("Tab"));
        assert!(!ctl.observe_key("Tab"));
        assert!(surface.has_class("keyboard-navigation"));
        assert!(!ctl.keyboard_detector_armed());
    }

    #[test]
    fn media_changes_do_not_disturb_preferences() {
        let storage = MemoryStorage::new().with_item("largeText", "true");
        let (mut ctl, surface, _) = controller(storage);
        ctl.restore();
        ctl.apply_media(MediaPreference::ColorScheme, true);
        ctl.apply_media(MediaPreference::ReducedMotion, true);
        assert!(surface.has_class("large-text"));
        assert!(surface.has_class("reduced-motion"));
        assert_eq!(surface.attribute("data-theme").as_deref(), Some("dark"));
        assert!(ctl.region().history().is_empty());
    }
}
