//! An in-memory page for exercising the controller without a browser.
use std::rc::Rc;

use recipe_a11y_core::{
    A11yConfig, A11yController, LiveRegion, ManualScheduler, MemoryStorage, PreferenceStore,
    RecordingRegion, RecordingSurface,
};

pub type HarnessController =
    A11yController<MemoryStorage, Rc<RecordingSurface>, RecordingRegion, ManualScheduler>;

pub struct Harness {
    pub storage: MemoryStorage,
    pub surface: Rc<RecordingSurface>,
    pub clock: ManualScheduler,
    pub controller: HarnessController,
}

impl Harness {
    /// A fresh page load with empty storage.
    pub fn load(config: &A11yConfig) -> Self {
        Self::load_with(config, MemoryStorage::new())
    }

    /// A page load over existing storage; preferences are restored.
    pub fn load_with(config: &A11yConfig, storage: MemoryStorage) -> Self {
        let surface = Rc::new(RecordingSurface::new());
        let clock = ManualScheduler::new();
        let mut controller = A11yController::new(
            config,
            PreferenceStore::new(storage.clone()),
            Rc::clone(&surface),
            Rc::new(RecordingRegion::new()),
            clock.clone(),
        );
        controller.restore();
        controller.enable_script_focus();
        Self {
            storage,
            surface,
            clock,
            controller,
        }
    }

    /// Navigate away and back: a new page over the same storage.
    pub fn reload(&self, config: &A11yConfig) -> Self {
        Self::load_with(config, self.storage.clone())
    }

    pub fn live_text(&self) -> String {
        self.controller.region().text()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recipe_a11y_core::Preference;

    #[test]
    fn reload_sees_persisted_toggles() {
        let config = A11yConfig::default();
        let mut page = Harness::load(&config);
        page.controller.toggle(Preference::LargeText);
        let reloaded = page.reload(&config);
        assert!(reloaded.surface.has_class("large-text"));
        assert!(reloaded.surface.has_class("js-focus-visible"));
        assert_eq!(reloaded.live_text(), "");
    }
}
