use anyhow::{Context, Result, ensure};
use recipe_a11y_core::{A11yConfig, MemoryStorage, Preference, ToggleSpec};
use thirtyfour::prelude::*;

use super::{BrowserScenario, CombinedScenario, ScenarioCtx, TestScenario, fresh_page};
use crate::logic::Harness;

pub struct ToggleScenario {
    preference: Preference,
}

impl ToggleScenario {
    pub const fn high_contrast() -> Self {
        Self {
            preference: Preference::HighContrast,
        }
    }

    pub const fn large_text() -> Self {
        Self {
            preference: Preference::LargeText,
        }
    }
}

fn other(preference: Preference) -> Preference {
    match preference {
        Preference::HighContrast => Preference::LargeText,
        Preference::LargeText => Preference::HighContrast,
    }
}

/// Activate twice from a clean page and check every observable on the way.
fn toggle_round_trip(config: &A11yConfig, preference: Preference) -> Result<()> {
    let spec = ToggleSpec::from_config(preference, config);
    let class = preference.marker_class();
    let key = preference.storage_key();
    let mut page = Harness::load(config);

    page.controller.toggle(preference);
    ensure!(page.surface.has_class(class), "{class} missing after activation");
    ensure!(
        page.surface.pressed(&spec.control_id) == Some(true),
        "#{} not pressed",
        spec.control_id
    );
    ensure!(
        page.storage.get(key).as_deref() == Some("true"),
        "{key} stored as {:?}",
        page.storage.get(key)
    );
    ensure!(
        page.live_text() == spec.on_message,
        "announced {:?}",
        page.live_text()
    );
    let untouched = other(preference);
    ensure!(
        !page.surface.has_class(untouched.marker_class()),
        "{untouched:?} changed with {preference:?}"
    );

    page.controller.toggle(preference);
    ensure!(!page.surface.has_class(class), "{class} left after second activation");
    ensure!(page.surface.pressed(&spec.control_id) == Some(false));
    ensure!(page.storage.get(key).as_deref() == Some("false"));
    ensure!(page.live_text() == spec.off_message);
    Ok(())
}

fn high_contrast_logic(config: &A11yConfig) -> Result<()> {
    toggle_round_trip(config, Preference::HighContrast)
}

fn large_text_logic(config: &A11yConfig) -> Result<()> {
    toggle_round_trip(config, Preference::LargeText)
}

#[async_trait::async_trait]
impl BrowserScenario for ToggleScenario {
    async fn run_browser(&self, driver: &WebDriver, ctx: &ScenarioCtx<'_>) -> Result<()> {
        fresh_page(driver, ctx).await?;
        let spec = ToggleSpec::from_config(self.preference, &ctx.config);
        let class = self.preference.marker_class();
        let key = self.preference.storage_key();
        ctx.bridge
            .listen_announcements(&ctx.config.controls.live_region)
            .await?;

        let control = driver
            .find(By::Id(spec.control_id.as_str()))
            .await
            .with_context(|| format!("finding #{}", spec.control_id))?;
        control.click().await?;
        if ctx.verbose {
            println!("  🖱️  Activated #{}", spec.control_id);
        }

        ensure!(ctx.bridge.root_has_class(class).await?, "{class} missing");
        let pressed = control.attr("aria-pressed").await?;
        ensure!(
            pressed.as_deref() == Some("true"),
            "aria-pressed was {pressed:?}"
        );
        let stored = ctx.bridge.stored(key).await?;
        ensure!(stored.as_deref() == Some("true"), "{key} stored as {stored:?}");
        let heard = ctx.bridge.heard().await?;
        ensure!(
            heard.contains(&spec.on_message),
            "expected {:?}, heard {heard:?}",
            spec.on_message
        );

        control.click().await?;
        ensure!(!ctx.bridge.root_has_class(class).await?, "{class} not removed");
        let stored = ctx.bridge.stored(key).await?;
        ensure!(stored.as_deref() == Some("false"), "{key} stored as {stored:?}");
        Ok(())
    }
}

impl CombinedScenario for ToggleScenario {
    fn as_logic_scenario(&self) -> Option<TestScenario> {
        let scenario = match self.preference {
            Preference::HighContrast => {
                TestScenario::new("High Contrast Toggle", high_contrast_logic)
            }
            Preference::LargeText => TestScenario::new("Large Text Toggle", large_text_logic),
        };
        Some(scenario)
    }
}

pub struct RestoreScenario;

fn restore_logic(config: &A11yConfig) -> Result<()> {
    let storage = MemoryStorage::new()
        .with_item(Preference::HighContrast.storage_key(), "true")
        .with_item(Preference::LargeText.storage_key(), "TRUE");
    let mut page = Harness::load_with(config, storage.clone());
    ensure!(page.surface.has_class(Preference::HighContrast.marker_class()));
    ensure!(
        !page.surface.has_class(Preference::LargeText.marker_class()),
        "only the exact string \"true\" restores a preference"
    );
    ensure!(
        page.controller.region().history().is_empty(),
        "restoring must not announce"
    );
    ensure!(
        storage.get(Preference::LargeText.storage_key()).as_deref() == Some("TRUE"),
        "restoring must not rewrite storage"
    );

    page.controller.toggle(Preference::HighContrast);
    let reloaded = page.reload(config);
    ensure!(
        !reloaded.surface.has_class(Preference::HighContrast.marker_class()),
        "switching off must survive a reload"
    );
    Ok(())
}

#[async_trait::async_trait]
impl BrowserScenario for RestoreScenario {
    async fn run_browser(&self, driver: &WebDriver, ctx: &ScenarioCtx<'_>) -> Result<()> {
        fresh_page(driver, ctx).await?;
        ctx.bridge
            .store(Preference::HighContrast.storage_key(), "true")
            .await?;
        ctx.bridge
            .store(Preference::LargeText.storage_key(), "1")
            .await?;
        driver.refresh().await?;
        ctx.bridge.ensure_available().await?;

        let state = ctx.bridge.state().await?;
        if ctx.verbose {
            println!("  📊 Restored state: {state:?}");
        }
        ensure!(state.high_contrast, "high contrast not restored");
        ensure!(!state.large_text, "\"1\" must not enable large text");
        ensure!(
            ctx.bridge
                .root_has_class(Preference::HighContrast.marker_class())
                .await?
        );
        Ok(())
    }
}

impl CombinedScenario for RestoreScenario {
    fn as_logic_scenario(&self) -> Option<TestScenario> {
        Some(TestScenario::new("Restore Preferences", restore_logic))
    }
}
