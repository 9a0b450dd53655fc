use anyhow::{Result, ensure};
use recipe_a11y_core::constants::{REDUCED_MOTION_CLASS, THEME_ATTRIBUTE};
use recipe_a11y_core::{A11yConfig, MediaPreference};
use thirtyfour::prelude::*;

use super::{BrowserScenario, CombinedScenario, ScenarioCtx, TestScenario, fresh_page};
use crate::logic::Harness;

pub struct ReducedMotionScenario;

fn reduced_motion_logic(config: &A11yConfig) -> Result<()> {
    let mut page = Harness::load(config);
    ensure!(!page.surface.has_class(REDUCED_MOTION_CLASS));
    page.controller.apply_media(MediaPreference::ReducedMotion, true);
    ensure!(page.surface.has_class(REDUCED_MOTION_CLASS), "system change not reflected");
    page.controller.apply_media(MediaPreference::ReducedMotion, false);
    ensure!(!page.surface.has_class(REDUCED_MOTION_CLASS), "class kept after system change");
    ensure!(
        page.controller.region().history().is_empty(),
        "media changes must stay silent"
    );

    ensure!(page.surface.attribute(THEME_ATTRIBUTE).is_none());
    page.controller.apply_media(MediaPreference::ColorScheme, true);
    ensure!(page.surface.attribute(THEME_ATTRIBUTE).as_deref() == Some("dark"));
    Ok(())
}

#[async_trait::async_trait]
impl BrowserScenario for ReducedMotionScenario {
    async fn run_browser(&self, driver: &WebDriver, ctx: &ScenarioCtx<'_>) -> Result<()> {
        fresh_page(driver, ctx).await?;
        let result = driver
            .execute(
                "return window.matchMedia(arguments[0]).matches",
                vec![MediaPreference::ReducedMotion.query().into()],
            )
            .await?;
        let system = result.json().as_bool().unwrap_or(false);
        let state = ctx.bridge.state().await?;
        ensure!(
            state.reduced_motion == system,
            "page says {}, browser says {system}",
            state.reduced_motion
        );
        ensure!(ctx.bridge.root_has_class(REDUCED_MOTION_CLASS).await? == system);
        ensure!(state.theme.is_some(), "color scheme watcher did not set a theme");
        Ok(())
    }
}

impl CombinedScenario for ReducedMotionScenario {
    fn as_logic_scenario(&self) -> Option<TestScenario> {
        Some(TestScenario::new("Reduced Motion", reduced_motion_logic))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_logic_passes() {
        reduced_motion_logic(&A11yConfig::default()).expect("media");
    }
}
