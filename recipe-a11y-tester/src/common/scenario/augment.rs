use anyhow::{Context, Result, ensure};
use recipe_a11y_core::constants::{JS_FOCUS_VISIBLE_CLASS, KEYBOARD_NAVIGATION_CLASS};
use recipe_a11y_core::{A11yConfig, backfill_alt, normalized_tab_index};
use std::time::Duration;
use thirtyfour::prelude::*;

use super::{BrowserScenario, CombinedScenario, ScenarioCtx, TestScenario, fresh_page};
use crate::logic::Harness;

pub struct ImageAltScenario;

fn image_alt_logic(config: &A11yConfig) -> Result<()> {
    let default_alt = &config.messages.default_image_alt;
    ensure!(
        backfill_alt(None, default_alt).as_deref() == Some(default_alt.as_str()),
        "missing alt not backfilled"
    );
    ensure!(backfill_alt(Some(""), default_alt).is_none(), "empty alt overwritten");
    ensure!(
        backfill_alt(Some("Steaming bowl of ramen"), default_alt).is_none(),
        "authored alt overwritten"
    );
    Ok(())
}

#[async_trait::async_trait]
impl BrowserScenario for ImageAltScenario {
    async fn run_browser(&self, driver: &WebDriver, ctx: &ScenarioCtx<'_>) -> Result<()> {
        fresh_page(driver, ctx).await?;
        let result = driver
            .execute(
                "return Array.from(document.images).filter(i => !i.hasAttribute('alt')).length",
                vec![],
            )
            .await?;
        let missing = result.json().as_u64().context("counting images")?;
        ensure!(missing == 0, "{missing} image(s) still lack alt text");
        Ok(())
    }
}

impl CombinedScenario for ImageAltScenario {
    fn as_logic_scenario(&self) -> Option<TestScenario> {
        Some(TestScenario::new("Image Alt Backfill", image_alt_logic))
    }
}

pub struct PrintButtonScenario;

#[async_trait::async_trait]
impl BrowserScenario for PrintButtonScenario {
    async fn run_browser(&self, driver: &WebDriver, ctx: &ScenarioCtx<'_>) -> Result<()> {
        fresh_page(driver, ctx).await?;
        let selector = format!("{} .print-button", ctx.config.selectors.print_container);
        let buttons = driver.find_all(By::Css(selector.as_str())).await?;
        ensure!(buttons.len() == 1, "expected one print button, found {}", buttons.len());
        let button = &buttons[0];
        let label = button.text().await?;
        ensure!(
            label == ctx.config.messages.print_label,
            "print button reads {label:?}"
        );
        let kind = button.attr("type").await?;
        ensure!(kind.as_deref() == Some("button"), "print button type {kind:?}");
        Ok(())
    }
}

impl CombinedScenario for PrintButtonScenario {
    fn as_logic_scenario(&self) -> Option<TestScenario> {
        None
    }
}

pub struct KeyboardModeScenario;

fn keyboard_mode_logic(config: &A11yConfig) -> Result<()> {
    let mut page = Harness::load(config);
    ensure!(page.surface.has_class(JS_FOCUS_VISIBLE_CLASS), "script focus marker missing");
    ensure!(!page.controller.observe_key("Enter"));
    ensure!(!page.surface.has_class(KEYBOARD_NAVIGATION_CLASS));
    ensure!(page.controller.observe_key("Tab"), "first Tab ignored");
    ensure!(page.surface.has_class(KEYBOARD_NAVIGATION_CLASS));
    ensure!(
        !page.controller.keyboard_detector_armed(),
        "detector still attached after first Tab"
    );
    ensure!(normalized_tab_index(Some("4")) == Some("0"));
    Ok(())
}

#[async_trait::async_trait]
impl BrowserScenario for KeyboardModeScenario {
    async fn run_browser(&self, driver: &WebDriver, ctx: &ScenarioCtx<'_>) -> Result<()> {
        fresh_page(driver, ctx).await?;
        ensure!(
            ctx.bridge.root_has_class(JS_FOCUS_VISIBLE_CLASS).await?,
            "{JS_FOCUS_VISIBLE_CLASS} missing at load"
        );
        ensure!(!ctx.bridge.state().await?.keyboard_navigation);

        let body = driver.find(By::Tag("body")).await?;
        body.send_keys(Key::Tab + "").await?;
        tokio::time::sleep(Duration::from_millis(50)).await;

        let state = ctx.bridge.state().await?;
        ensure!(state.keyboard_navigation, "Tab did not enable keyboard mode");
        ensure!(ctx.bridge.root_has_class(KEYBOARD_NAVIGATION_CLASS).await?);
        Ok(())
    }
}

impl CombinedScenario for KeyboardModeScenario {
    fn as_logic_scenario(&self) -> Option<TestScenario> {
        Some(TestScenario::new("Keyboard Mode Detection", keyboard_mode_logic))
    }
}
