use anyhow::Result;
use recipe_a11y_core::A11yConfig;
use thirtyfour::prelude::*;

use crate::browser::TestBridge;

pub mod announce;
pub mod augment;
pub mod media;
pub mod timing;
pub mod toggles;

#[derive(Debug, Clone)]
pub struct ScenarioCtx<'a> {
    pub base_url: String,
    pub config: A11yConfig,
    pub bridge: TestBridge<'a>,
    pub verbose: bool,
}

/// A check run against the in-memory page.
pub type LogicCheck = fn(&A11yConfig) -> Result<()>;

// Logic test scenario
#[derive(Debug, Clone)]
pub struct TestScenario {
    pub name: String,
    pub check: LogicCheck,
}

impl TestScenario {
    #[must_use]
    pub fn new(name: impl Into<String>, check: LogicCheck) -> Self {
        Self {
            name: name.into(),
            check,
        }
    }
}

// Browser test scenario
#[async_trait::async_trait]
pub trait BrowserScenario {
    async fn run_browser(&self, driver: &WebDriver, ctx: &ScenarioCtx<'_>) -> Result<()>;

    /// Scenarios whose effect is invisible to WebDriver opt out.
    fn supports_browser(&self) -> bool {
        true
    }
}

// Combined scenario that can run both logic and browser tests
pub trait CombinedScenario: BrowserScenario {
    fn as_logic_scenario(&self) -> Option<TestScenario>;
}

/// Load the page with empty storage and a live test bridge.
pub async fn fresh_page(driver: &WebDriver, ctx: &ScenarioCtx<'_>) -> Result<()> {
    driver.goto(&ctx.base_url).await?;
    ctx.bridge.clear_storage().await?;
    driver.refresh().await?;
    ctx.bridge.ensure_available().await?;
    Ok(())
}

pub fn get_scenario(name: &str) -> Option<Box<dyn CombinedScenario + Send + Sync>> {
    match name.to_lowercase().as_str() {
        "contrast-toggle" | "contrast" => Some(Box::new(toggles::ToggleScenario::high_contrast())),
        "text-toggle" | "text" => Some(Box::new(toggles::ToggleScenario::large_text())),
        "restore" => Some(Box::new(toggles::RestoreScenario)),
        "announce" => Some(Box::new(announce::AnnounceScenario)),
        "image-alt" => Some(Box::new(augment::ImageAltScenario)),
        "print-button" | "print" => Some(Box::new(augment::PrintButtonScenario)),
        "keyboard-mode" | "keyboard" => Some(Box::new(augment::KeyboardModeScenario)),
        "resize-debounce" | "resize" => Some(Box::new(timing::ResizeDebounceScenario)),
        "reduced-motion" | "motion" => Some(Box::new(media::ReducedMotionScenario)),
        _ => None,
    }
}

pub fn list_scenarios() -> Vec<(&'static str, &'static str)> {
    vec![
        ("contrast-toggle", "High contrast toggle round trip"),
        ("text-toggle", "Large text toggle round trip"),
        ("restore", "Stored preferences restored at load"),
        ("announce", "Live region announces then clears"),
        ("image-alt", "Images without alt get default text"),
        ("print-button", "Print control added to the recipe header"),
        ("keyboard-mode", "First Tab switches on keyboard navigation"),
        ("resize-debounce", "Resize bursts coalesce into one action"),
        ("reduced-motion", "System reduced-motion setting reflected"),
    ]
}
