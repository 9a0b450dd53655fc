use anyhow::{Result, ensure};
use recipe_a11y_core::A11yConfig;
use std::time::Duration;
use thirtyfour::prelude::*;

use super::{BrowserScenario, CombinedScenario, ScenarioCtx, TestScenario, fresh_page};
use crate::logic::Harness;

const PING: &str = "Recipe saved";

pub struct AnnounceScenario;

fn announce_logic(config: &A11yConfig) -> Result<()> {
    let clear_ms = u64::from(config.timing.announce_clear_ms);
    let mut page = Harness::load(config);

    page.controller.announce(PING);
    ensure!(page.live_text() == PING, "text not set immediately");
    page.clock.advance_ms(clear_ms - 1);
    ensure!(page.live_text() == PING, "cleared before {clear_ms}ms");
    page.clock.advance_ms(1);
    ensure!(page.live_text().is_empty(), "not cleared after {clear_ms}ms");

    // A second announcement inside the window keeps its full display time.
    page.controller.announce("first");
    page.clock.advance_ms(clear_ms / 2);
    page.controller.announce("second");
    page.clock.advance_ms(clear_ms / 2);
    ensure!(
        page.live_text() == "second",
        "earlier clear wiped the newer message ({:?} policy)",
        config.timing.announce_policy
    );
    Ok(())
}

#[async_trait::async_trait]
impl BrowserScenario for AnnounceScenario {
    async fn run_browser(&self, driver: &WebDriver, ctx: &ScenarioCtx<'_>) -> Result<()> {
        fresh_page(driver, ctx).await?;
        ctx.bridge
            .listen_announcements(&ctx.config.controls.live_region)
            .await?;
        ctx.bridge.announce(PING).await?;

        let heard = ctx.bridge.heard().await?;
        ensure!(heard.iter().any(|h| h == PING), "heard {heard:?}");

        let wait = u64::from(ctx.config.timing.announce_clear_ms) * 3;
        tokio::time::sleep(Duration::from_millis(wait)).await;
        let state = ctx.bridge.state().await?;
        ensure!(
            state.live_text.is_empty(),
            "live region still reads {:?}",
            state.live_text
        );
        Ok(())
    }
}

impl CombinedScenario for AnnounceScenario {
    fn as_logic_scenario(&self) -> Option<TestScenario> {
        Some(TestScenario::new("Announce And Clear", announce_logic))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recipe_a11y_core::ClearPolicy;

    #[test]
    fn default_policy_keeps_newer_message() {
        announce_logic(&A11yConfig::default()).expect("announce");
    }

    #[test]
    fn overlap_policy_is_reported() {
        let mut config = A11yConfig::default();
        config.timing.announce_policy = ClearPolicy::Overlap;
        let err = announce_logic(&config).expect_err("overlap clears early");
        assert!(err.to_string().contains("Overlap"));
    }
}
