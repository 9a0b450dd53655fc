use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use thirtyfour::prelude::*;

/// Mirror of the page's `window.__recipeA11yTest.state()` snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct PageState {
    pub high_contrast: bool,
    pub large_text: bool,
    pub reduced_motion: bool,
    #[serde(default)]
    pub theme: Option<String>,
    pub keyboard_navigation: bool,
    pub store_mode: String,
    pub live_text: String,
}

#[derive(Debug, Clone)]
pub struct TestBridge<'a> {
    driver: &'a WebDriver,
}

impl<'a> TestBridge<'a> {
    pub const fn new(driver: &'a WebDriver) -> Self {
        Self { driver }
    }

    pub async fn ensure_available(&self) -> Result<()> {
        let result = self
            .driver
            .execute("return !!window.__recipeA11yTest", vec![])
            .await?;
        let ok = result.json().as_bool().unwrap_or(false);
        if !ok {
            bail!("__recipeA11yTest is not available. Did you pass ?test=1?");
        }
        Ok(())
    }

    pub async fn announce(&self, message: &str) -> Result<()> {
        self.driver
            .execute(
                "window.__recipeA11yTest.announce(arguments[0])",
                vec![message.into()],
            )
            .await?;
        Ok(())
    }

    pub async fn state(&self) -> Result<PageState> {
        let result = self
            .driver
            .execute("return window.__recipeA11yTest.state()", vec![])
            .await?;
        let v = result.json().clone();
        let s: PageState = serde_json::from_value(v).context("parsing PageState")?;
        Ok(s)
    }

    /// Whether `<html>` currently carries `class`.
    pub async fn root_has_class(&self, class: &str) -> Result<bool> {
        let result = self
            .driver
            .execute(
                "return document.documentElement.classList.contains(arguments[0])",
                vec![class.into()],
            )
            .await?;
        Ok(result.json().as_bool().unwrap_or(false))
    }

    pub async fn stored(&self, key: &str) -> Result<Option<String>> {
        let result = self
            .driver
            .execute("return localStorage.getItem(arguments[0])", vec![key.into()])
            .await?;
        Ok(result.json().as_str().map(str::to_string))
    }

    pub async fn clear_storage(&self) -> Result<()> {
        self.driver
            .execute("localStorage.clear()", vec![])
            .await?;
        Ok(())
    }

    /// Record every non-empty text the live region shows from now on.
    /// The region clears itself quickly, so polling `state()` would miss them.
    pub async fn listen_announcements(&self, region_id: &str) -> Result<()> {
        self.driver
            .execute(
                r"window.__a11yHeard = [];
                  const region = document.getElementById(arguments[0]);
                  if (!region) { throw new Error('no live region #' + arguments[0]); }
                  new MutationObserver(() => {
                    if (region.textContent) { window.__a11yHeard.push(region.textContent); }
                  }).observe(region, { childList: true, characterData: true, subtree: true });",
                vec![region_id.into()],
            )
            .await
            .context("installing announcement listener")?;
        Ok(())
    }

    pub async fn heard(&self) -> Result<Vec<String>> {
        let result = self
            .driver
            .execute("return window.__a11yHeard || []", vec![])
            .await?;
        serde_json::from_value(result.json().clone()).context("parsing announcements")
    }

    pub async fn store(&self, key: &str, value: &str) -> Result<()> {
        self.driver
            .execute(
                "localStorage.setItem(arguments[0], arguments[1])",
                vec![key.into(), value.into()],
            )
            .await?;
        Ok(())
    }
}
