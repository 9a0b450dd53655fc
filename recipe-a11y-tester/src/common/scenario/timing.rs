use anyhow::{Result, bail, ensure};
use recipe_a11y_core::{A11yConfig, Debouncer, ManualScheduler};
use std::cell::Cell;
use std::rc::Rc;
use thirtyfour::prelude::*;

use super::{BrowserScenario, CombinedScenario, ScenarioCtx, TestScenario};

pub struct ResizeDebounceScenario;

const BURST: u64 = 10;
const BURST_GAP_MS: u64 = 100;

fn resize_debounce_logic(config: &A11yConfig) -> Result<()> {
    let clock = ManualScheduler::new();
    let fired = Rc::new(Cell::new(0_u32));
    let counter = Rc::clone(&fired);
    let mut debouncer = Debouncer::new(clock.clone(), config.timing.resize_debounce(), move || {
        counter.set(counter.get() + 1);
    });
    let delay = u64::from(config.timing.resize_debounce_ms);

    for idx in 0..BURST {
        debouncer.trigger();
        if idx + 1 < BURST {
            clock.advance_ms(BURST_GAP_MS);
        }
    }
    ensure!(fired.get() == 0, "fired during the burst");
    clock.advance_ms(delay - 1);
    ensure!(fired.get() == 0, "fired before the settle delay");
    clock.advance_ms(1);
    ensure!(fired.get() == 1, "expected one action, got {}", fired.get());
    Ok(())
}

#[async_trait::async_trait]
impl BrowserScenario for ResizeDebounceScenario {
    async fn run_browser(&self, _driver: &WebDriver, _ctx: &ScenarioCtx<'_>) -> Result<()> {
        bail!("the resize action only logs; nothing to observe through WebDriver")
    }

    fn supports_browser(&self) -> bool {
        false
    }
}

impl CombinedScenario for ResizeDebounceScenario {
    fn as_logic_scenario(&self) -> Option<TestScenario> {
        Some(TestScenario::new("Resize Debounce", resize_debounce_logic))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn burst_faster_than_delay_fires_once() {
        resize_debounce_logic(&A11yConfig::default()).expect("debounce");
    }

    #[test]
    fn burst_slower_than_delay_is_caught() {
        let mut config = A11yConfig::default();
        config.timing.resize_debounce_ms = 50;
        let err = resize_debounce_logic(&config).expect_err("gaps exceed delay");
        assert!(err.to_string().contains("during the burst"));
    }
}
