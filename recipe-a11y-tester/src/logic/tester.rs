use colored::Colorize;
use recipe_a11y_core::A11yConfig;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

use crate::common::scenario::TestScenario;

/// Outcome of one scenario on one runner (`logic` or a browser name).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub scenario_name: String,
    pub runner: String,
    pub passed: bool,
    pub failures: Vec<String>,
    #[serde(with = "duration_serde")]
    pub duration: Duration,
}

impl ScenarioResult {
    pub fn from_outcome(
        scenario_name: &str,
        runner: &str,
        outcome: &anyhow::Result<()>,
        duration: Duration,
    ) -> Self {
        Self {
            scenario_name: scenario_name.to_string(),
            runner: runner.to_string(),
            passed: outcome.is_ok(),
            failures: outcome
                .as_ref()
                .err()
                .map(|err| vec![format!("{err:#}")])
                .unwrap_or_default(),
            duration,
        }
    }
}

pub struct LogicTester {
    config: A11yConfig,
    verbose: bool,
}

impl LogicTester {
    pub const fn new(config: A11yConfig, verbose: bool) -> Self {
        Self { config, verbose }
    }

    pub fn run_scenario(&self, scenario: &TestScenario) -> ScenarioResult {
        if self.verbose {
            println!("🧪 Testing scenario: {}", scenario.name.bright_white());
        }
        let start_time = Instant::now();
        let outcome = (scenario.check)(&self.config);
        let result = ScenarioResult::from_outcome(
            &scenario.name,
            "logic",
            &outcome,
            start_time.elapsed(),
        );

        if self.verbose {
            match &outcome {
                Ok(()) => println!("  ✅ passed ({:?})", result.duration),
                Err(err) => println!("  ❌ failed: {}", format!("{err:#}").red()),
            }
        }
        result
    }
}

mod duration_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_millis().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u128::deserialize(deserializer)?;
        Ok(Duration::from_millis(u64::try_from(millis).unwrap_or(0)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failing(_: &A11yConfig) -> anyhow::Result<()> {
        anyhow::bail!("marker missing")
    }

    #[test]
    fn failures_carry_the_error_chain() {
        let tester = LogicTester::new(A11yConfig::default(), false);
        let scenario = TestScenario::new("Failing", failing);
        let result = tester.run_scenario(&scenario);
        assert!(!result.passed);
        assert_eq!(result.runner, "logic");
        assert_eq!(result.failures, vec!["marker missing".to_string()]);
    }

    #[test]
    fn durations_serialize_as_millis() {
        let result = ScenarioResult {
            scenario_name: "Announce".into(),
            runner: "logic".into(),
            passed: true,
            failures: Vec::new(),
            duration: Duration::from_millis(12),
        };
        let value = serde_json::to_value(&result).expect("serialize");
        assert_eq!(value["duration"], serde_json::json!(12));
    }
}
