use anyhow::Result;
use colored::Colorize;
use std::io::Write;
use std::time::Duration;

use super::ScenarioResult;

#[allow(clippy::cast_precision_loss)]
fn success_rate(results: &[ScenarioResult]) -> f64 {
    if results.is_empty() {
        return 0.0;
    }
    let passed = results.iter().filter(|r| r.passed).count();
    (passed as f64 / results.len() as f64) * 100.0
}

pub fn generate_console_report(
    out: &mut dyn Write,
    results: &[ScenarioResult],
    total_duration: Duration,
) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "📊 Accessibility Test Results".bright_cyan().bold())?;
    writeln!(out, "{}", "==============================".cyan())?;

    let total_tests = results.len();
    let passed_tests = results.iter().filter(|r| r.passed).count();
    let failed_tests = total_tests - passed_tests;

    // Overall stats
    writeln!(out, "Total runs: {total_tests}")?;
    writeln!(out, "Passed: {}", passed_tests.to_string().green())?;
    writeln!(out, "Failed: {}", failed_tests.to_string().red())?;
    writeln!(out, "Success rate: {:.1}%", success_rate(results))?;
    writeln!(out, "Total time: {total_duration:?}")?;
    writeln!(out)?;

    for result in results {
        let status = if result.passed {
            "✅ PASS".green()
        } else {
            "❌ FAIL".red()
        };

        writeln!(
            out,
            "{status} {} [{}] ({:?})",
            result.scenario_name.bold(),
            result.runner,
            result.duration
        )?;
        for failure in &result.failures {
            writeln!(out, "     • {}", failure.red())?;
        }
    }
    Ok(())
}

pub fn generate_json_report(out: &mut dyn Write, results: &[ScenarioResult]) -> Result<()> {
    let json_output = serde_json::to_string_pretty(results)?;
    writeln!(out, "{json_output}")?;
    Ok(())
}

pub fn generate_markdown_report(out: &mut dyn Write, results: &[ScenarioResult]) -> Result<()> {
    writeln!(out, "# Recipe Accessibility Test Results\n")?;

    let total_tests = results.len();
    let passed_tests = results.iter().filter(|r| r.passed).count();

    writeln!(out, "## Summary\n")?;
    writeln!(out, "- **Total runs**: {total_tests}")?;
    writeln!(out, "- **Passed**: {passed_tests}")?;
    writeln!(out, "- **Failed**: {}", total_tests - passed_tests)?;
    writeln!(out, "- **Success rate**: {:.1}%\n", success_rate(results))?;

    writeln!(out, "## Detailed Results\n")?;
    writeln!(out, "| Scenario | Runner | Status | Time |")?;
    writeln!(out, "| --- | --- | --- | --- |")?;
    for result in results {
        let status = if result.passed { "✅" } else { "❌" };
        writeln!(
            out,
            "| {} | {} | {status} | {:?} |",
            result.scenario_name, result.runner, result.duration
        )?;
    }

    let failed: Vec<_> = results.iter().filter(|r| !r.passed).collect();
    if !failed.is_empty() {
        writeln!(out, "\n## Failures\n")?;
        for result in failed {
            writeln!(out, "### {} ({})\n", result.scenario_name, result.runner)?;
            for failure in &result.failures {
                writeln!(out, "- {failure}")?;
            }
            writeln!(out)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(name: &str, passed: bool) -> ScenarioResult {
        ScenarioResult {
            scenario_name: name.to_string(),
            runner: "logic".to_string(),
            passed,
            failures: if passed {
                Vec::new()
            } else {
                vec!["expected aria-pressed=true".to_string()]
            },
            duration: Duration::from_millis(3),
        }
    }

    #[test]
    fn markdown_lists_failures_separately() {
        let mut buf = Vec::new();
        generate_markdown_report(
            &mut buf,
            &[result("Contrast Toggle", true), result("Restore", false)],
        )
        .expect("markdown");
        let text = String::from_utf8(buf).expect("utf8");
        assert!(text.contains("| Contrast Toggle | logic | ✅ |"));
        assert!(text.contains("## Failures"));
        assert!(text.contains("- expected aria-pressed=true"));
        assert!(text.contains("**Success rate**: 50.0%"));
    }

    #[test]
    fn console_report_counts_runs() {
        let mut buf = Vec::new();
        generate_console_report(&mut buf, &[result("Announce", true)], Duration::ZERO)
            .expect("console");
        let text = String::from_utf8(buf).expect("utf8");
        assert!(text.contains("Total runs: 1"));
        assert!(text.contains("Announce"));
    }

    #[test]
    fn empty_results_have_zero_success_rate() {
        assert!(success_rate(&[]).abs() < f64::EPSILON);
    }
}
