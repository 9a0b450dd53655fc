use anyhow::{Context, Result};
use chrono::Utc;
use std::{fs, path::Path};
use thirtyfour::prelude::*;

pub fn artifacts_dir(base: &str, browser: &str, scenario: &str) -> String {
    let ts = Utc::now().format("%Y%m%dT%H%M%S");
    format!("{base}/{browser}/{scenario}/{ts}")
}

pub async fn capture_artifacts(driver: &WebDriver, dir: &str, err: &anyhow::Error) -> Result<()> {
    let screenshot = driver.screenshot_as_png().await.ok();
    let source = driver.source().await.ok();
    let state = driver
        .execute(
            "return window.__recipeA11yTest && window.__recipeA11yTest.state && window.__recipeA11yTest.state()",
            vec![],
        )
        .await
        .ok()
        .map(|ret| ret.json().clone());
    let chain = format!("{err:#}");

    write_artifact_files(
        Path::new(dir),
        screenshot.as_deref(),
        source.as_deref(),
        state.as_ref(),
        &chain,
    )
}

fn write_artifact_files(
    dir: &Path,
    screenshot: Option<&[u8]>,
    source: Option<&str>,
    state: Option<&serde_json::Value>,
    error_chain: &str,
) -> Result<()> {
    fs::create_dir_all(dir).context("creating artifacts dir")?;

    if let Some(png) = screenshot {
        let _ = fs::write(dir.join("screenshot.png"), png);
    }

    if let Some(src) = source {
        let _ = fs::write(dir.join("dom.html"), src);
    }

    if let Some(state_json) = state {
        let payload = serde_json::to_vec_pretty(state_json).unwrap_or_default();
        let _ = fs::write(dir.join("state.json"), payload);
    }

    let _ = fs::write(dir.join("error.txt"), error_chain);

    Ok(())
}

pub fn split_csv(s: &str) -> Vec<String> {
    s.split(',')
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn split_csv_trims_and_filters() {
        let parts = split_csv(" contrast-toggle, ,restore,  announce ");
        assert_eq!(parts, vec!["contrast-toggle", "restore", "announce"]);
    }

    #[test]
    fn artifacts_dir_includes_browser_and_scenario() {
        let dir = artifacts_dir("target/out", "firefox", "image-alt");
        assert!(dir.starts_with("target/out/firefox/image-alt/"));
    }

    #[test]
    fn failed_run_leaves_all_artifacts() {
        let base = std::env::temp_dir().join(format!(
            "recipe-a11y-artifacts-{}",
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap_or_default()
                .as_nanos()
        ));
        let state = json!({ "high_contrast": true, "live_text": "" });
        write_artifact_files(
            &base,
            Some(&[137, 80, 78, 71]),
            Some("<html class=\"high-contrast\"></html>"),
            Some(&state),
            "aria-pressed was \"false\"",
        )
        .expect("write artifacts");

        assert!(base.join("screenshot.png").exists());
        assert!(base.join("dom.html").exists());
        assert!(base.join("state.json").exists());
        let error = fs::read_to_string(base.join("error.txt")).expect("error file");
        assert!(error.contains("aria-pressed"));
    }

    #[test]
    fn missing_captures_are_skipped() {
        let base = std::env::temp_dir().join(format!(
            "recipe-a11y-partial-{}",
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap_or_default()
                .as_nanos()
        ));
        write_artifact_files(&base, None, None, None, "session lost").expect("write artifacts");
        assert!(!base.join("screenshot.png").exists());
        assert!(base.join("error.txt").exists());
    }
}
