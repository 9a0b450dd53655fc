use std::process::Command;

fn temp_path(label: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!(
        "recipe-a11y-cli-{label}-{}",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos()
    ))
}

#[test]
fn cli_list_scenarios_writes_output() {
    let exe = env!("CARGO_BIN_EXE_recipe-a11y-tester");
    let output_path = temp_path("list");
    let status = Command::new(exe)
        .args(["--list-scenarios", "--output"])
        .arg(&output_path)
        .status()
        .expect("run cli");
    assert!(status.success());
    let content = std::fs::read_to_string(output_path).expect("read output");
    assert!(content.contains("Available scenarios"));
    assert!(content.contains("contrast-toggle"));
}

#[test]
fn cli_logic_run_writes_json_report() {
    let exe = env!("CARGO_BIN_EXE_recipe-a11y-tester");
    let output_path = temp_path("logic");
    let status = Command::new(exe)
        .args([
            "--mode",
            "logic",
            "--scenarios",
            "contrast-toggle,announce",
            "--report",
            "json",
            "--output",
        ])
        .arg(&output_path)
        .status()
        .expect("run cli");
    assert!(status.success());
    let content = std::fs::read_to_string(output_path).expect("read output");
    let report: serde_json::Value = serde_json::from_str(&content).expect("json report");
    let runs = report.as_array().expect("array");
    assert_eq!(runs.len(), 2);
    assert!(runs.iter().all(|run| run["passed"] == serde_json::json!(true)));
}

#[test]
fn cli_runs_with_unknown_browser() {
    let exe = env!("CARGO_BIN_EXE_recipe-a11y-tester");
    let output = Command::new(exe)
        .args([
            "--mode",
            "browser",
            "--browsers",
            "unknown",
            "--scenarios",
            "restore",
        ])
        .output()
        .expect("run cli");
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unknown browser"));
}
