//! CLI acceptance tests for issuelens
//!
//! Each test runs the compiled binary against a temp export file with an
//! isolated HOME/XDG environment.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

struct CliTestEnv {
    _temp_dir: TempDir,
    home: PathBuf,
    xdg_data: PathBuf,
    xdg_config: PathBuf,
    xdg_state: PathBuf,
    export_path: PathBuf,
}

impl CliTestEnv {
    fn new() -> Self {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let base = temp_dir.path().to_path_buf();
        let home = base.join("home");
        let xdg_data = base.join("xdg-data");
        let xdg_config = base.join("xdg-config");
        let xdg_state = base.join("xdg-state");

        fs::create_dir_all(&home).expect("failed to create HOME");
        fs::create_dir_all(&xdg_data).expect("failed to create XDG_DATA_HOME");
        fs::create_dir_all(&xdg_config).expect("failed to create XDG_CONFIG_HOME");
        fs::create_dir_all(&xdg_state).expect("failed to create XDG_STATE_HOME");

        let export_path = seed_export_fixture(&base);

        Self {
            _temp_dir: temp_dir,
            home,
            xdg_data,
            xdg_config,
            xdg_state,
            export_path,
        }
    }

    fn write_config(&self, content: &str) {
        let config_dir = self.xdg_config.join("issuelens");
        fs::create_dir_all(&config_dir).expect("failed to create config dir");
        fs::write(config_dir.join("config.toml"), content).expect("failed to write config");
    }
}

fn seed_export_fixture(base: &Path) -> PathBuf {
    let path = base.join("export.jsonl");
    fs::write(
        &path,
        concat!(
            r#"{"id": "I-1", "created_at": "2024-01-02T00:00:00Z", "updated_at": "2024-01-06T00:00:00Z", "labels": ["bug"]}"#,
            "\n",
            r#"{"id": "I-2", "created_at": "2024-01-10T00:00:00Z", "updated_at": "2024-01-20T00:00:00Z", "labels": ["bug", "ui"]}"#,
            "\n",
        ),
    )
    .expect("failed to write export fixture");
    path
}

fn run_issuelens(env: &CliTestEnv, args: &[&str]) -> Output {
    let bin_path = PathBuf::from(assert_cmd::cargo::cargo_bin!("issuelens"));

    Command::new(bin_path)
        .args(args)
        .env("HOME", &env.home)
        .env("XDG_DATA_HOME", &env.xdg_data)
        .env("XDG_CONFIG_HOME", &env.xdg_config)
        .env("XDG_STATE_HOME", &env.xdg_state)
        .output()
        .unwrap_or_else(|e| panic!("failed to execute issuelens: {e}"))
}

fn assert_success(args: &[&str], output: &Output) {
    if output.status.success() {
        return;
    }

    let rendered_args = args
        .iter()
        .map(|arg| OsString::from(arg).to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join(" ");
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    panic!(
        "issuelens {rendered_args} failed\nstatus: {}\nstdout:\n{}\nstderr:\n{}",
        output.status, stdout, stderr
    );
}

fn charts_json(output: &Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

#[test]
fn json_format_emits_three_charts() {
    let env = CliTestEnv::new();
    let input = env.export_path.to_string_lossy().into_owned();

    let args = ["--input", &input, "--format", "json"];
    let output = run_issuelens(&env, &args);
    assert_success(&args, &output);

    let json = charts_json(&output);
    let charts = json["charts"].as_array().expect("charts array");
    assert_eq!(charts.len(), 3);

    // Durations are 4d and 10d; "bug" averages both, "ui" only the second
    assert_eq!(charts[0]["title"], "Average Time-to-Close by Label");
    let points = charts[0]["series"][0]["points"]
        .as_array()
        .expect("points array");
    assert_eq!(points[0][0], "bug");
    assert_eq!(points[0][1], 7.0);
    assert_eq!(points[1][0], "ui");
    assert_eq!(points[1][1], 10.0);

    // Both issues were created and closed in January 2024
    assert_eq!(charts[1]["kind"], "line");
    assert_eq!(charts[1]["series"][0]["points"][0][0], "2024-01");
    assert_eq!(charts[1]["series"][0]["points"][0][1], 2.0);
    assert_eq!(charts[1]["series"][1]["points"][0][1], 2.0);

    // Mean is 7d; only the 10d issue exceeds it, once per label
    assert_eq!(charts[2]["title"], "Bottleneck Issues by Label");
    let counts = charts[2]["series"][0]["points"]
        .as_array()
        .expect("points array");
    assert_eq!(counts.len(), 2);
    assert_eq!(counts[0][0], "bug");
    assert_eq!(counts[0][1], 1.0);
    assert_eq!(counts[1][0], "ui");
    assert_eq!(counts[1][1], 1.0);
}

#[test]
fn label_flag_restricts_time_to_close() {
    let env = CliTestEnv::new();
    let input = env.export_path.to_string_lossy().into_owned();

    let args = ["--input", &input, "--label", "ui", "--format", "json"];
    let output = run_issuelens(&env, &args);
    assert_success(&args, &output);

    let json = charts_json(&output);
    let points = json["charts"][0]["series"][0]["points"]
        .as_array()
        .expect("points array");

    // Only I-2 qualifies; both of its labels average to its 10d duration
    assert_eq!(points.len(), 2);
    assert_eq!(points[0][0], "bug");
    assert_eq!(points[0][1], 10.0);
    assert_eq!(points[1][0], "ui");
    assert_eq!(points[1][1], 10.0);
}

#[test]
fn config_file_label_filter_applies() {
    let env = CliTestEnv::new();
    env.write_config("[analysis]\nlabel = \"ui\"\n");
    let input = env.export_path.to_string_lossy().into_owned();

    let args = ["--input", &input, "--format", "json"];
    let output = run_issuelens(&env, &args);
    assert_success(&args, &output);

    let json = charts_json(&output);
    let points = json["charts"][0]["series"][0]["points"]
        .as_array()
        .expect("points array");
    assert_eq!(points.len(), 2);
    assert_eq!(points[0][1], 10.0);
}

#[test]
fn text_format_prints_chart_titles() {
    let env = CliTestEnv::new();
    let input = env.export_path.to_string_lossy().into_owned();

    let args = ["--input", &input, "--format", "text"];
    let output = run_issuelens(&env, &args);
    assert_success(&args, &output);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Average Time-to-Close by Label"));
    assert!(stdout.contains("Monthly Trends of Issues Created and Closed"));
    assert!(stdout.contains("Bottleneck Issues by Label"));
    assert!(stdout.contains("bug"));
}

#[test]
fn empty_export_is_fatal() {
    let env = CliTestEnv::new();
    let empty_path = env.home.join("empty.jsonl");
    fs::write(&empty_path, "").expect("failed to write empty export");
    let input = empty_path.to_string_lossy().into_owned();

    let output = run_issuelens(&env, &["--input", &input, "--format", "json"]);
    assert!(
        !output.status.success(),
        "an export with zero records must abort the run"
    );

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("empty input"),
        "expected an empty-input error, got:\n{stderr}"
    );
}

#[test]
fn unknown_format_is_rejected() {
    let env = CliTestEnv::new();
    let input = env.export_path.to_string_lossy().into_owned();

    let output = run_issuelens(&env, &["--input", &input, "--format", "csv"]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown output format"));
}
