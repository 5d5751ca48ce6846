use assert_cmd::Command;
use predicates::str::contains;
use std::fs;
use std::path::PathBuf;

/// Helper to get a temporary working directory
fn temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("create temp dir")
}

/// Helper to write a bucket histogram into the temp dir
fn write_buckets(dir: &tempfile::TempDir) -> PathBuf {
    let path = dir.path().join("buckets.json");
    fs::write(
        &path,
        r#"{
            "-3%": {"value": 20, "color": "red", "is_positive": false},
            "<0%": {"value": 20, "color": "red", "is_positive": false},
            ">0%": {"value": 40, "color": "green", "is_positive": true},
            "+3%": {"value": 20, "color": "green", "is_positive": true}
        }"#,
    )
    .unwrap();
    path
}

const BINARY_NAME: &str = "velo-sentiment";

#[test]
/// Help command should display usage information.
fn cli_help_displays_usage() {
    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(contains("Command-line arguments"))
        .stdout(contains("serve"))
        .stdout(contains("dashboard"))
        .stdout(contains("build-snapshot"));
}

#[test]
fn serve_help_lists_providers() {
    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.args(["serve", "--help"])
        .assert()
        .success()
        .stdout(contains("file"))
        .stdout(contains("mock"))
        .stdout(contains("process"));
}

#[test]
/// build-snapshot derives the metrics and writes a servable file.
fn build_snapshot_writes_file() {
    let tmp = temp_dir();
    let input = write_buckets(&tmp);
    let output = tmp.path().join("public").join("data.json");

    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.arg("build-snapshot")
        .arg("--input")
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(contains("Snapshot written"))
        .stdout(contains("LONG | MOMENTUM | Momentum Long Only"));

    let written: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(written["strategic_bias"], 60.0);
    assert_eq!(written["quadrant"], "Momentum Long Only");
    assert_eq!(written["data"]["+3%"]["value"], 20.0);
}

#[test]
fn build_snapshot_to_stdout() {
    let tmp = temp_dir();
    let input = write_buckets(&tmp);

    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.arg("build-snapshot")
        .arg("--input")
        .arg(&input)
        .args(["--output", "-"])
        .assert()
        .success()
        .stdout(contains("\"green_percentage\": 60.0"));
}

#[test]
/// An empty histogram is an error and leaves no file behind.
fn build_snapshot_rejects_empty_histogram() {
    let tmp = temp_dir();
    let input = tmp.path().join("buckets.json");
    fs::write(&input, "{}").unwrap();
    let output = tmp.path().join("data.json");

    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.arg("build-snapshot")
        .arg("--input")
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .assert()
        .failure()
        .stderr(contains("No return buckets"));
    assert!(!output.exists());
}

#[test]
fn build_snapshot_rejects_missing_input() {
    let tmp = temp_dir();

    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.arg("build-snapshot")
        .arg("--input")
        .arg(tmp.path().join("missing.json"))
        .assert()
        .failure()
        .stderr(contains("Failed to read buckets"));
}

#[test]
/// The process provider cannot start without something to run.
fn serve_process_provider_requires_command() {
    let tmp = temp_dir();

    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.arg("serve")
        .arg("--config")
        .arg(tmp.path().join("config.json"))
        .args(["--provider", "process"])
        .env("HOME", tmp.path()) // simulate different $HOME
        .assert()
        .failure()
        .stderr(contains("needs a command after `--`"));
}

#[test]
fn dashboard_rejects_invalid_config() {
    let tmp = temp_dir();
    let config_path = tmp.path().join("config.json");
    fs::write(&config_path, "invalid json").unwrap();

    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.arg("dashboard")
        .arg("--config")
        .arg(&config_path)
        .arg("--headless")
        .assert()
        .failure()
        .stderr(contains("Failed to load config"));
}

#[test]
/// init-config writes defaults once and refuses to clobber without --force.
fn init_config_writes_defaults() {
    let tmp = temp_dir();
    let config_path = tmp.path().join("nested").join("config.json");

    Command::cargo_bin(BINARY_NAME)
        .unwrap()
        .arg("init-config")
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success()
        .stdout(contains("Config written"));

    let written = fs::read_to_string(&config_path).unwrap();
    assert!(written.contains("\"poll_interval_secs\": 60"));
    assert!(written.contains("\"port\": 3000"));

    fs::write(&config_path, "{}").unwrap();
    Command::cargo_bin(BINARY_NAME)
        .unwrap()
        .arg("init-config")
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success()
        .stdout(contains("Config already exists"));
    assert_eq!(fs::read_to_string(&config_path).unwrap(), "{}");

    Command::cargo_bin(BINARY_NAME)
        .unwrap()
        .arg("init-config")
        .arg("--config")
        .arg(&config_path)
        .arg("--force")
        .assert()
        .success();
    assert!(fs::read_to_string(&config_path).unwrap().contains("dashboard_url"));
}
