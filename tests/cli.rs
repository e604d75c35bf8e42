//! End-to-end tests for the `lockin` binary.
//!
//! Every test points `LOCKIN_HOME` at its own temporary directory.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn lockin(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("lockin").unwrap();
    cmd.env("LOCKIN_HOME", home.path())
        .env_remove("LOCKIN_LOG")
        .env("NO_COLOR", "1");
    cmd
}

fn json(home: &TempDir, args: &[&str]) -> serde_json::Value {
    let output = lockin(home)
        .args(["--output", "json"])
        .args(args)
        .output()
        .unwrap();
    assert!(output.status.success(), "{output:?}");
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_help() {
    let home = TempDir::new().unwrap();
    lockin(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("work-session timer"));
}

#[test]
fn test_fresh_status_is_idle() {
    let home = TempDir::new().unwrap();
    let status = json(&home, &["status"]);

    assert_eq!(status["phase"], "idle");
    assert_eq!(status["display"], "00:00:00");
    assert!(home.path().join("lockin.db").exists());
}

#[test]
fn test_pretty_status() {
    let home = TempDir::new().unwrap();
    lockin(&home)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("00:00:00"))
        .stdout(predicate::str::contains("Idle"));
}

#[test]
fn test_start_persists_between_runs() {
    let home = TempDir::new().unwrap();

    let started = json(&home, &["start"]);
    assert_eq!(started["changed"], true);

    let status = json(&home, &["status"]);
    assert_eq!(status["phase"], "running");

    let again = json(&home, &["start"]);
    assert_eq!(again["changed"], false);
}

#[test]
fn test_stop_twice_logs_at_most_once() {
    let home = TempDir::new().unwrap();
    json(&home, &["start"]);
    std::thread::sleep(std::time::Duration::from_millis(1100));

    let stopped = json(&home, &["stop"]);
    assert_eq!(stopped["status"]["phase"], "idle");
    let logged = json(&home, &["log"]);
    let count = logged["count"].as_u64().unwrap();
    assert!(count <= 1);

    let again = json(&home, &["stop"]);
    assert_eq!(again["changed"], false);
    assert_eq!(json(&home, &["log"])["count"].as_u64().unwrap(), count);
}

#[test]
fn test_pause_then_reset() {
    let home = TempDir::new().unwrap();
    json(&home, &["toggle"]);
    let paused = json(&home, &["toggle"]);
    assert_eq!(paused["status"]["phase"], "idle");
    assert_eq!(paused["status"]["current_session_time"], 0);

    let reset = json(&home, &["reset"]);
    assert_eq!(reset["status"]["total_work_time"], 0);
}

#[test]
fn test_log_clear_requires_force() {
    let home = TempDir::new().unwrap();
    lockin(&home)
        .args(["log", "clear"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("--force"));

    lockin(&home)
        .args(["log", "clear", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cleared 0 sessions"));
}

#[test]
fn test_music_commands() {
    let home = TempDir::new().unwrap();

    let selected = json(&home, &["music", "select", "lofi"]);
    assert_eq!(selected["music_type"], "lofi");
    assert_eq!(selected["video_id"], "jfKfPfyJRdk");

    let volume = json(&home, &["music", "volume", "30"]);
    assert_eq!(volume["volume"], 30);

    let muted = json(&home, &["music", "mute"]);
    assert_eq!(muted["muted"], true);

    let status = json(&home, &["music", "status"]);
    assert_eq!(status["music_type"], "lofi");
    assert_eq!(status["muted"], true);
}

#[test]
fn test_music_volume_out_of_range() {
    let home = TempDir::new().unwrap();
    lockin(&home)
        .args(["music", "volume", "150"])
        .assert()
        .failure();
}

#[test]
fn test_config_default_output() {
    let home = TempDir::new().unwrap();
    std::fs::write(
        home.path().join("config.yaml"),
        "general:\n  default_output: json\n",
    )
    .unwrap();

    lockin(&home)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"phase\": \"idle\""));
}

#[test]
fn test_invalid_config_fails() {
    let home = TempDir::new().unwrap();
    std::fs::write(home.path().join("config.yaml"), "timer: [1, 2]\n").unwrap();

    lockin(&home)
        .arg("status")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_completions() {
    let home = TempDir::new().unwrap();
    lockin(&home)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("lockin"));
}
