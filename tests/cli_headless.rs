// Headless commands run without a TTY and never touch the terminal, so they
// can be driven directly with assert_cmd. HOME points at a scratch dir so the
// mood log and config stay out of the real user's state.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use chrono::Local;
use serde_json::Value;

use unwind::mood::{MoodEntry, MoodStore};
use unwind::storage::SqliteStorage;

fn unwind(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("unwind").unwrap();
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env("XDG_DATA_HOME", home.join(".local").join("share"))
        .env_remove("RUST_LOG");
    cmd
}

fn seed_log(home: &Path) {
    let db = home.join(".local").join("state").join("unwind").join("unwind.db");
    let store = MoodStore::new(SqliteStorage::open(db).unwrap());
    let now = Local::now();
    store
        .append(MoodEntry::new(
            "Great",
            4,
            vec!["Guided breathing".into()],
            Some("slept well".into()),
            now,
        ))
        .unwrap();
}

#[test]
fn analyze_prints_classification_json() {
    let home = tempfile::tempdir().unwrap();
    let output = unwind(home.path())
        .args(["--analyze", "I feel so anxious and tired today"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["analysis"]["primary_category"], "anxiety");
    assert_eq!(json["analysis"]["severity_level"], "medium");
    assert_eq!(json["response"]["urgency"], "medium");
    assert!(!json["response"]["suggestions"].as_array().unwrap().is_empty());
}

#[test]
fn stats_on_empty_log() {
    let home = tempfile::tempdir().unwrap();
    let output = unwind(home.path()).arg("--stats").output().unwrap();
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["totalSessions"], 0);
    assert_eq!(json["streak"], 0);
}

#[test]
fn stats_read_the_persisted_log() {
    let home = tempfile::tempdir().unwrap();
    seed_log(home.path());

    let output = unwind(home.path()).arg("--stats").output().unwrap();
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["totalSessions"], 1);
    assert_eq!(json["averageMood"], 4.0);
    assert_eq!(json["streak"], 1);
    assert_eq!(json["topActivities"][0], "Guided breathing");
}

#[test]
fn export_writes_json_and_csv() {
    let home = tempfile::tempdir().unwrap();
    seed_log(home.path());
    let json_path = home.path().join("snapshot.json");
    let csv_path = home.path().join("log.csv");

    unwind(home.path())
        .arg("--export")
        .arg(&json_path)
        .arg("--export-csv")
        .arg(&csv_path)
        .assert()
        .success();

    let snapshot: Value = serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(snapshot["totalSessions"], 1);
    assert!(snapshot["exportFormat"].is_string());

    let csv = fs::read_to_string(&csv_path).unwrap();
    assert_eq!(csv.lines().count(), 2);
    assert!(csv.contains("slept well"));
}

#[test]
fn interactive_mode_requires_a_tty() {
    let home = tempfile::tempdir().unwrap();
    unwind(home.path()).write_stdin("").assert().failure();
}
