//! Integration tests for the replog binary.
//!
//! These tests verify end-to-end behavior including:
//! - The interactive logging workflow
//! - History display, overload analysis, and CSV export
//! - Clear confirmation semantics
//! - Persistence policy selection

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

/// Helper to create an isolated home/data directory
fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Helper to get the CLI with config lookup pinned to the test dir
fn cli(home: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("replog"));
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"));
    cmd
}

#[test]
fn test_cli_help() {
    let temp_dir = setup_test_dir();
    cli(temp_dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Workout session logger"));
}

#[test]
fn test_history_empty() {
    let temp_dir = setup_test_dir();
    cli(temp_dir.path())
        .arg("history")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No workouts saved."));
}

#[test]
fn test_log_and_view_history() {
    let temp_dir = setup_test_dir();

    cli(temp_dir.path())
        .arg("log")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .write_stdin("Bench Press\n3\n8\n135\n\nn\ndone\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Estimated 1RM: 171"))
        .stdout(predicate::str::contains("Workout saved!"));

    assert!(temp_dir.path().join("sessions.jsonl").exists());

    cli(temp_dir.path())
        .arg("history")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("--- Session 1 ---"))
        .stdout(predicate::str::contains(
            "Bench Press: 8 reps @ 135 lbs [3 sets] [1RM 171]",
        ));
}

#[test]
fn test_empty_session_writes_nothing() {
    let temp_dir = setup_test_dir();

    cli(temp_dir.path())
        .arg("log")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .write_stdin("done\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("No exercises recorded."));

    assert!(!temp_dir.path().join("sessions.jsonl").exists());
}

#[test]
fn test_second_session_shows_previous_workout() {
    let temp_dir = setup_test_dir();

    cli(temp_dir.path())
        .arg("log")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .write_stdin("Crunch\n\n20\n0\n\nn\ndone\n")
        .assert()
        .success();

    cli(temp_dir.path())
        .arg("log")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .write_stdin("done\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("=== LAST RECORDED WORKOUT ==="))
        .stdout(predicate::str::contains("Crunch: 20 reps @ 0 lbs"));
}

#[test]
fn test_overload_insufficient_data() {
    let temp_dir = setup_test_dir();
    cli(temp_dir.path())
        .arg("overload")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Not enough data."));
}

#[test]
fn test_overload_detects_improvement() {
    let temp_dir = setup_test_dir();

    // Two entries with 1RM 100 then 110 (reps 0 degenerates to the weight)
    cli(temp_dir.path())
        .arg("log")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .write_stdin("A\n\n0\n100\n\nn\nB\n\n0\n110\n\nn\ndone\n")
        .assert()
        .success();

    cli(temp_dir.path())
        .arg("overload")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Improvement detected: +10 1RM"));
}

#[test]
fn test_clear_requires_confirmation() {
    let temp_dir = setup_test_dir();

    cli(temp_dir.path())
        .arg("log")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .write_stdin("Crunch\n\n20\n0\n\nn\ndone\n")
        .assert()
        .success();

    // Negative confirmation leaves history unchanged
    cli(temp_dir.path())
        .arg("clear")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Canceled."));

    cli(temp_dir.path())
        .arg("history")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Crunch"));

    // Affirmative confirmation clears
    cli(temp_dir.path())
        .arg("clear")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .write_stdin("y\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cleared."));

    cli(temp_dir.path())
        .arg("history")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No workouts saved."));
}

#[test]
fn test_clear_yes_flag_skips_prompt() {
    let temp_dir = setup_test_dir();

    cli(temp_dir.path())
        .arg("clear")
        .arg("--yes")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Cleared."));
}

#[test]
fn test_export_creates_csv() {
    let temp_dir = setup_test_dir();

    cli(temp_dir.path())
        .arg("log")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .write_stdin("Bench Press\n3\n8\n135\n\nn\ndone\n")
        .assert()
        .success();

    let out = temp_dir.path().join("export.csv");
    cli(temp_dir.path())
        .arg("export")
        .arg("--out")
        .arg(&out)
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 1 entries"));

    let contents = std::fs::read_to_string(&out).unwrap();
    assert!(contents.starts_with("session_id,saved_at,exercise,"));
    assert!(contents.contains("Bench Press"));
}

#[test]
fn test_replace_latest_policy_from_config() {
    let temp_dir = setup_test_dir();

    let config_dir = temp_dir.path().join(".config").join("replog");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(
        config_dir.join("config.toml"),
        "[storage]\npolicy = \"replace_latest\"\n",
    )
    .unwrap();

    for weight in ["100", "110"] {
        cli(temp_dir.path())
            .arg("log")
            .arg("--data-dir")
            .arg(temp_dir.path())
            .write_stdin(format!("Press\n\n0\n{}\n\nn\ndone\n", weight))
            .assert()
            .success();
    }

    // Only the newest session is retrievable
    cli(temp_dir.path())
        .arg("history")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("--- Session 1 ---"))
        .stdout(predicate::str::contains("110 lbs"))
        .stdout(predicate::str::contains("100 lbs").not());

    assert!(temp_dir.path().join("latest_session.json").exists());
    assert!(!temp_dir.path().join("sessions.jsonl").exists());
}

#[test]
fn test_menu_invalid_choice_reprompts() {
    let temp_dir = setup_test_dir();

    cli(temp_dir.path())
        .arg("--data-dir")
        .arg(temp_dir.path())
        .write_stdin("9\n6\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Invalid choice: 9"))
        .stdout(predicate::str::contains("WORKOUT TRACKER").count(2));
}

#[test]
fn test_menu_view_log() {
    let temp_dir = setup_test_dir();

    cli(temp_dir.path())
        .arg("--data-dir")
        .arg(temp_dir.path())
        .write_stdin("2\n6\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("No workouts saved."));
}

#[test]
fn test_rest_timer_completes() {
    let temp_dir = setup_test_dir();

    cli(temp_dir.path())
        .arg("rest")
        .arg("--seconds")
        .arg("1")
        .assert()
        .success()
        .stdout(predicate::str::contains("Rest time left: 00:01"))
        .stdout(predicate::str::contains("Rest over!"));
}
