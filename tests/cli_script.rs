mod common;

use assert_cmd::Command;
use predicates::str::contains;
use std::path::Path;

fn cli(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("budget_forecast_cli").unwrap();
    cmd.env("BUDGET_FORECAST_HOME", home).env_remove("RUST_LOG");
    cmd
}

#[test]
fn version_prints_build_summary() {
    let home = common::temp_home();
    cli(&home)
        .arg("version")
        .assert()
        .success()
        .stdout(contains("budget_forecast"));
}

#[test]
fn backfilled_history_drives_the_forecast() {
    let home = common::temp_home();
    for (date, balance) in [("2025-11-19", "3100"), ("2025-11-20", "3050"), ("2025-11-21", "3000")] {
        cli(&home)
            .args(["--plain", "backfill", date, balance])
            .assert()
            .success()
            .stdout(contains("OK: Stored"));
    }

    cli(&home)
        .args(["--plain", "forecast", "--today", "2025-11-21", "--buffer", "500"])
        .assert()
        .success()
        .stdout(contains("=== Forecasts ==="))
        .stdout(contains("Average spending (last 7 days): $50.00/day"))
        .stdout(contains("Days left in the period: 10"));

    cli(&home)
        .args(["forecast", "--today", "2025-11-21", "--json"])
        .assert()
        .success()
        .stdout(contains("\"avgDailySpending\": 50.0"))
        .stdout(contains("\"historyLen\": 3"));

    assert!(home.join("budget.json").exists());
}

#[test]
fn empty_store_reports_missing_history() {
    let home = common::temp_home();
    cli(&home)
        .args(["--plain", "forecast", "--today", "2025-11-21"])
        .assert()
        .success()
        .stdout(contains("No balance history yet."));
}

#[test]
fn settings_commands_persist_between_runs() {
    let home = common::temp_home();
    cli(&home)
        .args(["--plain", "period", "next"])
        .assert()
        .success()
        .stdout(contains("Budget period set to next"));
    cli(&home)
        .args(["--plain", "buffer", "250"])
        .assert()
        .success()
        .stdout(contains("Reserve buffer set to $250.00"));

    let json = std::fs::read_to_string(home.join("budget.json")).unwrap();
    assert!(json.contains("\"monthPeriod\": \"next\""));
    assert!(json.contains("\"targetBuffer\": 250.0"));
}

#[test]
fn invalid_input_fails_with_message() {
    let home = common::temp_home();
    cli(&home)
        .args(["backfill", "yesterday", "10"])
        .assert()
        .failure()
        .stderr(contains("Error: Invalid input"));
    cli(&home)
        .arg("dance")
        .assert()
        .failure()
        .stderr(contains("Unknown command `dance`"));
}
