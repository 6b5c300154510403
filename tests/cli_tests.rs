//! CLI integration tests.

mod support;

use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;

use support::snapshot::moneyline_json;

fn sharpline() -> Command {
    cargo_bin_cmd!("sharpline")
}

#[test]
fn test_help() {
    sharpline()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("sharpline"))
        .stdout(predicate::str::contains("analyze"))
        .stdout(predicate::str::contains("scan"))
        .stdout(predicate::str::contains("odds"));
}

#[test]
fn test_version() {
    sharpline()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("sharpline"));
}

#[test]
fn test_odds_pair_reports_no_vig() {
    sharpline()
        .args(["odds", "-150", "+130"])
        .assert()
        .success()
        .stdout(predicate::str::contains("60.00%"))
        .stdout(predicate::str::contains("57.98%"))
        .stdout(predicate::str::contains("No arbitrage."));
}

#[test]
fn test_odds_arbitrage_split() {
    sharpline()
        .args(["odds", "110", "105"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Arbitrage"))
        .stdout(predicate::str::contains("Locked profit"));
}

#[test]
fn test_odds_rejects_invalid_price() {
    sharpline().args(["odds", "50"]).assert().failure();
}

#[test]
fn test_odds_break_even_needs_probability_inside_unit_interval() {
    sharpline()
        .args(["odds", "100", "--fair", "1.0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("break-even"));
}

#[test]
fn test_analyze_prints_table_and_summary() {
    let dir = tempfile::tempdir().unwrap();
    let snapshot = dir.path().join("snapshot.json");
    let body = serde_json::json!([
        moneyline_json("e1", &[("book_a", 110, -130), ("book_b", -130, 105)]),
    ]);
    fs::write(&snapshot, body.to_string()).unwrap();

    sharpline()
        .arg("--config")
        .arg(dir.path().join("none.toml"))
        .arg("analyze")
        .arg(&snapshot)
        .assert()
        .success()
        .stdout(predicate::str::contains("Celtics @ Lakers"))
        .stdout(predicate::str::contains("book_a"))
        .stdout(predicate::str::contains("ARB"))
        .stdout(predicate::str::contains("Summary"));
}

#[test]
fn test_analyze_json_lines() {
    let dir = tempfile::tempdir().unwrap();
    let snapshot = dir.path().join("snapshot.json");
    fs::write(
        &snapshot,
        moneyline_json("e1", &[("book_a", -150, 130)]).to_string(),
    )
    .unwrap();

    let output = sharpline()
        .arg("--config")
        .arg(dir.path().join("none.toml"))
        .args(["analyze", "--json"])
        .arg(&snapshot)
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let rows: Vec<serde_json::Value> = stdout
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r["event_id"] == "e1"));
}

#[test]
fn test_scan_writes_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("slate");
    fs::create_dir(&input).unwrap();
    for id in ["e1", "e2", "e3"] {
        fs::write(
            input.join(format!("{id}.json")),
            moneyline_json(id, &[("a", -150, 130), ("b", -140, 120)]).to_string(),
        )
        .unwrap();
    }
    let out = dir.path().join("rows.jsonl");

    sharpline()
        .arg("--config")
        .arg(dir.path().join("none.toml"))
        .arg("scan")
        .arg("--input")
        .arg(&input)
        .arg("--output")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Scan complete"));

    let written = fs::read_to_string(&out).unwrap();
    assert_eq!(written.lines().count(), 6);
}

#[test]
fn test_check_config_rejects_invalid_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[detector]\nmin_bookmakers = 0\n").unwrap();

    sharpline()
        .arg("check")
        .arg("config")
        .arg("--config")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("min_bookmakers"));
}

#[test]
fn test_check_config_accepts_valid_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[detector]\nmin_ev = 0.01\n").unwrap();

    sharpline()
        .args(["check", "config", "--config"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration file is valid"));
}
