//! End-to-end tests for the `parkview` binary.

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;

fn parkview() -> Command {
    let mut cmd = Command::cargo_bin("parkview").unwrap();
    cmd.env_remove("PARKVIEW_MODEL").env_remove("RUST_LOG");
    cmd
}

fn model_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_run_labor_increase() {
    parkview()
        .args(["run", "--driver", "cost.labor=10", "--format", "minimal"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ebitda\t90.4360\t-8.0000"))
        .stdout(predicate::str::contains("attendance\t8450.0000\t+0.0000"));
}

#[test]
fn test_run_table_output() {
    parkview()
        .args(["run", "--preset", "heat-wave"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Heat Wave"))
        .stdout(predicate::str::contains("EBITDA"));
}

#[test]
fn test_run_json_output() {
    let output = parkview()
        .args(["run", "--driver", "cost.labor=10", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["name"], "Custom");
    assert_eq!(json["snapshot"]["ebitda"]["baseline"], 98.3);
}

#[test]
fn test_run_unknown_driver_warns() {
    parkview()
        .args(["run", "--driver", "made.up=5", "--format", "minimal"])
        .assert()
        .success()
        .stderr(predicate::str::contains("made.up"));
}

#[test]
fn test_run_rejects_malformed_driver() {
    parkview()
        .args(["run", "--driver", "cost.labor"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid driver argument"));
}

#[test]
fn test_run_rejects_unknown_preset() {
    parkview()
        .args(["run", "--preset", "meteor-strike"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown preset"));
}

#[test]
fn test_compare_presets_minimal() {
    parkview()
        .args(["compare", "--format", "minimal"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("worst\tRecession"));
}

#[test]
fn test_compare_unknown_focus() {
    parkview()
        .args(["compare", "--focus", "waitTime"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown outcome"));
}

#[test]
fn test_compare_scenario_file() {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    file.write_all(
        br#"{"scenarios": [
            {"name": "Cold Snap", "drivers": {"external.weather": -25}},
            {"name": "Price Rise", "drivers": {"revenue.ticketPrice": 5}}
        ]}"#,
    )
    .unwrap();

    parkview()
        .args(["compare", "--format", "csv", "--file"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Cold Snap"))
        .stdout(predicate::str::contains("Price Rise"));
}

#[test]
fn test_attribute_outcome_filter() {
    parkview()
        .args([
            "attribute",
            "--preset",
            "recession",
            "--outcome",
            "ebitda",
            "--top",
            "1",
            "--format",
            "minimal",
        ])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("external.economy\tebitda\t"));
}

#[test]
fn test_model_validate_standard() {
    parkview()
        .args(["model", "validate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("is valid"));
}

#[test]
fn test_model_validate_broken_file() {
    let file = model_file(
        "name: Broken\nmetrics:\n  - key: ebitda\n    baseline: 10\nrelationships:\n  cost.labor: [payroll]\n",
    );

    parkview()
        .arg("--model")
        .arg(file.path())
        .args(["model", "validate"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("payroll"))
        .stderr(predicate::str::contains("validation failed"));
}

#[test]
fn test_model_from_env() {
    let file = model_file(
        "name: Tiny\nmetrics:\n  - key: visits\n    baseline: 100\nrelationships:\n  external.weather: [visits]\nimpact_factors:\n  external.weather.visits: 0.5\n",
    );

    parkview()
        .env("PARKVIEW_MODEL", file.path())
        .args(["run", "--driver", "external.weather=10", "--format", "minimal"])
        .assert()
        .success()
        .stdout(predicate::str::contains("visits\t105.0000\t+5.0000"));
}

#[test]
fn test_model_drivers_and_outcomes() {
    parkview()
        .args(["model", "drivers", "--format", "minimal"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cost.labor"));

    parkview()
        .args(["model", "outcomes", "--format", "minimal"])
        .assert()
        .success()
        .stdout(predicate::str::contains("guestSatisfaction"));
}

#[test]
fn test_presets_listing() {
    parkview()
        .args(["presets", "--format", "minimal"])
        .assert()
        .success()
        .stdout(predicate::str::contains("green-transition"))
        .stdout(predicate::str::contains("wage-inflation"));
}
