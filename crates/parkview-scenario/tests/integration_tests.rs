//! Integration tests for parkview-scenario.
//!
//! End-to-end runs against the standard model and scenario files on disk.

use std::io::Write;

use approx::assert_relative_eq;
use parkview_config::ScenarioModel;
use parkview_core::{Diagnostic, DriverValues};
use parkview_scenario::prelude::*;
use parkview_scenario::{
    attribute_impacts, compute_outcomes_with_diagnostics, load_scenarios_from_path, presets,
    run_scenario, worst_case, ScenarioError,
};
use tempfile::NamedTempFile;

// =============================================================================
// FIXTURES
// =============================================================================

fn write_temp(suffix: &str, contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

// =============================================================================
// CALCULATOR
// =============================================================================

#[test]
fn test_labor_scenario_on_standard_model() {
    let model = ScenarioModel::standard();
    let snapshot = compute_outcomes(&model, &DriverValues::new().with("cost.labor", 10.0));

    let ebitda = snapshot.get("ebitda").unwrap();
    assert_relative_eq!(ebitda.value, 90.436, epsilon = 1e-9);
    assert_relative_eq!(ebitda.percent_change, -8.0, epsilon = 1e-9);

    // Outcomes cost.labor does not touch stay at baseline
    let attendance = snapshot.get("attendance").unwrap();
    assert_eq!(attendance.value, attendance.baseline);
    assert_eq!(snapshot.changed().count(), 4);
}

#[test]
fn test_standard_model_raises_no_diagnostics() {
    let model = ScenarioModel::standard();
    for preset in presets::all() {
        let (_, diagnostics) = compute_outcomes_with_diagnostics(&model, &preset.drivers);
        assert!(diagnostics.is_empty(), "{}: {diagnostics:?}", preset.name);
    }
}

#[test]
fn test_calculation_on_loaded_model() {
    let model = ScenarioModel::from_yaml_str(
        r#"
name: Water Park
metrics:
  - key: attendance
    label: Attendance
    unit: K
    baseline: 1200
  - key: lifeguardCost
    label: Lifeguard Cost
    unit: $M
    baseline: "n/a"
relationships:
  external.weather: [attendance, lifeguardCost]
impact_factors:
  external.weather.attendance: 0.9
"#,
    )
    .unwrap();

    let (snapshot, diagnostics) = compute_outcomes_with_diagnostics(
        &model,
        &DriverValues::new().with("external.weather", 10.0),
    );

    assert_eq!(snapshot.len(), 1);
    assert_relative_eq!(snapshot.get("attendance").unwrap().value, 1308.0, epsilon = 1e-9);
    assert!(diagnostics
        .iter()
        .any(|d| matches!(d, Diagnostic::MalformedMetric { .. })));
    assert!(diagnostics
        .iter()
        .any(|d| matches!(d, Diagnostic::UnknownOutcome { .. })));
}

#[test]
fn test_toml_model_with_defective_factor_table() {
    let model = ScenarioModel::from_toml_str(
        r#"
name = "Toml Park"

[[metrics]]
key = "ebitda"
label = "EBITDA"
unit = "$M"
baseline = 98.3

[[metrics]]
key = "laborCost"
label = "Labor Cost"
unit = "$M"
baseline = 142.6

[relationships]
"cost.labor" = ["ebitda", "laborCost"]

[impact_factors]
"cost.labor.ebitda" = nan
"cost.labor.laborCost" = 1.0
"labor" = 0.5
"#,
    )
    .unwrap();
    assert_eq!(model.impact_factors.rejected(), ["labor"]);

    let (snapshot, diagnostics) =
        compute_outcomes_with_diagnostics(&model, &DriverValues::new().with("cost.labor", 10.0));

    let ebitda = snapshot.get("ebitda").unwrap();
    assert_eq!(ebitda.value, 98.3);
    assert_eq!(ebitda.percent_change, 0.0);
    assert_relative_eq!(
        snapshot.get("laborCost").unwrap().percent_change,
        10.0,
        epsilon = 1e-9
    );
    assert!(snapshot
        .iter()
        .all(|(_, r)| r.value.is_finite() && r.percent_change.is_finite()));
    assert!(matches!(
        diagnostics.as_slice(),
        [Diagnostic::NonFiniteFactor { .. }]
    ));
}

// =============================================================================
// SCENARIOS
// =============================================================================

#[test]
fn test_compare_presets() {
    let model = ScenarioModel::standard();
    let results = run_scenarios(&model, &presets::all());
    let summary = summarize_results(&results, "ebitda").unwrap();

    assert_eq!(summary.scenario_count, 10);
    assert_eq!(summary.worst_scenario, "Recession");
    assert!(summary.worst_pct < 0.0);
    assert!(summary.best_pct > 0.0);
    assert_eq!(
        worst_case(&results, "ebitda").unwrap().name,
        summary.worst_scenario
    );
}

#[test]
fn test_preset_drivers_override() {
    let model = ScenarioModel::standard();
    let preset = presets::find("wage-inflation").unwrap();
    let overridden = preset
        .clone()
        .with_drivers(preset.drivers.clone().merged(&DriverValues::new().with("cost.labor", 0.0)));

    let result = run_scenario(&model, &overridden);
    assert_eq!(result.snapshot, compute_outcomes(&model, &DriverValues::new()));
}

#[test]
fn test_load_scenarios_json() {
    let file = write_temp(
        ".json",
        r#"{"scenarios": [
            {"name": "Cold Snap", "drivers": {"external.weather": -25, "cost.energy": 15}},
            {"name": "Calm Year", "description": "nothing happens"}
        ]}"#,
    );

    let set = load_scenarios_from_path(file.path()).unwrap();
    assert_eq!(set.scenarios.len(), 2);
    assert_eq!(set.scenarios[1].description.as_deref(), Some("nothing happens"));

    let model = ScenarioModel::standard();
    let results = run_scenarios(&model, &set.scenarios);
    assert_eq!(worst_case(&results, "attendance").unwrap().name, "Cold Snap");
}

#[test]
fn test_load_scenarios_yaml_without_extension() {
    let file = write_temp(
        ".scenarios",
        "scenarios:\n  - name: Boom\n    drivers:\n      external.tourism: 20\n",
    );
    let set = load_scenarios_from_path(file.path()).unwrap();
    assert_eq!(set.scenarios[0].drivers.get("external.tourism"), Some(20.0));
}

#[test]
fn test_load_scenarios_errors() {
    let empty = write_temp(".json", r#"{"scenarios": []}"#);
    assert!(matches!(
        load_scenarios_from_path(empty.path()),
        Err(ScenarioError::EmptySet)
    ));

    let dup = write_temp(
        ".yaml",
        "scenarios:\n  - name: A\n  - name: a\n",
    );
    assert!(matches!(
        load_scenarios_from_path(dup.path()),
        Err(ScenarioError::DuplicateName { .. })
    ));

    let broken = write_temp(".json", "{not json");
    assert!(matches!(
        load_scenarios_from_path(broken.path()),
        Err(ScenarioError::Parse(_))
    ));

    assert!(matches!(
        load_scenarios_from_path("/nonexistent/scenarios.json"),
        Err(ScenarioError::Io { .. })
    ));
}

// =============================================================================
// ATTRIBUTION
// =============================================================================

#[test]
fn test_attribution_reconciles_for_every_preset() {
    let model = ScenarioModel::standard();
    for preset in presets::all() {
        let rows = attribute_impacts(&model, &preset.drivers);
        let snapshot = compute_outcomes(&model, &preset.drivers);

        for (id, result) in &snapshot {
            let total = rows
                .iter()
                .filter(|r| &r.outcome == id)
                .fold(result.baseline, |acc, r| acc + r.impact);
            assert_eq!(total, result.value, "{} / {id}", preset.name);
        }
    }
}
