//! Property-based tests for calculator invariants.
//!
//! - Input order never changes the result (bit for bit)
//! - Impacts superpose and scale linearly
//! - Percent change agrees with value and baseline
//! - Unknown drivers are no-ops

use parkview_config::ScenarioModel;
use parkview_core::{DriverValues, OutcomeSnapshot};
use parkview_scenario::{compute_outcomes, linear_impact};
use proptest::prelude::*;

const DRIVERS: &[&str] = &[
    "cost.labor",
    "cost.energy",
    "cost.maintenance",
    "revenue.ticketPrice",
    "revenue.foodBeverage",
    "marketing.spend",
    "operations.hours",
    "external.weather",
    "external.economy",
    "sustainability.renewables",
];

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
}

/// Change from baseline per outcome.
fn deltas(snapshot: &OutcomeSnapshot) -> Vec<f64> {
    snapshot.iter().map(|(_, r)| r.value - r.baseline).collect()
}

fn assignments() -> impl Strategy<Value = Vec<(usize, f64)>> {
    prop::collection::btree_map(0..DRIVERS.len(), -50.0..50.0_f64, 0..DRIVERS.len())
        .prop_map(|map| map.into_iter().collect())
}

fn to_values(pairs: &[(usize, f64)]) -> DriverValues {
    pairs.iter().map(|&(i, pct)| (DRIVERS[i], pct)).collect()
}

/// Inserts one driver at a time, in the order given.
fn insert_in_order(pairs: &[(usize, f64)]) -> DriverValues {
    let mut values = DriverValues::new();
    for &(i, pct) in pairs {
        values.insert(DRIVERS[i], pct);
    }
    values
}

/// Baseline plus every related impact, accumulated in the order given.
fn manual_sum(model: &ScenarioModel, pairs: &[(usize, f64)], outcome: &str, baseline: f64) -> f64 {
    pairs.iter().fold(baseline, |acc, &(i, pct)| {
        let driver = DRIVERS[i];
        if model.relationships.relates(driver, outcome) {
            acc + linear_impact(pct, model.impact_factors.factor(driver, outcome), baseline)
        } else {
            acc
        }
    })
}

proptest! {
    #[test]
    fn order_independent(
        (ordered, shuffled) in assignments()
            .prop_flat_map(|pairs| (Just(pairs.clone()), Just(pairs).prop_shuffle()))
    ) {
        let model = ScenarioModel::standard();
        let a = compute_outcomes(&model, &insert_in_order(&ordered));
        let b = compute_outcomes(&model, &insert_in_order(&shuffled));

        // Accumulation always follows driver id order, whatever the insertion order
        let mut by_id = shuffled.clone();
        by_id.sort_by_key(|&(i, _)| DRIVERS[i]);

        for (id, r) in &b {
            prop_assert_eq!(r.value, manual_sum(&model, &by_id, id.as_str(), r.baseline));
            let as_inserted = manual_sum(&model, &shuffled, id.as_str(), r.baseline);
            prop_assert!(approx_eq(r.value, as_inserted), "{}: {} vs {}", id, r.value, as_inserted);
        }
        prop_assert_eq!(a, b);
    }

    #[test]
    fn superposition(pairs in assignments(), split in 0..DRIVERS.len()) {
        let model = ScenarioModel::standard();
        let (left, right): (Vec<_>, Vec<_>) =
            pairs.iter().copied().partition(|(i, _)| *i < split);

        let combined = deltas(&compute_outcomes(&model, &to_values(&pairs)));
        let first = deltas(&compute_outcomes(&model, &to_values(&left)));
        let second = deltas(&compute_outcomes(&model, &to_values(&right)));

        for ((c, a), b) in combined.iter().zip(&first).zip(&second) {
            prop_assert!(approx_eq(*c, a + b), "{} != {} + {}", c, a, b);
        }
    }

    #[test]
    fn linearity(pairs in assignments(), k in -3.0..3.0_f64) {
        let model = ScenarioModel::standard();
        let scaled: Vec<_> = pairs.iter().map(|&(i, pct)| (i, pct * k)).collect();

        let base = deltas(&compute_outcomes(&model, &to_values(&pairs)));
        let times_k = deltas(&compute_outcomes(&model, &to_values(&scaled)));

        for (d, dk) in base.iter().zip(&times_k) {
            prop_assert!(approx_eq(*dk, d * k), "{} != {} * {}", dk, d, k);
        }
    }

    #[test]
    fn percent_change_consistent(pairs in assignments()) {
        let model = ScenarioModel::standard();
        let snapshot = compute_outcomes(&model, &to_values(&pairs));

        for (id, r) in &snapshot {
            let expected = (r.value - r.baseline) / r.baseline * 100.0;
            prop_assert!(
                approx_eq(r.percent_change, expected),
                "{}: {} vs {}",
                id,
                r.percent_change,
                expected
            );
        }
    }

    #[test]
    fn unknown_drivers_are_no_ops(pairs in assignments(), junk in -1e6..1e6_f64) {
        let model = ScenarioModel::standard();
        let known = to_values(&pairs);
        let with_unknown = known.clone().with("unknown.driver", junk);

        prop_assert_eq!(
            compute_outcomes(&model, &known),
            compute_outcomes(&model, &with_unknown)
        );
    }
}

#[test]
fn empty_input_is_baseline() {
    let model = ScenarioModel::standard();
    let snapshot = compute_outcomes(&model, &DriverValues::new());

    assert_eq!(snapshot.len(), model.metrics.len());
    for (_, r) in &snapshot {
        assert_eq!(r.value, r.baseline);
        assert_eq!(r.percent_change, 0.0);
    }
}
