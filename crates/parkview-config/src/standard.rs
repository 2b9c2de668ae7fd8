//! The built-in attraction-operator model.
//!
//! Baselines are annual figures for a single regional theme park. Impact
//! factors are elasticities: a factor of `-0.8` on `cost.labor.ebitda` means a
//! +10% labor cost change moves EBITDA by -8% of its baseline.

use parkview_core::MetricDefinition;

use crate::catalog::{DriverCategory, DriverDefinition};
use crate::model::ScenarioModel;
use crate::tables::{DriverOutcomeRelationships, ImpactFactors};

/// `(key, label, unit, baseline)`
const METRICS: &[(&str, &str, &str, f64)] = &[
    ("revenue", "Total Revenue", "$M", 412.5),
    ("ebitda", "EBITDA", "$M", 98.3),
    ("attendance", "Attendance", "K", 8450.0),
    ("perCapitaSpend", "Per Capita Spending", "$", 78.4),
    ("laborCost", "Labor Cost", "$M", 142.6),
    ("energyCost", "Energy Cost", "$M", 18.7),
    ("operatingMargin", "Operating Margin", "%", 23.8),
    ("guestSatisfaction", "Guest Satisfaction", "pts", 87.2),
    ("carbonEmissions", "Carbon Emissions", "K tCO2e", 48.2),
    ("marketingRoi", "Marketing ROI", "%", 312.0),
];

struct DriverSpec {
    id: &'static str,
    label: &'static str,
    category: DriverCategory,
    range: (f64, f64),
    description: &'static str,
    /// Affected outcomes with their impact factor, in display order.
    impacts: &'static [(&'static str, f64)],
}

const DRIVERS: &[DriverSpec] = &[
    DriverSpec {
        id: "cost.labor",
        label: "Labor Cost",
        category: DriverCategory::Cost,
        range: (-20.0, 30.0),
        description: "Change in total wages and benefits",
        impacts: &[
            ("ebitda", -0.8),
            ("laborCost", 1.0),
            ("operatingMargin", -0.45),
            ("guestSatisfaction", 0.05),
        ],
    },
    DriverSpec {
        id: "cost.energy",
        label: "Energy Cost",
        category: DriverCategory::Cost,
        range: (-30.0, 60.0),
        description: "Change in electricity and gas tariffs",
        impacts: &[
            ("ebitda", -0.15),
            ("energyCost", 1.0),
            ("operatingMargin", -0.08),
        ],
    },
    DriverSpec {
        id: "cost.maintenance",
        label: "Maintenance Spend",
        category: DriverCategory::Cost,
        range: (-30.0, 30.0),
        description: "Change in ride and facility maintenance budget",
        impacts: &[
            ("ebitda", -0.12),
            ("guestSatisfaction", 0.08),
            ("operatingMargin", -0.06),
        ],
    },
    DriverSpec {
        id: "revenue.ticketPrice",
        label: "Ticket Price",
        category: DriverCategory::Revenue,
        range: (-20.0, 25.0),
        description: "Change in average admission price",
        impacts: &[
            ("revenue", 0.55),
            ("attendance", -0.3),
            ("ebitda", 1.1),
            ("perCapitaSpend", 0.4),
            ("operatingMargin", 0.35),
            ("guestSatisfaction", -0.1),
        ],
    },
    DriverSpec {
        id: "revenue.foodBeverage",
        label: "Food & Beverage Pricing",
        category: DriverCategory::Revenue,
        range: (-20.0, 25.0),
        description: "Change in average food and beverage prices",
        impacts: &[
            ("revenue", 0.18),
            ("perCapitaSpend", 0.35),
            ("ebitda", 0.3),
            ("guestSatisfaction", -0.04),
        ],
    },
    DriverSpec {
        id: "revenue.merchandise",
        label: "Merchandise Pricing",
        category: DriverCategory::Revenue,
        range: (-20.0, 25.0),
        description: "Change in average merchandise prices",
        impacts: &[
            ("revenue", 0.08),
            ("perCapitaSpend", 0.15),
            ("ebitda", 0.12),
        ],
    },
    DriverSpec {
        id: "marketing.spend",
        label: "Marketing Spend",
        category: DriverCategory::Marketing,
        range: (-50.0, 50.0),
        description: "Change in total marketing budget",
        impacts: &[
            ("attendance", 0.25),
            ("revenue", 0.2),
            ("ebitda", 0.1),
            ("marketingRoi", -0.6),
        ],
    },
    DriverSpec {
        id: "marketing.digitalShare",
        label: "Digital Channel Share",
        category: DriverCategory::Marketing,
        range: (-50.0, 50.0),
        description: "Shift of marketing budget towards digital channels",
        impacts: &[("marketingRoi", 0.35), ("attendance", 0.06)],
    },
    DriverSpec {
        id: "operations.hours",
        label: "Operating Hours",
        category: DriverCategory::Operations,
        range: (-25.0, 25.0),
        description: "Change in scheduled park opening hours",
        impacts: &[
            ("attendance", 0.4),
            ("revenue", 0.3),
            ("laborCost", 0.6),
            ("energyCost", 0.5),
            ("ebitda", 0.15),
        ],
    },
    DriverSpec {
        id: "operations.capacity",
        label: "Ride Capacity",
        category: DriverCategory::Operations,
        range: (-20.0, 20.0),
        description: "Change in hourly ride throughput",
        impacts: &[
            ("guestSatisfaction", 0.2),
            ("attendance", 0.15),
            ("revenue", 0.1),
        ],
    },
    DriverSpec {
        id: "external.weather",
        label: "Weather Conditions",
        category: DriverCategory::External,
        range: (-40.0, 20.0),
        description: "Favorability of weather versus a normal season (negative is worse)",
        impacts: &[
            ("attendance", 0.6),
            ("revenue", 0.45),
            ("ebitda", 0.7),
            ("perCapitaSpend", 0.1),
        ],
    },
    DriverSpec {
        id: "external.economy",
        label: "Consumer Confidence",
        category: DriverCategory::External,
        range: (-30.0, 20.0),
        description: "Change in regional consumer confidence index",
        impacts: &[
            ("attendance", 0.35),
            ("revenue", 0.4),
            ("perCapitaSpend", 0.5),
            ("ebitda", 0.6),
        ],
    },
    DriverSpec {
        id: "external.tourism",
        label: "International Tourism",
        category: DriverCategory::External,
        range: (-50.0, 30.0),
        description: "Change in inbound international visitors",
        impacts: &[
            ("attendance", 0.3),
            ("revenue", 0.3),
            ("perCapitaSpend", 0.2),
            ("ebitda", 0.45),
        ],
    },
    DriverSpec {
        id: "sustainability.renewables",
        label: "Renewable Energy Share",
        category: DriverCategory::Sustainability,
        range: (0.0, 100.0),
        description: "Increase in share of on-site and contracted renewable power",
        impacts: &[
            ("energyCost", -0.3),
            ("carbonEmissions", -0.6),
            ("ebitda", 0.04),
            ("guestSatisfaction", 0.02),
        ],
    },
    DriverSpec {
        id: "sustainability.wasteReduction",
        label: "Waste Reduction",
        category: DriverCategory::Sustainability,
        range: (0.0, 100.0),
        description: "Reduction in landfill waste through recycling and composting",
        impacts: &[("carbonEmissions", -0.15), ("ebitda", 0.02)],
    },
];

impl ScenarioModel {
    /// The built-in model for a regional theme park.
    ///
    /// ```rust
    /// use parkview_config::{ScenarioModel, Validate};
    ///
    /// let model = ScenarioModel::standard();
    /// assert!(model.is_valid());
    /// assert_eq!(model.metric("ebitda").unwrap().baseline, Some(98.3));
    /// ```
    #[must_use]
    pub fn standard() -> Self {
        let mut relationships = DriverOutcomeRelationships::new();
        let mut factors = ImpactFactors::new();
        let mut model = ScenarioModel::new("Regional Theme Park")
            .with_description("Baseline annual metrics for a single-gate regional theme park");

        for &(key, label, unit, baseline) in METRICS {
            model = model.with_metric(MetricDefinition::new(key, label, unit, baseline));
        }

        for spec in DRIVERS {
            model = model.with_driver(
                DriverDefinition::new(spec.id, spec.label, spec.category)
                    .with_range(spec.range.0, spec.range.1)
                    .with_description(spec.description),
            );
            relationships.insert(spec.id, spec.impacts.iter().map(|(o, _)| *o));
            for &(outcome, factor) in spec.impacts {
                factors.insert(spec.id, outcome, factor);
            }
        }

        model
            .with_relationships(relationships)
            .with_impact_factors(factors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Validate;

    #[test]
    fn test_standard_model_is_valid() {
        let model = ScenarioModel::standard();
        let errors = model.validate();
        assert!(errors.is_empty(), "{errors:?}");
    }

    #[test]
    fn test_standard_model_shape() {
        let model = ScenarioModel::standard();
        assert_eq!(model.metrics.len(), METRICS.len());
        assert_eq!(model.drivers.len(), DRIVERS.len());
        assert_eq!(model.relationships.len(), DRIVERS.len());
        assert_eq!(
            model.impact_factors.len(),
            DRIVERS.iter().map(|d| d.impacts.len()).sum::<usize>()
        );
    }

    #[test]
    fn test_labor_anchor() {
        let model = ScenarioModel::standard();
        assert_eq!(model.metric("ebitda").unwrap().baseline, Some(98.3));
        assert_eq!(
            model
                .impact_factors
                .get("cost.labor", "ebitda"),
            Some(-0.8)
        );
        let outs = model.relationships.outcomes_for("cost.labor").unwrap();
        assert_eq!(outs[0].as_str(), "ebitda");
        assert_eq!(outs[1].as_str(), "laborCost");
    }

    #[test]
    fn test_every_category_has_drivers() {
        let model = ScenarioModel::standard();
        let grouped = model.drivers_by_category();
        for category in DriverCategory::ALL {
            assert!(grouped.contains_key(&category), "no drivers for {category}");
        }
    }
}
