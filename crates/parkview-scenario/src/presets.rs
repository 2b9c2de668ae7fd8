//! Built-in scenarios for the standard attraction-operator model.
//!
//! Driver ids refer to [`ScenarioModel::standard`](parkview_config::ScenarioModel::standard).

use crate::error::{LoadResult, ScenarioError};
use crate::scenario::{slugify, Scenario};

/// No adjustments.
#[must_use]
pub fn baseline() -> Scenario {
    Scenario::new("Baseline").with_description("Current plan with no driver adjustments")
}

/// Regional downturn.
#[must_use]
pub fn recession() -> Scenario {
    Scenario::new("Recession")
        .with_description("Consumer confidence falls and inbound tourism weakens")
        .with_driver("external.economy", -20.0)
        .with_driver("external.tourism", -15.0)
        .with_driver("marketing.spend", -10.0)
}

/// Tight labor market pushes wages up.
#[must_use]
pub fn wage_inflation() -> Scenario {
    Scenario::new("Wage Inflation")
        .with_description("Minimum wage rise and seasonal staffing shortage")
        .with_driver("cost.labor", 12.0)
}

/// Energy tariffs jump.
#[must_use]
pub fn energy_spike() -> Scenario {
    Scenario::new("Energy Spike")
        .with_description("Wholesale power prices rise sharply")
        .with_driver("cost.energy", 40.0)
}

/// Extended heat wave during peak season.
#[must_use]
pub fn heat_wave() -> Scenario {
    Scenario::new("Heat Wave")
        .with_description("Extreme heat suppresses visits and raises cooling load")
        .with_driver("external.weather", -15.0)
        .with_driver("cost.energy", 10.0)
}

/// Wet season.
#[must_use]
pub fn rainy_season() -> Scenario {
    Scenario::new("Rainy Season")
        .with_description("Above-normal rainfall through the summer months")
        .with_driver("external.weather", -25.0)
}

/// Admission and F&B price rise.
#[must_use]
pub fn premium_pricing() -> Scenario {
    Scenario::new("Premium Pricing")
        .with_description("Ticket and food & beverage prices increase")
        .with_driver("revenue.ticketPrice", 10.0)
        .with_driver("revenue.foodBeverage", 5.0)
}

/// Larger, more digital marketing campaign.
#[must_use]
pub fn marketing_push() -> Scenario {
    Scenario::new("Marketing Push")
        .with_description("Campaign budget increase weighted towards digital channels")
        .with_driver("marketing.spend", 25.0)
        .with_driver("marketing.digitalShare", 20.0)
}

/// Strong international arrivals.
#[must_use]
pub fn tourism_boom() -> Scenario {
    Scenario::new("Tourism Boom")
        .with_description("Favorable exchange rates lift inbound tourism")
        .with_driver("external.tourism", 20.0)
        .with_driver("operations.hours", 5.0)
}

/// Sustainability programme.
#[must_use]
pub fn green_transition() -> Scenario {
    Scenario::new("Green Transition")
        .with_description("Renewable power contracts and a park-wide waste programme")
        .with_driver("sustainability.renewables", 40.0)
        .with_driver("sustainability.wasteReduction", 30.0)
        .with_driver("cost.maintenance", 5.0)
}

/// Returns all built-in scenarios, baseline first.
#[must_use]
pub fn all() -> Vec<Scenario> {
    vec![
        baseline(),
        recession(),
        wage_inflation(),
        energy_spike(),
        heat_wave(),
        rainy_season(),
        premium_pricing(),
        marketing_push(),
        tourism_boom(),
        green_transition(),
    ]
}

/// Finds a preset by name, ignoring case. The slug form (`heat-wave`) and
/// underscores (`heat_wave`) are accepted too.
#[must_use]
pub fn find(name: &str) -> Option<Scenario> {
    let wanted = slugify(name);
    if wanted.is_empty() {
        return None;
    }
    all().into_iter().find(|preset| preset.slug() == wanted)
}

/// Like [`find`], with an error listing the available presets.
pub fn require(name: &str) -> LoadResult<Scenario> {
    find(name).ok_or_else(|| ScenarioError::UnknownPreset {
        name: name.to_string(),
        available: all()
            .iter()
            .map(Scenario::slug)
            .collect::<Vec<_>>()
            .join(", "),
    })
}
