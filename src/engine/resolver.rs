//! Modifier resolution: fold active scenarios into a single adjusted input record.

use crate::core::{BusinessInputs, GlobalEstimateLevel, Scenario};
use serde::{Deserialize, Serialize};

/// Inputs after all active scenarios were applied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolvedInputs {
    pub modified: BusinessInputs,
    /// Sum of the costs of all active scenarios
    pub scenario_cost: f64,
}

/// Apply every active scenario to `base`, in list order.
///
/// Percentage impacts on the same field compound multiplicatively, each one
/// applied to the already-modified value, so their order does not change the
/// result. Absolute impacts set the field and therefore do depend on order.
/// The summed scenario cost is added to `fixed_marketing_opex` after all
/// impacts were applied, so an absolute OPEX impact is still topped up with
/// the scenario costs.
pub fn resolve_scenarios(
    base: &BusinessInputs,
    scenarios: &[Scenario],
    level: GlobalEstimateLevel,
) -> ResolvedInputs {
    let (modified, scenario_cost) = scenarios
        .iter()
        .filter(|scenario| scenario.active)
        .fold((*base, 0.0), |(inputs, cost), scenario| {
            (apply_scenario(inputs, scenario, level), cost + scenario.cost)
        });

    let mut modified = modified;
    modified.fixed_marketing_opex += scenario_cost;

    ResolvedInputs {
        modified,
        scenario_cost,
    }
}

// Pure function: apply one scenario's impacts at its effective level
fn apply_scenario(
    mut inputs: BusinessInputs,
    scenario: &Scenario,
    level: GlobalEstimateLevel,
) -> BusinessInputs {
    let effective = level.effective_for(scenario.estimate_level);
    log::debug!(
        "Applying scenario '{}' at {} level ({} impacts)",
        scenario.id,
        effective,
        scenario.impact.len()
    );

    for (field, impact) in &scenario.impact {
        let current = inputs.get(*field);
        inputs.set(*field, impact.apply(current, effective));
    }
    inputs
}
