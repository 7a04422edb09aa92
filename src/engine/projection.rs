//! Baseline vs. scenario comparison.

use super::metrics::compute_metrics;
use super::resolver::resolve_scenarios;
use crate::core::{BusinessInputs, GlobalEstimateLevel, MetricsResult, Scenario};
use serde::{Deserialize, Serialize};

/// Deltas smaller than this are treated as "no change" when displayed.
pub const DELTA_EPSILON: f64 = 0.01;

/// Baseline and scenario-adjusted metrics for one set of inputs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub base: MetricsResult,
    pub scenario: MetricsResult,
    pub scenario_cost: f64,
    /// Contribution margin added by the active scenarios
    pub contribution_margin_delta: f64,
    /// Added contribution margin per unit of scenario cost, in percent
    pub roi: f64,
}

/// Unit a metric is displayed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricUnit {
    Currency,
    Count,
    Percentage,
}

/// One comparison row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricDelta {
    pub key: &'static str,
    pub label: &'static str,
    pub unit: MetricUnit,
    pub base: f64,
    pub scenario: f64,
    pub delta: f64,
    /// Whether an increase is an improvement
    pub higher_is_better: bool,
}

impl MetricDelta {
    pub fn is_significant(&self) -> bool {
        self.delta.abs() >= DELTA_EPSILON
    }

    pub fn is_improvement(&self) -> bool {
        self.is_significant() && ((self.delta > 0.0) == self.higher_is_better)
    }
}

/// Run the full baseline + scenario pipeline.
pub fn project(
    base: &BusinessInputs,
    scenarios: &[Scenario],
    level: GlobalEstimateLevel,
) -> Projection {
    let base_result = compute_metrics(base);
    let resolved = resolve_scenarios(base, scenarios, level);
    let scenario_result =
        compute_metrics(&resolved.modified).with_scenario_cost(resolved.scenario_cost);

    let contribution_margin_delta =
        scenario_result.contribution_margin - base_result.contribution_margin;
    let roi = scenario_roi(contribution_margin_delta, resolved.scenario_cost);

    log::debug!(
        "Projection: scenario cost {:.2}, contribution margin delta {:.2}, ROI {:.2}%",
        resolved.scenario_cost,
        contribution_margin_delta,
        roi
    );

    Projection {
        base: base_result,
        scenario: scenario_result,
        scenario_cost: resolved.scenario_cost,
        contribution_margin_delta,
        roi,
    }
}

/// ROI of the scenario spend, 0 when nothing was spent.
pub fn scenario_roi(contribution_margin_delta: f64, scenario_cost: f64) -> f64 {
    if scenario_cost > 0.0 {
        contribution_margin_delta / scenario_cost * 100.0
    } else {
        0.0
    }
}

impl Projection {
    pub fn has_scenarios(&self) -> bool {
        self.scenario_cost > 0.0
    }

    /// Comparison rows in display order.
    pub fn deltas(&self) -> Vec<MetricDelta> {
        use MetricUnit::{Count, Currency, Percentage};

        type Accessor = fn(&MetricsResult) -> f64;
        #[rustfmt::skip]
        let rows: [(&'static str, &'static str, MetricUnit, bool, Accessor); 17] = [
            ("marketing_profit", "Marketing Profit", Currency, true, |m| m.marketing_profit),
            ("total_gross_profit", "Total Gross Profit", Currency, true, |m| m.total_gross_profit),
            ("contribution_margin", "Contribution Margin", Currency, true, |m| m.contribution_margin),
            ("total_marketing_cost", "Total Marketing Cost", Currency, false, |m| m.total_marketing_cost),
            ("total_ads_budget", "Ads Budget", Currency, false, |m| m.total_ads_budget),
            ("fixed_marketing_opex", "OPEX + Scenarios", Currency, false, |m| m.fixed_marketing_opex),
            ("blended_cost_per_session", "Blended Cost Per Session", Currency, false, |m| m.blended_cost_per_session),
            ("total_sessions", "Total Sessions", Count, true, |m| m.total_sessions),
            ("paid_sessions", "Paid Sessions", Count, true, |m| m.paid_sessions),
            ("organic_sessions", "Organic Sessions", Count, true, |m| m.organic_sessions),
            ("total_revenue", "Total Revenue", Currency, true, |m| m.total_revenue),
            ("blended_aov", "Blended Average Order Value", Currency, true, |m| m.blended_aov),
            ("aov_first_purchase", "AOV (First Purchase)", Currency, true, |m| m.aov_first_purchase),
            ("aov_repeat_purchase", "AOV (Repeat Purchase)", Currency, true, |m| m.aov_repeat_purchase),
            ("blended_conversion_rate", "Blended Conversion Rate", Percentage, true, |m| m.blended_conversion_rate),
            ("first_purchase_conversion_rate", "First Purchase CR", Percentage, true, |m| m.first_purchase_conversion_rate),
            ("repeat_purchase_conversion_rate", "Repeat Purchase CR", Percentage, true, |m| m.repeat_purchase_conversion_rate),
        ];

        rows.into_iter()
            .map(|(key, label, unit, higher_is_better, get)| {
                let base = get(&self.base);
                let scenario = get(&self.scenario);
                MetricDelta {
                    key,
                    label,
                    unit,
                    base,
                    scenario,
                    delta: scenario - base,
                    higher_is_better,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Impact, ImpactValue, InputField};

    #[test]
    fn no_scenarios_gives_zero_roi_and_identical_results() {
        let projection = project(&BusinessInputs::default(), &[], GlobalEstimateLevel::Realistic);

        assert_eq!(projection.base, projection.scenario);
        assert_eq!(projection.roi, 0.0);
        assert_eq!(projection.contribution_margin_delta, 0.0);
        assert!(!projection.has_scenarios());
        assert!(projection.deltas().iter().all(|d| !d.is_significant()));
    }

    #[test]
    fn scenario_cost_is_echoed_on_scenario_result_only() {
        let scenario = Scenario::new("opex", "Opex", 750.0).with_active(true);
        let projection = project(
            &BusinessInputs::default(),
            &[scenario],
            GlobalEstimateLevel::Realistic,
        );

        assert_eq!(projection.base.scenario_cost, 0.0);
        assert_eq!(projection.scenario.scenario_cost, 750.0);
        // A cost-only scenario does not move contribution margin
        assert_eq!(projection.contribution_margin_delta, 0.0);
        assert_eq!(projection.roi, 0.0);
        assert_eq!(
            projection.scenario.total_marketing_cost - projection.base.total_marketing_cost,
            750.0
        );
    }

    #[test]
    fn marketing_cost_increase_is_not_an_improvement() {
        let scenario = Scenario::new("opex", "Opex", 750.0).with_active(true);
        let projection = project(
            &BusinessInputs::default(),
            &[scenario],
            GlobalEstimateLevel::Realistic,
        );

        let cost = projection
            .deltas()
            .into_iter()
            .find(|d| d.key == "total_marketing_cost")
            .unwrap();
        assert!(cost.is_significant());
        assert!(!cost.is_improvement());
    }

    #[test]
    fn roi_uses_contribution_margin_delta() {
        let scenario = Scenario::new("bundle", "Bundle", 500.0)
            .with_impact(
                InputField::FirstPurchaseAov,
                Impact::percentage(ImpactValue::new(5.0, 15.0, 20.0)),
            )
            .with_active(true);
        let projection = project(
            &BusinessInputs::default(),
            &[scenario],
            GlobalEstimateLevel::Realistic,
        );

        let expected = (projection.scenario.contribution_margin
            - projection.base.contribution_margin)
            / 500.0
            * 100.0;
        assert!((projection.roi - expected).abs() < 1e-9);
        assert!(projection.roi > 0.0);
    }

    #[test]
    fn deltas_cover_all_display_rows() {
        let projection = project(&BusinessInputs::default(), &[], GlobalEstimateLevel::Realistic);
        let deltas = projection.deltas();

        assert_eq!(deltas.len(), 17);
        assert_eq!(deltas[0].key, "marketing_profit");
        assert_eq!(deltas[16].key, "repeat_purchase_conversion_rate");
    }
}
