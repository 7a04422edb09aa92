//! End-to-end projection tests: base inputs and built-in scenarios through
//! the resolver, the metrics engine and the comparison rows.

use adprofit::core::{
    BusinessInputs, EstimateLevel, GlobalEstimateLevel, Impact, ImpactValue, InputField, Scenario,
};
use adprofit::engine::{compute_metrics, project, resolve_scenarios};
use adprofit::scenarios::{builtin_scenarios, ScenarioCatalog};
use pretty_assertions::assert_eq;

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {expected}, got {actual}"
    );
}

fn worked_example() -> BusinessInputs {
    BusinessInputs::zeroed()
        .with(InputField::MetaProspectingBudget, 3000.0)
        .with(InputField::MetaProspectingCpc, 1.0)
        .with(InputField::MetaProspectingBounceRate, 40.0)
        .with(InputField::MetaProspectingConversionRate, 1.5)
        .with(InputField::OrganicSessions, 15000.0)
        .with(InputField::FirstPurchaseConversionRate, 1.5)
        .with(InputField::FirstPurchaseAov, 120.0)
        .with(InputField::FirstPurchaseGrossMargin, 60.0)
        .with(InputField::FixedMarketingOpex, 5000.0)
}

#[test]
fn test_worked_example_end_to_end() {
    let projection = project(&worked_example(), &[], GlobalEstimateLevel::Realistic);
    let base = projection.base;

    assert_close(base.channel_sessions.meta_prospecting, 1800.0);
    assert_close(base.total_sessions, 16800.0);
    assert_close(base.prospecting_purchases, 27.0);
    assert_close(base.organic_first_purchases, 225.0);
    assert_close(base.first_purchases, 252.0);
    assert_close(base.revenue_first_purchase, 30240.0);
    assert_close(base.gross_profit_first_purchase, 18144.0);
    assert_close(base.total_marketing_cost, 8000.0);
    assert_close(base.marketing_profit, 10144.0);

    assert_eq!(projection.scenario, base);
    assert_eq!(projection.scenario_cost, 0.0);
    assert_eq!(projection.roi, 0.0);
}

#[test]
fn test_organic_scenario_roi() {
    let scenario = Scenario::new("organic", "Organic push", 1000.0)
        .with_impact(
            InputField::OrganicSessions,
            Impact::percentage(ImpactValue::new(10.0, 20.0, 30.0)),
        )
        .with_active(true);
    let inputs = worked_example();

    let resolved = resolve_scenarios(&inputs, &[scenario.clone()], GlobalEstimateLevel::Realistic);
    assert_close(resolved.modified.organic_sessions, 18000.0);
    assert_close(resolved.modified.fixed_marketing_opex, 6000.0);

    let projection = project(&inputs, &[scenario], GlobalEstimateLevel::Realistic);
    let expected_delta = projection.scenario.contribution_margin - projection.base.contribution_margin;
    assert_close(projection.contribution_margin_delta, expected_delta);
    assert_close(projection.roi, expected_delta / 1000.0 * 100.0);

    // 45 extra organic first purchases at 120 AOV and 60% margin
    assert_close(expected_delta, 45.0 * 120.0 * 0.6);
    assert_close(projection.scenario.fixed_marketing_opex, 6000.0);
    assert_close(projection.scenario.scenario_cost, 1000.0);
}

#[test]
fn test_builtins_with_global_override() {
    let mut catalog = ScenarioCatalog::with_builtins();
    catalog.set_active("agency-ads", true).unwrap();
    catalog
        .set_estimate_level("agency-ads", EstimateLevel::Pessimistic)
        .unwrap();
    let inputs = BusinessInputs::default();

    let individual = project(&inputs, &catalog.active(), GlobalEstimateLevel::Individual);
    let optimistic = project(&inputs, &catalog.active(), GlobalEstimateLevel::Optimistic);

    // -5% vs -15% CPC on Meta prospecting
    assert_close(
        individual.scenario.channel_sessions.meta_prospecting,
        3000.0 / 0.95 * 0.6,
    );
    assert_close(
        optimistic.scenario.channel_sessions.meta_prospecting,
        3000.0 / 0.85 * 0.6,
    );
    assert_eq!(individual.scenario_cost, 4000.0);
    assert!(optimistic.contribution_margin_delta > individual.contribution_margin_delta);
}

#[test]
fn test_all_builtins_stack_costs() {
    let scenarios: Vec<Scenario> = builtin_scenarios()
        .into_iter()
        .map(|s| s.with_active(true))
        .collect();
    let inputs = BusinessInputs::default();

    let projection = project(&inputs, &scenarios, GlobalEstimateLevel::Realistic);

    assert_eq!(projection.scenario_cost, 1500.0 + 2000.0 + 500.0 + 800.0 + 4000.0);
    assert_close(
        projection.scenario.fixed_marketing_opex,
        inputs.fixed_marketing_opex + projection.scenario_cost,
    );
    assert_close(
        projection.scenario.total_marketing_cost,
        projection.scenario.total_ads_budget + projection.scenario.fixed_marketing_opex,
    );
}

#[test]
fn test_deltas_follow_projection() {
    let mut scenarios = builtin_scenarios();
    scenarios[3].active = true; // email-marketing
    let projection = project(
        &BusinessInputs::default(),
        &scenarios,
        GlobalEstimateLevel::Realistic,
    );

    let deltas = projection.deltas();
    let margin = deltas
        .iter()
        .find(|d| d.key == "contribution_margin")
        .unwrap();
    assert_close(margin.delta, projection.contribution_margin_delta);
    assert!(margin.is_improvement());

    let sessions = deltas.iter().find(|d| d.key == "total_sessions").unwrap();
    assert!(!sessions.is_significant());

    let cost = deltas
        .iter()
        .find(|d| d.key == "total_marketing_cost")
        .unwrap();
    assert_close(cost.delta, 800.0);
    assert!(!cost.is_improvement());
}

#[test]
fn test_negative_results_propagate() {
    let scenario = Scenario::new("collapse", "Collapse", 0.0)
        .with_impact(
            InputField::OrganicSessions,
            Impact::percentage(ImpactValue::new(-150.0, -150.0, -150.0)),
        )
        .with_active(true);
    let inputs = worked_example();

    let resolved = resolve_scenarios(&inputs, &[scenario], GlobalEstimateLevel::Realistic);
    assert_close(resolved.modified.organic_sessions, -7500.0);

    let result = compute_metrics(&resolved.modified);
    assert!(result.organic_first_purchases < 0.0);
    assert!(result.contribution_margin.is_finite());
}
