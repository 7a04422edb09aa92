use crate::core::{EstimateLevel, Impact, ImpactValue, InputField, Scenario};

/// Built-in scenario ids, in catalog order.
pub const BUILTIN_IDS: [&str; 5] = [
    "cro-project",
    "seo-optimization",
    "product-bundle",
    "email-marketing",
    "agency-ads",
];

fn pct(pessimistic: f64, realistic: f64, optimistic: f64) -> Impact {
    Impact::percentage(ImpactValue::new(pessimistic, realistic, optimistic))
}

fn seed(id: &str, name: &str, description: &str, cost: f64) -> Scenario {
    Scenario::new(id, name, cost)
        .with_description(description)
        .with_active(false)
        .with_estimate_level(EstimateLevel::Realistic)
}

/// The seeded catalog: inactive, realistic, not deletable.
pub fn builtin_scenarios() -> Vec<Scenario> {
    vec![
        seed(
            "cro-project",
            "Conversion Rate Optimization Project",
            "Implement A/B testing and UX improvements on key landing pages.",
            1500.0,
        )
        .with_impact(InputField::FirstPurchaseConversionRate, pct(5.0, 10.0, 15.0))
        .with_impact(InputField::MetaRemarketingConversionRate, pct(2.0, 5.0, 8.0))
        .with_impact(InputField::GoogleRemarketingConversionRate, pct(2.0, 5.0, 8.0)),
        seed(
            "seo-optimization",
            "SEO Optimization Campaign",
            "Improve organic search rankings through content marketing and technical SEO.",
            2000.0,
        )
        .with_impact(InputField::OrganicSessions, pct(10.0, 20.0, 30.0)),
        seed(
            "product-bundle",
            "Add Product Bundle Landing Page",
            "Introduce a new landing page offering a discounted product bundle.",
            500.0,
        )
        .with_impact(InputField::FirstPurchaseAov, pct(5.0, 15.0, 20.0)),
        seed(
            "email-marketing",
            "Start Email Marketing Campaign",
            "Launch a newsletter and automated email flows to engage customers.",
            800.0,
        )
        .with_impact(InputField::RepeatPurchaseConversionRate, pct(10.0, 25.0, 35.0)),
        seed(
            "agency-ads",
            "Hire Professional Agency for Ads",
            "Outsource ad management to an expert agency for better efficiency.",
            4000.0,
        )
        .with_impact(InputField::MetaProspectingCpc, pct(-5.0, -10.0, -15.0))
        .with_impact(InputField::GoogleProspectingCpc, pct(-5.0, -10.0, -15.0))
        .with_impact(InputField::MetaProspectingConversionRate, pct(5.0, 15.0, 20.0))
        .with_impact(InputField::GoogleProspectingConversionRate, pct(5.0, 15.0, 20.0)),
    ]
}

pub fn is_builtin_id(id: &str) -> bool {
    BUILTIN_IDS.contains(&id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeds_are_inactive_builtins_in_order() {
        let scenarios = builtin_scenarios();
        let ids: Vec<&str> = scenarios.iter().map(|s| s.id.as_str()).collect();

        assert_eq!(ids, BUILTIN_IDS);
        assert!(scenarios.iter().all(|s| !s.active && !s.is_custom));
        assert!(scenarios
            .iter()
            .all(|s| s.estimate_level == EstimateLevel::Realistic));
    }

    #[test]
    fn agency_lowers_prospecting_cpc() {
        let agency = builtin_scenarios().pop().unwrap();
        let cpc = agency.impact[&InputField::MetaProspectingCpc];
        assert_eq!(cpc.modifier(EstimateLevel::Optimistic), Some(-15.0));
        assert_eq!(agency.cost, 4000.0);
        assert_eq!(agency.impact.len(), 4);
    }
}
