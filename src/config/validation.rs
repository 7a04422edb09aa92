//! Configuration validation with error accumulation.
//!
//! Every check runs and all failures are reported together, so a user can
//! fix a config file in one pass.

use std::collections::BTreeSet;

use super::core::ProfitConfig;
use crate::core::{BusinessInputs, InputField};
use crate::scenarios::is_builtin_id;

/// Validate a loaded configuration, collecting every problem.
pub fn validate_config(config: &ProfitConfig) -> Result<(), Vec<String>> {
    let errors: Vec<String> = collect_config_validations(config)
        .into_iter()
        .filter_map(Result::err)
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

// Pure function: collect all config validations
fn collect_config_validations(config: &ProfitConfig) -> Vec<Result<(), String>> {
    let mut checks: Vec<Result<(), String>> = config
        .inputs
        .non_finite_fields()
        .into_iter()
        .map(|field| Err(format!("inputs.{} must be a finite number", field.key())))
        .collect();

    checks.extend(validate_custom_scenarios(config));

    let known = known_scenario_ids(config);
    checks.extend(
        config
            .scenarios
            .activate
            .iter()
            .map(|id| validate_known_id(id, &known, "scenarios.activate")),
    );
    checks.extend(
        config
            .scenarios
            .levels
            .keys()
            .map(|id| validate_known_id(id, &known, "scenarios.levels")),
    );

    checks
}

fn validate_custom_scenarios(config: &ProfitConfig) -> Vec<Result<(), String>> {
    let mut seen = BTreeSet::new();
    let mut checks = Vec::new();

    for custom in &config.scenarios.custom {
        let id = custom.id.trim();
        if id.is_empty() {
            checks.push(Err(format!(
                "Custom scenario '{}' needs a non-empty id",
                custom.name
            )));
            continue;
        }
        if !seen.insert(id) || (config.scenarios.include_builtins && is_builtin_id(id)) {
            checks.push(Err(format!("Duplicate scenario id '{id}'")));
        }
        if let Err(messages) = custom.to_draft().validate() {
            checks.extend(
                messages
                    .into_iter()
                    .map(|message| Err(format!("Custom scenario '{id}': {message}"))),
            );
        }
    }

    checks
}

fn known_scenario_ids(config: &ProfitConfig) -> BTreeSet<String> {
    let builtins = if config.scenarios.include_builtins {
        crate::scenarios::BUILTIN_IDS.to_vec()
    } else {
        Vec::new()
    };

    builtins
        .into_iter()
        .map(str::to_string)
        .chain(config.scenarios.custom.iter().map(|c| c.id.trim().to_string()))
        .collect()
}

fn validate_known_id(id: &str, known: &BTreeSet<String>, section: &str) -> Result<(), String> {
    if known.contains(id) {
        Ok(())
    } else {
        Err(format!("{section}: unknown scenario id '{id}'"))
    }
}

/// Log a warning for percentage inputs outside 0..=100 and return them.
///
/// Such values are still accepted; the engine computes whatever they imply.
pub fn warn_out_of_range_inputs(inputs: &BusinessInputs) -> Vec<InputField> {
    let out_of_range: Vec<InputField> = InputField::ALL
        .into_iter()
        .filter(|field| field.is_percentage())
        .filter(|field| !(0.0..=100.0).contains(&inputs.get(*field)))
        .collect();

    for field in &out_of_range {
        log::warn!(
            "{} is {} which is outside 0-100%",
            field.display_label(),
            inputs.get(*field)
        );
    }

    out_of_range
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CustomScenarioConfig;
    use crate::core::{EstimateLevel, Impact, ImpactMap, ImpactValue};

    fn custom(id: &str) -> CustomScenarioConfig {
        let mut impact = ImpactMap::new();
        impact.insert(
            InputField::OrganicSessions,
            Impact::percentage(ImpactValue::new(1.0, 2.0, 3.0)),
        );
        CustomScenarioConfig {
            id: id.to_string(),
            name: "Custom".to_string(),
            description: "A custom scenario".to_string(),
            cost: 100.0,
            active: false,
            estimate_level: EstimateLevel::Realistic,
            impact,
        }
    }

    #[test]
    fn default_config_is_valid() {
        assert_eq!(validate_config(&ProfitConfig::default()), Ok(()));
    }

    #[test]
    fn all_problems_are_collected() {
        let mut config = ProfitConfig::default();
        config.inputs.organic_sessions = f64::NAN;
        config.scenarios.activate = vec!["missing".into()];
        config.scenarios.levels.insert("also-missing".into(), EstimateLevel::Optimistic);
        config.scenarios.custom = vec![custom("seo-optimization")];

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors[0].contains("inputs.organic_sessions"));
        assert!(errors.iter().any(|e| e.contains("Duplicate scenario id 'seo-optimization'")));
        assert!(errors.iter().any(|e| e.contains("scenarios.activate")));
        assert!(errors.iter().any(|e| e.contains("scenarios.levels")));
    }

    #[test]
    fn builtin_ids_are_free_without_builtins() {
        let mut config = ProfitConfig::default();
        config.scenarios.include_builtins = false;
        config.scenarios.custom = vec![custom("seo-optimization")];
        config.scenarios.activate = vec!["seo-optimization".into()];
        assert_eq!(validate_config(&config), Ok(()));

        config.scenarios.activate = vec!["cro-project".into()];
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn invalid_custom_draft_is_reported_with_id() {
        let mut config = ProfitConfig::default();
        let mut bad = custom("my-idea");
        bad.description = "  ".into();
        bad.impact.clear();
        config.scenarios.custom = vec![bad];

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                "Custom scenario 'my-idea': Description is required.".to_string(),
                "Custom scenario 'my-idea': Please select at least one metric to impact."
                    .to_string(),
            ]
        );
    }

    #[test]
    fn out_of_range_percentages_only_warn() {
        let inputs = BusinessInputs::default()
            .with(InputField::MetaProspectingBounceRate, 120.0)
            .with(InputField::FirstPurchaseGrossMargin, -5.0);
        let mut config = ProfitConfig::default();
        config.inputs = inputs;

        assert_eq!(
            warn_out_of_range_inputs(&inputs),
            vec![
                InputField::MetaProspectingBounceRate,
                InputField::FirstPurchaseGrossMargin
            ]
        );
        assert_eq!(validate_config(&config), Ok(()));
    }
}
