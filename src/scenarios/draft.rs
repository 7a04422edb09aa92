//! User-authored scenario drafts and their validation.

use crate::core::{EstimateLevel, Impact, ImpactMap, InputField};
use serde::{Deserialize, Serialize};

/// The editable part of a scenario, as submitted by the scenario form.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScenarioDraft {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub cost: f64,
    #[serde(default)]
    pub impact: ImpactMap,
}

impl ScenarioDraft {
    pub fn new(name: impl Into<String>, description: impl Into<String>, cost: f64) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            cost,
            impact: ImpactMap::new(),
        }
    }

    pub fn with_impact(mut self, field: InputField, impact: Impact) -> Self {
        self.impact.insert(field, impact);
        self
    }

    /// Run every check and collect all failures.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let errors: Vec<String> = self
            .collect_validations()
            .into_iter()
            .filter_map(Result::err)
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    // Pure function: collect all draft validations
    fn collect_validations(&self) -> Vec<Result<(), String>> {
        let mut checks = vec![
            validate_required(&self.name, "Scenario name"),
            validate_required(&self.description, "Description"),
            validate_finite(self.cost, "Cost"),
        ];

        if self.impact.is_empty() {
            checks.push(Err("Please select at least one metric to impact.".to_string()));
        }

        for (field, impact) in &self.impact {
            for level in EstimateLevel::ALL {
                if let Some(value) = impact.modifier(level) {
                    checks.push(validate_finite(value, &format!("{field} {level} impact")));
                }
            }
        }

        checks
    }
}

fn validate_required(value: &str, name: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("{name} is required."))
    } else {
        Ok(())
    }
}

fn validate_finite(value: f64, name: &str) -> Result<(), String> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(format!("{name} must be a finite number."))
    }
}
