use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::core::{
    BusinessInputs, EstimateLevel, GlobalEstimateLevel, ImpactMap, Result, Scenario,
};
use crate::formatting::Currency;
use crate::io::OutputFormat;
use crate::scenarios::{ScenarioCatalog, ScenarioDraft};

/// Root configuration structure for adprofit
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProfitConfig {
    /// Currency used when rendering money values
    #[serde(default)]
    pub currency: Currency,

    /// Global estimate selector applied to every active scenario
    #[serde(default)]
    pub estimate_mode: GlobalEstimateLevel,

    /// Business inputs; omitted fields keep their defaults
    #[serde(default)]
    pub inputs: BusinessInputs,

    /// Scenario selection and custom scenarios
    #[serde(default)]
    pub scenarios: ScenariosConfig,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

impl ProfitConfig {
    /// Build the scenario catalog described by this configuration.
    ///
    /// Built-ins come first (unless disabled), then custom scenarios in file
    /// order. `levels` and `activate` are applied last, so a listed id is
    /// active regardless of its own `active` flag.
    pub fn build_catalog(&self) -> Result<ScenarioCatalog> {
        let mut catalog = if self.scenarios.include_builtins {
            ScenarioCatalog::with_builtins()
        } else {
            ScenarioCatalog::new()
        };

        for custom in &self.scenarios.custom {
            custom
                .to_draft()
                .validate()
                .map_err(crate::scenarios::CatalogError::InvalidDraft)?;
            catalog.insert(custom.to_scenario())?;
        }

        for (id, level) in &self.scenarios.levels {
            catalog.set_estimate_level(id, *level)?;
        }

        for id in &self.scenarios.activate {
            catalog.set_active(id, true)?;
        }

        Ok(catalog)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenariosConfig {
    /// Seed the catalog with the built-in scenarios
    #[serde(default = "default_include_builtins")]
    pub include_builtins: bool,

    /// Scenario ids to activate
    #[serde(default)]
    pub activate: Vec<String>,

    /// Per-scenario estimate levels, used when `estimate_mode = "individual"`
    #[serde(default)]
    pub levels: BTreeMap<String, EstimateLevel>,

    #[serde(default)]
    pub custom: Vec<CustomScenarioConfig>,
}

fn default_include_builtins() -> bool {
    true
}

impl Default for ScenariosConfig {
    fn default() -> Self {
        Self {
            include_builtins: default_include_builtins(),
            activate: Vec::new(),
            levels: BTreeMap::new(),
            custom: Vec::new(),
        }
    }
}

/// A user-defined scenario as written in `[[scenarios.custom]]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomScenarioConfig {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub cost: f64,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub estimate_level: EstimateLevel,
    #[serde(default)]
    pub impact: ImpactMap,
}

impl CustomScenarioConfig {
    pub fn to_draft(&self) -> ScenarioDraft {
        ScenarioDraft {
            name: self.name.clone(),
            description: self.description.clone(),
            cost: self.cost,
            impact: self.impact.clone(),
        }
    }

    pub fn to_scenario(&self) -> Scenario {
        Scenario {
            id: self.id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            cost: self.cost,
            impact: self.impact.clone(),
            active: self.active,
            estimate_level: self.estimate_level,
            is_custom: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub default_format: Option<OutputFormat>,
    /// Disable colors and emoji
    #[serde(default)]
    pub plain: bool,
}
