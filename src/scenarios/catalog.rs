//! Scenario catalog with replace-by-id mutation.
//!
//! The list is an `im::Vector`, so snapshots handed to the engine are cheap
//! clones and never alias the catalog's own state.

use super::builtins::builtin_scenarios;
use super::draft::ScenarioDraft;
use super::CatalogError;
use crate::core::{EstimateLevel, Scenario};
use im::Vector;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScenarioCatalog {
    scenarios: Vector<Scenario>,
}

impl ScenarioCatalog {
    /// Empty catalog without built-ins.
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog seeded with the built-in scenarios, all inactive.
    pub fn with_builtins() -> Self {
        Self {
            scenarios: builtin_scenarios().into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Scenario> {
        self.scenarios.iter()
    }

    pub fn get(&self, id: &str) -> Option<&Scenario> {
        self.scenarios.iter().find(|s| s.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Active scenarios in catalog order.
    pub fn active(&self) -> Vec<Scenario> {
        self.scenarios.iter().filter(|s| s.active).cloned().collect()
    }

    /// Owned snapshot of the whole list, in catalog order.
    pub fn to_vec(&self) -> Vec<Scenario> {
        self.scenarios.iter().cloned().collect()
    }

    /// Create a custom scenario from a validated draft. It starts active at
    /// the realistic level. Returns the new id.
    pub fn add(&mut self, draft: ScenarioDraft) -> Result<String, CatalogError> {
        draft.validate().map_err(CatalogError::InvalidDraft)?;

        let id = self.next_custom_id(chrono::Utc::now().timestamp_millis());
        let scenario = Scenario {
            id: id.clone(),
            name: draft.name,
            description: draft.description,
            cost: draft.cost,
            impact: draft.impact,
            active: true,
            estimate_level: EstimateLevel::Realistic,
            is_custom: true,
        };

        log::debug!("Added custom scenario '{}'", id);
        self.scenarios.push_back(scenario);
        Ok(id)
    }

    /// Insert a fully formed scenario, e.g. a custom one loaded from config.
    pub fn insert(&mut self, scenario: Scenario) -> Result<(), CatalogError> {
        if self.contains(&scenario.id) {
            return Err(CatalogError::DuplicateId(scenario.id));
        }
        self.scenarios.push_back(scenario);
        Ok(())
    }

    /// Replace the editable part of a scenario. Id, activation, estimate
    /// level and custom flag are preserved.
    pub fn edit(&mut self, id: &str, draft: ScenarioDraft) -> Result<(), CatalogError> {
        draft.validate().map_err(CatalogError::InvalidDraft)?;

        self.update(id, |scenario| {
            scenario.name = draft.name;
            scenario.description = draft.description;
            scenario.cost = draft.cost;
            scenario.impact = draft.impact;
        })
    }

    /// Remove a custom scenario. Built-ins cannot be deleted.
    pub fn delete(&mut self, id: &str) -> Result<Scenario, CatalogError> {
        let index = self.index_of(id)?;
        if !self.scenarios[index].is_custom {
            return Err(CatalogError::BuiltInNotDeletable(id.to_string()));
        }
        Ok(self.scenarios.remove(index))
    }

    /// Flip activation; returns the new state.
    pub fn toggle(&mut self, id: &str) -> Result<bool, CatalogError> {
        let mut active = false;
        self.update(id, |scenario| {
            scenario.active = !scenario.active;
            active = scenario.active;
        })?;
        Ok(active)
    }

    pub fn set_active(&mut self, id: &str, active: bool) -> Result<(), CatalogError> {
        self.update(id, |scenario| scenario.active = active)
    }

    pub fn set_estimate_level(&mut self, id: &str, level: EstimateLevel) -> Result<(), CatalogError> {
        self.update(id, |scenario| scenario.estimate_level = level)
    }

    // Copy-on-write replace of the scenario with `id`
    fn update(&mut self, id: &str, change: impl FnOnce(&mut Scenario)) -> Result<(), CatalogError> {
        let index = self.index_of(id)?;
        let mut scenario = self.scenarios[index].clone();
        change(&mut scenario);
        self.scenarios.set(index, scenario);
        Ok(())
    }

    fn index_of(&self, id: &str) -> Result<usize, CatalogError> {
        self.scenarios
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| CatalogError::UnknownScenario(id.to_string()))
    }

    // Pure function: first free `custom-<millis>` id at or after `millis`
    fn next_custom_id(&self, millis: i64) -> String {
        (millis..)
            .map(|n| format!("custom-{n}"))
            .find(|id| !self.contains(id))
            .unwrap_or_else(|| format!("custom-{millis}-{}", self.len()))
    }
}

impl FromIterator<Scenario> for ScenarioCatalog {
    fn from_iter<I: IntoIterator<Item = Scenario>>(iter: I) -> Self {
        Self {
            scenarios: iter.into_iter().collect(),
        }
    }
}
