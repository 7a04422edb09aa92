//! Scenario model: what-if initiatives with three-point impact estimates.

use super::inputs::InputField;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Confidence band of a three-point estimate.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum EstimateLevel {
    Pessimistic,
    #[default]
    Realistic,
    Optimistic,
}

impl EstimateLevel {
    pub const ALL: [EstimateLevel; 3] = [
        EstimateLevel::Pessimistic,
        EstimateLevel::Realistic,
        EstimateLevel::Optimistic,
    ];

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pessimistic" => Some(Self::Pessimistic),
            "realistic" => Some(Self::Realistic),
            "optimistic" => Some(Self::Optimistic),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pessimistic => "pessimistic",
            Self::Realistic => "realistic",
            Self::Optimistic => "optimistic",
        }
    }
}

impl fmt::Display for EstimateLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Global estimate selector held by the caller.
///
/// Any level other than `Individual` overrides every scenario's own level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GlobalEstimateLevel {
    Pessimistic,
    #[default]
    Realistic,
    Optimistic,
    Individual,
}

impl GlobalEstimateLevel {
    pub fn parse(s: &str) -> Option<Self> {
        if s.eq_ignore_ascii_case("individual") {
            return Some(Self::Individual);
        }
        EstimateLevel::parse(s).map(Self::from)
    }

    /// Level a scenario is evaluated at under this selector.
    pub fn effective_for(self, scenario_level: EstimateLevel) -> EstimateLevel {
        match self {
            Self::Pessimistic => EstimateLevel::Pessimistic,
            Self::Realistic => EstimateLevel::Realistic,
            Self::Optimistic => EstimateLevel::Optimistic,
            Self::Individual => scenario_level,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pessimistic => "pessimistic",
            Self::Realistic => "realistic",
            Self::Optimistic => "optimistic",
            Self::Individual => "individual",
        }
    }
}

impl From<EstimateLevel> for GlobalEstimateLevel {
    fn from(level: EstimateLevel) -> Self {
        match level {
            EstimateLevel::Pessimistic => Self::Pessimistic,
            EstimateLevel::Realistic => Self::Realistic,
            EstimateLevel::Optimistic => Self::Optimistic,
        }
    }
}

impl fmt::Display for GlobalEstimateLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How an impact value is applied to its field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImpactType {
    /// Multiply the current value by `1 + value / 100`
    #[default]
    Percentage,
    /// Replace the current value with `value`
    Absolute,
}

/// Three-point estimate; a missing level has no effect at that level.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ImpactValue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pessimistic: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub realistic: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optimistic: Option<f64>,
}

impl ImpactValue {
    pub fn new(pessimistic: f64, realistic: f64, optimistic: f64) -> Self {
        Self {
            pessimistic: Some(pessimistic),
            realistic: Some(realistic),
            optimistic: Some(optimistic),
        }
    }

    pub fn get(&self, level: EstimateLevel) -> Option<f64> {
        match level {
            EstimateLevel::Pessimistic => self.pessimistic,
            EstimateLevel::Realistic => self.realistic,
            EstimateLevel::Optimistic => self.optimistic,
        }
    }

    pub fn set(&mut self, level: EstimateLevel, value: Option<f64>) {
        match level {
            EstimateLevel::Pessimistic => self.pessimistic = value,
            EstimateLevel::Realistic => self.realistic = value,
            EstimateLevel::Optimistic => self.optimistic = value,
        }
    }

    pub fn is_empty(&self) -> bool {
        EstimateLevel::ALL.iter().all(|level| self.get(*level).is_none())
    }
}

/// Per-metric adjustment of a scenario.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Impact {
    #[serde(rename = "type", default)]
    pub kind: ImpactType,
    #[serde(default)]
    pub value: ImpactValue,
}

impl Impact {
    pub fn percentage(value: ImpactValue) -> Self {
        Self {
            kind: ImpactType::Percentage,
            value,
        }
    }

    pub fn absolute(value: ImpactValue) -> Self {
        Self {
            kind: ImpactType::Absolute,
            value,
        }
    }

    /// Modifier at `level`, `None` meaning "leave the field alone".
    pub fn modifier(&self, level: EstimateLevel) -> Option<f64> {
        self.value.get(level)
    }

    /// Apply the modifier at `level` to `current`.
    pub fn apply(&self, current: f64, level: EstimateLevel) -> f64 {
        match (self.kind, self.modifier(level)) {
            (_, None) => current,
            (ImpactType::Percentage, Some(pct)) => current * (1.0 + pct / 100.0),
            (ImpactType::Absolute, Some(value)) => value,
        }
    }
}

/// Field-keyed impact map. Ordered so application and output are deterministic.
pub type ImpactMap = BTreeMap<InputField, Impact>;

/// A named business initiative layered over the base inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Investment for the period, added to fixed marketing OPEX when active
    #[serde(default)]
    pub cost: f64,
    #[serde(default)]
    pub impact: ImpactMap,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub estimate_level: EstimateLevel,
    #[serde(default)]
    pub is_custom: bool,
}

impl Scenario {
    pub fn new(id: impl Into<String>, name: impl Into<String>, cost: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            cost,
            impact: ImpactMap::new(),
            active: false,
            estimate_level: EstimateLevel::default(),
            is_custom: false,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_impact(mut self, field: InputField, impact: Impact) -> Self {
        self.impact.insert(field, impact);
        self
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub fn with_estimate_level(mut self, level: EstimateLevel) -> Self {
        self.estimate_level = level;
        self
    }

    pub fn custom(mut self) -> Self {
        self.is_custom = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_level_is_a_no_op() {
        let impact = Impact::percentage(ImpactValue {
            realistic: Some(20.0),
            ..Default::default()
        });
        assert_eq!(impact.modifier(EstimateLevel::Optimistic), None);
        assert_eq!(impact.apply(50.0, EstimateLevel::Optimistic), 50.0);
        assert_eq!(impact.apply(50.0, EstimateLevel::Realistic), 60.0);
    }

    #[test]
    fn absolute_impact_replaces_value() {
        let impact = Impact::absolute(ImpactValue::new(1.0, 2.0, 3.0));
        assert_eq!(impact.apply(99.0, EstimateLevel::Pessimistic), 1.0);
        assert_eq!(impact.apply(99.0, EstimateLevel::Optimistic), 3.0);
    }

    #[test]
    fn global_level_overrides_unless_individual() {
        assert_eq!(
            GlobalEstimateLevel::Optimistic.effective_for(EstimateLevel::Pessimistic),
            EstimateLevel::Optimistic
        );
        assert_eq!(
            GlobalEstimateLevel::Individual.effective_for(EstimateLevel::Pessimistic),
            EstimateLevel::Pessimistic
        );
    }

    #[test]
    fn parse_levels() {
        assert_eq!(
            GlobalEstimateLevel::parse("Individual"),
            Some(GlobalEstimateLevel::Individual)
        );
        assert_eq!(
            GlobalEstimateLevel::parse("OPTIMISTIC"),
            Some(GlobalEstimateLevel::Optimistic)
        );
        assert_eq!(GlobalEstimateLevel::parse("likely"), None);
    }

    #[test]
    fn impact_deserializes_from_sparse_json() {
        let impact: Impact =
            serde_json::from_str(r#"{"type":"absolute","value":{"optimistic":4}}"#).unwrap();
        assert_eq!(impact.kind, ImpactType::Absolute);
        assert_eq!(impact.value.realistic, None);
        assert_eq!(impact.value.optimistic, Some(4.0));
        assert!(!impact.value.is_empty());
        assert!(ImpactValue::default().is_empty());
    }
}
