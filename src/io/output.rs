use crate::analytics::SessionBreakdown;
use crate::core::{BusinessInputs, EstimateLevel, GlobalEstimateLevel, Scenario};
use crate::engine::{MetricDelta, Projection};
use crate::formatting::{Currency, FormattingConfig};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

use super::writers::{JsonWriter, MarkdownWriter, TerminalWriter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    Markdown,
    #[default]
    Terminal,
}

pub trait OutputWriter {
    fn write_report(&mut self, report: &CalcReport) -> anyhow::Result<()>;
    fn write_catalog(&mut self, catalog: &CatalogReport) -> anyhow::Result<()>;
    fn write_sessions(&mut self, breakdown: &SessionBreakdown) -> anyhow::Result<()>;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportMetadata {
    pub tool: String,
    pub version: String,
    pub generated_at: DateTime<Utc>,
}

impl ReportMetadata {
    pub fn now() -> Self {
        Self {
            tool: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            generated_at: Utc::now(),
        }
    }
}

/// An active scenario as evaluated, with the level actually used.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActiveScenario {
    pub id: String,
    pub name: String,
    pub cost: f64,
    pub level: EstimateLevel,
}

/// Everything `calc` reports: inputs, the projection and its comparison rows.
#[derive(Debug, Clone, Serialize)]
pub struct CalcReport {
    pub metadata: ReportMetadata,
    pub currency: Currency,
    pub estimate_mode: GlobalEstimateLevel,
    pub inputs: BusinessInputs,
    pub active_scenarios: Vec<ActiveScenario>,
    #[serde(flatten)]
    pub projection: Projection,
    pub deltas: Vec<MetricDelta>,
}

impl CalcReport {
    pub fn new(
        inputs: BusinessInputs,
        active: &[Scenario],
        estimate_mode: GlobalEstimateLevel,
        currency: Currency,
        projection: Projection,
    ) -> Self {
        let active_scenarios = active
            .iter()
            .filter(|s| s.active)
            .map(|s| ActiveScenario {
                id: s.id.clone(),
                name: s.name.clone(),
                cost: s.cost,
                level: estimate_mode.effective_for(s.estimate_level),
            })
            .collect();

        Self {
            metadata: ReportMetadata::now(),
            currency,
            estimate_mode,
            inputs,
            active_scenarios,
            deltas: projection.deltas(),
            projection,
        }
    }

    /// Deltas worth showing.
    pub fn significant_deltas(&self) -> impl Iterator<Item = &MetricDelta> {
        self.deltas.iter().filter(|d| d.is_significant())
    }
}

/// The scenario list as `scenarios` prints it.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogReport {
    pub metadata: ReportMetadata,
    pub currency: Currency,
    pub estimate_mode: GlobalEstimateLevel,
    pub scenarios: Vec<Scenario>,
}

impl CatalogReport {
    pub fn new(scenarios: Vec<Scenario>, estimate_mode: GlobalEstimateLevel, currency: Currency) -> Self {
        Self {
            metadata: ReportMetadata::now(),
            currency,
            estimate_mode,
            scenarios,
        }
    }
}

pub fn create_writer(
    format: OutputFormat,
    out: Box<dyn Write>,
    formatting: FormattingConfig,
) -> Box<dyn OutputWriter> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(out)),
        OutputFormat::Markdown => Box::new(MarkdownWriter::new(out)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(out, formatting)),
    }
}
