// Export modules for library usage
pub mod analytics;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod engine;
pub mod formatting;
pub mod io;
pub mod scenarios;

// Re-export commonly used types
pub use crate::core::{
    BusinessInputs, Channel, EstimateLevel, GlobalEstimateLevel, Impact, ImpactType, ImpactValue,
    InputField, MetricsResult, Scenario,
};

pub use crate::engine::{
    compute_metrics, project, resolve_scenarios, MetricDelta, Projection, ResolvedInputs,
};

pub use crate::scenarios::{builtin_scenarios, CatalogError, ScenarioCatalog, ScenarioDraft};

pub use crate::io::output::{create_writer, OutputFormat, OutputWriter};
