//! Domain types shared by the engine, the scenario catalog and the front ends.

pub mod errors;
pub mod inputs;
pub mod results;
pub mod scenario;

pub use errors::{Error, Result};
pub use inputs::{
    BusinessInputs, Channel, ChannelInputs, FieldGroup, FieldMeta, FieldUnit, Funnel, InputField,
    Network,
};
pub use results::{ChannelSessions, MetricsResult};
pub use scenario::{
    EstimateLevel, GlobalEstimateLevel, Impact, ImpactMap, ImpactType, ImpactValue, Scenario,
};
