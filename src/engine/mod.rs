//! Pure calculation pipeline.
//!
//! Two cooperating functions do all the work:
//!
//! - [`resolve_scenarios`] folds the active scenarios into one adjusted input
//!   record and the aggregate scenario cost.
//! - [`compute_metrics`] derives sessions, purchases, revenue and profit from
//!   an input record.
//!
//! [`project`] runs both against the same base inputs and diffs the results.
//! Nothing here performs I/O or keeps state between calls.
//!
//! ```
//! use adprofit::core::{BusinessInputs, GlobalEstimateLevel};
//! use adprofit::engine::project;
//! use adprofit::scenarios::builtin_scenarios;
//!
//! let mut scenarios = builtin_scenarios();
//! scenarios[1].active = true; // seo-optimization
//!
//! let projection = project(
//!     &BusinessInputs::default(),
//!     &scenarios,
//!     GlobalEstimateLevel::Realistic,
//! );
//! assert_eq!(projection.scenario_cost, 2000.0);
//! assert!(projection.scenario.organic_sessions > projection.base.organic_sessions);
//! ```

pub mod metrics;
pub mod projection;
pub mod resolver;

pub use metrics::{channel_sessions, compute_metrics, safe_ratio};
pub use projection::{project, scenario_roi, MetricDelta, MetricUnit, Projection, DELTA_EPSILON};
pub use resolver::{resolve_scenarios, ResolvedInputs};
