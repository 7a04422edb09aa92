//! CLI command implementations.
//!
//! Available commands:
//! - **calc**: Baseline and scenario-adjusted metrics for the configured inputs
//! - **scenarios**: List the scenario catalog
//! - **sessions**: Categorize a saved analytics report by traffic source
//! - **init**: Initialize a new `.adprofit.toml`

pub mod calculate;
pub mod init;
pub mod scenarios;
pub mod sessions;

pub use calculate::{handle_calc, CalcConfig};
pub use init::{init_config, init_config_at};
pub use scenarios::{handle_scenarios, ScenariosConfig};
pub use sessions::{handle_sessions, read_session_report, SessionsConfig};

use crate::config::{self, ProfitConfig};
use anyhow::Result;
use std::path::Path;

/// Explicit `--config` path, or discovery from the working directory.
pub(crate) fn load_profit_config(path: Option<&Path>) -> Result<ProfitConfig> {
    match path {
        Some(path) => Ok(config::load_config_from(path)?),
        None => Ok(config::load_config()),
    }
}
