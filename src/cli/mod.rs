//! CLI module for adprofit
//!
//! This module provides the command-line interface, including:
//! - Argument parsing (`args`)
//! - Runtime setup (`setup`)

pub mod args;
pub mod setup;

// Re-export commonly used types for convenience
pub use args::{Cli, Commands, CurrencyArg, EstimateArg, OutputFormat, SessionsTarget};
pub use setup::{create_formatting_config, init_logging, print_metrics_explanation};

/// Parse CLI arguments using Clap
pub fn parse_args() -> Cli {
    args::parse_args()
}
