//! `.adprofit.toml` configuration: model, discovery and validation.

mod core;
mod loader;
pub mod validation;

pub use self::core::{CustomScenarioConfig, OutputConfig, ProfitConfig, ScenariosConfig};

pub use loader::{
    directory_ancestors, load_config, load_config_from, load_config_from_dir,
    parse_and_validate_config, CONFIG_FILE_NAME,
};

pub use validation::{validate_config, warn_out_of_range_inputs};
