use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use super::core::ProfitConfig;
use super::validation::{validate_config, warn_out_of_range_inputs};
use crate::core::{Error, Result};

/// File name searched for in the working directory and its ancestors
pub const CONFIG_FILE_NAME: &str = ".adprofit.toml";

const MAX_TRAVERSAL_DEPTH: usize = 10;

/// Pure function to read and parse config file contents
pub(crate) fn read_config_file(path: &Path) -> std::result::Result<String, std::io::Error> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Parse a TOML document and run every config validation.
pub fn parse_and_validate_config(contents: &str) -> Result<ProfitConfig> {
    let config = toml::from_str::<ProfitConfig>(contents)?;

    validate_config(&config).map_err(Error::Validation)?;
    warn_out_of_range_inputs(&config.inputs);

    Ok(config)
}

/// Load one candidate file; `None` when it is missing or invalid
pub(crate) fn try_load_config_from_path(config_path: &Path) -> Option<ProfitConfig> {
    let contents = match read_config_file(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            handle_read_error(config_path, &e);
            return None;
        }
    };

    match parse_and_validate_config(&contents) {
        Ok(config) => {
            log::debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            log::warn!(
                "Skipping invalid config {}: {}. Continuing search in parent directories.",
                config_path.display(),
                e
            );
            None
        }
    }
}

/// Handle file read errors with appropriate logging
pub(crate) fn handle_read_error(config_path: &Path, error: &std::io::Error) {
    // Only log actual errors, not "file not found"
    if error.kind() != std::io::ErrorKind::NotFound {
        log::warn!(
            "Failed to read config file {}: {}",
            config_path.display(),
            error
        );
    }
}

/// Pure function to generate directory ancestors up to a depth limit
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Search `start` and its ancestors for `.adprofit.toml`.
pub fn load_config_from_dir(start: PathBuf) -> ProfitConfig {
    directory_ancestors(start, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            log::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            ProfitConfig::default()
        })
}

pub fn load_config() -> ProfitConfig {
    // Get current directory or return default
    match std::env::current_dir() {
        Ok(dir) => load_config_from_dir(dir),
        Err(e) => {
            log::warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            ProfitConfig::default()
        }
    }
}

/// Load an explicitly named config file. Unlike discovery, a missing or
/// invalid file is an error.
pub fn load_config_from(path: &Path) -> Result<ProfitConfig> {
    let contents = read_config_file(path)
        .map_err(|e| Error::config_with_path(format!("Cannot read config: {e}"), path))?;

    parse_and_validate_config(&contents).map_err(|e| match e {
        Error::Toml(toml_err) => Error::config_with_path(
            format!("Failed to parse {CONFIG_FILE_NAME}: {toml_err}"),
            path,
        ),
        other => other,
    })
}
