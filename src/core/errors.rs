//! Shared error types for the application

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for adprofit operations
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration file errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        path: Option<PathBuf>,
    },

    /// Validation errors, one message per failed check
    #[error("Validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// Scenario catalog errors
    #[error(transparent)]
    Catalog(#[from] crate::scenarios::CatalogError),

    /// Analytics report errors
    #[error(transparent)]
    Analytics(#[from] crate::analytics::AnalyticsError),

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// TOML parse errors
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

impl Error {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            path: None,
        }
    }

    /// Create a configuration error with path context
    pub fn config_with_path(message: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self::Config {
            message: format!("{} ({})", message.into(), path.display()),
            path: Some(path),
        }
    }

    /// Create a validation error from a single message
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(vec![message.into()])
    }

    /// Whether the user can fix this by editing input or configuration
    pub fn is_user_fixable(&self) -> bool {
        matches!(
            self,
            Self::Config { .. }
                | Self::Validation(_)
                | Self::Catalog(_)
                | Self::Analytics(_)
                | Self::Toml(_)
        )
    }
}

/// Result type alias for adprofit operations
pub type Result<T> = std::result::Result<T, Error>;
