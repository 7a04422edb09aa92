//! Scenario management: the built-in seeds, user drafts and the catalog that
//! owns the scenario list between calculations.

pub mod builtins;
pub mod catalog;
pub mod draft;

use thiserror::Error;

pub use builtins::{builtin_scenarios, is_builtin_id, BUILTIN_IDS};
pub use catalog::ScenarioCatalog;
pub use draft::ScenarioDraft;

/// Errors from catalog mutations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("Unknown scenario '{0}'")]
    UnknownScenario(String),

    #[error("Scenario '{0}' is built in and cannot be deleted")]
    BuiltInNotDeletable(String),

    #[error("Scenario id '{0}' is already in use")]
    DuplicateId(String),

    #[error("Invalid scenario: {}", .0.join(" "))]
    InvalidDraft(Vec<String>),
}
