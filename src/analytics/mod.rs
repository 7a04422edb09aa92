//! Session import from an external analytics report.
//!
//! The imported value is an ordinary input: it overwrites `organic_sessions`
//! and gets no special treatment downstream.

pub mod ga4;

use crate::core::BusinessInputs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use ga4::{
    categorize_report, classify_source, DateRange, RunReportRequest, RunReportResponse,
    SessionBreakdown, SessionSource,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalyticsError {
    #[error(
        "Permission denied. Ensure the authenticated user has 'Viewer' access to the property, \
         or the access token may have expired."
    )]
    PermissionDenied,

    #[error("Invalid request. Check if the Property ID '{0}' is correct.")]
    InvalidPropertyId(String),

    #[error("Analytics API error {code}: {message}")]
    Api { code: u16, message: String },

    #[error("Invalid report request: {0}")]
    InvalidRequest(String),

    #[error("Malformed analytics report: {0}")]
    MalformedReport(String),
}

/// Which part of the breakdown replaces the organic session count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportTarget {
    /// All sessions in the report
    #[default]
    Total,
    /// Only sessions not attributed to Meta or Google Ads
    Other,
}

/// Overwrite `organic_sessions` with the imported count.
pub fn apply_import(
    inputs: &BusinessInputs,
    breakdown: &SessionBreakdown,
    target: ImportTarget,
) -> BusinessInputs {
    let sessions = match target {
        ImportTarget::Total => breakdown.total(),
        ImportTarget::Other => breakdown.other,
    };
    log::info!(
        "Importing {} sessions into organic_sessions (was {})",
        sessions,
        inputs.organic_sessions
    );

    let mut imported = *inputs;
    imported.organic_sessions = sessions as f64;
    imported
}
