use crate::analytics::{categorize_report, RunReportResponse, SessionBreakdown};
use crate::formatting::FormattingConfig;
use crate::io::{self, OutputFormat};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub struct SessionsConfig {
    pub report: PathBuf,
    pub property_id: Option<String>,
    pub format: OutputFormat,
    pub formatting: FormattingConfig,
}

/// Read a saved runReport response and split its sessions by source.
pub fn read_session_report(path: &Path, property_id: Option<&str>) -> Result<SessionBreakdown> {
    let body = io::read_file(path)
        .with_context(|| format!("Failed to read analytics report {}", path.display()))?;
    let response = RunReportResponse::parse(&body, property_id)?;
    let breakdown = categorize_report(&response);

    log::info!(
        "Report {}: {} rows, {} meta / {} google / {} other sessions",
        path.display(),
        response.rows.len(),
        breakdown.meta,
        breakdown.google,
        breakdown.other
    );
    Ok(breakdown)
}

pub fn handle_sessions(config: SessionsConfig) -> Result<()> {
    let breakdown = read_session_report(&config.report, config.property_id.as_deref())?;

    let mut writer = io::create_writer(config.format, io::open_output(None)?, config.formatting);
    writer.write_sessions(&breakdown)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn reads_and_categorizes_saved_report() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("report.json");
        fs::write(
            &path,
            r#"{"rows": [
                {"dimensionValues": [{"value": "facebook.com"}, {"value": "referral"}, {"value": "(none)"}],
                 "metricValues": [{"value": "40"}]},
                {"dimensionValues": [{"value": "google"}, {"value": "cpc"}, {"value": "brand"}],
                 "metricValues": [{"value": "25"}]},
                {"dimensionValues": [{"value": "google"}, {"value": "organic"}, {"value": "(none)"}],
                 "metricValues": [{"value": "100"}]}
            ]}"#,
        )
        .unwrap();

        let breakdown = read_session_report(&path, None).unwrap();
        assert_eq!(
            breakdown,
            SessionBreakdown {
                meta: 40,
                google: 25,
                other: 100
            }
        );
    }

    #[test]
    fn api_error_body_becomes_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("report.json");
        fs::write(
            &path,
            r#"{"error": {"code": 403, "message": "denied", "status": "PERMISSION_DENIED"}}"#,
        )
        .unwrap();

        let err = read_session_report(&path, Some("123")).unwrap_err();
        assert!(err.to_string().contains("Permission denied"));
    }

    #[test]
    fn missing_report_has_context() {
        let err = read_session_report(Path::new("/nonexistent/report.json"), None).unwrap_err();
        assert!(err.to_string().contains("Failed to read analytics report"));
    }
}
