//! Google Analytics 4 `runReport` request building and response categorization.
//!
//! Only the pure halves live here. Signing in and sending the request are the
//! caller's business; this module turns a property id and date range into a
//! request body, and a saved response body into a session breakdown.

use super::AnalyticsError;
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

const RUN_REPORT_ENDPOINT: &str = "https://analyticsdata.googleapis.com/v1beta/properties";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Inclusive reporting window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, AnalyticsError> {
        if start > end {
            return Err(AnalyticsError::InvalidRequest(format!(
                "Start date {start} is after end date {end}"
            )));
        }
        Ok(Self { start, end })
    }

    /// The `days` days ending on `today`, both ends included.
    pub fn last_days(days: u32, today: NaiveDate) -> Self {
        let span = i64::from(days.max(1)) - 1;
        Self {
            start: today - Duration::days(span),
            end: today,
        }
    }

    pub fn parse(start: &str, end: &str) -> Result<Self, AnalyticsError> {
        let parse = |s: &str| {
            NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|e| {
                AnalyticsError::InvalidRequest(format!("Invalid date '{s}' (expected YYYY-MM-DD): {e}"))
            })
        };
        Self::new(parse(start)?, parse(end)?)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireDateRange {
    start_date: String,
    end_date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct NamedField {
    name: String,
}

impl NamedField {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

/// Body of a `runReport` call breaking sessions down by source, medium and campaign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReportRequest {
    #[serde(skip)]
    property_id: String,
    date_ranges: Vec<WireDateRange>,
    dimensions: Vec<NamedField>,
    metrics: Vec<NamedField>,
}

impl RunReportRequest {
    pub fn new(property_id: &str, range: DateRange) -> Result<Self, AnalyticsError> {
        let property_id = property_id.trim();
        if property_id.is_empty() || !property_id.chars().all(|c| c.is_ascii_digit()) {
            return Err(AnalyticsError::InvalidRequest(format!(
                "Property ID '{property_id}' must be a non-empty numeric id"
            )));
        }

        Ok(Self {
            property_id: property_id.to_string(),
            date_ranges: vec![WireDateRange {
                start_date: range.start.format(DATE_FORMAT).to_string(),
                end_date: range.end.format(DATE_FORMAT).to_string(),
            }],
            dimensions: vec![
                NamedField::new("sessionSource"),
                NamedField::new("sessionMedium"),
                NamedField::new("sessionCampaignName"),
            ],
            metrics: vec![NamedField::new("sessions")],
        })
    }

    pub fn endpoint(&self) -> String {
        format!("{RUN_REPORT_ENDPOINT}/{}:runReport", self.property_id)
    }

    pub fn property_id(&self) -> &str {
        &self.property_id
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ReportValue {
    #[serde(default)]
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRow {
    #[serde(default)]
    pub dimension_values: Vec<ReportValue>,
    #[serde(default)]
    pub metric_values: Vec<ReportValue>,
}

impl ReportRow {
    fn dimension(&self, index: usize) -> String {
        self.dimension_values
            .get(index)
            .and_then(|v| v.value.as_deref())
            .unwrap_or_default()
            .to_lowercase()
    }

    fn sessions(&self) -> u64 {
        self.metric_values
            .first()
            .and_then(|v| v.value.as_deref())
            .map(parse_session_count)
            .unwrap_or(0)
    }
}

/// Error payload the API returns with non-2xx responses.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub code: u16,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: String,
}

impl ApiErrorBody {
    pub fn into_error(self, property_id: Option<&str>) -> AnalyticsError {
        match self.code {
            401 | 403 => AnalyticsError::PermissionDenied,
            400 => AnalyticsError::InvalidPropertyId(property_id.unwrap_or("?").to_string()),
            _ if self.message.is_empty() => AnalyticsError::Api {
                code: self.code,
                message: "Failed to fetch data from Google Analytics.".to_string(),
            },
            _ => AnalyticsError::Api {
                code: self.code,
                message: self.message,
            },
        }
    }
}

/// A saved `runReport` response body.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct RunReportResponse {
    #[serde(default)]
    pub rows: Vec<ReportRow>,
    #[serde(default)]
    pub error: Option<ApiErrorBody>,
}

impl RunReportResponse {
    /// Parse a response body, turning an API error payload into an error.
    pub fn parse(body: &str, property_id: Option<&str>) -> Result<Self, AnalyticsError> {
        let mut response: RunReportResponse = serde_json::from_str(body)
            .map_err(|e| AnalyticsError::MalformedReport(e.to_string()))?;

        match response.error.take() {
            Some(error) => Err(error.into_error(property_id)),
            None => Ok(response),
        }
    }
}

/// Sessions split by where they came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SessionBreakdown {
    pub meta: u64,
    pub google: u64,
    pub other: u64,
}

impl SessionBreakdown {
    pub fn total(&self) -> u64 {
        self.meta
            .saturating_add(self.google)
            .saturating_add(self.other)
    }
}

/// Traffic source bucket of one report row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionSource {
    Meta,
    Google,
    Other,
}

/// Classify a row by its lowercased source and medium.
///
/// Facebook or Instagram sources are Meta, as are `fb`/`ig` sources on a CPC
/// medium. Only `google / cpc` counts as Google Ads; organic Google search
/// lands in `Other`.
pub fn classify_source(source: &str, medium: &str) -> SessionSource {
    let is_meta = source.contains("facebook")
        || source.contains("instagram")
        || (medium.contains("cpc") && (source.contains("fb") || source.contains("ig")));

    if is_meta {
        SessionSource::Meta
    } else if medium == "cpc" && source == "google" {
        SessionSource::Google
    } else {
        SessionSource::Other
    }
}

pub fn categorize_report(response: &RunReportResponse) -> SessionBreakdown {
    response
        .rows
        .iter()
        .fold(SessionBreakdown::default(), |mut breakdown, row| {
            let sessions = row.sessions();
            match classify_source(&row.dimension(0), &row.dimension(1)) {
                SessionSource::Meta => {
                    breakdown.meta = breakdown.meta.saturating_add(sessions)
                }
                SessionSource::Google => {
                    breakdown.google = breakdown.google.saturating_add(sessions)
                }
                SessionSource::Other => {
                    breakdown.other = breakdown.other.saturating_add(sessions)
                }
            }
            breakdown
        })
}

// Leading-digit parse; no digits count as zero, too many saturate
fn parse_session_count(raw: &str) -> u64 {
    let digits: String = raw
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    if digits.is_empty() {
        return 0;
    }
    digits.parse().unwrap_or(u64::MAX)
}
