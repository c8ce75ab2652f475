//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! These types are serialized/deserialized to/from JSON.

use serde::{Deserialize, Serialize};

use crate::aggregation::{OutcomeSummary, PayloadPoint};
use crate::binder::ChartUpdate;
use crate::chart::Figure;
use crate::dataset::{
    Dataset, LaunchRecord, PayloadRange, DEFAULT_BOOSTER_COLUMN, DEFAULT_FLIGHT_COLUMN,
    DEFAULT_OUTCOME_COLUMN, DEFAULT_PAYLOAD_COLUMN, DEFAULT_SITE_COLUMN,
};
use crate::selection::{Selection, SiteSelector};

// ============================================
// CHART DTOs
// ============================================

/// Selection given as query parameters
///
/// Every field is optional: the site defaults to `ALL` and missing payload
/// bounds default to the dataset's bounds.
#[derive(Debug, Default, Deserialize)]
pub struct ChartParams {
    /// `"ALL"` or a site identifier
    #[serde(default)]
    pub site: Option<String>,
    /// Lower payload bound (kg)
    #[serde(default)]
    pub low: Option<f64>,
    /// Upper payload bound (kg)
    #[serde(default)]
    pub high: Option<f64>,
}

impl ChartParams {
    /// Resolve into a selection against the loaded dataset
    pub fn selection(&self, dataset: &Dataset) -> Selection {
        resolve_selection(dataset, self.site.as_deref(), self.low, self.high)
    }
}

fn resolve_selection(
    dataset: &Dataset,
    site: Option<&str>,
    low: Option<f64>,
    high: Option<f64>,
) -> Selection {
    let bounds = dataset.payload_bounds();
    let mut selection = Selection::initial(dataset);

    if let Some(site) = site {
        selection.set_site(SiteSelector::from(site));
    }
    selection.set_payload_range(
        PayloadRange::new(low.unwrap_or(bounds.low), high.unwrap_or(bounds.high)),
        bounds,
    );
    selection
}

/// Success pie response
#[derive(Debug, Serialize)]
pub struct OutcomeChartResponse {
    pub site: SiteSelector,
    pub summary: OutcomeSummary,
    /// Fraction of successful launches, null when nothing matched
    pub success_rate: Option<f64>,
    pub figure: Figure,
}

/// Payload scatter response
#[derive(Debug, Serialize)]
pub struct PayloadChartResponse {
    pub selection: Selection,
    pub points: Vec<PayloadPoint>,
    pub figure: Figure,
}

/// Both charts for one selection
#[derive(Debug, Serialize)]
pub struct ChartsResponse {
    pub selection: Selection,
    pub charts: Vec<ChartUpdate>,
}

// ============================================
// DATASET DTOs
// ============================================

/// Dataset metadata
#[derive(Debug, Serialize)]
pub struct DatasetInfoResponse {
    /// Number of launch records
    pub rows: usize,
    /// Site identifiers in first-appearance order
    pub sites: Vec<String>,
    /// Smallest and largest payload mass (kg)
    pub payload_bounds: PayloadRange,
    /// Outcome counts over every site
    pub summary: OutcomeSummary,
}

// ============================================
// HEALTH DTOs
// ============================================

/// Full health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status: healthy, degraded
    pub status: String,
    /// Number of loaded launch records
    pub dataset_rows: usize,
    /// Live dashboard sessions
    pub sessions: usize,
    /// Session limit
    pub max_sessions: usize,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Application version
    pub version: String,
}

// ============================================
// EXPORT DTOs
// ============================================

/// Export query parameters
#[derive(Debug, Deserialize)]
pub struct ExportParams {
    #[serde(default)]
    pub site: Option<String>,
    #[serde(default)]
    pub low: Option<f64>,
    #[serde(default)]
    pub high: Option<f64>,
    /// Format: csv, json, ndjson
    #[serde(default = "default_export_format")]
    pub format: String,
}

fn default_export_format() -> String {
    "csv".to_string()
}

impl ExportParams {
    /// Resolve into a selection against the loaded dataset
    pub fn selection(&self, dataset: &Dataset) -> Selection {
        resolve_selection(dataset, self.site.as_deref(), self.low, self.high)
    }
}

/// Column headers of a CSV export, matching [`ExportRow`]
pub const EXPORT_HEADERS: [&str; 5] = [
    DEFAULT_FLIGHT_COLUMN,
    DEFAULT_SITE_COLUMN,
    DEFAULT_OUTCOME_COLUMN,
    DEFAULT_PAYLOAD_COLUMN,
    DEFAULT_BOOSTER_COLUMN,
];

/// One exported row, keyed by the source table's headers
#[derive(Debug, Serialize)]
pub struct ExportRow<'a> {
    #[serde(rename = "Flight Number")]
    pub flight_number: Option<u32>,
    #[serde(rename = "Launch Site")]
    pub site: &'a str,
    #[serde(rename = "class")]
    pub class: u8,
    #[serde(rename = "Payload Mass (kg)")]
    pub payload_mass_kg: f64,
    #[serde(rename = "Booster Version Category")]
    pub booster_category: Option<&'a str>,
}

impl<'a> From<&'a LaunchRecord> for ExportRow<'a> {
    fn from(record: &'a LaunchRecord) -> Self {
        Self {
            flight_number: record.flight_number,
            site: &record.site,
            class: record.outcome.class(),
            payload_mass_kg: record.payload_mass_kg,
            booster_category: record.booster_category.as_deref(),
        }
    }
}
