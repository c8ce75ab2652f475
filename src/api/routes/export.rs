//! Export Routes
//!
//! Filtered launch records as a download.
//!
//! - GET /api/v1/export - Export records matching a selection

use axum::{
    body::Body,
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use std::str::FromStr;
use std::sync::Arc;

use crate::aggregation::filter_records;
use crate::api::dto::{ExportParams, ExportRow, EXPORT_HEADERS};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::dataset::LaunchRecord;

/// Supported export encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
    Ndjson,
}

impl ExportFormat {
    pub fn content_type(self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv",
            ExportFormat::Json => "application/json",
            ExportFormat::Ndjson => "application/x-ndjson",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Ndjson => "ndjson",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            "ndjson" => Ok(ExportFormat::Ndjson),
            other => Err(ApiError::Validation(format!(
                "Unknown export format '{}', expected csv, json or ndjson",
                other
            ))),
        }
    }
}

/// GET /api/v1/export
///
/// Export the records of a selection in the specified format.
pub async fn export_data(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ExportParams>,
) -> ApiResult<Response> {
    let format: ExportFormat = params.format.parse()?;
    let selection = params.selection(&state.dataset);

    let records: Vec<&LaunchRecord> =
        filter_records(state.dataset.records(), &selection.site, selection.payload_range)
            .collect();

    tracing::debug!(
        site = %selection.site,
        payload_range = %selection.payload_range,
        rows = records.len(),
        format = format.extension(),
        "Exporting records"
    );

    let body = match format {
        ExportFormat::Csv => format_csv(&records)?,
        ExportFormat::Json => format_json(&records)?,
        ExportFormat::Ndjson => format_ndjson(&records)?,
    };

    let filename = format!(
        "launch_export_{}.{}",
        Utc::now().format("%Y%m%d_%H%M%S"),
        format.extension()
    );

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, format.content_type().to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        Body::from(body),
    )
        .into_response())
}

/// Format as CSV with the source table's headers
fn format_csv(records: &[&LaunchRecord]) -> ApiResult<String> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    // Header row even when nothing matched
    writer.write_record(EXPORT_HEADERS)?;
    for record in records {
        writer.serialize(ExportRow::from(*record))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| ApiError::Internal(format!("CSV flush failed: {}", e)))?;

    String::from_utf8(bytes).map_err(|e| ApiError::Internal(e.to_string()))
}

/// Format as JSON array
fn format_json(records: &[&LaunchRecord]) -> ApiResult<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// Format as newline-delimited JSON
fn format_ndjson(records: &[&LaunchRecord]) -> ApiResult<String> {
    let mut ndjson = String::new();
    for record in records {
        ndjson.push_str(&serde_json::to_string(record)?);
        ndjson.push('\n');
    }
    Ok(ndjson)
}
