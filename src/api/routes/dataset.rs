//! Dataset Routes
//!
//! - GET /api/v1/dataset - Dataset metadata

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::aggregation::compute_outcome_summary;
use crate::api::dto::DatasetInfoResponse;
use crate::api::state::AppState;
use crate::selection::SiteSelector;

/// GET /api/v1/dataset
pub async fn dataset_info(State(state): State<Arc<AppState>>) -> Json<DatasetInfoResponse> {
    let dataset = &state.dataset;

    Json(DatasetInfoResponse {
        rows: dataset.len(),
        sites: dataset.sites().to_vec(),
        payload_bounds: dataset.payload_bounds(),
        summary: compute_outcome_summary(dataset.records(), &SiteSelector::All),
    })
}
