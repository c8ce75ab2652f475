//! Chart Routes
//!
//! Stateless chart computation for one selection given in the query string.
//!
//! - GET /api/v1/charts/outcomes - Success pie figure and counts
//! - GET /api/v1/charts/payload - Payload scatter figure and points
//! - GET /api/v1/charts - Both figures

use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use crate::aggregation::{compute_outcome_summary, compute_scatter_points};
use crate::api::dto::{ChartParams, ChartsResponse, OutcomeChartResponse, PayloadChartResponse};
use crate::api::state::AppState;
use crate::binder::ChartUpdate;
use crate::chart::{render_outcome_chart, render_payload_chart};

/// GET /api/v1/charts/outcomes
///
/// Payload bounds are ignored; the pie only filters by site.
pub async fn outcome_chart(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ChartParams>,
) -> Json<OutcomeChartResponse> {
    let selection = params.selection(&state.dataset);
    let summary = compute_outcome_summary(state.dataset.records(), &selection.site);
    let figure = render_outcome_chart(&summary, &selection.site);

    Json(OutcomeChartResponse {
        site: selection.site,
        success_rate: summary.success_rate(),
        summary,
        figure,
    })
}

/// GET /api/v1/charts/payload
pub async fn payload_chart(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ChartParams>,
) -> Json<PayloadChartResponse> {
    let selection = params.selection(&state.dataset);
    let points = compute_scatter_points(
        state.dataset.records(),
        &selection.site,
        selection.payload_range,
    );
    let figure = render_payload_chart(&points);

    Json(PayloadChartResponse {
        selection,
        points,
        figure,
    })
}

/// GET /api/v1/charts
///
/// Runs every registered chart handler, the same pass a new session gets.
pub async fn all_charts(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ChartParams>,
) -> Json<ChartsResponse> {
    let selection = params.selection(&state.dataset);
    let mut charts: Vec<ChartUpdate> = Vec::new();
    state
        .dispatcher
        .render_all(&state.dataset, &selection, &mut charts);

    Json(ChartsResponse { selection, charts })
}
