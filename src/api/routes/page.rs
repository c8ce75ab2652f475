//! Page Routes
//!
//! - GET / - Dashboard page
//! - GET /api/v1/layout - Page layout description

use axum::{extract::State, http::Uri, response::Html, Json};
use std::sync::Arc;

use crate::api::error::ApiError;
use crate::api::state::AppState;
use crate::dashboard::DashboardLayout;

/// GET /
///
/// The page is rendered once when the state is built.
pub async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(state.page.to_string())
}

/// GET /api/v1/layout
pub async fn layout(State(state): State<Arc<AppState>>) -> Json<DashboardLayout> {
    Json(state.layout.as_ref().clone())
}

/// Fallback for unknown paths
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(format!("No route for {}", uri.path()))
}
