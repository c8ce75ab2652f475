//! # Launch Dashboard
//!
//! An interactive web dashboard over a table of SpaceX launch records.
//!
//! ## Features
//!
//! - **Site dropdown**: success/failure pie for one site or every site
//! - **Payload slider**: payload mass vs. outcome scatter for a mass interval
//! - **Live updates**: each browser tab is a WebSocket session whose charts
//!   are recomputed server-side on every control change
//! - **JSON API**: the same charts and the filtered records over plain HTTP
//!
//! ## Modules
//!
//! - [`dataset`]: CSV loading and the immutable launch table
//! - [`aggregation`]: outcome counts and scatter points for a selection
//! - [`chart`]: Plotly figure construction
//! - [`binder`]: control-to-chart wiring and per-session state
//! - [`dashboard`]: page layout and HTML rendering
//! - [`api`]: HTTP server with Axum
//! - [`websocket`]: dashboard session transport
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use launch_dash::aggregation::compute_outcome_summary;
//! use launch_dash::dataset::{Dataset, DatasetLoader};
//! use launch_dash::selection::SiteSelector;
//! use std::path::Path;
//!
//! let dataset = Dataset::load(Path::new("data/spacex_launch_dash.csv"), &DatasetLoader::new())?;
//! let summary = compute_outcome_summary(dataset.records(), &SiteSelector::site("KSC LC-39A"));
//!
//! println!("{} successes, {} failures", summary.success_count, summary.failure_count);
//! # Ok::<(), launch_dash::dataset::DatasetError>(())
//! ```

pub mod aggregation;
pub mod api;
pub mod binder;
pub mod chart;
pub mod config;
pub mod dashboard;
pub mod dataset;
pub mod logging;
pub mod selection;
pub mod websocket;

// Re-export top-level types for convenience
pub use dataset::{
    Dataset, DatasetError, DatasetLoader, DatasetResult, LaunchRecord, Outcome, PayloadRange,
};

pub use selection::{Selection, SiteSelector, ALL_SITES};

pub use aggregation::{
    compute_outcome_summary, compute_scatter_points, OutcomeSummary, PayloadPoint,
};

pub use chart::{render_outcome_chart, render_payload_chart, Figure};

pub use binder::{ChartId, ChartUpdate, ControlChange, ControlId, Dispatcher, RenderSink, Session};

pub use dashboard::{render_page, DashboardLayout};

pub use api::{build_router, serve, ApiError, AppState};

pub use websocket::{
    websocket_handler, ClientMessage, HubConfig, HubError, ServerMessage, SessionHub,
};

pub use config::{ApiConfig, Config, ConfigError, DashboardConfig, DatasetConfig, LoggingConfig};
