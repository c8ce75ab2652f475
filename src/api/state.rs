//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use std::sync::Arc;
use std::time::Instant;

use crate::binder::Dispatcher;
use crate::config::Config;
use crate::dashboard::{render_page, DashboardLayout};
use crate::dataset::Dataset;
use crate::websocket::{HubConfig, SessionHub};

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Launch records, loaded once at startup
    pub dataset: Arc<Dataset>,
    /// Control-to-chart wiring shared by every session
    pub dispatcher: Arc<Dispatcher>,
    /// Page description derived from the dataset
    pub layout: Arc<DashboardLayout>,
    /// Rendered dashboard page
    pub page: Arc<str>,
    /// Application configuration
    pub config: Arc<Config>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
    /// Live dashboard sessions
    pub hub: Arc<SessionHub>,
}

impl AppState {
    /// Create the state for a loaded dataset with the standard wiring
    pub fn new(dataset: Arc<Dataset>, config: Config) -> Self {
        Self::with_dispatcher(dataset, config, Dispatcher::standard())
    }

    /// Create the state with custom control-to-chart wiring
    pub fn with_dispatcher(dataset: Arc<Dataset>, config: Config, dispatcher: Dispatcher) -> Self {
        let layout = DashboardLayout::build(&dataset, &config.dashboard);
        let page: Arc<str> = render_page(&layout).into();
        let hub = SessionHub::new(HubConfig {
            max_sessions: config.api.max_sessions,
        });

        Self {
            dataset,
            dispatcher: Arc::new(dispatcher),
            layout: Arc::new(layout),
            page,
            config: Arc::new(config),
            start_time: Instant::now(),
            hub: Arc::new(hub),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Get live session count
    pub async fn session_count(&self) -> usize {
        self.hub.session_count().await
    }
}
