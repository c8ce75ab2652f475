//! Reactive Binder
//!
//! Wires control changes to chart recomputation.
//!
//! ## Architecture
//!
//! - **Dispatcher**: maps control identifiers to chart handlers and runs
//!   them against the current selection
//! - **Session**: owns one client's selection and applies control changes
//! - **RenderSink**: where finished chart updates are pushed (a WebSocket
//!   channel in production, a `Vec` in tests and HTTP handlers)
//!
//! Each pass reads only the immutable dataset and the session's selection,
//! so charts can be recomputed in any order and any number of times.

mod dispatcher;
mod session;

pub use dispatcher::{outcome_chart, payload_chart, ChartHandler, Dispatcher};
pub use session::Session;

use serde::{Deserialize, Serialize};

use crate::chart::Figure;
use crate::dataset::PayloadRange;
use crate::selection::SiteSelector;

/// Page controls that can change the selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ControlId {
    SiteDropdown,
    PayloadSlider,
}

impl ControlId {
    /// DOM element id on the dashboard page
    pub fn dom_id(self) -> &'static str {
        match self {
            ControlId::SiteDropdown => "site-dropdown",
            ControlId::PayloadSlider => "payload-slider",
        }
    }
}

/// Chart regions on the dashboard page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChartId {
    SuccessPieChart,
    SuccessPayloadScatterChart,
}

impl ChartId {
    pub fn all() -> &'static [ChartId] {
        &[ChartId::SuccessPieChart, ChartId::SuccessPayloadScatterChart]
    }

    /// DOM element id on the dashboard page
    pub fn dom_id(self) -> &'static str {
        match self {
            ChartId::SuccessPieChart => "success-pie-chart",
            ChartId::SuccessPayloadScatterChart => "success-payload-scatter-chart",
        }
    }
}

/// A user interaction with one control
#[derive(Debug, Clone, PartialEq)]
pub enum ControlChange {
    Site(SiteSelector),
    PayloadRange(PayloadRange),
}

impl ControlChange {
    /// The control that produced this change
    pub fn control(&self) -> ControlId {
        match self {
            ControlChange::Site(_) => ControlId::SiteDropdown,
            ControlChange::PayloadRange(_) => ControlId::PayloadSlider,
        }
    }
}

/// A recomputed figure for one chart region
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartUpdate {
    pub chart: ChartId,
    pub figure: Figure,
}

/// Destination for recomputed charts
pub trait RenderSink {
    fn push(&mut self, update: ChartUpdate);
}

impl RenderSink for Vec<ChartUpdate> {
    fn push(&mut self, update: ChartUpdate) {
        Vec::push(self, update);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_serialize_as_dom_ids() {
        for chart in ChartId::all() {
            let json = serde_json::to_string(chart).unwrap();
            assert_eq!(json, format!("\"{}\"", chart.dom_id()));
        }
        let json = serde_json::to_string(&ControlId::PayloadSlider).unwrap();
        assert_eq!(json, "\"payload-slider\"");
    }

    #[test]
    fn test_control_change_source() {
        assert_eq!(
            ControlChange::Site(SiteSelector::All).control(),
            ControlId::SiteDropdown
        );
        assert_eq!(
            ControlChange::PayloadRange(PayloadRange::new(0.0, 1.0)).control(),
            ControlId::PayloadSlider
        );
    }
}
