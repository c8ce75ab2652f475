//! Control-to-chart dispatcher
//!
//! Holds the declarative wiring of the page: which chart handler runs when a
//! given control changes. Handlers are plain functions of the dataset and
//! the selection.

use std::collections::HashMap;

use super::{ChartId, ChartUpdate, ControlId, RenderSink};
use crate::aggregation::{compute_outcome_summary, compute_scatter_points};
use crate::chart::{render_outcome_chart, render_payload_chart, Figure};
use crate::dataset::Dataset;
use crate::selection::Selection;

/// Computes one chart from the dataset and the current selection
pub type ChartHandler = fn(&Dataset, &Selection) -> Figure;

/// Success/failure pie for the selected site
pub fn outcome_chart(dataset: &Dataset, selection: &Selection) -> Figure {
    let summary = compute_outcome_summary(dataset.records(), &selection.site);
    render_outcome_chart(&summary, &selection.site)
}

/// Payload scatter for the selected site and payload interval
pub fn payload_chart(dataset: &Dataset, selection: &Selection) -> Figure {
    let points = compute_scatter_points(
        dataset.records(),
        &selection.site,
        selection.payload_range,
    );
    render_payload_chart(&points)
}

/// Maps control changes to chart handlers
#[derive(Default, Clone)]
pub struct Dispatcher {
    /// Registered handlers, in render order
    handlers: Vec<(ChartId, ChartHandler)>,
    /// Control → charts to recompute when it changes
    bindings: HashMap<ControlId, Vec<ChartId>>,
}

impl Dispatcher {
    /// Create an empty dispatcher with no charts and no bindings
    pub fn new() -> Self {
        Self::default()
    }

    /// The dashboard wiring: every control change recomputes both charts
    pub fn standard() -> Self {
        Self::new()
            .register(ChartId::SuccessPieChart, outcome_chart)
            .register(ChartId::SuccessPayloadScatterChart, payload_chart)
            .bind(ControlId::SiteDropdown, ChartId::SuccessPieChart)
            .bind(ControlId::SiteDropdown, ChartId::SuccessPayloadScatterChart)
            .bind(ControlId::PayloadSlider, ChartId::SuccessPieChart)
            .bind(ControlId::PayloadSlider, ChartId::SuccessPayloadScatterChart)
    }

    /// Register the handler for a chart, replacing any previous one
    pub fn register(mut self, chart: ChartId, handler: ChartHandler) -> Self {
        match self.handlers.iter_mut().find(|(id, _)| *id == chart) {
            Some(entry) => entry.1 = handler,
            None => self.handlers.push((chart, handler)),
        }
        self
    }

    /// Recompute `chart` whenever `control` changes
    pub fn bind(mut self, control: ControlId, chart: ChartId) -> Self {
        let charts = self.bindings.entry(control).or_default();
        if !charts.contains(&chart) {
            charts.push(chart);
        }
        self
    }

    /// Charts bound to a control
    pub fn charts_for(&self, control: ControlId) -> &[ChartId] {
        self.bindings
            .get(&control)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Run the handlers bound to `control` and push their figures
    ///
    /// Returns the number of charts pushed.
    pub fn dispatch(
        &self,
        control: ControlId,
        dataset: &Dataset,
        selection: &Selection,
        sink: &mut dyn RenderSink,
    ) -> usize {
        let charts = self.charts_for(control);
        let mut pushed = 0;

        for (chart, handler) in self.handlers.iter().filter(|(id, _)| charts.contains(id)) {
            sink.push(ChartUpdate {
                chart: *chart,
                figure: handler(dataset, selection),
            });
            pushed += 1;
        }

        tracing::trace!(control = ?control, charts = pushed, "Dispatched control change");
        pushed
    }

    /// Render every registered chart (initial page state)
    pub fn render_all(
        &self,
        dataset: &Dataset,
        selection: &Selection,
        sink: &mut dyn RenderSink,
    ) -> usize {
        for (chart, handler) in &self.handlers {
            sink.push(ChartUpdate {
                chart: *chart,
                figure: handler(dataset, selection),
            });
        }
        self.handlers.len()
    }

    /// Compute a single chart, if a handler is registered for it
    pub fn render_chart(
        &self,
        chart: ChartId,
        dataset: &Dataset,
        selection: &Selection,
    ) -> Option<Figure> {
        self.handlers
            .iter()
            .find(|(id, _)| *id == chart)
            .map(|(_, handler)| handler(dataset, selection))
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let charts: Vec<ChartId> = self.handlers.iter().map(|(id, _)| *id).collect();
        f.debug_struct("Dispatcher")
            .field("charts", &charts)
            .field("bindings", &self.bindings)
            .finish()
    }
}
