//! Per-client session state
//!
//! A session owns exactly one selection. It is created when a client
//! connects and dropped when it disconnects; sessions never share state.

use std::sync::Arc;

use super::{ControlChange, ControlId, Dispatcher, RenderSink};
use crate::dataset::Dataset;
use crate::selection::Selection;

/// One client's view of the dashboard
#[derive(Debug)]
pub struct Session {
    id: String,
    dataset: Arc<Dataset>,
    selection: Selection,
}

impl Session {
    /// Start a session at the initial selection
    pub fn new(id: impl Into<String>, dataset: Arc<Dataset>) -> Self {
        let selection = Selection::initial(&dataset);
        Self {
            id: id.into(),
            dataset,
            selection,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Apply a control change to the selection
    ///
    /// Payload bounds are clamped into the dataset's range. Returns the
    /// control that fired so the caller can dispatch on it.
    pub fn apply(&mut self, change: ControlChange) -> ControlId {
        let control = change.control();
        match change {
            ControlChange::Site(site) => self.selection.set_site(site),
            ControlChange::PayloadRange(range) => self
                .selection
                .set_payload_range(range, self.dataset.payload_bounds()),
        }

        tracing::debug!(
            session_id = %self.id,
            site = %self.selection.site,
            payload_range = %self.selection.payload_range,
            "Selection changed"
        );
        control
    }

    /// Apply a change and push every chart bound to its control
    pub fn handle(
        &mut self,
        change: ControlChange,
        dispatcher: &Dispatcher,
        sink: &mut dyn RenderSink,
    ) -> usize {
        let control = self.apply(change);
        dispatcher.dispatch(control, &self.dataset, &self.selection, sink)
    }

    /// Push every chart for the current selection
    pub fn render_all(&self, dispatcher: &Dispatcher, sink: &mut dyn RenderSink) -> usize {
        dispatcher.render_all(&self.dataset, &self.selection, sink)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binder::{ChartId, ChartUpdate};
    use crate::chart::Trace;
    use crate::dataset::{LaunchRecord, Outcome, PayloadRange};
    use crate::selection::SiteSelector;

    fn dataset() -> Arc<Dataset> {
        Arc::new(
            Dataset::from_records(vec![
                LaunchRecord::new("A", 500.0, Outcome::Success),
                LaunchRecord::new("A", 1500.0, Outcome::Failure),
                LaunchRecord::new("B", 800.0, Outcome::Success),
            ])
            .unwrap(),
        )
    }

    fn pie_values(update: &ChartUpdate) -> Vec<usize> {
        match &update.figure.data[0] {
            Trace::Pie(pie) => pie.values.clone(),
            other => panic!("Expected pie, got {:?}", other),
        }
    }

    #[test]
    fn test_session_starts_at_initial_selection() {
        let dataset = dataset();
        let session = Session::new("s1", Arc::clone(&dataset));

        assert_eq!(session.id(), "s1");
        assert_eq!(session.selection(), &Selection::initial(&dataset));
    }

    #[test]
    fn test_site_change_recomputes_both_charts() {
        let mut session = Session::new("s1", dataset());
        let mut sink: Vec<ChartUpdate> = Vec::new();

        let pushed = session.handle(
            ControlChange::Site(SiteSelector::site("A")),
            &Dispatcher::standard(),
            &mut sink,
        );

        assert_eq!(pushed, 2);
        assert_eq!(sink[0].chart, ChartId::SuccessPieChart);
        assert_eq!(pie_values(&sink[0]), vec![1, 1]);
        assert_eq!(sink[1].chart, ChartId::SuccessPayloadScatterChart);
    }

    #[test]
    fn test_payload_change_is_clamped() {
        let mut session = Session::new("s1", dataset());

        let control = session.apply(ControlChange::PayloadRange(PayloadRange::new(0.0, 99999.0)));

        assert_eq!(control, ControlId::PayloadSlider);
        assert_eq!(session.selection().payload_range, PayloadRange::new(500.0, 1500.0));
    }

    #[test]
    fn test_sessions_are_isolated() {
        let dataset = dataset();
        let mut first = Session::new("s1", Arc::clone(&dataset));
        let second = Session::new("s2", Arc::clone(&dataset));

        first.apply(ControlChange::Site(SiteSelector::site("B")));

        assert_eq!(first.selection().site, SiteSelector::site("B"));
        assert!(second.selection().site.is_all());
    }

    #[test]
    fn test_render_all_on_connect() {
        let session = Session::new("s1", dataset());
        let mut sink: Vec<ChartUpdate> = Vec::new();

        assert_eq!(session.render_all(&Dispatcher::standard(), &mut sink), 2);
        assert_eq!(pie_values(&sink[0]), vec![2, 1]);
    }
}
