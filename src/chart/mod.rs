//! Chart Renderer
//!
//! Converts aggregation results into Plotly figure descriptions.
//!
//! - [`render_outcome_chart`]: success/failure proportion (pie)
//! - [`render_payload_chart`]: payload mass against outcome (scatter)
//!
//! Drawing happens in the browser; this module only builds the JSON.

mod figure;
mod render;

pub use figure::{
    Annotation, Axis, Figure, FigureLayout, Legend, PieMarker, PieTrace, ScatterMarker,
    ScatterTrace, Title, Trace,
};
pub use render::{
    render_outcome_chart, render_payload_chart, EMPTY_SELECTION_NOTICE, OUTCOME_AXIS_TITLE,
    OUTCOME_CHART_TITLE, PAYLOAD_AXIS_TITLE, PAYLOAD_CHART_TITLE,
};
