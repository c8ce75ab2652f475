//! Chart rendering
//!
//! Turns aggregation output into figures. Empty inputs always produce a
//! valid figure so the browser never has to special-case them.

use super::figure::*;
use crate::aggregation::{OutcomeSummary, PayloadPoint};
use crate::dataset::Outcome;
use crate::selection::SiteSelector;

pub const OUTCOME_CHART_TITLE: &str = "Total Launch Successes";
pub const PAYLOAD_CHART_TITLE: &str = "Payload vs. Launch Success";
pub const PAYLOAD_AXIS_TITLE: &str = "Payload Mass (kg)";
pub const OUTCOME_AXIS_TITLE: &str = "Launch Success";
pub const EMPTY_SELECTION_NOTICE: &str = "No launches match this selection";

const SUCCESS_COLOR: &str = "#00cc96";
const FAILURE_COLOR: &str = "#ef553b";

fn outcome_color(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Success => SUCCESS_COLOR,
        Outcome::Failure => FAILURE_COLOR,
    }
}

/// Pie chart of successes against failures
pub fn render_outcome_chart(summary: &OutcomeSummary, site: &SiteSelector) -> Figure {
    let title = match site {
        SiteSelector::All => format!("{} (All Sites)", OUTCOME_CHART_TITLE),
        SiteSelector::Site(name) => format!("{} for {}", OUTCOME_CHART_TITLE, name),
    };

    let mut layout = FigureLayout::titled(title);
    if summary.total() == 0 {
        layout.annotations.push(Annotation::centered(EMPTY_SELECTION_NOTICE));
    }

    let slices = [Outcome::Success, Outcome::Failure];
    let trace = PieTrace {
        labels: slices.iter().map(|o| o.label().to_string()).collect(),
        values: vec![summary.success_count, summary.failure_count],
        marker: PieMarker {
            colors: slices.iter().map(|o| outcome_color(*o).to_string()).collect(),
        },
        sort: false,
    };

    Figure {
        data: vec![Trace::Pie(trace)],
        layout,
    }
}

/// Scatter chart of payload mass against outcome, one trace per outcome
pub fn render_payload_chart(points: &[PayloadPoint]) -> Figure {
    let data = Outcome::all()
        .iter()
        .map(|outcome| Trace::Scatter(outcome_trace(points, *outcome)))
        .collect();

    let mut layout = FigureLayout::titled(PAYLOAD_CHART_TITLE);
    layout.xaxis = Some(Axis {
        title: Title::new(PAYLOAD_AXIS_TITLE),
        tickvals: None,
    });
    layout.yaxis = Some(Axis {
        title: Title::new(OUTCOME_AXIS_TITLE),
        tickvals: Some(vec![0.0, 1.0]),
    });
    layout.legend = Some(Legend {
        title: Title::new(OUTCOME_AXIS_TITLE),
    });
    if points.is_empty() {
        layout.annotations.push(Annotation::centered(EMPTY_SELECTION_NOTICE));
    }

    Figure { data, layout }
}

fn outcome_trace(points: &[PayloadPoint], outcome: Outcome) -> ScatterTrace {
    let matching: Vec<&PayloadPoint> = points.iter().filter(|p| p.outcome == outcome).collect();

    ScatterTrace {
        name: outcome.class().to_string(),
        mode: "markers".to_string(),
        x: matching.iter().map(|p| p.payload_mass_kg).collect(),
        y: matching.iter().map(|p| p.outcome.class()).collect(),
        text: matching.iter().map(|p| hover_text(p)).collect(),
        marker: ScatterMarker {
            color: outcome_color(outcome).to_string(),
            size: 9,
        },
        hovertemplate: format!(
            "%{{text}}<br>{}=%{{x}}<br>{}=%{{y}}<extra></extra>",
            PAYLOAD_AXIS_TITLE, OUTCOME_AXIS_TITLE
        ),
    }
}

fn hover_text(point: &PayloadPoint) -> String {
    let mut text = point.site.clone();
    if let Some(flight) = point.flight_number {
        text.push_str(&format!(" | flight {}", flight));
    }
    if let Some(booster) = &point.booster_category {
        text.push_str(&format!(" | booster {}", booster));
    }
    text
}
