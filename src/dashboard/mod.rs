//! Page Layout
//!
//! Describes the single dashboard page: header, site dropdown, payload range
//! slider and the two chart regions. The description is served as JSON and
//! rendered to HTML by [`render_page`].

mod page;

pub use page::{escape_html, render_page};

use serde::Serialize;

use crate::binder::{ChartId, ControlId};
use crate::config::DashboardConfig;
use crate::dataset::Dataset;
use crate::selection::ALL_SITES;

/// Label of the dropdown entry selecting every site
pub const ALL_SITES_LABEL: &str = "All Sites";

/// Full page description
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardLayout {
    pub title: String,
    pub site_dropdown: Dropdown,
    pub payload_slider: RangeSlider,
    pub charts: Vec<ChartId>,
    /// Where the browser loads plotly.js from
    pub plotly_src: String,
}

/// Single-select site control
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dropdown {
    pub id: ControlId,
    pub options: Vec<DropdownOption>,
    pub value: String,
    pub placeholder: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DropdownOption {
    pub label: String,
    pub value: String,
}

/// Dual-handle payload control
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeSlider {
    pub id: ControlId,
    pub label: String,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub value: [f64; 2],
    pub marks: Vec<SliderMark>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SliderMark {
    pub value: i64,
    pub label: String,
}

impl DashboardLayout {
    /// Build the layout for a loaded dataset
    pub fn build(dataset: &Dataset, config: &DashboardConfig) -> Self {
        let bounds = dataset.payload_bounds();

        let options = std::iter::once(DropdownOption {
            label: ALL_SITES_LABEL.to_string(),
            value: ALL_SITES.to_string(),
        })
        .chain(dataset.sites().iter().map(|site| DropdownOption {
            label: site.clone(),
            value: site.clone(),
        }))
        .collect();

        Self {
            title: config.title.clone(),
            site_dropdown: Dropdown {
                id: ControlId::SiteDropdown,
                options,
                value: ALL_SITES.to_string(),
                placeholder: "Select a Launch Site".to_string(),
            },
            payload_slider: RangeSlider {
                id: ControlId::PayloadSlider,
                label: "Payload range (Kg):".to_string(),
                min: bounds.low,
                max: bounds.high,
                step: config.slider_step,
                value: [bounds.low, bounds.high],
                marks: slider_marks(bounds.low, bounds.high, config.mark_interval),
            },
            charts: ChartId::all().to_vec(),
            plotly_src: config.plotly_src.clone(),
        }
    }
}

/// Marks every `interval` kg from `floor(min)` up to `floor(max)`
fn slider_marks(min: f64, max: f64, interval: u64) -> Vec<SliderMark> {
    if interval == 0 {
        return Vec::new();
    }

    let start = min.floor() as i64;
    let end = max.floor() as i64;
    (start..=end)
        .step_by(interval as usize)
        .map(|value| SliderMark {
            value,
            label: value.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{LaunchRecord, Outcome};

    fn dataset() -> Dataset {
        Dataset::from_records(vec![
            LaunchRecord::new("CCAFS LC-40", 0.0, Outcome::Failure),
            LaunchRecord::new("VAFB SLC-4E", 9600.0, Outcome::Success),
            LaunchRecord::new("CCAFS LC-40", 2500.0, Outcome::Success),
        ])
        .unwrap()
    }

    #[test]
    fn test_dropdown_options() {
        let layout = DashboardLayout::build(&dataset(), &DashboardConfig::default());
        let values: Vec<&str> = layout
            .site_dropdown
            .options
            .iter()
            .map(|o| o.value.as_str())
            .collect();

        assert_eq!(values, vec!["ALL", "CCAFS LC-40", "VAFB SLC-4E"]);
        assert_eq!(layout.site_dropdown.options[0].label, "All Sites");
        assert_eq!(layout.site_dropdown.value, "ALL");
    }

    #[test]
    fn test_slider_bounds_and_step() {
        let layout = DashboardLayout::build(&dataset(), &DashboardConfig::default());
        let slider = &layout.payload_slider;

        assert_eq!(slider.min, 0.0);
        assert_eq!(slider.max, 9600.0);
        assert_eq!(slider.step, 100.0);
        assert_eq!(slider.value, [0.0, 9600.0]);
    }

    #[test]
    fn test_slider_marks_every_thousand() {
        let marks = slider_marks(0.0, 9600.0, 1000);
        let values: Vec<i64> = marks.iter().map(|m| m.value).collect();
        assert_eq!(values, (0..=9000).step_by(1000).collect::<Vec<i64>>());
        assert_eq!(marks[3].label, "3000");
    }

    #[test]
    fn test_slider_marks_start_at_floor_of_min() {
        let marks = slider_marks(350.5, 2400.0, 1000);
        let values: Vec<i64> = marks.iter().map(|m| m.value).collect();
        assert_eq!(values, vec![350, 1350, 2350]);
    }

    #[test]
    fn test_zero_mark_interval_disables_marks() {
        assert!(slider_marks(0.0, 1000.0, 0).is_empty());
    }

    #[test]
    fn test_layout_serializes_control_ids() {
        let layout = DashboardLayout::build(&dataset(), &DashboardConfig::default());
        let json = serde_json::to_value(&layout).unwrap();

        assert_eq!(json["site_dropdown"]["id"], "site-dropdown");
        assert_eq!(json["payload_slider"]["id"], "payload-slider");
        assert_eq!(json["charts"][0], "success-pie-chart");
    }
}
