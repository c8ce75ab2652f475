//! Aggregation Engine
//!
//! The two queries behind the dashboard charts. Both are pure functions of
//! the record slice and the selection: no caching, no I/O, no errors.
//! Unknown sites and inverted payload ranges simply select nothing.

use serde::Serialize;

use crate::dataset::{LaunchRecord, Outcome, PayloadRange};
use crate::selection::SiteSelector;

/// Success/failure counts for a subset of launches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OutcomeSummary {
    pub success_count: usize,
    pub failure_count: usize,
}

impl OutcomeSummary {
    pub fn total(&self) -> usize {
        self.success_count + self.failure_count
    }

    /// Fraction of successful launches, `None` for an empty subset
    pub fn success_rate(&self) -> Option<f64> {
        match self.total() {
            0 => None,
            total => Some(self.success_count as f64 / total as f64),
        }
    }

    fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Success => self.success_count += 1,
            Outcome::Failure => self.failure_count += 1,
        }
    }
}

/// One launch plotted on the payload/outcome scatter chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PayloadPoint {
    pub payload_mass_kg: f64,
    pub outcome: Outcome,
    pub site: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flight_number: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booster_category: Option<String>,
}

impl From<&LaunchRecord> for PayloadPoint {
    fn from(record: &LaunchRecord) -> Self {
        Self {
            payload_mass_kg: record.payload_mass_kg,
            outcome: record.outcome,
            site: record.site.clone(),
            flight_number: record.flight_number,
            booster_category: record.booster_category.clone(),
        }
    }
}

/// Count successes and failures for the selected site
pub fn compute_outcome_summary(records: &[LaunchRecord], site: &SiteSelector) -> OutcomeSummary {
    records
        .iter()
        .filter(|r| site.matches(&r.site))
        .fold(OutcomeSummary::default(), |mut summary, r| {
            summary.record(r.outcome);
            summary
        })
}

/// Select the launches inside the payload interval, restricted to the site
///
/// Output preserves input order.
pub fn compute_scatter_points(
    records: &[LaunchRecord],
    site: &SiteSelector,
    payload_range: PayloadRange,
) -> Vec<PayloadPoint> {
    filter_records(records, site, payload_range)
        .map(PayloadPoint::from)
        .collect()
}

/// Records passing both the payload interval and the site selector
pub fn filter_records<'a>(
    records: &'a [LaunchRecord],
    site: &'a SiteSelector,
    payload_range: PayloadRange,
) -> impl Iterator<Item = &'a LaunchRecord> + 'a {
    records
        .iter()
        .filter(move |r| payload_range.contains(r.payload_mass_kg))
        .filter(move |r| site.matches(&r.site))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario() -> Vec<LaunchRecord> {
        vec![
            LaunchRecord::new("A", 500.0, Outcome::Success),
            LaunchRecord::new("A", 1500.0, Outcome::Failure),
            LaunchRecord::new("B", 800.0, Outcome::Success),
        ]
    }

    fn point(site: &str, mass: f64, outcome: Outcome) -> PayloadPoint {
        PayloadPoint::from(&LaunchRecord::new(site, mass, outcome))
    }

    #[test]
    fn test_summary_all_sites() {
        let summary = compute_outcome_summary(&scenario(), &SiteSelector::All);
        assert_eq!(
            summary,
            OutcomeSummary {
                success_count: 2,
                failure_count: 1
            }
        );
    }

    #[test]
    fn test_summary_single_site() {
        let summary = compute_outcome_summary(&scenario(), &SiteSelector::site("A"));
        assert_eq!(
            summary,
            OutcomeSummary {
                success_count: 1,
                failure_count: 1
            }
        );
    }

    #[test]
    fn test_summary_unknown_site_is_zero() {
        let summary = compute_outcome_summary(&scenario(), &SiteSelector::site("Z"));
        assert_eq!(summary, OutcomeSummary::default());
        assert_eq!(summary.success_rate(), None);
    }

    #[test]
    fn test_summary_counts_sum_to_rows() {
        let records = scenario();
        assert_eq!(
            compute_outcome_summary(&records, &SiteSelector::All).total(),
            records.len()
        );

        for site in ["A", "B"] {
            let rows = records.iter().filter(|r| r.site == site).count();
            let summary = compute_outcome_summary(&records, &SiteSelector::site(site));
            assert_eq!(summary.total(), rows);
        }
    }

    #[test]
    fn test_scatter_payload_window() {
        let points = compute_scatter_points(
            &scenario(),
            &SiteSelector::All,
            PayloadRange::new(0.0, 1000.0),
        );
        assert_eq!(
            points,
            vec![
                point("A", 500.0, Outcome::Success),
                point("B", 800.0, Outcome::Success)
            ]
        );
    }

    #[test]
    fn test_scatter_full_range_returns_everything_in_order() {
        let records = scenario();
        let points =
            compute_scatter_points(&records, &SiteSelector::All, PayloadRange::new(500.0, 1500.0));

        let expected: Vec<PayloadPoint> = records.iter().map(PayloadPoint::from).collect();
        assert_eq!(points, expected);
    }

    #[test]
    fn test_scatter_bounds_inclusive() {
        let points = compute_scatter_points(
            &scenario(),
            &SiteSelector::site("A"),
            PayloadRange::new(500.0, 500.0),
        );
        assert_eq!(points, vec![point("A", 500.0, Outcome::Success)]);
    }

    #[test]
    fn test_scatter_inverted_range_is_empty() {
        for site in [SiteSelector::All, SiteSelector::site("A"), SiteSelector::site("Z")] {
            let points =
                compute_scatter_points(&scenario(), &site, PayloadRange::new(1000.0, 0.0));
            assert!(points.is_empty());
        }
    }

    #[test]
    fn test_scatter_keeps_duplicates() {
        let records = vec![
            LaunchRecord::new("A", 500.0, Outcome::Success),
            LaunchRecord::new("A", 500.0, Outcome::Success),
        ];
        let points =
            compute_scatter_points(&records, &SiteSelector::All, PayloadRange::new(0.0, 1000.0));
        assert_eq!(points.len(), 2);
    }

    #[test]
    fn test_aggregations_are_idempotent() {
        let records = scenario();
        let site = SiteSelector::site("A");
        let range = PayloadRange::new(0.0, 2000.0);

        assert_eq!(
            compute_outcome_summary(&records, &site),
            compute_outcome_summary(&records, &site)
        );
        assert_eq!(
            compute_scatter_points(&records, &site, range),
            compute_scatter_points(&records, &site, range)
        );
    }

    fn bundled() -> crate::dataset::Dataset {
        let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("data")
            .join("spacex_launch_dash.csv");
        crate::dataset::Dataset::load(&path, &crate::dataset::DatasetLoader::new()).unwrap()
    }

    #[test]
    fn test_bundled_summary_sums_per_site() {
        let dataset = bundled();
        let records = dataset.records();

        let all = compute_outcome_summary(records, &SiteSelector::All);
        assert_eq!(all.total(), dataset.len());

        let mut per_site_total = 0;
        for site in dataset.sites() {
            let summary = compute_outcome_summary(records, &SiteSelector::site(site));
            let rows = records.iter().filter(|r| &r.site == site).count();
            assert_eq!(summary.total(), rows, "site {}", site);
            per_site_total += summary.total();
        }
        assert_eq!(per_site_total, dataset.len());
    }

    #[test]
    fn test_bundled_full_range_returns_every_record() {
        let dataset = bundled();
        let points = compute_scatter_points(
            dataset.records(),
            &SiteSelector::All,
            dataset.payload_bounds(),
        );

        let expected: Vec<PayloadPoint> =
            dataset.records().iter().map(PayloadPoint::from).collect();
        assert_eq!(points, expected);
    }

    #[test]
    fn test_bundled_inverted_range_is_empty() {
        let dataset = bundled();
        let bounds = dataset.payload_bounds();
        let inverted = PayloadRange::new(bounds.high, bounds.low);

        for site in std::iter::once(SiteSelector::All)
            .chain(dataset.sites().iter().map(SiteSelector::site))
        {
            assert!(compute_scatter_points(dataset.records(), &site, inverted).is_empty());
        }
    }
}
