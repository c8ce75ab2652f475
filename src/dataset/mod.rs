//! Launch Dataset Store
//!
//! The read-only table of launch records behind the dashboard.
//!
//! ## Lifecycle
//!
//! The dataset is loaded exactly once at startup, wrapped in an `Arc`, and
//! handed to everything that needs it. Nothing mutates it afterwards, so it
//! needs no locking.
//!
//! ## Example
//!
//! ```rust,no_run
//! use launch_dash::dataset::{Dataset, DatasetLoader};
//! use std::path::Path;
//!
//! let dataset = Dataset::load(Path::new("data/spacex_launch_dash.csv"), &DatasetLoader::new())?;
//! println!("{} launches from {} sites", dataset.len(), dataset.sites().len());
//! # Ok::<(), launch_dash::dataset::DatasetError>(())
//! ```

mod error;
mod loader;
mod types;

pub use error::{DatasetError, DatasetResult};
pub use loader::{
    DatasetLoader, DEFAULT_BOOSTER_COLUMN, DEFAULT_FLIGHT_COLUMN, DEFAULT_OUTCOME_COLUMN,
    DEFAULT_PAYLOAD_COLUMN, DEFAULT_SITE_COLUMN,
};
pub use types::{LaunchRecord, Outcome, PayloadRange};

use std::path::Path;

/// Immutable launch table with precomputed metadata
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<LaunchRecord>,
    payload_bounds: PayloadRange,
    sites: Vec<String>,
}

impl Dataset {
    /// Build a dataset from already-parsed records
    ///
    /// Fails with [`DatasetError::Empty`] when there are no records, since
    /// payload bounds are undefined for an empty table.
    pub fn from_records(records: Vec<LaunchRecord>) -> DatasetResult<Self> {
        let first = records.first().ok_or(DatasetError::Empty)?;

        let mut bounds = PayloadRange::new(first.payload_mass_kg, first.payload_mass_kg);
        let mut sites: Vec<String> = Vec::new();

        for record in &records {
            bounds.low = bounds.low.min(record.payload_mass_kg);
            bounds.high = bounds.high.max(record.payload_mass_kg);

            if !sites.iter().any(|s| s == &record.site) {
                sites.push(record.site.clone());
            }
        }

        Ok(Self {
            records,
            payload_bounds: bounds,
            sites,
        })
    }

    /// Load a dataset from a CSV file
    pub fn load(path: &Path, loader: &DatasetLoader) -> DatasetResult<Self> {
        Self::from_records(loader.load(path)?)
    }

    /// All records in file order
    pub fn records(&self) -> &[LaunchRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Smallest and largest payload mass in the table
    pub fn payload_bounds(&self) -> PayloadRange {
        self.payload_bounds
    }

    /// Distinct site identifiers in first-appearance order
    pub fn sites(&self) -> &[String] {
        &self.sites
    }

    /// Check whether a site identifier occurs in the table
    pub fn has_site(&self, site: &str) -> bool {
        self.sites.iter().any(|s| s == site)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dataset {
        Dataset::from_records(vec![
            LaunchRecord::new("A", 500.0, Outcome::Success),
            LaunchRecord::new("A", 1500.0, Outcome::Failure),
            LaunchRecord::new("B", 800.0, Outcome::Success),
        ])
        .unwrap()
    }

    #[test]
    fn test_payload_bounds() {
        let dataset = sample();
        assert_eq!(dataset.payload_bounds(), PayloadRange::new(500.0, 1500.0));
    }

    #[test]
    fn test_sites_first_appearance_order() {
        let dataset = Dataset::from_records(vec![
            LaunchRecord::new("VAFB SLC-4E", 500.0, Outcome::Success),
            LaunchRecord::new("CCAFS LC-40", 600.0, Outcome::Success),
            LaunchRecord::new("VAFB SLC-4E", 700.0, Outcome::Failure),
        ])
        .unwrap();

        assert_eq!(dataset.sites(), &["VAFB SLC-4E", "CCAFS LC-40"]);
        assert!(dataset.has_site("CCAFS LC-40"));
        assert!(!dataset.has_site("KSC LC-39A"));
    }

    #[test]
    fn test_empty_records_rejected() {
        assert!(matches!(
            Dataset::from_records(Vec::new()),
            Err(DatasetError::Empty)
        ));
    }

    #[test]
    fn test_records_keep_file_order() {
        let dataset = sample();
        let masses: Vec<f64> = dataset.records().iter().map(|r| r.payload_mass_kg).collect();
        assert_eq!(masses, vec![500.0, 1500.0, 800.0]);
        assert_eq!(dataset.len(), 3);
    }

    #[test]
    fn test_load_bundled_dataset() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/spacex_launch_dash.csv");
        let dataset = Dataset::load(&path, &DatasetLoader::new()).unwrap();

        assert_eq!(dataset.len(), 56);
        assert_eq!(
            dataset.sites(),
            &["CCAFS LC-40", "VAFB SLC-4E", "KSC LC-39A", "CCAFS SLC-40"]
        );
        assert_eq!(dataset.payload_bounds(), PayloadRange::new(0.0, 9600.0));
        assert_eq!(dataset.records()[0].flight_number, Some(1));
        assert_eq!(dataset.records()[0].booster_category.as_deref(), Some("v1.0"));
    }
}
