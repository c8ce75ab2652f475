//! CSV Loader
//!
//! Reads the launch table from a CSV file with a header row.
//! Columns are located by header name so extra columns (and their order)
//! do not matter. Any malformed row aborts the whole load.

use super::error::{DatasetError, DatasetResult};
use super::types::{LaunchRecord, Outcome};
use std::io::Read;
use std::path::Path;

/// Default header for the launch site column
pub const DEFAULT_SITE_COLUMN: &str = "Launch Site";
/// Default header for the payload mass column
pub const DEFAULT_PAYLOAD_COLUMN: &str = "Payload Mass (kg)";
/// Default header for the outcome column
pub const DEFAULT_OUTCOME_COLUMN: &str = "class";
/// Default header for the optional flight number column
pub const DEFAULT_FLIGHT_COLUMN: &str = "Flight Number";
/// Default header for the optional booster category column
pub const DEFAULT_BOOSTER_COLUMN: &str = "Booster Version Category";

/// CSV loader with configurable column names
#[derive(Debug, Clone)]
pub struct DatasetLoader {
    site_column: String,
    payload_column: String,
    outcome_column: String,
    flight_column: String,
    booster_column: String,
}

/// Resolved header positions
struct ColumnIndices {
    site: usize,
    payload: usize,
    outcome: usize,
    flight: Option<usize>,
    booster: Option<usize>,
}

impl Default for DatasetLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DatasetLoader {
    /// Create a loader using the standard column names
    pub fn new() -> Self {
        Self {
            site_column: DEFAULT_SITE_COLUMN.to_string(),
            payload_column: DEFAULT_PAYLOAD_COLUMN.to_string(),
            outcome_column: DEFAULT_OUTCOME_COLUMN.to_string(),
            flight_column: DEFAULT_FLIGHT_COLUMN.to_string(),
            booster_column: DEFAULT_BOOSTER_COLUMN.to_string(),
        }
    }

    /// Set the site column header
    pub fn with_site_column(mut self, name: &str) -> Self {
        self.site_column = name.to_string();
        self
    }

    /// Set the payload mass column header
    pub fn with_payload_column(mut self, name: &str) -> Self {
        self.payload_column = name.to_string();
        self
    }

    /// Set the outcome column header
    pub fn with_outcome_column(mut self, name: &str) -> Self {
        self.outcome_column = name.to_string();
        self
    }

    /// Load records from a CSV file
    pub fn load(&self, path: &Path) -> DatasetResult<Vec<LaunchRecord>> {
        let file = std::fs::File::open(path).map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let records = self.read(file)?;

        tracing::debug!(path = ?path, rows = records.len(), "Loaded launch table");
        Ok(records)
    }

    /// Load records from a CSV string (useful for testing)
    pub fn load_str(&self, csv_data: &str) -> DatasetResult<Vec<LaunchRecord>> {
        self.read(csv_data.as_bytes())
    }

    fn read<R: Read>(&self, source: R) -> DatasetResult<Vec<LaunchRecord>> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(source);

        let headers = reader.headers()?.clone();
        let columns = self.resolve_columns(&headers)?;

        let mut records = Vec::new();
        for (row_num, result) in reader.records().enumerate() {
            let row = result?;
            let line = row
                .position()
                .map(|p| p.line() as usize)
                .unwrap_or(row_num + 2);

            records.push(self.parse_row(&row, &columns, line)?);
        }

        if records.is_empty() {
            return Err(DatasetError::Empty);
        }

        Ok(records)
    }

    fn resolve_columns(&self, headers: &csv::StringRecord) -> DatasetResult<ColumnIndices> {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);
        let require =
            |name: &str| find(name).ok_or_else(|| DatasetError::MissingColumn(name.to_string()));

        Ok(ColumnIndices {
            site: require(&self.site_column)?,
            payload: require(&self.payload_column)?,
            outcome: require(&self.outcome_column)?,
            flight: find(&self.flight_column),
            booster: find(&self.booster_column),
        })
    }

    fn parse_row(
        &self,
        row: &csv::StringRecord,
        columns: &ColumnIndices,
        line: usize,
    ) -> DatasetResult<LaunchRecord> {
        let cell = |idx: usize| row.get(idx).unwrap_or("");
        let invalid = |column: &str, value: &str| DatasetError::InvalidValue {
            line,
            column: column.to_string(),
            value: value.to_string(),
        };

        let site = cell(columns.site);
        if site.is_empty() {
            return Err(invalid(&self.site_column, site));
        }

        let payload_raw = cell(columns.payload);
        let payload_mass_kg = payload_raw
            .parse::<f64>()
            .ok()
            .filter(|mass| mass.is_finite() && *mass >= 0.0)
            .ok_or_else(|| invalid(&self.payload_column, payload_raw))?;

        let outcome_raw = cell(columns.outcome);
        let outcome =
            Outcome::from_class(outcome_raw).ok_or_else(|| invalid(&self.outcome_column, outcome_raw))?;

        let mut record = LaunchRecord::new(site, payload_mass_kg, outcome);

        if let Some(idx) = columns.flight {
            let raw = cell(idx);
            if !raw.is_empty() {
                let number = raw
                    .parse::<u32>()
                    .map_err(|_| invalid(&self.flight_column, raw))?;
                record = record.flight_number(number);
            }
        }

        if let Some(idx) = columns.booster {
            let raw = cell(idx);
            if !raw.is_empty() {
                record = record.booster_category(raw);
            }
        }

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = "\
,Flight Number,Launch Site,class,Payload Mass (kg),Booster Version,Booster Version Category
0,1,CCAFS LC-40,0,0.0,F9 v1.0  B0003,v1.0
1,2,CCAFS LC-40,0,525.0,F9 v1.0  B0004,v1.0
2,3,VAFB SLC-4E,1,500.0,F9 v1.1  B1003,v1.1
";

    #[test]
    fn test_load_sample() {
        let records = DatasetLoader::new().load_str(SAMPLE).unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].site, "CCAFS LC-40");
        assert_eq!(records[1].payload_mass_kg, 525.0);
        assert_eq!(records[2].outcome, Outcome::Success);
        assert_eq!(records[2].flight_number, Some(3));
        assert_eq!(records[2].booster_category.as_deref(), Some("v1.1"));
    }

    #[test]
    fn test_optional_columns_absent() {
        let csv_data = "Launch Site,Payload Mass (kg),class\nA,500,1\n";
        let records = DatasetLoader::new().load_str(csv_data).unwrap();

        assert_eq!(records[0].flight_number, None);
        assert_eq!(records[0].booster_category, None);
    }

    #[test]
    fn test_custom_column_names() {
        let csv_data = "site,mass,ok\nB,800,1\n";
        let records = DatasetLoader::new()
            .with_site_column("site")
            .with_payload_column("mass")
            .with_outcome_column("ok")
            .load_str(csv_data)
            .unwrap();

        assert_eq!(records, vec![LaunchRecord::new("B", 800.0, Outcome::Success)]);
    }

    #[test]
    fn test_missing_column_is_fatal() {
        let csv_data = "Launch Site,class\nA,1\n";
        let err = DatasetLoader::new().load_str(csv_data).unwrap_err();
        assert!(matches!(err, DatasetError::MissingColumn(c) if c == "Payload Mass (kg)"));
    }

    #[test]
    fn test_bad_outcome_is_fatal() {
        let csv_data = "Launch Site,Payload Mass (kg),class\nA,500,1\nA,600,2\n";
        let err = DatasetLoader::new().load_str(csv_data).unwrap_err();
        match err {
            DatasetError::InvalidValue { line, column, value } => {
                assert_eq!(line, 3);
                assert_eq!(column, "class");
                assert_eq!(value, "2");
            }
            other => panic!("Expected InvalidValue, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_payload_is_fatal() {
        let csv_data = "Launch Site,Payload Mass (kg),class\nA,-5,1\n";
        let err = DatasetLoader::new().load_str(csv_data).unwrap_err();
        assert!(matches!(err, DatasetError::InvalidValue { .. }));
    }

    #[test]
    fn test_non_numeric_payload_is_fatal() {
        let csv_data = "Launch Site,Payload Mass (kg),class\nA,heavy,1\n";
        assert!(DatasetLoader::new().load_str(csv_data).is_err());
    }

    #[test]
    fn test_empty_table_is_fatal() {
        let csv_data = "Launch Site,Payload Mass (kg),class\n";
        let err = DatasetLoader::new().load_str(csv_data).unwrap_err();
        assert!(matches!(err, DatasetError::Empty));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let records = DatasetLoader::new().load(file.path()).unwrap();
        assert_eq!(records.len(), 3);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = DatasetLoader::new()
            .load(&dir.path().join("absent.csv"))
            .unwrap_err();
        assert!(matches!(err, DatasetError::Io { .. }));
    }
}
