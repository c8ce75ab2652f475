//! Core data types for the launch dataset
//!
//! - `LaunchRecord`: one row of the launch table
//! - `Outcome`: binary launch classification
//! - `PayloadRange`: closed payload-mass interval

use serde::{Deserialize, Serialize};

/// Binary outcome of a launch
///
/// Encoded in the source table as `1` (success) and `0` (failure).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Failure,
    Success,
}

impl Outcome {
    /// Both outcomes in chart category order (failure first)
    pub fn all() -> &'static [Outcome] {
        &[Outcome::Failure, Outcome::Success]
    }

    /// Numeric class as stored in the table
    pub fn class(self) -> u8 {
        match self {
            Outcome::Failure => 0,
            Outcome::Success => 1,
        }
    }

    /// Parse the table encoding (`0` or `1`)
    ///
    /// Float spellings such as `1.0` are accepted since spreadsheet exports
    /// often write integer columns that way.
    pub fn from_class(raw: &str) -> Option<Outcome> {
        match raw.trim() {
            "1" | "1.0" => Some(Outcome::Success),
            "0" | "0.0" => Some(Outcome::Failure),
            _ => None,
        }
    }

    pub fn is_success(self) -> bool {
        self == Outcome::Success
    }

    /// Human label used in chart legends
    pub fn label(self) -> &'static str {
        match self {
            Outcome::Failure => "Failure",
            Outcome::Success => "Success",
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.class())
    }
}

/// A single launch row
///
/// Immutable once loaded. `flight_number` and `booster_category` are only
/// present when the source table carries those columns.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LaunchRecord {
    /// Launch site identifier (e.g. "CCAFS LC-40")
    pub site: String,
    /// Payload mass in kilograms
    pub payload_mass_kg: f64,
    /// Launch outcome
    pub outcome: Outcome,
    /// Sequential flight number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flight_number: Option<u32>,
    /// Booster version category (e.g. "FT", "B5")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booster_category: Option<String>,
}

impl LaunchRecord {
    /// Create a record with only the required fields
    pub fn new(site: impl Into<String>, payload_mass_kg: f64, outcome: Outcome) -> Self {
        Self {
            site: site.into(),
            payload_mass_kg,
            outcome,
            flight_number: None,
            booster_category: None,
        }
    }

    /// Builder method: set flight number
    pub fn flight_number(mut self, number: u32) -> Self {
        self.flight_number = Some(number);
        self
    }

    /// Builder method: set booster category
    pub fn booster_category(mut self, category: impl Into<String>) -> Self {
        self.booster_category = Some(category.into());
        self
    }
}

/// Closed payload-mass interval `[low, high]`
///
/// No ordering is enforced: an inverted range simply contains nothing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PayloadRange {
    pub low: f64,
    pub high: f64,
}

impl PayloadRange {
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// Check whether a mass lies within the interval (both ends inclusive)
    pub fn contains(&self, mass: f64) -> bool {
        self.low <= mass && mass <= self.high
    }

    /// True when no value can satisfy both bounds
    pub fn is_inverted(&self) -> bool {
        self.low > self.high
    }

    /// Intersect with `limits`
    ///
    /// Bounds are pulled into the limits but never reordered, so a range
    /// that does not overlap `limits` comes out inverted (and still empty).
    /// A NaN bound stays NaN and the range contains nothing.
    pub fn intersect(self, limits: PayloadRange) -> Self {
        let low = if self.low.is_nan() {
            self.low
        } else {
            self.low.max(limits.low)
        };
        let high = if self.high.is_nan() {
            self.high
        } else {
            self.high.min(limits.high)
        };
        Self { low, high }
    }
}

impl std::fmt::Display for PayloadRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}] kg", self.low, self.high)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_from_class() {
        assert_eq!(Outcome::from_class("1"), Some(Outcome::Success));
        assert_eq!(Outcome::from_class(" 0 "), Some(Outcome::Failure));
        assert_eq!(Outcome::from_class("1.0"), Some(Outcome::Success));
        assert_eq!(Outcome::from_class("2"), None);
        assert_eq!(Outcome::from_class("yes"), None);
    }

    #[test]
    fn test_outcome_category_order() {
        let classes: Vec<u8> = Outcome::all().iter().map(|o| o.class()).collect();
        assert_eq!(classes, vec![0, 1]);
    }

    #[test]
    fn test_record_builder() {
        let record = LaunchRecord::new("KSC LC-39A", 5300.0, Outcome::Success)
            .flight_number(31)
            .booster_category("FT");

        assert_eq!(record.site, "KSC LC-39A");
        assert_eq!(record.flight_number, Some(31));
        assert_eq!(record.booster_category.as_deref(), Some("FT"));
    }

    #[test]
    fn test_record_serialize_skips_missing_optionals() {
        let record = LaunchRecord::new("A", 500.0, Outcome::Failure);
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"outcome\":\"failure\""));
        assert!(!json.contains("flight_number"));
    }

    #[test]
    fn test_payload_range_inclusive() {
        let range = PayloadRange::new(0.0, 1000.0);
        assert!(range.contains(0.0));
        assert!(range.contains(1000.0));
        assert!(!range.contains(1000.5));
    }

    #[test]
    fn test_payload_range_inverted_contains_nothing() {
        let range = PayloadRange::new(2000.0, 1000.0);
        assert!(range.is_inverted());
        assert!(!range.contains(1500.0));
    }

    #[test]
    fn test_payload_range_intersect() {
        let limits = PayloadRange::new(0.0, 9600.0);

        let trimmed = PayloadRange::new(-50.0, 12000.0).intersect(limits);
        assert_eq!(trimmed, PayloadRange::new(0.0, 9600.0));

        let inverted = PayloadRange::new(12000.0, 100.0).intersect(limits);
        assert_eq!(inverted, PayloadRange::new(12000.0, 100.0));

        let disjoint = PayloadRange::new(20000.0, 30000.0).intersect(limits);
        assert!(disjoint.is_inverted());
    }

    #[test]
    fn test_payload_range_intersect_keeps_nan() {
        let limits = PayloadRange::new(0.0, 9600.0);

        let range = PayloadRange::new(f64::NAN, 5000.0).intersect(limits);
        assert!(range.low.is_nan());
        assert_eq!(range.high, 5000.0);
        assert!(!range.contains(2500.0));

        let range = PayloadRange::new(100.0, f64::NAN).intersect(limits);
        assert!(range.high.is_nan());
        assert!(!range.contains(100.0));
    }
}
