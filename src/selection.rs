//! Control State
//!
//! The user-settable filter behind the dashboard: which site is selected
//! and which payload interval is shown. A `Selection` belongs to exactly one
//! session and is never persisted.

use serde::{Deserialize, Serialize};

use crate::dataset::{Dataset, PayloadRange};

/// Wire value meaning "every site"
pub const ALL_SITES: &str = "ALL";

/// Site dropdown value: every site, or one site identifier
///
/// Serialized as a plain string where `"ALL"` means every site.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SiteSelector {
    #[default]
    All,
    Site(String),
}

impl SiteSelector {
    pub fn site(name: impl Into<String>) -> Self {
        SiteSelector::Site(name.into())
    }

    /// Check whether a record's site passes this selector
    pub fn matches(&self, site: &str) -> bool {
        match self {
            SiteSelector::All => true,
            SiteSelector::Site(selected) => selected == site,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, SiteSelector::All)
    }

    /// The wire value (`"ALL"` or the identifier)
    pub fn as_str(&self) -> &str {
        match self {
            SiteSelector::All => ALL_SITES,
            SiteSelector::Site(site) => site,
        }
    }
}

impl From<String> for SiteSelector {
    fn from(value: String) -> Self {
        if value == ALL_SITES {
            SiteSelector::All
        } else {
            SiteSelector::Site(value)
        }
    }
}

impl From<&str> for SiteSelector {
    fn from(value: &str) -> Self {
        SiteSelector::from(value.to_string())
    }
}

impl From<SiteSelector> for String {
    fn from(value: SiteSelector) -> Self {
        match value {
            SiteSelector::All => ALL_SITES.to_string(),
            SiteSelector::Site(site) => site,
        }
    }
}

impl std::fmt::Display for SiteSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current dashboard filter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub site: SiteSelector,
    pub payload_range: PayloadRange,
}

impl Selection {
    /// Initial state: every site, the full payload range of the dataset
    pub fn initial(dataset: &Dataset) -> Self {
        Self {
            site: SiteSelector::All,
            payload_range: dataset.payload_bounds(),
        }
    }

    /// Replace the site selector
    ///
    /// Unknown identifiers are accepted as-is and later match no records.
    pub fn set_site(&mut self, site: SiteSelector) {
        self.site = site;
    }

    /// Replace the payload interval, clamped into `limits`
    ///
    /// Clamping is an intersection: the bounds are never reordered, so an
    /// inverted or out-of-range interval stays empty.
    pub fn set_payload_range(&mut self, range: PayloadRange, limits: PayloadRange) {
        self.payload_range = range.intersect(limits);
    }
}
