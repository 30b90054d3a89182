//! Registration Table
//! Cleaned voter registration records, as a polars frame and as typed rows.

use polars::prelude::*;
use std::cmp::Ordering;
use std::collections::HashSet;

pub const DIVISION: &str = "Division";
pub const DISTRICT: &str = "District";
pub const ACTIVE_REGISTRATION: &str = "Active Registration";
pub const MALE: &str = "Male";
pub const FEMALE: &str = "Female";
pub const OTHER: &str = "Other";
pub const TOTAL_REGISTRATION: &str = "Total_Registration";
pub const GENDER_RATIO: &str = "Gender_Ratio";
pub const FEMALE_PERCENTAGE: &str = "Female_Percentage";
pub const MALE_PERCENTAGE: &str = "Male_Percentage";

/// Columns the source table must provide, matched exactly.
pub const REQUIRED_COLUMNS: [&str; 6] = [DIVISION, DISTRICT, ACTIVE_REGISTRATION, MALE, FEMALE, OTHER];

/// One district's cleaned registration counts plus derived metrics.
///
/// Ratio fields are `None` when their denominator is zero. Total registration
/// and male share live only in the frame.
#[derive(Debug, Clone, PartialEq)]
pub struct RegistrationRecord {
    pub division: String,
    pub district: String,
    pub active_registration: f64,
    pub male: f64,
    pub female: f64,
    pub other: f64,
    /// Females per 1000 males.
    pub gender_ratio: Option<f64>,
    pub female_percentage: Option<f64>,
}

/// Immutable cleaned table shared by the renderers and the reporter.
#[derive(Debug, Clone)]
pub struct RegistrationTable {
    frame: DataFrame,
    records: Vec<RegistrationRecord>,
}

impl RegistrationTable {
    pub(crate) fn new(frame: DataFrame, records: Vec<RegistrationRecord>) -> Self {
        Self { frame, records }
    }

    /// The cleaned frame: input columns plus the derived ones.
    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn records(&self) -> &[RegistrationRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// (rows, columns) of the cleaned frame.
    pub fn shape(&self) -> (usize, usize) {
        self.frame.shape()
    }

    /// Distinct divisions in first-seen order.
    pub fn divisions(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.records
            .iter()
            .map(|r| r.division.as_str())
            .filter(|d| seen.insert(*d))
            .collect()
    }

    /// Records of one division, in input order.
    pub fn records_in<'a>(
        &'a self,
        division: &'a str,
    ) -> impl Iterator<Item = &'a RegistrationRecord> + 'a {
        self.records.iter().filter(move |r| r.division == division)
    }

    /// Rank records descending by `key`, keeping input order among ties.
    ///
    /// Records whose key is undefined rank after every defined one.
    pub fn top_by<F>(&self, n: usize, key: F) -> Vec<&RegistrationRecord>
    where
        F: Fn(&RegistrationRecord) -> Option<f64>,
    {
        let mut ranked: Vec<&RegistrationRecord> = self.records.iter().collect();
        ranked.sort_by(|a, b| match (key(a), key(b)) {
            (Some(x), Some(y)) => y.total_cmp(&x),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });
        ranked.truncate(n);
        ranked
    }
}
