//! Test fixtures: raw and cleaned tables built from literal rows.

use super::table::{RegistrationTable, REQUIRED_COLUMNS};
use super::DataProcessor;
use polars::prelude::*;

/// Uncleaned frame with every required column as text.
pub fn raw_frame(rows: &[[&str; 6]]) -> DataFrame {
    let column = |i: usize| -> Vec<String> { rows.iter().map(|r| r[i].to_string()).collect() };
    DataFrame::new(
        REQUIRED_COLUMNS
            .iter()
            .enumerate()
            .map(|(i, name)| Column::new((*name).into(), column(i)))
            .collect(),
    )
    .unwrap()
}

pub fn cleaned_table(rows: &[[&str; 6]]) -> RegistrationTable {
    DataProcessor::clean(raw_frame(rows)).unwrap()
}

/// Read one Float64 column of the cleaned frame.
pub fn frame_values(table: &RegistrationTable, name: &str) -> Vec<Option<f64>> {
    table
        .frame()
        .column(name)
        .unwrap()
        .f64()
        .unwrap()
        .into_iter()
        .collect()
}

pub const EMPTY: &[[&str; 6]] = &[];

pub const SINGLE_ROW: &[[&str; 6]] = &[["Pune", "Pune", "8,000", "4,100", "3,880", "20"]];

pub const SINGLE_DIVISION: &[[&str; 6]] = &[
    ["Konkan", "Mumbai City", "2,500", "1,300", "1,190", "10"],
    ["Konkan", "Thane", "6,100", "3,200", "2,890", "NA"],
    ["Konkan", "Raigad", "2,100", "1,050", "1,040", "10"],
];

/// Several divisions, one undefined Gender Ratio and one above the annotation threshold.
pub const MIXED_DIVISIONS: &[[&str; 6]] = &[
    ["Konkan", "Mumbai City", "2,500", "1,300", "1,190", "10"],
    ["Konkan", "Thane", "6,100", "3,200", "2,890", "NA"],
    ["Pune", "Pune", "8,000", "4,100", "3,880", "20"],
    ["Pune", "Satara", "2,700", "0", "2,700", "0"],
    ["Nagpur", "Gadchiroli", "900", "300", "600", "0"],
    ["Nagpur", "Wardha", "1,200", "610", "590", "0"],
    ["Nagpur", "Nagpur", "4,800", "2,450", "2,340", "10"],
];

/// Every Gender Ratio undefined.
pub const NO_MALES: &[[&str; 6]] = &[
    ["Konkan", "Thane", "1,000", "0", "1,000", "0"],
    ["Pune", "Satara", "500", "0", "480", "20"],
];
