//! CSV Data Loader Module
//! Reads the voter registration table using Polars and checks its columns.

use super::DataProcessor;
use super::table::{RegistrationTable, DISTRICT, DIVISION, REQUIRED_COLUMNS};
use log::debug;
use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DataError {
    #[error("Source file not found: {}", .0.display())]
    SourceMissing(PathBuf),
    #[error("Required column missing: '{0}'")]
    MissingColumn(String),
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
}

/// Loads the registration CSV into a Polars DataFrame.
pub struct DataLoader;

impl DataLoader {
    /// Load a CSV file with every column kept as text.
    ///
    /// Schema inference is disabled so comma-formatted counts and `NA`
    /// markers reach the cleaner untouched.
    pub fn load_csv(path: &Path) -> Result<DataFrame, DataError> {
        if !path.is_file() {
            return Err(DataError::SourceMissing(path.to_path_buf()));
        }

        let df = LazyCsvReader::new(path)
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .finish()?
            .collect()?;

        Self::require_columns(&df)?;
        debug!("Read {} rows from {}", df.height(), path.display());
        Ok(df)
    }

    /// Fail on the first required column absent from the header.
    pub fn require_columns(df: &DataFrame) -> Result<(), DataError> {
        let names = df.get_column_names();
        for required in REQUIRED_COLUMNS {
            if !names.iter().any(|name| name.as_str() == required) {
                return Err(DataError::MissingColumn(required.to_string()));
            }
        }
        Ok(())
    }

    /// Number of distinct non-missing values in a column.
    pub fn distinct_count(df: &DataFrame, name: &str) -> Result<usize, DataError> {
        Ok(df
            .column(name)?
            .as_materialized_series()
            .drop_nulls()
            .n_unique()?)
    }

    /// Load, clean and derive metrics, printing the table's shape.
    pub fn load_and_clean(path: &Path) -> Result<RegistrationTable, DataError> {
        println!("Loading voter registration data...");

        let df = Self::load_csv(path)?;
        let divisions = Self::distinct_count(&df, DIVISION)?;
        let districts = Self::distinct_count(&df, DISTRICT)?;
        let table = DataProcessor::clean(df)?;

        let (rows, columns) = table.shape();
        println!("Data loaded successfully. Shape: ({}, {})", rows, columns);
        println!("Divisions: {}", divisions);
        println!("Districts: {}", districts);

        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::frame_values;
    use crate::data::table::{ACTIVE_REGISTRATION, GENDER_RATIO, TOTAL_REGISTRATION};
    use std::fs;
    use tempfile::TempDir;

    fn write_csv(dir: &TempDir, contents: &str) -> PathBuf {
        let path = dir.path().join("data.csv");
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn missing_file_is_fatal() {
        let dir = TempDir::new().unwrap();
        let err = DataLoader::load_csv(&dir.path().join("absent.csv")).unwrap_err();
        assert!(matches!(err, DataError::SourceMissing(_)));
    }

    #[test]
    fn missing_column_is_fatal() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "Division,District,Active Registration,Male,Female\nA,X,10,5,5\n");
        let err = DataLoader::load_csv(&path).unwrap_err();
        match err {
            DataError::MissingColumn(name) => assert_eq!(name, "Other"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn column_names_are_exact_match() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            &dir,
            "Division,District,Active registration,Male,Female,Other\nA,X,10,5,5,0\n",
        );
        let err = DataLoader::load_csv(&path).unwrap_err();
        assert!(matches!(err, DataError::MissingColumn(name) if name == ACTIVE_REGISTRATION));
    }

    #[test]
    fn quoted_thousands_and_na_are_cleaned() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            &dir,
            "Division,District,Active Registration,Male,Female,Other\nA,X,\"1,000\",600,400,NA\n",
        );
        let table = DataLoader::load_and_clean(&path).unwrap();
        let record = &table.records()[0];

        assert_eq!(record.active_registration, 1000.0);
        assert_eq!(record.other, 0.0);
        assert_eq!(frame_values(&table, TOTAL_REGISTRATION), [Some(1000.0)]);
        assert!((record.gender_ratio.unwrap() - 666.666_666).abs() < 1e-3);
        assert_eq!(record.female_percentage, Some(40.0));
        assert_eq!(table.shape(), (1, 10));
    }

    #[test]
    fn distinct_counts_skip_missing_names() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            &dir,
            "Division,District,Active Registration,Male,Female,Other\n\
             Pune,Satara,10,5,5,0\n\
             ,Satara,10,5,5,0\n\
             Pune,,10,5,5,0\n\
             Nagpur,Wardha,10,5,5,0\n",
        );
        let df = DataLoader::load_csv(&path).unwrap();

        assert_eq!(DataLoader::distinct_count(&df, DIVISION).unwrap(), 2);
        assert_eq!(DataLoader::distinct_count(&df, DISTRICT).unwrap(), 2);
    }

    #[test]
    fn header_only_table_loads_empty() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "Division,District,Active Registration,Male,Female,Other\n");
        let table = DataLoader::load_and_clean(&path).unwrap();

        assert!(table.is_empty());
        assert_eq!(table.shape().0, 0);
        let names = table.frame().get_column_names();
        assert!(names.iter().any(|n| n.as_str() == TOTAL_REGISTRATION));
        assert!(names.iter().any(|n| n.as_str() == GENDER_RATIO));
    }
}
