//! Data Processor Module
//! Repairs malformed count cells and derives per-district metrics.

use super::loader::{DataError, DataLoader};
use super::table::*;
use polars::prelude::*;

/// Marker the source uses for unavailable counts.
pub const NOT_AVAILABLE: &str = "NA";

/// Handles data cleaning and metric derivation.
pub struct DataProcessor;

impl DataProcessor {
    /// Coerce one raw count cell to a non-negative finite number.
    ///
    /// Thousands separators are stripped; missing cells, the `NA` marker and
    /// anything that still fails to parse become zero.
    pub fn parse_count(raw: Option<&str>) -> f64 {
        let Some(raw) = raw else {
            return 0.0;
        };

        let stripped: String = raw.chars().filter(|c| *c != ',').collect();
        let stripped = stripped.trim();
        if stripped == NOT_AVAILABLE {
            return 0.0;
        }

        stripped.parse::<f64>().map(Self::sanitize).unwrap_or(0.0)
    }

    fn sanitize(value: f64) -> f64 {
        if value.is_finite() && value > 0.0 {
            value
        } else {
            0.0
        }
    }

    /// `numerator / denominator * scale`, undefined for a zero denominator.
    pub fn scaled_ratio(numerator: f64, denominator: f64, scale: f64) -> Option<f64> {
        (denominator > 0.0).then(|| numerator / denominator * scale)
    }

    /// Clean one count column, whether still raw text or already numeric.
    pub fn clean_column(column: &Column) -> Result<Vec<f64>, DataError> {
        if column.dtype() == &DataType::String {
            let ca = column.str()?;
            return Ok(ca.into_iter().map(Self::parse_count).collect());
        }

        let numeric = column.cast(&DataType::Float64)?;
        let ca = numeric.f64()?;
        Ok(ca
            .into_iter()
            .map(|v| v.map(Self::sanitize).unwrap_or(0.0))
            .collect())
    }

    fn text_column(df: &DataFrame, name: &str) -> Result<Vec<String>, DataError> {
        let text = df.column(name)?.cast(&DataType::String)?;
        let ca = text.str()?;
        Ok(ca
            .into_iter()
            .map(|v| v.unwrap_or_default().to_string())
            .collect())
    }

    /// Clean the four count columns in place and append the derived ones.
    ///
    /// Row count and input columns are preserved. Running this on an already
    /// cleaned frame leaves every value unchanged.
    pub fn clean(mut df: DataFrame) -> Result<RegistrationTable, DataError> {
        DataLoader::require_columns(&df)?;

        let active = Self::clean_column(df.column(ACTIVE_REGISTRATION)?)?;
        let male = Self::clean_column(df.column(MALE)?)?;
        let female = Self::clean_column(df.column(FEMALE)?)?;
        let other = Self::clean_column(df.column(OTHER)?)?;

        let total: Vec<f64> = male
            .iter()
            .zip(&female)
            .zip(&other)
            .map(|((m, f), o)| m + f + o)
            .collect();
        let gender_ratio: Vec<Option<f64>> = female
            .iter()
            .zip(&male)
            .map(|(f, m)| Self::scaled_ratio(*f, *m, 1000.0))
            .collect();
        let female_percentage: Vec<Option<f64>> = female
            .iter()
            .zip(&active)
            .map(|(f, a)| Self::scaled_ratio(*f, *a, 100.0))
            .collect();
        let male_percentage: Vec<Option<f64>> = male
            .iter()
            .zip(&active)
            .map(|(m, a)| Self::scaled_ratio(*m, *a, 100.0))
            .collect();

        let divisions = Self::text_column(&df, DIVISION)?;
        let districts = Self::text_column(&df, DISTRICT)?;

        df.with_column(Column::new(ACTIVE_REGISTRATION.into(), active.clone()))?;
        df.with_column(Column::new(MALE.into(), male.clone()))?;
        df.with_column(Column::new(FEMALE.into(), female.clone()))?;
        df.with_column(Column::new(OTHER.into(), other.clone()))?;
        df.with_column(Column::new(TOTAL_REGISTRATION.into(), total))?;
        df.with_column(Column::new(GENDER_RATIO.into(), gender_ratio.clone()))?;
        df.with_column(Column::new(FEMALE_PERCENTAGE.into(), female_percentage.clone()))?;
        df.with_column(Column::new(MALE_PERCENTAGE.into(), male_percentage))?;

        let records = (0..df.height())
            .map(|i| RegistrationRecord {
                division: divisions[i].clone(),
                district: districts[i].clone(),
                active_registration: active[i],
                male: male[i],
                female: female[i],
                other: other[i],
                gender_ratio: gender_ratio[i],
                female_percentage: female_percentage[i],
            })
            .collect();

        Ok(RegistrationTable::new(df, records))
    }
}
