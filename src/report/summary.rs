//! Summary Reporter
//! Dataset-wide totals, per-division aggregates and district rankings.

use crate::config::AnalysisConfig;
use crate::data::{
    RegistrationRecord, RegistrationTable, ACTIVE_REGISTRATION, DISTRICT, DIVISION,
    FEMALE_PERCENTAGE, GENDER_RATIO,
};
use crate::format::{format_count, format_decimal};
use crate::stats::StatsCalculator;
use polars::prelude::*;
use std::fmt;
use tabled::{Table, Tabled};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Failed to aggregate divisions: {0}")]
    PolarsError(#[from] PolarsError),
}

const DISTRICT_COUNT: &str = "districts";
const REGISTRATION_SUM: &str = "registration_sum";
const REGISTRATION_MEAN: &str = "registration_mean";
const GENDER_RATIO_MEAN: &str = "gender_ratio_mean";
const FEMALE_PERCENTAGE_MEAN: &str = "female_percentage_mean";

/// Dataset-wide totals.
#[derive(Debug, Clone, PartialEq)]
pub struct OverallStats {
    pub active_registration: f64,
    pub male: f64,
    pub female: f64,
    pub other: f64,
    /// Mean over districts with a defined Gender Ratio.
    pub mean_gender_ratio: Option<f64>,
    /// Female share of all active registrations, in percent.
    pub female_share: Option<f64>,
}

/// Aggregates for one division.
#[derive(Debug, Clone, PartialEq)]
pub struct DivisionStats {
    pub division: String,
    pub districts: u64,
    pub registration_sum: f64,
    pub registration_mean: Option<f64>,
    pub gender_ratio_mean: Option<f64>,
    pub female_percentage_mean: Option<f64>,
}

/// A district's place in a ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedDistrict {
    pub district: String,
    pub division: String,
    pub active_registration: f64,
    pub gender_ratio: Option<f64>,
}

impl From<&RegistrationRecord> for RankedDistrict {
    fn from(r: &RegistrationRecord) -> Self {
        Self {
            district: r.district.clone(),
            division: r.division.clone(),
            active_registration: r.active_registration,
            gender_ratio: r.gender_ratio,
        }
    }
}

#[derive(Tabled)]
struct DivisionRow {
    #[tabled(rename = "Division")]
    division: String,
    #[tabled(rename = "Districts")]
    districts: u64,
    #[tabled(rename = "Registration (sum)")]
    registration_sum: String,
    #[tabled(rename = "Registration (mean)")]
    registration_mean: String,
    #[tabled(rename = "Gender Ratio (mean)")]
    gender_ratio_mean: String,
    #[tabled(rename = "Female % (mean)")]
    female_percentage_mean: String,
}

#[derive(Tabled)]
struct RegistrationRankRow {
    #[tabled(rename = "District")]
    district: String,
    #[tabled(rename = "Division")]
    division: String,
    #[tabled(rename = "Active Registration")]
    active_registration: String,
    #[tabled(rename = "Gender Ratio")]
    gender_ratio: String,
}

#[derive(Tabled)]
struct GenderRankRow {
    #[tabled(rename = "District")]
    district: String,
    #[tabled(rename = "Division")]
    division: String,
    #[tabled(rename = "Gender Ratio")]
    gender_ratio: String,
    #[tabled(rename = "Active Registration")]
    active_registration: String,
}

/// Everything the reporter prints, in print order.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryReport {
    /// Requested ranking length; rankings may be shorter.
    pub top_n: usize,
    pub overall: OverallStats,
    pub divisions: Vec<DivisionStats>,
    pub top_by_registration: Vec<RankedDistrict>,
    pub top_by_gender_ratio: Vec<RankedDistrict>,
}

pub struct SummaryReporter;

impl SummaryReporter {
    /// Compute the report. Reads the table only.
    pub fn build(
        table: &RegistrationTable,
        config: &AnalysisConfig,
    ) -> Result<SummaryReport, ReportError> {
        let top_by_registration = table
            .top_by(config.report_top_n, |r| Some(r.active_registration))
            .into_iter()
            .map(RankedDistrict::from)
            .collect();
        let top_by_gender_ratio = table
            .top_by(config.report_top_n, |r| r.gender_ratio)
            .into_iter()
            .map(RankedDistrict::from)
            .collect();

        Ok(SummaryReport {
            top_n: config.report_top_n,
            overall: Self::overall(table),
            divisions: Self::divisions(table)?,
            top_by_registration,
            top_by_gender_ratio,
        })
    }

    pub fn overall(table: &RegistrationTable) -> OverallStats {
        let records = table.records();
        let sum = |field: fn(&RegistrationRecord) -> f64| records.iter().map(field).sum::<f64>();

        let active_registration = sum(|r| r.active_registration);
        let female = sum(|r| r.female);
        OverallStats {
            active_registration,
            male: sum(|r| r.male),
            female,
            other: sum(|r| r.other),
            mean_gender_ratio: StatsCalculator::mean_defined(records.iter().map(|r| r.gender_ratio)),
            female_share: (active_registration > 0.0)
                .then(|| female / active_registration * 100.0),
        }
    }

    /// Per-division aggregates in first-seen division order.
    pub fn divisions(table: &RegistrationTable) -> Result<Vec<DivisionStats>, ReportError> {
        let grouped = table
            .frame()
            .clone()
            .lazy()
            .group_by_stable([col(DIVISION)])
            .agg([
                col(DISTRICT).count().alias(DISTRICT_COUNT),
                col(ACTIVE_REGISTRATION).sum().alias(REGISTRATION_SUM),
                col(ACTIVE_REGISTRATION).mean().alias(REGISTRATION_MEAN),
                col(GENDER_RATIO).mean().alias(GENDER_RATIO_MEAN),
                col(FEMALE_PERCENTAGE).mean().alias(FEMALE_PERCENTAGE_MEAN),
            ])
            .collect()?;

        let names = grouped.column(DIVISION)?.cast(&DataType::String)?;
        let names = names.str()?;
        let districts = grouped.column(DISTRICT_COUNT)?.cast(&DataType::UInt64)?;
        let districts = districts.u64()?;
        let sums = grouped.column(REGISTRATION_SUM)?.f64()?;
        let means = grouped.column(REGISTRATION_MEAN)?.f64()?;
        let ratios = grouped.column(GENDER_RATIO_MEAN)?.f64()?;
        let female = grouped.column(FEMALE_PERCENTAGE_MEAN)?.f64()?;

        Ok((0..grouped.height())
            .map(|i| DivisionStats {
                division: names.get(i).unwrap_or_default().to_string(),
                districts: districts.get(i).unwrap_or(0),
                registration_sum: sums.get(i).unwrap_or(0.0),
                registration_mean: means.get(i),
                gender_ratio_mean: ratios.get(i),
                female_percentage_mean: female.get(i),
            })
            .collect())
    }
}

impl fmt::Display for SummaryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(60);
        writeln!(f, "{}", rule)?;
        writeln!(f, "SUMMARY STATISTICS - VOTER REGISTRATION")?;
        writeln!(f, "{}", rule)?;

        let o = &self.overall;
        writeln!(f, "\nOVERALL STATISTICS:")?;
        writeln!(f, "Total Active Registrations: {}", format_count(o.active_registration))?;
        writeln!(f, "Total Male Voters: {}", format_count(o.male))?;
        writeln!(f, "Total Female Voters: {}", format_count(o.female))?;
        writeln!(f, "Total Other Voters: {}", format_count(o.other))?;
        writeln!(
            f,
            "Average Gender Ratio: {} females per 1000 males",
            format_decimal(o.mean_gender_ratio, 0)
        )?;
        match o.female_share {
            Some(share) => writeln!(f, "Overall Female Percentage: {:.1}%", share)?,
            None => writeln!(f, "Overall Female Percentage: {}", format_decimal(None, 1))?,
        }

        let divisions: Vec<DivisionRow> = self
            .divisions
            .iter()
            .map(|d| DivisionRow {
                division: d.division.clone(),
                districts: d.districts,
                registration_sum: format_count(d.registration_sum),
                registration_mean: format_decimal(d.registration_mean, 1),
                gender_ratio_mean: format_decimal(d.gender_ratio_mean, 1),
                female_percentage_mean: format_decimal(d.female_percentage_mean, 1),
            })
            .collect();
        writeln!(f, "\nDIVISION-WISE STATISTICS:")?;
        writeln!(f, "{}", Table::new(divisions))?;

        let by_registration: Vec<RegistrationRankRow> = self
            .top_by_registration
            .iter()
            .map(|r| RegistrationRankRow {
                district: r.district.clone(),
                division: r.division.clone(),
                active_registration: format_count(r.active_registration),
                gender_ratio: format_decimal(r.gender_ratio, 1),
            })
            .collect();
        writeln!(f, "\nTOP {} DISTRICTS BY REGISTRATION:", self.top_n)?;
        writeln!(f, "{}", Table::new(by_registration))?;

        let by_gender_ratio: Vec<GenderRankRow> = self
            .top_by_gender_ratio
            .iter()
            .map(|r| GenderRankRow {
                district: r.district.clone(),
                division: r.division.clone(),
                gender_ratio: format_decimal(r.gender_ratio, 1),
                active_registration: format_count(r.active_registration),
            })
            .collect();
        writeln!(f, "\nTOP {} DISTRICTS BY GENDER RATIO:", self.top_n)?;
        write!(f, "{}", Table::new(by_gender_ratio))
    }
}
