//! Report module - textual summary statistics

mod summary;

pub use summary::{ReportError, SummaryReport, SummaryReporter};
