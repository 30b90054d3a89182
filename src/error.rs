//! Fatal errors that abort an analysis run.

use crate::data::DataError;
use crate::report::ReportError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error(transparent)]
    Data(#[from] DataError),
    #[error(transparent)]
    Report(#[from] ReportError),
}
