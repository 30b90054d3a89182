//! Voter Insights - Voter Registration Data Analysis
//!
//! Cleans a district-level voter registration table, renders scatter, box and
//! bar charts as PNG images and prints summary statistics.

mod charts;
mod config;
mod data;
mod error;
mod format;
mod pipeline;
mod report;
mod stats;

use anyhow::Context;
use config::AnalysisConfig;
use log::{error, info};
use pipeline::AnalysisRun;
use std::process::ExitCode;
use std::time::{Duration, Instant};

fn main() -> ExitCode {
    // Setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AnalysisConfig::default();
    let start = Instant::now();

    let outcome = pipeline::run(&config)
        .with_context(|| format!("analysis of '{}' failed", config.source.display()));
    if finish(outcome, start.elapsed()) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Log how the run ended; fatal errors are reported here and nowhere else.
fn finish(outcome: anyhow::Result<AnalysisRun>, elapsed: Duration) -> bool {
    match outcome {
        Ok(run) => {
            info!(
                "Analysis finished in {:?}: {} chart(s), {} division(s) summarised",
                elapsed,
                run.artifacts.len(),
                run.report.divisions.len()
            );
            true
        }
        Err(e) => {
            error!("{:#}", e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DataError;
    use tempfile::TempDir;

    #[test]
    fn fatal_error_marks_run_failed() {
        let dir = TempDir::new().unwrap();
        let config = AnalysisConfig {
            source: dir.path().join("data.csv"),
            output_dir: dir.path().to_path_buf(),
            ..AnalysisConfig::default()
        };

        let outcome = pipeline::run(&config).context("analysis failed");
        let err = outcome.as_ref().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<error::AnalysisError>(),
            Some(error::AnalysisError::Data(DataError::SourceMissing(_)))
        ));
        assert!(!finish(outcome, Duration::ZERO));
    }

    #[test]
    fn completed_run_marks_success() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("data.csv"),
            "Division,District,Active Registration,Male,Female,Other\nPune,Pune,10,5,5,0\n",
        )
        .unwrap();
        let config = AnalysisConfig {
            source: dir.path().join("data.csv"),
            output_dir: dir.path().to_path_buf(),
            ..AnalysisConfig::default()
        };

        assert!(finish(pipeline::run(&config).context("analysis failed"), Duration::ZERO));
    }
}
