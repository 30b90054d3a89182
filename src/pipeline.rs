//! Analysis Pipeline
//! Load and clean, render the charts, print the summary and the artifact manifest.

use crate::charts::{ChartKind, RenderedChart, StaticChartRenderer};
use crate::config::AnalysisConfig;
use crate::data::DataLoader;
use crate::error::AnalysisError;
use crate::report::{SummaryReport, SummaryReporter};
use log::{error, warn};

/// What a completed run produced.
#[derive(Debug)]
pub struct AnalysisRun {
    /// Images written, in presentation order.
    pub artifacts: Vec<RenderedChart>,
    pub report: SummaryReport,
}

/// Run the whole analysis once.
///
/// Only a missing or malformed source table aborts the run; a chart that
/// cannot be written is logged and left out of the manifest.
pub fn run(config: &AnalysisConfig) -> Result<AnalysisRun, AnalysisError> {
    println!("Voter Registration Data Analysis");
    println!("{}", "=".repeat(50));

    let table = DataLoader::load_and_clean(&config.source)?;
    if table.is_empty() {
        warn!("Source table has no rows, charts will be empty");
    }

    println!("\nGenerating visualizations...");
    let mut artifacts = Vec::with_capacity(ChartKind::ALL.len());
    for (step, (kind, outcome)) in StaticChartRenderer::render_all(&table, config)
        .into_iter()
        .enumerate()
    {
        match outcome {
            Ok(chart) => {
                if chart.blank {
                    warn!("{} saved as an empty canvas", kind.label());
                }
                println!("\n{}. {} saved as '{}'", step + 1, kind.label(), kind.file_name());
                artifacts.push(chart);
            }
            Err(e) => error!("{} could not be written: {}", kind.label(), e),
        }
    }

    let report = SummaryReporter::build(&table, config)?;
    println!("\n{}", report);

    let rule = "=".repeat(60);
    println!("\n{}", rule);
    println!("ANALYSIS COMPLETE!");
    println!("Generated files:");
    for chart in &artifacts {
        let name = chart.path.file_name().unwrap_or(chart.path.as_os_str());
        println!("- {}", name.to_string_lossy());
    }
    println!("{}", rule);

    Ok(AnalysisRun { artifacts, report })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DataError;
    use std::fs;
    use tempfile::TempDir;

    const HEADER: &str = "Division,District,Active Registration,Male,Female,Other\n";

    fn config_for(dir: &TempDir, csv: &str) -> AnalysisConfig {
        let source = dir.path().join("data.csv");
        fs::write(&source, csv).unwrap();
        AnalysisConfig {
            source,
            output_dir: dir.path().to_path_buf(),
            ..AnalysisConfig::default()
        }
    }

    #[test]
    fn empty_table_still_produces_every_artifact() {
        let dir = TempDir::new().unwrap();
        let config = config_for(&dir, HEADER);

        let run = run(&config).unwrap();

        assert_eq!(run.artifacts.len(), 3);
        assert!(run.artifacts.iter().all(|c| !c.blank));
        for kind in ChartKind::ALL {
            assert!(dir.path().join(kind.file_name()).is_file());
        }
        assert_eq!(run.report.overall.active_registration, 0.0);
        assert!(run.report.divisions.is_empty());
    }

    #[test]
    fn full_run_over_small_dataset() {
        let dir = TempDir::new().unwrap();
        let csv = format!(
            "{HEADER}\
             Konkan,Mumbai City,\"2,500\",\"1,300\",\"1,190\",10\n\
             Konkan,Thane,\"6,100\",\"3,200\",\"2,890\",NA\n\
             Pune,Pune,\"8,000\",\"4,100\",\"3,880\",20\n\
             Pune,Satara,\"2,700\",0,\"2,700\",0\n\
             Nagpur,Gadchiroli,900,300,600,0\n"
        );
        let config = config_for(&dir, &csv);

        let run = run(&config).unwrap();

        let names: Vec<String> = run
            .artifacts
            .iter()
            .map(|c| c.path.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["scatter_plot.png", "box_plot.png", "bar_plot.png"]);
        for chart in &run.artifacts {
            assert!(!chart.blank, "{} fell back to a blank canvas", chart.path.display());
        }

        let divisions: Vec<&str> = run.report.divisions.iter().map(|d| d.division.as_str()).collect();
        assert_eq!(divisions, ["Konkan", "Pune", "Nagpur"]);
        assert_eq!(run.report.top_by_registration[0].district, "Pune");
        assert_eq!(run.report.top_by_gender_ratio[0].district, "Gadchiroli");
        assert_eq!(run.report.top_by_gender_ratio[4].district, "Satara");
        assert_eq!(run.report.top_by_gender_ratio[4].gender_ratio, None);
    }

    #[test]
    fn missing_source_aborts() {
        let dir = TempDir::new().unwrap();
        let config = AnalysisConfig {
            source: dir.path().join("data.csv"),
            output_dir: dir.path().to_path_buf(),
            ..AnalysisConfig::default()
        };

        let err = run(&config).unwrap_err();
        assert!(matches!(err, AnalysisError::Data(DataError::SourceMissing(_))));
        assert!(!dir.path().join("scatter_plot.png").exists());
    }
}
