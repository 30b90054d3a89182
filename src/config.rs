//! Analysis Settings
//! Hard-coded run settings for the voter registration analysis.

use std::path::PathBuf;

/// Source table read from the working directory.
pub const DEFAULT_SOURCE: &str = "data.csv";

/// Districts above this Gender Ratio are annotated on the scatter plot.
pub const GENDER_RATIO_ANNOTATION_THRESHOLD: f64 = 1500.0;

/// Settings for a single analysis run.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    pub source: PathBuf,
    pub output_dir: PathBuf,
    pub annotation_threshold: f64,
    /// Number of districts shown on the bar chart ranking.
    pub chart_top_n: usize,
    /// Number of districts listed in each report ranking.
    pub report_top_n: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            source: PathBuf::from(DEFAULT_SOURCE),
            output_dir: PathBuf::from("."),
            annotation_threshold: GENDER_RATIO_ANNOTATION_THRESHOLD,
            chart_top_n: 15,
            report_top_n: 5,
        }
    }
}

impl AnalysisConfig {
    /// Resolve an artifact file name against the output directory.
    pub fn output_path(&self, file_name: &str) -> PathBuf {
        self.output_dir.join(file_name)
    }
}
