//! Statistics Calculator Module
//! Box-plot summaries, least-squares trend fitting and means over defined values.

use statrs::statistics::Statistics;

/// Whisker reach as a multiple of the interquartile range.
pub const WHISKER_IQR_FACTOR: f64 = 1.5;

/// Five-number summary plus outliers for one box in a box plot.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxSummary {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    /// Lowest observation within `WHISKER_IQR_FACTOR * IQR` below Q1.
    pub whisker_low: f64,
    /// Highest observation within `WHISKER_IQR_FACTOR * IQR` above Q3.
    pub whisker_high: f64,
    pub outliers: Vec<f64>,
}

/// Ordinary least-squares line `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Handles statistical calculations for charts and reports.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Calculate percentile using linear interpolation (NumPy compatible).
    pub fn percentile(sorted_values: &[f64], p: f64) -> f64 {
        let n = sorted_values.len();
        if n == 0 {
            return f64::NAN;
        }
        if n == 1 {
            return sorted_values[0];
        }

        let rank = (p / 100.0) * (n - 1) as f64;
        let lower = rank.floor() as usize;
        let upper = (rank.ceil() as usize).min(n - 1);
        let frac = rank - lower as f64;

        if lower == upper {
            sorted_values[lower]
        } else {
            sorted_values[lower] * (1.0 - frac) + sorted_values[upper] * frac
        }
    }

    /// Summarise a group for a box plot. Non-finite values are ignored;
    /// `None` when nothing is left.
    pub fn box_summary(values: &[f64]) -> Option<BoxSummary> {
        let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        if sorted.is_empty() {
            return None;
        }
        sorted.sort_by(f64::total_cmp);

        let q1 = Self::percentile(&sorted, 25.0);
        let median = Self::percentile(&sorted, 50.0);
        let q3 = Self::percentile(&sorted, 75.0);
        let iqr = q3 - q1;

        let low_fence = q1 - WHISKER_IQR_FACTOR * iqr;
        let high_fence = q3 + WHISKER_IQR_FACTOR * iqr;
        let whisker_low = sorted
            .iter()
            .copied()
            .find(|&v| v >= low_fence)
            .filter(|&v| v <= q1)
            .unwrap_or(q1);
        let whisker_high = sorted
            .iter()
            .rev()
            .copied()
            .find(|&v| v <= high_fence)
            .filter(|&v| v >= q3)
            .unwrap_or(q3);

        let outliers = sorted
            .iter()
            .copied()
            .filter(|&v| v < whisker_low || v > whisker_high)
            .collect();

        Some(BoxSummary {
            q1,
            median,
            q3,
            whisker_low,
            whisker_high,
            outliers,
        })
    }

    /// Fit a least-squares line through the finite points.
    ///
    /// `None` with fewer than two usable points or no spread in x.
    pub fn linear_fit(points: &[(f64, f64)]) -> Option<LinearFit> {
        let (xs, ys): (Vec<f64>, Vec<f64>) = points
            .iter()
            .copied()
            .filter(|(x, y)| x.is_finite() && y.is_finite())
            .unzip();
        if xs.len() < 2 {
            return None;
        }

        let x_variance = xs.iter().variance();
        if !x_variance.is_finite() || x_variance <= 0.0 {
            return None;
        }

        let slope = xs.iter().covariance(ys.iter()) / x_variance;
        let intercept = ys.iter().mean() - slope * xs.iter().mean();
        Some(LinearFit { slope, intercept })
    }

    /// Mean of the defined values, `None` when there are none.
    pub fn mean_defined<I>(values: I) -> Option<f64>
    where
        I: IntoIterator<Item = Option<f64>>,
    {
        let defined: Vec<f64> = values.into_iter().flatten().collect();
        if defined.is_empty() {
            None
        } else {
            Some(defined.iter().mean())
        }
    }
}
