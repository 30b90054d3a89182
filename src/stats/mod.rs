//! Statistics module - box summaries and trend fitting

mod calculator;

pub use calculator::{BoxSummary, StatsCalculator};
