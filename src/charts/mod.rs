//! Charts module - static PNG chart rendering

mod bar;
mod boxplot;
mod renderer;
mod scatter;

pub use renderer::{ChartKind, RenderedChart, StaticChartRenderer};

use plotters::drawing::DrawingAreaErrorKind;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Failed to draw chart: {0}")]
    Drawing(String),
}

impl<E: std::error::Error + Send + Sync> From<DrawingAreaErrorKind<E>> for ChartError {
    fn from(e: DrawingAreaErrorKind<E>) -> Self {
        ChartError::Drawing(e.to_string())
    }
}
