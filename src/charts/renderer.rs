//! Static Chart Renderer
//! Dispatches the three registration charts and guards each one.
//!
//! A chart that fails to draw is replaced by a blank canvas of the same size,
//! so every run leaves all three image files behind.

use super::{bar, boxplot, scatter, ChartError};
use crate::config::AnalysisConfig;
use crate::data::RegistrationTable;
use log::{debug, warn};
use plotters::prelude::*;
use rayon::prelude::*;
use std::ops::Range;
use std::path::{Path, PathBuf};

pub const FONT: &str = "sans-serif";

// Division palette (RGB)
pub const PALETTE: [RGBColor; 10] = [
    RGBColor(31, 119, 180),  // Blue
    RGBColor(255, 127, 14),  // Orange
    RGBColor(44, 160, 44),   // Green
    RGBColor(214, 39, 40),   // Red
    RGBColor(148, 103, 189), // Purple
    RGBColor(140, 86, 75),   // Brown
    RGBColor(227, 119, 194), // Pink
    RGBColor(127, 127, 127), // Grey
    RGBColor(188, 189, 34),  // Olive
    RGBColor(23, 190, 207),  // Cyan
];

pub const GRID: RGBColor = RGBColor(225, 225, 225);

/// Colour for the division at `index` in first-seen order.
pub fn division_color(index: usize) -> RGBColor {
    PALETTE[index % PALETTE.len()]
}

/// Axis range covering `values` with a small margin.
///
/// With `from_zero` the range starts at zero for non-negative data.
pub fn padded_range<I>(values: I, from_zero: bool) -> Range<f64>
where
    I: IntoIterator<Item = f64>,
{
    let (mut low, mut high) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if from_zero {
        low = low.min(0.0);
        high = high.max(0.0);
    }
    if !low.is_finite() || !high.is_finite() {
        return 0.0..1.0;
    }

    let span = high - low;
    let pad = if span > 0.0 {
        span * 0.05
    } else {
        high.abs().max(1.0) * 0.1
    };
    let start = if from_zero && low >= 0.0 { low } else { low - pad };
    start..high + pad
}

/// X range with one unit-wide slot per category, centred on 0, 1, ...
pub fn slot_range(slots: usize) -> Range<f64> {
    -0.5..slots.max(1) as f64 - 0.5
}

/// Category label for an axis tick placed on a slot centre.
pub fn slot_label(labels: &[String], x: f64) -> String {
    let slot = x.round();
    if (x - slot).abs() > 1e-6 || slot < 0.0 {
        return String::new();
    }
    labels.get(slot as usize).cloned().unwrap_or_default()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Scatter,
    Box,
    Bar,
}

impl ChartKind {
    /// Presentation order of the charts.
    pub const ALL: [ChartKind; 3] = [ChartKind::Scatter, ChartKind::Box, ChartKind::Bar];

    pub fn file_name(self) -> &'static str {
        match self {
            ChartKind::Scatter => "scatter_plot.png",
            ChartKind::Box => "box_plot.png",
            ChartKind::Bar => "bar_plot.png",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ChartKind::Scatter => "Scatter plot",
            ChartKind::Box => "Box plot",
            ChartKind::Bar => "Bar plot",
        }
    }

    /// Fixed output resolution in pixels.
    pub fn dimensions(self) -> (u32, u32) {
        match self {
            ChartKind::Scatter => (2800, 2000),
            ChartKind::Box => (3200, 1600),
            ChartKind::Bar => (3200, 2400),
        }
    }
}

/// An image written by the renderer.
#[derive(Debug, Clone)]
pub struct RenderedChart {
    pub path: PathBuf,
    /// Drawing failed and a blank canvas was written instead.
    pub blank: bool,
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render one chart, falling back to a blank canvas on drawing errors.
    pub fn render(
        kind: ChartKind,
        table: &RegistrationTable,
        config: &AnalysisConfig,
    ) -> Result<RenderedChart, ChartError> {
        let path = config.output_path(kind.file_name());
        let drawn = match kind {
            ChartKind::Scatter => scatter::draw(table, config.annotation_threshold, &path),
            ChartKind::Box => boxplot::draw(table, &path),
            ChartKind::Bar => bar::draw(table, config.chart_top_n, &path),
        };

        match drawn {
            Ok(()) => {
                debug!("{} written to {}", kind.label(), path.display());
                Ok(RenderedChart {
                    path,
                    blank: false,
                })
            }
            Err(e) => {
                warn!("{} could not be drawn, writing blank canvas: {}", kind.label(), e);
                Self::blank_canvas(&path, kind.dimensions())?;
                Ok(RenderedChart {
                    path,
                    blank: true,
                })
            }
        }
    }

    /// Render every chart on the rayon pool; results come back in
    /// `ChartKind::ALL` order.
    pub fn render_all(
        table: &RegistrationTable,
        config: &AnalysisConfig,
    ) -> Vec<(ChartKind, Result<RenderedChart, ChartError>)> {
        ChartKind::ALL[..]
            .par_iter()
            .map(|&kind| (kind, Self::render(kind, table, config)))
            .collect()
    }

    fn blank_canvas(path: &Path, dimensions: (u32, u32)) -> Result<(), ChartError> {
        let root = BitMapBackend::new(path, dimensions).into_drawing_area();
        root.fill(&WHITE)?;
        root.present()?;
        Ok(())
    }
}
