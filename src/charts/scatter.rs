//! Scatter Chart
//! Gender Ratio against registration volume, one point cluster per division,
//! with a least-squares trend line and labels for unusually high ratios.

use super::renderer::{division_color, padded_range, ChartKind, FONT, GRID};
use super::ChartError;
use crate::data::RegistrationTable;
use crate::format::format_count;
use crate::stats::StatsCalculator;
use log::info;
use plotters::prelude::*;
use std::path::Path;

const TREND: RGBColor = RGBColor(214, 39, 40);
const ANNOTATION_FILL: RGBColor = RGBColor(255, 235, 59);
const POINT_SIZE: i32 = 14;

pub fn draw(table: &RegistrationTable, threshold: f64, path: &Path) -> Result<(), ChartError> {
    let root = BitMapBackend::new(path, ChartKind::Scatter.dimensions()).into_drawing_area();
    root.fill(&WHITE)?;

    // Undefined ratios have no position on the y axis.
    let points: Vec<(f64, f64)> = table
        .records()
        .iter()
        .filter_map(|r| r.gender_ratio.map(|g| (r.active_registration, g)))
        .collect();
    let excluded = table.len() - points.len();
    if excluded > 0 {
        info!("{} district(s) with undefined Gender Ratio left off the scatter plot", excluded);
    }

    let fit = StatsCalculator::linear_fit(&points);
    let x_range = padded_range(points.iter().map(|p| p.0), true);
    let (x_first, x_last) = points
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
            (lo.min(p.0), hi.max(p.0))
        });
    let trend: Vec<(f64, f64)> = match fit {
        Some(fit) => vec![(x_first, fit.predict(x_first)), (x_last, fit.predict(x_last))],
        None => Vec::new(),
    };
    let y_range = padded_range(
        points.iter().map(|p| p.1).chain(trend.iter().map(|p| p.1)),
        false,
    );

    let mut chart = ChartBuilder::on(&root)
        .caption(
            "District-wise Gender Ratio vs Registration Volume",
            (FONT, 56).into_font().style(FontStyle::Bold),
        )
        .margin(40)
        .x_label_area_size(110)
        .y_label_area_size(150)
        .build_cartesian_2d(x_range, y_range)?;

    chart
        .configure_mesh()
        .x_desc("Active Registration")
        .y_desc("Gender Ratio (Females per 1000 Males)")
        .axis_desc_style((FONT, 34))
        .label_style((FONT, 26))
        .light_line_style(WHITE)
        .bold_line_style(ShapeStyle::from(&GRID).stroke_width(1))
        .x_label_formatter(&|x: &f64| format_count(*x))
        .draw()?;

    for (index, division) in table.divisions().into_iter().enumerate() {
        let color = division_color(index);
        let cluster: Vec<(f64, f64)> = table
            .records_in(division)
            .filter_map(|r| r.gender_ratio.map(|g| (r.active_registration, g)))
            .collect();

        chart
            .draw_series(
                cluster
                    .iter()
                    .map(|&point| Circle::new(point, POINT_SIZE, color.mix(0.7).filled())),
            )?
            .label(division)
            .legend(move |(x, y)| Circle::new((x, y), 10, color.filled()));
        chart.draw_series(
            cluster
                .iter()
                .map(|&point| Circle::new(point, POINT_SIZE, BLACK.stroke_width(1))),
        )?;
    }

    match fit {
        Some(fit) => {
            chart
                .draw_series(LineSeries::new(trend, TREND.stroke_width(4)))?
                .label(format!("Trend line (slope: {:.4})", fit.slope))
                .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 30, y)], TREND.stroke_width(4)));
        }
        None => {
            chart
                .draw_series(std::iter::empty::<PathElement<(f64, f64)>>())?
                .label("Trend line (n/a)")
                .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 30, y)], TREND.stroke_width(4)));
        }
    }

    let label_font = (FONT, 24).into_font();
    chart.draw_series(table.records().iter().filter_map(|r| {
        let ratio = r.gender_ratio.filter(|g| *g > threshold)?;
        let text = format!("{} ({:.0})", r.district, ratio);
        let width = text.chars().count() as i32 * 13 + 16;
        Some(
            EmptyElement::at((r.active_registration, ratio))
                + Rectangle::new([(16, -46), (16 + width, -12)], ANNOTATION_FILL.mix(0.7).filled())
                + Text::new(text, (24, -42), label_font.clone()),
        )
    }))?;

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.85))
        .border_style(BLACK)
        .label_font((FONT, 26))
        .draw()?;

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GENDER_RATIO_ANNOTATION_THRESHOLD;
    use crate::data::fixtures::*;
    use rstest::rstest;
    use tempfile::TempDir;

    #[rstest]
    #[case::mixed_divisions(MIXED_DIVISIONS)]
    #[case::single_row(SINGLE_ROW)]
    #[case::single_division(SINGLE_DIVISION)]
    #[case::empty(EMPTY)]
    #[case::no_males(NO_MALES)]
    fn draws_every_table_shape(#[case] rows: &[[&str; 6]]) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(ChartKind::Scatter.file_name());
        let table = cleaned_table(rows);

        draw(&table, GENDER_RATIO_ANNOTATION_THRESHOLD, &path).unwrap();
        assert!(path.is_file());
    }
}
