//! Box Plot Chart
//! Registration and Gender Ratio distributions per division, side by side.

use super::renderer::{division_color, padded_range, slot_label, slot_range, ChartKind, FONT, GRID};
use super::ChartError;
use crate::data::RegistrationTable;
use crate::format::format_count;
use crate::stats::{BoxSummary, StatsCalculator};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;

const BOX_HALF_WIDTH: f64 = 0.3;
const CAP_HALF_WIDTH: f64 = 0.12;
const MEDIAN: RGBColor = RGBColor(230, 85, 13);

pub fn draw(table: &RegistrationTable, path: &Path) -> Result<(), ChartError> {
    let root = BitMapBackend::new(path, ChartKind::Box.dimensions()).into_drawing_area();
    root.fill(&WHITE)?;

    let divisions = table.divisions();
    let labels: Vec<String> = divisions.iter().map(|d| d.to_string()).collect();
    let registration: Vec<Vec<f64>> = divisions
        .iter()
        .map(|d| table.records_in(d).map(|r| r.active_registration).collect())
        .collect();
    let gender_ratio: Vec<Vec<f64>> = divisions
        .iter()
        .map(|d| table.records_in(d).filter_map(|r| r.gender_ratio).collect())
        .collect();

    let panels = root.split_evenly((1, 2));
    draw_panel(
        &panels[0],
        "Distribution of Active Registration by Division",
        "Active Registration",
        &labels,
        &registration,
        true,
    )?;
    draw_panel(
        &panels[1],
        "Distribution of Gender Ratio by Division",
        "Gender Ratio (Females per 1000 Males)",
        &labels,
        &gender_ratio,
        false,
    )?;

    root.present()?;
    Ok(())
}

/// One box per division slot; an empty group leaves its slot blank.
fn draw_panel(
    area: &DrawingArea<BitMapBackend<'_>, Shift>,
    title: &str,
    y_desc: &str,
    labels: &[String],
    groups: &[Vec<f64>],
    counts: bool,
) -> Result<(), ChartError> {
    let summaries: Vec<Option<BoxSummary>> = groups
        .iter()
        .map(|values| StatsCalculator::box_summary(values))
        .collect();
    let y_range = padded_range(groups.iter().flatten().copied(), counts);

    let mut chart = ChartBuilder::on(area)
        .caption(title, (FONT, 40).into_font().style(FontStyle::Bold))
        .margin(30)
        .x_label_area_size(160)
        .y_label_area_size(150)
        .build_cartesian_2d(slot_range(labels.len()), y_range)?;

    let y_formatter = |y: &f64| {
        if counts {
            format_count(*y)
        } else {
            format!("{:.0}", y)
        }
    };
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(labels.len().max(1))
        .x_label_formatter(&|x: &f64| slot_label(labels, *x))
        .x_label_style((FONT, 24).into_font().transform(FontTransform::Rotate90))
        .y_label_formatter(&y_formatter)
        .y_desc(y_desc)
        .axis_desc_style((FONT, 30))
        .label_style((FONT, 24))
        .light_line_style(WHITE)
        .bold_line_style(ShapeStyle::from(&GRID).stroke_width(1))
        .draw()?;

    for (index, summary) in summaries.iter().enumerate() {
        let Some(summary) = summary else {
            continue;
        };
        let x = index as f64;
        let fill = division_color(index);
        let left = x - BOX_HALF_WIDTH;
        let right = x + BOX_HALF_WIDTH;

        chart.draw_series([
            Rectangle::new([(left, summary.q1), (right, summary.q3)], fill.mix(0.7).filled()),
            Rectangle::new([(left, summary.q1), (right, summary.q3)], BLACK.stroke_width(2)),
        ])?;
        chart.draw_series([
            PathElement::new(vec![(x, summary.q3), (x, summary.whisker_high)], BLACK.stroke_width(2)),
            PathElement::new(vec![(x, summary.q1), (x, summary.whisker_low)], BLACK.stroke_width(2)),
            PathElement::new(
                vec![
                    (x - CAP_HALF_WIDTH, summary.whisker_high),
                    (x + CAP_HALF_WIDTH, summary.whisker_high),
                ],
                BLACK.stroke_width(2),
            ),
            PathElement::new(
                vec![
                    (x - CAP_HALF_WIDTH, summary.whisker_low),
                    (x + CAP_HALF_WIDTH, summary.whisker_low),
                ],
                BLACK.stroke_width(2),
            ),
            PathElement::new(vec![(left, summary.median), (right, summary.median)], MEDIAN.stroke_width(4)),
        ])?;
        chart.draw_series(
            summary
                .outliers
                .iter()
                .map(|&v| Circle::new((x, v), 8, BLACK.stroke_width(2))),
        )?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
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
        let path = dir.path().join(ChartKind::Box.file_name());
        let table = cleaned_table(rows);

        draw(&table, &path).unwrap();
        assert!(path.is_file());
    }
}
