//! Bar Chart
//! Top districts by registration above, male vs female totals per division below.

use super::renderer::{slot_label, slot_range, ChartKind, FONT, GRID};
use super::ChartError;
use crate::data::RegistrationTable;
use crate::format::format_count;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;

const BAR_HALF_WIDTH: f64 = 0.4;
const GROUPED_BAR_WIDTH: f64 = 0.35;
const MALE: RGBColor = RGBColor(173, 216, 230);
const FEMALE: RGBColor = RGBColor(255, 182, 193);

// Viridis anchor colours
const GRADIENT: [RGBColor; 3] = [
    RGBColor(68, 1, 84),
    RGBColor(33, 145, 140),
    RGBColor(253, 231, 37),
];

/// Colour for bar `index` of `count` along the gradient.
fn gradient_color(index: usize, count: usize) -> RGBColor {
    let t = if count > 1 {
        index as f64 / (count - 1) as f64
    } else {
        0.0
    };
    let scaled = t * (GRADIENT.len() - 1) as f64;
    let segment = (scaled.floor() as usize).min(GRADIENT.len() - 2);
    let frac = scaled - segment as f64;
    let (from, to) = (GRADIENT[segment], GRADIENT[segment + 1]);
    let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * frac).round() as u8;
    RGBColor(mix(from.0, to.0), mix(from.1, to.1), mix(from.2, to.2))
}

pub fn draw(table: &RegistrationTable, top_n: usize, path: &Path) -> Result<(), ChartError> {
    let root = BitMapBackend::new(path, ChartKind::Bar.dimensions()).into_drawing_area();
    root.fill(&WHITE)?;

    let panels = root.split_evenly((2, 1));
    draw_top_districts(&panels[0], table, top_n)?;
    draw_division_gender(&panels[1], table)?;

    root.present()?;
    Ok(())
}

fn draw_top_districts(
    area: &DrawingArea<BitMapBackend<'_>, Shift>,
    table: &RegistrationTable,
    top_n: usize,
) -> Result<(), ChartError> {
    let top = table.top_by(top_n, |r| Some(r.active_registration));
    let labels: Vec<String> = top
        .iter()
        .map(|r| format!("{} ({})", r.district, r.division))
        .collect();
    let peak = top.first().map(|r| r.active_registration).unwrap_or(0.0);
    let y_end = if peak > 0.0 { peak * 1.12 } else { 1.0 };

    let mut chart = ChartBuilder::on(area)
        .caption(
            format!("Top {} Districts by Active Registration", top_n),
            (FONT, 44).into_font().style(FontStyle::Bold),
        )
        .margin(30)
        .x_label_area_size(320)
        .y_label_area_size(170)
        .build_cartesian_2d(slot_range(top.len()), 0.0..y_end)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(top.len().max(1))
        .x_label_formatter(&|x: &f64| slot_label(&labels, *x))
        .x_label_style((FONT, 24).into_font().transform(FontTransform::Rotate90))
        .y_label_formatter(&|y: &f64| format_count(*y))
        .y_desc("Active Registration")
        .axis_desc_style((FONT, 30))
        .label_style((FONT, 24))
        .light_line_style(WHITE)
        .bold_line_style(ShapeStyle::from(&GRID).stroke_width(1))
        .draw()?;

    let count = top.len();
    chart.draw_series(top.iter().enumerate().map(|(i, r)| {
        let x = i as f64;
        Rectangle::new(
            [(x - BAR_HALF_WIDTH, 0.0), (x + BAR_HALF_WIDTH, r.active_registration)],
            gradient_color(i, count).filled(),
        )
    }))?;

    let value_style = TextStyle::from((FONT, 24).into_font().style(FontStyle::Bold))
        .pos(Pos::new(HPos::Center, VPos::Bottom));
    chart.draw_series(top.iter().enumerate().map(|(i, r)| {
        Text::new(
            format_count(r.active_registration),
            (i as f64, r.active_registration + peak * 0.01),
            value_style.clone(),
        )
    }))?;

    Ok(())
}

fn draw_division_gender(
    area: &DrawingArea<BitMapBackend<'_>, Shift>,
    table: &RegistrationTable,
) -> Result<(), ChartError> {
    let divisions = table.divisions();
    let labels: Vec<String> = divisions.iter().map(|d| d.to_string()).collect();
    let totals: Vec<(f64, f64)> = divisions
        .iter()
        .map(|d| {
            table
                .records_in(d)
                .fold((0.0, 0.0), |(male, female), r| (male + r.male, female + r.female))
        })
        .collect();
    let peak = totals
        .iter()
        .map(|(male, female)| male.max(*female))
        .fold(0.0, f64::max);
    let y_end = if peak > 0.0 { peak * 1.08 } else { 1.0 };

    let mut chart = ChartBuilder::on(area)
        .caption(
            "Division-wise Male vs Female Registration",
            (FONT, 44).into_font().style(FontStyle::Bold),
        )
        .margin(30)
        .x_label_area_size(200)
        .y_label_area_size(170)
        .build_cartesian_2d(slot_range(labels.len()), 0.0..y_end)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(labels.len().max(1))
        .x_label_formatter(&|x: &f64| slot_label(&labels, *x))
        .x_label_style((FONT, 24).into_font().transform(FontTransform::Rotate90))
        .y_label_formatter(&|y: &f64| format_count(*y))
        .y_desc("Registration Count")
        .axis_desc_style((FONT, 30))
        .label_style((FONT, 24))
        .light_line_style(WHITE)
        .bold_line_style(ShapeStyle::from(&GRID).stroke_width(1))
        .draw()?;

    chart
        .draw_series(totals.iter().enumerate().map(|(i, (male, _))| {
            let x = i as f64;
            Rectangle::new([(x - GROUPED_BAR_WIDTH, 0.0), (x, *male)], MALE.mix(0.8).filled())
        }))?
        .label("Male")
        .legend(|(x, y)| Rectangle::new([(x, y - 10), (x + 28, y + 10)], MALE.filled()));
    chart
        .draw_series(totals.iter().enumerate().map(|(i, (_, female))| {
            let x = i as f64;
            Rectangle::new([(x, 0.0), (x + GROUPED_BAR_WIDTH, *female)], FEMALE.mix(0.8).filled())
        }))?
        .label("Female")
        .legend(|(x, y)| Rectangle::new([(x, y - 10), (x + 28, y + 10)], FEMALE.filled()));

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.85))
        .border_style(BLACK)
        .label_font((FONT, 26))
        .draw()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::*;
    use rstest::rstest;
    use tempfile::TempDir;

    #[test]
    fn gradient_spans_anchor_colours() {
        assert_eq!(gradient_color(0, 15), GRADIENT[0]);
        assert_eq!(gradient_color(7, 15), GRADIENT[1]);
        assert_eq!(gradient_color(14, 15), GRADIENT[2]);
        assert_eq!(gradient_color(0, 1), GRADIENT[0]);
    }

    #[rstest]
    #[case::mixed_divisions(MIXED_DIVISIONS, 15)]
    #[case::truncated_ranking(MIXED_DIVISIONS, 3)]
    #[case::single_row(SINGLE_ROW, 15)]
    #[case::single_division(SINGLE_DIVISION, 15)]
    #[case::empty(EMPTY, 15)]
    #[case::no_males(NO_MALES, 15)]
    fn draws_every_table_shape(#[case] rows: &[[&str; 6]], #[case] top_n: usize) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(ChartKind::Bar.file_name());
        let table = cleaned_table(rows);

        draw(&table, top_n, &path).unwrap();
        assert!(path.is_file());
    }
}
