//! Correlation heatmap with a colour bar.

use super::FigureStyle;
use super::colormap::rdbu_r;
use crate::analyzer::CorrelationMatrix;
use anyhow::{Result, bail};
use plotters::coord::Shift;
use plotters::coord::ranged1d::SegmentValue;
use plotters::prelude::*;
use std::path::Path;

/// Width of the colour bar strip on the right, in pixels.
const COLOR_BAR_WIDTH: u32 = 180;

/// Number of bands the colour bar is drawn with.
const COLOR_BAR_STEPS: usize = 200;

/// Draw `matrix` into a PNG at `path`. Row 0 is at the top.
pub fn draw_heatmap(path: &Path, matrix: &CorrelationMatrix, style: &FigureStyle) -> Result<()> {
    let n = matrix.len();
    if n < 2 {
        bail!("Correlation heatmap needs at least two columns, got {}", n);
    }

    let (width, height) = style.large_figure;
    let root = BitMapBackend::new(path, style.large_figure).into_drawing_area();
    root.fill(&WHITE)?;

    let root = root.titled("Correlation Heatmap", (style.font, 28))?;
    let (cells_area, bar_area) = root.split_horizontally(width.saturating_sub(COLOR_BAR_WIDTH));

    let last = n as i32 - 1;
    let label_area = (height / 5).max(80);
    let mut chart = ChartBuilder::on(&cells_area)
        .margin(15)
        .x_label_area_size(label_area)
        .y_label_area_size(label_area)
        .build_cartesian_2d((0..last).into_segmented(), (0..last).into_segmented())?;

    let names = &matrix.columns;
    let column_label = |value: &SegmentValue<i32>| match value {
        SegmentValue::CenterOf(i) => names.get(*i as usize).cloned().unwrap_or_default(),
        _ => String::new(),
    };
    // y runs bottom-up, rows are listed top-down
    let row_label = |value: &SegmentValue<i32>| match value {
        SegmentValue::CenterOf(i) => names
            .get((last - *i) as usize)
            .cloned()
            .unwrap_or_default(),
        _ => String::new(),
    };

    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(n)
        .y_labels(n)
        .x_label_formatter(&column_label)
        .y_label_formatter(&row_label)
        .x_label_style(
            (style.font, 14)
                .into_font()
                .transform(FontTransform::Rotate90),
        )
        .y_label_style((style.font, 14))
        .draw()?;

    chart.draw_series((0..n).flat_map(|row| {
        (0..n).map(move |col| {
            let y = last - row as i32;
            let x = col as i32;
            Rectangle::new(
                [
                    (SegmentValue::Exact(x), SegmentValue::Exact(y)),
                    (SegmentValue::Exact(x + 1), SegmentValue::Exact(y + 1)),
                ],
                rdbu_r(matrix.get(row, col)).filled(),
            )
        })
    }))?;

    draw_color_bar(&bar_area, style)?;

    root.present()?;
    Ok(())
}

fn draw_color_bar(area: &DrawingArea<BitMapBackend<'_>, Shift>, style: &FigureStyle) -> Result<()> {
    let mut bar = ChartBuilder::on(area)
        .margin_top(15)
        .margin_bottom(60)
        .margin_left(10)
        .margin_right(10)
        .right_y_label_area_size(50)
        .build_cartesian_2d(0f64..1f64, -1f64..1f64)?;

    bar.configure_mesh()
        .disable_mesh()
        .x_labels(0)
        .y_labels(9)
        .label_style((style.font, 12))
        .draw()?;

    let step = 2.0 / COLOR_BAR_STEPS as f64;
    bar.draw_series((0..COLOR_BAR_STEPS).map(|i| {
        let lo = -1.0 + step * i as f64;
        Rectangle::new([(0.0, lo), (1.0, lo + step)], rdbu_r(lo + step / 2.0).filled())
    }))?;

    Ok(())
}
