//! Box-and-whisker plots.

use super::FigureStyle;
use crate::utils::{quantile_sorted, sorted};
use anyhow::Result;
use plotters::prelude::*;
use std::path::Path;

const MEDIAN_COLOR: RGBColor = RGBColor(255, 127, 14);

/// Whisker reach as a multiple of the interquartile range.
pub const WHISKER_IQR: f64 = 1.5;

/// Five-number summary with 1.5×IQR whiskers and the points beyond them.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxStats {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    /// Smallest value at or above `q1 - 1.5 * iqr`
    pub whisker_low: f64,
    /// Largest value at or below `q3 + 1.5 * iqr`
    pub whisker_high: f64,
    pub outliers: Vec<f64>,
}

impl BoxStats {
    /// `None` when there are no values.
    pub fn compute(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let data = sorted(values);
        let q1 = quantile_sorted(&data, 0.25);
        let median = quantile_sorted(&data, 0.5);
        let q3 = quantile_sorted(&data, 0.75);
        let iqr = q3 - q1;
        let low_fence = q1 - WHISKER_IQR * iqr;
        let high_fence = q3 + WHISKER_IQR * iqr;

        // q1 and q3 lie inside the fences, so both searches find a value
        let whisker_low = data
            .iter()
            .copied()
            .find(|v| *v >= low_fence)
            .unwrap_or(q1);
        let whisker_high = data
            .iter()
            .rev()
            .copied()
            .find(|v| *v <= high_fence)
            .unwrap_or(q3);

        let outliers = data
            .iter()
            .copied()
            .filter(|v| *v < low_fence || *v > high_fence)
            .collect();

        Some(Self {
            q1,
            median,
            q3,
            whisker_low,
            whisker_high,
            outliers,
        })
    }

    /// Vertical extent of everything drawn, padded by 5% on each side.
    fn y_range(&self) -> (f64, f64) {
        let lo = self
            .outliers
            .iter()
            .copied()
            .fold(self.whisker_low, f64::min);
        let hi = self
            .outliers
            .iter()
            .copied()
            .fold(self.whisker_high, f64::max);
        let pad = if hi > lo { (hi - lo) * 0.05 } else { 0.5 };
        (lo - pad, hi + pad)
    }
}

/// Draw `stats` for `column` into a PNG at `path`.
pub fn draw_boxplot(path: &Path, column: &str, stats: &BoxStats, style: &FigureStyle) -> Result<()> {
    let root = BitMapBackend::new(path, style.small_figure).into_drawing_area();
    root.fill(&WHITE)?;

    let (y_lo, y_hi) = stats.y_range();
    let mut chart = ChartBuilder::on(&root)
        .caption(format!("Boxplot of {}", column), (style.font, 24))
        .margin(15)
        .x_label_area_size(30)
        .y_label_area_size(60)
        .build_cartesian_2d(0f64..2f64, y_lo..y_hi)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(0)
        .y_desc(column)
        .label_style((style.font, 14))
        .draw()?;

    let (left, right) = (0.75, 1.25);
    let (cap_left, cap_right) = (0.875, 1.125);
    let line = BLACK.stroke_width(1);

    chart.draw_series(std::iter::once(Rectangle::new(
        [(left, stats.q1), (right, stats.q3)],
        line,
    )))?;
    chart.draw_series(std::iter::once(PathElement::new(
        vec![(left, stats.median), (right, stats.median)],
        MEDIAN_COLOR.stroke_width(2),
    )))?;

    // Whiskers and caps
    chart.draw_series(
        [
            vec![(1.0, stats.q1), (1.0, stats.whisker_low)],
            vec![(1.0, stats.q3), (1.0, stats.whisker_high)],
            vec![(cap_left, stats.whisker_low), (cap_right, stats.whisker_low)],
            vec![(cap_left, stats.whisker_high), (cap_right, stats.whisker_high)],
        ]
        .into_iter()
        .map(|points| PathElement::new(points, line)),
    )?;

    chart.draw_series(
        stats
            .outliers
            .iter()
            .map(|v| Circle::new((1.0, *v), 3, line)),
    )?;

    root.present()?;
    Ok(())
}
