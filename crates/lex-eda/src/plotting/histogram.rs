//! Equal-width histograms.

use super::FigureStyle;
use anyhow::Result;
use plotters::prelude::*;
use std::path::Path;

/// Bar fill shared by every histogram.
const BAR_COLOR: RGBColor = RGBColor(31, 119, 180);

/// Bucketed counts over `[lower, lower + width * counts.len()]`.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBins {
    pub lower: f64,
    pub width: f64,
    pub counts: Vec<usize>,
}

impl HistogramBins {
    /// Bucket `values` into `bins` equal-width buckets spanning their range.
    ///
    /// A constant column spans `[v - 0.5, v + 0.5]`. Every bucket is
    /// half-open except the last, which also holds the maximum. Returns
    /// `None` when there are no values or no buckets.
    pub fn compute(values: &[f64], bins: usize) -> Option<Self> {
        if values.is_empty() || bins == 0 {
            return None;
        }

        let (mut lower, mut upper) = values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(*v), hi.max(*v))
            });
        if lower == upper {
            lower -= 0.5;
            upper += 0.5;
        }

        let width = (upper - lower) / bins as f64;
        let mut counts = vec![0usize; bins];
        for value in values {
            let idx = (((value - lower) / width).floor() as usize).min(bins - 1);
            counts[idx] += 1;
        }

        Some(Self {
            lower,
            width,
            counts,
        })
    }

    pub fn upper(&self) -> f64 {
        self.edge(self.counts.len())
    }

    /// Left edge of bucket `idx`.
    pub fn edge(&self, idx: usize) -> f64 {
        self.lower + self.width * idx as f64
    }

    pub fn max_count(&self) -> usize {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

/// Draw `bins` for `column` into a PNG at `path`.
pub fn draw_histogram(
    path: &Path,
    column: &str,
    bins: &HistogramBins,
    style: &FigureStyle,
) -> Result<()> {
    let root = BitMapBackend::new(path, style.small_figure).into_drawing_area();
    root.fill(&WHITE)?;

    let y_max = (bins.max_count() as f64 * 1.05).max(1.0);
    let mut chart = ChartBuilder::on(&root)
        .caption(format!("Histogram of {}", column), (style.font, 24))
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d(bins.lower..bins.upper(), 0f64..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc(column)
        .y_desc("Frequency")
        .label_style((style.font, 14))
        .draw()?;

    chart.draw_series(bins.counts.iter().enumerate().map(|(i, count)| {
        Rectangle::new(
            [(bins.edge(i), 0.0), (bins.edge(i + 1), *count as f64)],
            BAR_COLOR.mix(0.7).filled(),
        )
    }))?;
    chart.draw_series(bins.counts.iter().enumerate().map(|(i, count)| {
        Rectangle::new(
            [(bins.edge(i), 0.0), (bins.edge(i + 1), *count as f64)],
            BLACK.stroke_width(1),
        )
    }))?;

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_bins_cover_all_values() {
        let values: Vec<f64> = (0..100).map(|i| i as f64 * 0.37).collect();
        let bins = HistogramBins::compute(&values, 30).unwrap();

        assert_eq!(bins.counts.len(), 30);
        assert_eq!(bins.total(), 100);
        assert_eq!(bins.lower, 0.0);
        assert!((bins.upper() - 99.0 * 0.37).abs() < 1e-9);
    }

    #[test]
    fn test_last_bin_closed() {
        let bins = HistogramBins::compute(&[0.0, 1.0, 2.0, 3.0, 4.0], 4).unwrap();
        assert_eq!(bins.counts, vec![1, 1, 1, 2]);
    }

    #[test]
    fn test_constant_column() {
        let bins = HistogramBins::compute(&[5.0, 5.0, 5.0], 30).unwrap();
        assert_eq!(bins.lower, 4.5);
        assert!((bins.upper() - 5.5).abs() < 1e-9);
        assert_eq!(bins.total(), 3);
        assert_eq!(bins.max_count(), 3);
    }

    #[test]
    fn test_empty() {
        assert!(HistogramBins::compute(&[], 30).is_none());
        assert!(HistogramBins::compute(&[1.0], 0).is_none());
    }
}
