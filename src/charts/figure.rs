//! Chart Figure Handle
//! In-memory description of a chart; rendering is left to the caller.

use crate::charts::renderer::StaticChartRenderer;
use crate::error::Result;
use std::path::Path;

pub const DEFAULT_WIDTH: u32 = 800;
pub const DEFAULT_HEIGHT: u32 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlotKind {
    Bar,
    /// Points joined by a line, with a marker on each point.
    Line,
}

/// A single plot area: one series over categorical x ticks.
#[derive(Debug, Clone, PartialEq)]
pub struct Axes {
    pub kind: PlotKind,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub x_ticks: Vec<String>,
    pub values: Vec<f64>,
    pub rotate_x_ticks: bool,
}

impl Axes {
    /// Number of plotted values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when there is nothing to plot.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Y range covering every value and the zero baseline, padded by 10%.
    pub fn y_range(&self) -> (f64, f64) {
        let (min, max) = self
            .values
            .iter()
            .filter(|v| v.is_finite())
            .fold((0.0_f64, 0.0_f64), |(lo, hi), &v| (lo.min(v), hi.max(v)));
        if min == max {
            return (min - 1.0, max + 1.0);
        }
        let pad = (max - min) * 0.1;
        (if min < 0.0 { min - pad } else { min }, max + pad)
    }
}

/// Renderable chart handle returned by the plot functions.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub width: u32,
    pub height: u32,
    axes: Vec<Axes>,
}

impl Figure {
    pub fn new(axes: Axes) -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            axes: vec![axes],
        }
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn axes(&self) -> &[Axes] {
        &self.axes
    }

    pub fn title(&self) -> &str {
        self.axes.first().map(|a| a.title.as_str()).unwrap_or_default()
    }

    /// Render to an SVG document held in memory.
    pub fn render_svg(&self) -> Result<String> {
        StaticChartRenderer::render_svg(self)
    }

    /// Write the figure to disk: `.svg` as SVG, anything else as a PNG bitmap.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        StaticChartRenderer::save(self, path.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn axes(values: Vec<f64>) -> Axes {
        Axes {
            kind: PlotKind::Bar,
            title: "t".into(),
            x_label: "x".into(),
            y_label: "y".into(),
            x_ticks: values.iter().map(|v| v.to_string()).collect(),
            values,
            rotate_x_ticks: false,
        }
    }

    #[test]
    fn test_y_range_includes_zero() {
        assert_eq!(axes(vec![10.0, 20.0]).y_range(), (0.0, 22.0));
        assert_eq!(axes(vec![-10.0, 10.0]).y_range(), (-12.0, 12.0));
        assert_eq!(axes(vec![]).y_range(), (-1.0, 1.0));
    }

    #[test]
    fn test_figure_exposes_axes() {
        let fig = Figure::new(axes(vec![1.0])).with_size(640, 480);
        assert_eq!(fig.axes().len(), 1);
        assert_eq!(fig.title(), "t");
        assert_eq!((fig.width, fig.height), (640, 480));
    }
}
