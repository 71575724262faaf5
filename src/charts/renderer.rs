//! Static Chart Renderer
//! Draws a `Figure` with plotters, either into an SVG string or onto disk.
//!
//! Layout:
//! 1. Title centered above the plot area
//! 2. Mesh with axis descriptions, categorical x ticks (optionally rotated)
//! 3. Bars, or a line with circle markers

use crate::charts::figure::{Axes, Figure, PlotKind};
use crate::error::{ReportError, Result};
use log::info;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontTransform;
use std::path::Path;

const BAR_COLOR: RGBColor = RGBColor(52, 152, 219); // Blue
const LINE_COLOR: RGBColor = RGBColor(231, 76, 60); // Red
const FONT: &str = "sans-serif";

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    pub fn render_svg(figure: &Figure) -> Result<String> {
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, (figure.width, figure.height))
                .into_drawing_area();
            Self::draw(figure, &root)?;
            root.present().map_err(render_error)?;
        }
        Ok(svg)
    }

    pub fn save(figure: &Figure, path: &Path) -> Result<()> {
        let size = (figure.width, figure.height);
        let is_svg = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("svg"));

        if is_svg {
            let root = SVGBackend::new(path, size).into_drawing_area();
            Self::draw(figure, &root)?;
            root.present().map_err(render_error)?;
        } else {
            let root = BitMapBackend::new(path, size).into_drawing_area();
            Self::draw(figure, &root)?;
            root.present().map_err(render_error)?;
        }

        info!("Saved chart '{}' to {}", figure.title(), path.display());
        Ok(())
    }

    fn draw<DB: DrawingBackend>(figure: &Figure, root: &DrawingArea<DB, Shift>) -> Result<()> {
        root.fill(&WHITE).map_err(render_error)?;

        let panels = root.split_evenly((figure.axes().len().max(1), 1));
        for (axes, area) in figure.axes().iter().zip(panels.iter()) {
            Self::draw_axes(axes, area)?;
        }
        Ok(())
    }

    fn draw_axes<DB: DrawingBackend>(axes: &Axes, area: &DrawingArea<DB, Shift>) -> Result<()> {
        let n = axes.len().max(1);
        let (y_min, y_max) = axes.y_range();
        let x_label_area = if axes.rotate_x_ticks { 90 } else { 50 };

        let mut chart = ChartBuilder::on(area)
            .caption(&axes.title, (FONT, 22))
            .margin(15)
            .x_label_area_size(x_label_area)
            .y_label_area_size(70)
            .build_cartesian_2d((0..n).into_segmented(), y_min..y_max)
            .map_err(render_error)?;

        let ticks = axes.x_ticks.clone();
        let formatter = move |v: &SegmentValue<usize>| match v {
            SegmentValue::CenterOf(i) => ticks.get(*i).cloned().unwrap_or_default(),
            _ => String::new(),
        };
        let tick_style = if axes.rotate_x_ticks {
            (FONT, 12).into_font().transform(FontTransform::Rotate90)
        } else {
            (FONT, 12).into_font()
        };

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_desc(axes.x_label.as_str())
            .y_desc(axes.y_label.as_str())
            .x_labels(n)
            .x_label_formatter(&formatter)
            .x_label_style(tick_style)
            .draw()
            .map_err(render_error)?;

        match axes.kind {
            PlotKind::Bar => {
                chart
                    .draw_series(
                        Histogram::vertical(&chart)
                            .style(BAR_COLOR.filled())
                            .margin(8)
                            .data(axes.values.iter().enumerate().map(|(i, v)| (i, *v))),
                    )
                    .map_err(render_error)?;
            }
            PlotKind::Line => {
                let points: Vec<(SegmentValue<usize>, f64)> = axes
                    .values
                    .iter()
                    .enumerate()
                    .map(|(i, v)| (SegmentValue::CenterOf(i), *v))
                    .collect();
                chart
                    .draw_series(LineSeries::new(points.clone(), LINE_COLOR.stroke_width(2)))
                    .map_err(render_error)?;
                chart
                    .draw_series(
                        points
                            .into_iter()
                            .map(|p| Circle::new(p, 4, LINE_COLOR.filled())),
                    )
                    .map_err(render_error)?;
            }
        }
        Ok(())
    }
}

fn render_error(err: impl std::fmt::Display) -> ReportError {
    ReportError::Render(err.to_string())
}
