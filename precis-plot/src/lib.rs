//! Precis Plot - error chart
//!
//! Draws the truncation and rounding error series of an experiment on a
//! shared logarithmic y-axis and writes the chart as SVG.

use plotters::coord::Shift;
use plotters::prelude::*;
use precis::{Method, Outcome, Series};
use std::ops::Range;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum PlotError {
    #[error("No positive error values to plot on a log axis")]
    NothingToPlot,

    #[error("Chart backend error: {0}")]
    Backend(String),
}

fn backend<E: std::fmt::Display>(err: E) -> PlotError {
    PlotError::Backend(err.to_string())
}

/// Output settings
#[derive(Debug, Clone)]
pub struct ChartOptions {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    pub title: String,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            path: PathBuf::from("precision_error.svg"),
            width: 1000,
            height: 600,
            title: "Sphere Volume Calculation: Error by Pi Precision".to_string(),
        }
    }
}

impl ChartOptions {
    pub fn with_path(mut self, path: impl AsRef<Path>) -> Self {
        self.path = path.as_ref().to_path_buf();
        self
    }
}

/// One plotted line: (digit count, error) in f64
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub method: Method,
    pub points: Vec<(f64, f64)>,
}

impl ChartSeries {
    /// Zero errors have no place on a log axis and are dropped.
    pub fn from_series(series: &Series) -> Self {
        let mut points = Vec::with_capacity(series.points.len());
        for p in &series.points {
            match p.error.to_f64() {
                Some(e) if e > 0.0 => points.push((p.digits as f64, e)),
                _ => warn!(digits = p.digits, method = series.method.label(), "skipping non-positive error"),
            }
        }
        Self { method: series.method, points }
    }
}

/// Both series of an outcome, truncation first
pub fn chart_series(outcome: &Outcome) -> Vec<ChartSeries> {
    Method::ALL
        .iter()
        .map(|&m| ChartSeries::from_series(outcome.series(m)))
        .collect()
}

/// Axis ranges: x padded by 5 digits, y widened by a decade each side
pub fn chart_bounds(series: &[ChartSeries]) -> Result<(Range<f64>, Range<f64>), PlotError> {
    let points = series.iter().flat_map(|s| s.points.iter());
    let mut x_min = f64::INFINITY;
    let mut x_max = f64::NEG_INFINITY;
    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;
    for &(x, y) in points {
        x_min = x_min.min(x);
        x_max = x_max.max(x);
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }
    if !y_min.is_finite() {
        return Err(PlotError::NothingToPlot);
    }
    Ok(((x_min - 5.0)..(x_max + 5.0), (y_min / 10.0)..(y_max * 10.0)))
}

/// Render the outcome to `options.path`, returning the written path
pub fn render_chart(outcome: &Outcome, options: &ChartOptions) -> Result<PathBuf, PlotError> {
    let series = chart_series(outcome);
    let bounds = chart_bounds(&series)?;

    let root = SVGBackend::new(&options.path, (options.width, options.height)).into_drawing_area();
    draw(&root, &series, bounds, &options.title)?;
    root.present().map_err(backend)?;

    info!(path = %options.path.display(), "chart written");
    Ok(options.path.clone())
}

fn style_of(method: Method) -> RGBColor {
    match method {
        Method::Truncated => RED,
        Method::Rounded => BLUE,
    }
}

fn draw<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    series: &[ChartSeries],
    (x_range, y_range): (Range<f64>, Range<f64>),
    title: &str,
) -> Result<(), PlotError> {
    root.fill(&WHITE).map_err(backend)?;

    let mut chart = ChartBuilder::on(root)
        .caption(title, ("sans-serif", 24).into_font())
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(80)
        .build_cartesian_2d(x_range, y_range.log_scale())
        .map_err(backend)?;

    chart
        .configure_mesh()
        .x_desc("Decimal Places of Pi Used")
        .y_desc("Error Magnitude (Difference from True Volume)")
        .y_label_formatter(&|v| format!("{:.0e}", v))
        .bold_line_style(BLACK.mix(0.3))
        .light_line_style(BLACK.mix(0.1))
        .draw()
        .map_err(backend)?;

    for line in series {
        let color = style_of(line.method);
        let points = line.points.clone();

        match line.method {
            Method::Truncated => {
                chart
                    .draw_series(LineSeries::new(points.clone(), color.stroke_width(2)))
                    .map_err(backend)?
                    .label(line.method.series_label())
                    .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
                chart
                    .draw_series(PointSeries::of_element(points, 5, color.filled(), &|c, size, st| {
                        EmptyElement::at(c) + Circle::new((0, 0), size, st)
                    }))
                    .map_err(backend)?;
            }
            Method::Rounded => {
                chart
                    .draw_series(DashedLineSeries::new(points.clone(), 10, 6, color.stroke_width(2)))
                    .map_err(backend)?
                    .label(line.method.series_label())
                    .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
                chart
                    .draw_series(PointSeries::of_element(points, 5, color.filled(), &|c, size, st| {
                        EmptyElement::at(c) + Rectangle::new([(-size, -size), (size, size)], st)
                    }))
                    .map_err(backend)?;
            }
        }
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(backend)?;

    Ok(())
}
