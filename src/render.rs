use crate::error::LatencyError;
use crate::min_and_max;
use log::{debug, warn};
use plotters::coord::ranged1d::{DefaultFormatting, KeyPointHint, Ranged};
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use std::ops::Range;
use std::path::Path;

pub const PLOT_SIZE: (u32, u32) = (1000, 600);
pub const PLOT_TITLE: &str = "Timestamp - Latency";

/// relative margin around the data range of both axes
const AXIS_MARGIN: f64 = 0.04;
const LINE_COLOR: RGBColor = RGBColor(0, 128, 0);
const LINE_WIDTH: u32 = 2;
const MARKER_RADIUS: u32 = 7;

/// Draws the latency series to a png at `fout`, overwriting it.
/// Mismatched lengths are cut to the shorter sequence.
pub fn render(time: &[f64], latency: &[f64], fout: &Path) -> Result<(), LatencyError> {
    let len = time.len().min(latency.len());
    if time.len() != latency.len() {
        warn!(
            "{} time values but {} latency values, plotting the first {}",
            time.len(),
            latency.len(),
            len
        );
    }
    if len == 0 {
        return Err(LatencyError::EmptySeries);
    }
    draw(&time[..len], &latency[..len], fout).map_err(|e| LatencyError::Render(e.to_string()))?;
    debug!("plotted {} samples to {}", len, fout.display());
    Ok(())
}

/// Range of the finite values widened by the margin;
/// a zero-width range is widened by 0.5 on each side.
pub fn axis_bounds(values: &[f64]) -> (f64, f64) {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    let (min, max) = min_and_max(&finite[..]).unwrap_or((0., 0.));
    let span = max - min;
    let pad = if span > 0. { span * AXIS_MARGIN } else { 0.5 };
    (min - pad, max + pad)
}

/// Linear time axis with a key point, hence a tick, on every sample
pub struct SampleAxis {
    coord: RangedCoordf64,
    samples: Vec<f64>,
}

impl SampleAxis {
    pub fn new(samples: &[f64]) -> SampleAxis {
        let (xmin, xmax) = axis_bounds(samples);
        SampleAxis {
            coord: (xmin..xmax).into(),
            samples: samples.to_vec(),
        }
    }
}

impl Ranged for SampleAxis {
    type FormatOption = DefaultFormatting;
    type ValueType = f64;

    fn map(&self, value: &f64, limit: (i32, i32)) -> i32 {
        self.coord.map(value, limit)
    }

    fn key_points<Hint: KeyPointHint>(&self, _hint: Hint) -> Vec<f64> {
        self.samples.clone()
    }

    fn range(&self) -> Range<f64> {
        self.coord.range()
    }
}

fn draw(time: &[f64], latency: &[f64], fout: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let (ymin, ymax) = axis_bounds(latency);
    let root = BitMapBackend::new(fout, PLOT_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption(PLOT_TITLE, ("sans-serif", 40))
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(100)
        .build_cartesian_2d(SampleAxis::new(time), ymin..ymax)?;
    chart
        .configure_mesh()
        .light_line_style(&TRANSPARENT)
        .bold_line_style(RGBColor(150, 150, 150).stroke_width(1))
        .set_all_tick_mark_size(4)
        .label_style(("sans-serif", 16))
        .axis_desc_style(("sans-serif", 28))
        .x_desc("[sec]")
        .y_desc("[usec]")
        .x_labels(time.len())
        .x_label_formatter(&|x: &f64| format!("{:.3}", x))
        .y_label_formatter(&|y: &f64| format!("{:.0}", y))
        .draw()?;

    let points = || time.iter().zip(latency.iter()).map(|(x, y)| (*x, *y));
    chart.draw_series(LineSeries::new(
        points(),
        LINE_COLOR.stroke_width(LINE_WIDTH),
    ))?;
    chart.draw_series(points().map(|p| Circle::new(p, MARKER_RADIUS, LINE_COLOR.filled())))?;
    root.present()?;
    Ok(())
}
