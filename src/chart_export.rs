//! Chart export to PNG (plotters bitmap) and SVG (plotters svg).

use color_eyre::eyre::eyre;
use color_eyre::Result;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::{Path, PathBuf};

use crate::chart_data::{format_axis_label, LineChartData};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartExportFormat {
    Png,
    Svg,
}

impl ChartExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Svg => "svg",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Png => "PNG",
            Self::Svg => "SVG",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ChartExportOptions {
    pub title: Option<String>,
    pub y_label: String,
    pub y_from_zero: bool,
}

/// `<dir>/<group>.<ext>`, with characters unsafe in file names replaced.
pub fn default_export_path(dir: &Path, group: &str, format: ChartExportFormat) -> PathBuf {
    let stem: String = group
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    let stem = if stem.is_empty() { "chart".to_string() } else { stem };
    dir.join(format!("{}.{}", stem, format.extension()))
}

pub fn write_chart(
    path: &Path,
    format: ChartExportFormat,
    data: &LineChartData,
    options: &ChartExportOptions,
    size: (u32, u32),
) -> Result<()> {
    match format {
        ChartExportFormat::Png => write_chart_png(path, data, options, size),
        ChartExportFormat::Svg => write_chart_svg(path, data, options, size),
    }
}

/// Write line chart to PNG. Size is (width, height) in pixels.
pub fn write_chart_png(
    path: &Path,
    data: &LineChartData,
    options: &ChartExportOptions,
    size: (u32, u32),
) -> Result<()> {
    ensure_data(data)?;
    let root = BitMapBackend::new(path, size).into_drawing_area();
    draw_line_chart(&root, data, options)
}

pub fn write_chart_svg(
    path: &Path,
    data: &LineChartData,
    options: &ChartExportOptions,
    size: (u32, u32),
) -> Result<()> {
    ensure_data(data)?;
    let root = SVGBackend::new(path, size).into_drawing_area();
    draw_line_chart(&root, data, options)
}

fn ensure_data(data: &LineChartData) -> Result<()> {
    if data.is_empty() {
        return Err(eyre!("No data to export"));
    }
    Ok(())
}

const SERIES_COLORS: [RGBColor; 7] = [
    CYAN,
    MAGENTA,
    GREEN,
    YELLOW,
    BLUE,
    RED,
    RGBColor(128, 255, 255),
];

fn draw_line_chart<DB>(
    root: &DrawingArea<DB, Shift>,
    data: &LineChartData,
    options: &ChartExportOptions,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;
    let bounds = data.bounds(options.y_from_zero);

    let mut binding = ChartBuilder::on(root);
    let builder = binding.margin(30);
    let builder = match options.title.as_deref().filter(|s| !s.is_empty()) {
        Some(t) => builder.caption(t, ("sans-serif", 20)),
        None => builder,
    };
    let mut chart = builder
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(bounds.x_min..bounds.x_max, bounds.y_min..bounds.y_max)?;

    let x_formatter = |v: &f64| data.period_label(*v).unwrap_or_default().to_string();
    let y_formatter = |v: &f64| format_axis_label(*v);
    chart
        .configure_mesh()
        .x_labels(data.periods.len().clamp(2, 12))
        .x_desc("Period")
        .y_desc(options.y_label.as_str())
        .x_label_formatter(&x_formatter)
        .y_label_formatter(&y_formatter)
        .draw()?;

    for (idx, s) in data.series.iter().enumerate() {
        if s.points.is_empty() {
            continue;
        }
        let color = SERIES_COLORS[idx % SERIES_COLORS.len()];
        chart
            .draw_series(LineSeries::new(s.points.iter().copied(), color.stroke_width(2)))?
            .label(s.name.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}
